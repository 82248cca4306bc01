use thiserror::Error;

/// Errors surfaced by [`crate::ConversationClient`].
#[derive(Error, Debug)]
pub enum ChatError {
    /// The completions endpoint answered with a non-success status.
    #[error("completions API returned status {status}")]
    Status { status: u16 },

    /// The request never completed: connection, TLS, or body-read failure.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A record in the response body did not have the expected shape.
    #[error("malformed completion response: {message}")]
    Protocol { message: String },
}

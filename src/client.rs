//! Conversation client for the OpenAI completions endpoint.

use serde::Serialize;
use tracing::{debug, warn};

use crate::{error::ChatError, history::History, persona, stream};

pub const DEFAULT_MODEL: &str = "text-davinci-003";
pub const API_BASE: &str = "https://api.openai.com/v1";
const COMPLETIONS_ENDPOINT: &str = "/completions";

const TEMPERATURE: f32 = 0.6;
const MAX_TOKENS: u32 = 1024;
const TOP_P: f32 = 1.0;
/// `\n\n\n` closes a turn, `<|im_end|>` is the model's own end marker.
const STOP_SEQUENCES: [&str; 2] = ["\n\n\n", "<|im_end|>"];

#[derive(Debug, Serialize)]
struct CompletionRequest {
    model: &'static str,
    temperature: f32,
    max_tokens: u32,
    prompt: String,
    frequency_penalty: f32,
    presence_penalty: f32,
    top_p: f32,
    stop: [&'static str; 2],
    stream: bool,
}

impl CompletionRequest {
    fn new(prompt: String, stream: bool) -> Self {
        Self {
            model: DEFAULT_MODEL,
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            prompt,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
            top_p: TOP_P,
            stop: STOP_SEQUENCES,
            stream,
        }
    }
}

/// A single rolling conversation against the completions endpoint.
///
/// Holds the API credential, the persona preamble (date-stamped at
/// construction), and the history of completed turns. Turn methods take
/// `&mut self`: callers serialize turns per client, enforced by the borrow
/// checker.
pub struct ConversationClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
    base_prompt: String,
    history: History,
}

impl ConversationClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: API_BASE.to_string(),
            client: reqwest::Client::new(),
            base_prompt: persona::base_prompt(),
            history: History::default(),
        }
    }

    /// Point the client at a different API base, e.g. a mock server in tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Completed turns currently rendered into prompt context, oldest first.
    pub fn history(&self) -> &[String] {
        self.history.entries()
    }

    /// Send one user turn and return the assistant's reply.
    ///
    /// Requests streamed output and assembles the reply from the
    /// line-delimited body. On success the turn is appended to history; a
    /// failed turn is never appended. Prompt truncation runs before the
    /// request goes out, so a turn that ultimately fails can still have
    /// shrunk the history.
    pub async fn send_turn(&mut self, text: &str) -> Result<String, ChatError> {
        let prompt = self.history.render_prompt(&self.base_prompt, text);
        let body = self.post_completion(CompletionRequest::new(prompt, true)).await?;

        let reply = stream::collect_reply(&body)?;
        self.history.push_turn(text, &reply);
        Ok(reply)
    }

    /// Like [`send_turn`](Self::send_turn), but with `stream: false`: the
    /// endpoint answers with one JSON completion object instead of the
    /// line-delimited format.
    pub async fn send_turn_buffered(&mut self, text: &str) -> Result<String, ChatError> {
        let prompt = self.history.render_prompt(&self.base_prompt, text);
        let body = self.post_completion(CompletionRequest::new(prompt, false)).await?;

        let reply = stream::extract_completion(&body)?;
        self.history.push_turn(text, &reply);
        Ok(reply)
    }

    async fn post_completion(&self, request: CompletionRequest) -> Result<String, ChatError> {
        let url = format!("{}{}", self.base_url, COMPLETIONS_ENDPOINT);
        debug!(
            url = %url,
            prompt_chars = request.prompt.chars().count(),
            stream = request.stream,
            "sending completion request"
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "completions API returned error status");
            return Err(ChatError::Status {
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}

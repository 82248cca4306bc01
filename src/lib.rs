//! # flogchat
//!
//! Minimal chat client for the OpenAI completions API, styled as the
//! "Pepe the Flog" assistant. The client keeps a rolling history of
//! completed turns and replays it as prompt context on every request,
//! dropping the oldest turns once the rendered prompt outgrows its
//! character budget.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use flogchat::ConversationClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut chat = ConversationClient::new("sk-...");
//!     let reply = chat.send_turn("Hello there").await?;
//!     println!("{reply}");
//!     Ok(())
//! }
//! ```
//!
//! A client instance is single-conversation and single-caller: `send_turn`
//! takes `&mut self`, so overlapping turns on one client do not compile.

pub mod client;
pub mod error;

mod history;
mod persona;
mod stream;

pub use client::ConversationClient;
pub use error::ChatError;

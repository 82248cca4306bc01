//! Parsing of the line-delimited completion response.
//!
//! With `stream: true` the completions endpoint answers with newline
//! delimited records: content lines are prefixed `data: ` and carry a JSON
//! chunk, and the stream closes with a `data: [DONE]` sentinel. The body is
//! read in full before parsing, so this is plain string processing.

use serde::Deserialize;
use tracing::debug;

use crate::error::ChatError;

const DATA_PREFIX: &str = "data: ";
const DONE_SENTINEL: &str = "data: [DONE]";

/// One record of a streamed response, or the whole body of a buffered one.
#[derive(Debug, Deserialize)]
struct Completion {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    text: String,
}

/// Assemble the reply text from a fully-read streaming response body.
pub(crate) fn collect_reply(body: &str) -> Result<String, ChatError> {
    let mut reply = String::new();

    for line in body.trim().split('\n') {
        if line.trim().is_empty() {
            continue;
        }
        let Some(payload) = line.strip_prefix(DATA_PREFIX) else {
            continue;
        };
        if line.ends_with(DONE_SENTINEL) {
            continue;
        }

        let text = first_choice_text(payload)?;
        debug!(chunk = %text, "received completion chunk");
        reply.push_str(&text);
    }

    Ok(reply)
}

/// Extract the reply from a buffered (`stream: false`) response body, a
/// single JSON completion object.
pub(crate) fn extract_completion(body: &str) -> Result<String, ChatError> {
    first_choice_text(body)
}

fn first_choice_text(payload: &str) -> Result<String, ChatError> {
    let completion: Completion =
        serde_json::from_str(payload).map_err(|e| ChatError::Protocol {
            message: format!("invalid completion payload: {e}"),
        })?;

    completion
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.text)
        .ok_or_else(|| ChatError::Protocol {
            message: "completion carried no choices".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(text: &str) -> String {
        format!("data: {}", serde_json::json!({ "choices": [{ "text": text }] }))
    }

    #[test]
    fn chunks_accumulate_in_order() {
        let body = format!("{}\n{}\n{}\ndata: [DONE]\n", chunk("a"), chunk("b"), chunk("c"));
        assert_eq!(collect_reply(&body).unwrap(), "abc");
    }

    #[test]
    fn done_only_body_yields_empty_reply() {
        assert_eq!(collect_reply("data: [DONE]\n").unwrap(), "");
    }

    #[test]
    fn blank_and_foreign_lines_are_skipped() {
        let body = format!("\n   \n: keep-alive comment\n{}\n\ndata: [DONE]\n", chunk("ok"));
        assert_eq!(collect_reply(&body).unwrap(), "ok");
    }

    #[test]
    fn malformed_chunk_is_a_protocol_error() {
        let body = "data: {not json}\n";
        match collect_reply(body) {
            Err(ChatError::Protocol { message }) => {
                assert!(message.contains("invalid completion payload"));
            }
            other => panic!("expected Protocol error, got {other:?}"),
        }
    }

    #[test]
    fn chunk_without_choices_is_a_protocol_error() {
        let body = r#"data: {"choices": []}"#;
        match collect_reply(body) {
            Err(ChatError::Protocol { message }) => {
                assert!(message.contains("no choices"));
            }
            other => panic!("expected Protocol error, got {other:?}"),
        }
    }

    #[test]
    fn buffered_body_parses_single_completion() {
        let body = r#"{"choices": [{"text": "ho"}]}"#;
        assert_eq!(extract_completion(body).unwrap(), "ho");
    }
}

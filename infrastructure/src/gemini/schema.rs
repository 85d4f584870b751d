//! Structured-output schema and response coercion
//!
//! The comment schema is enforced at the protocol boundary: every request
//! carries a `responseSchema`, and the reply body is still validated here
//! before anything reaches the domain. Free-text responses are rejected.

use crate::gemini::error::GeminiApiError;
use serde::Deserialize;
use serde_json::{Value, json};
use troupe_domain::Comment;

/// The `responseSchema` constraining the model to a comment array.
///
/// `time` and `comment` are required; `command` is optional and defaults to
/// the empty string during coercion.
pub fn response_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "time": {
                    "type": "STRING",
                    "description": "The timestamp of the comment in HH:MM:SS.ss format, relative to the video's start.",
                },
                "command": {
                    "type": "STRING",
                    "description": "A Niconico-style command like 'ue pink', 'shita green', etc. Can be empty.",
                },
                "comment": {
                    "type": "STRING",
                    "description": "The content of the comment.",
                },
            },
            "required": ["time", "comment"],
        },
    })
}

/// One element of the model's JSON array, before coercion
#[derive(Debug, Deserialize)]
struct RawComment {
    time: String,
    comment: String,
    #[serde(default)]
    command: String,
}

/// Extract and coerce the comment array from a generateContent reply body.
pub fn parse_comments(body: &str) -> Result<Vec<Comment>, GeminiApiError> {
    let reply: Value = serde_json::from_str(body)
        .map_err(|e| GeminiApiError::MalformedResponse(format!("reply is not JSON: {e}")))?;

    let text = extract_text(&reply)?;

    let raw: Vec<RawComment> = serde_json::from_str(text.trim())
        .map_err(|e| GeminiApiError::MalformedResponse(format!("comment array: {e}")))?;

    Ok(raw
        .into_iter()
        .map(|r| Comment::new(r.time, r.command, r.comment))
        .collect())
}

/// Concatenated text parts of the first candidate.
fn extract_text(reply: &Value) -> Result<String, GeminiApiError> {
    let parts = reply
        .pointer("/candidates/0/content/parts")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            GeminiApiError::MalformedResponse("no candidate content in reply".to_string())
        })?;

    let mut text = String::new();
    for part in parts {
        if let Some(chunk) = part.get("text").and_then(Value::as_str) {
            text.push_str(chunk);
        }
    }

    if text.is_empty() {
        return Err(GeminiApiError::MalformedResponse(
            "candidate carried no text part".to_string(),
        ));
    }
    Ok(text)
}

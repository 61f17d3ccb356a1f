//! Chat response stream parser.
//!
//! The concierge chatbot consumes a server-sent-events stream of
//! `data: {"choices":[{"delta":{"content":"..."}}]}` lines terminated by a
//! `data: [DONE]` sentinel. Network reads arrive in arbitrary chunks, so
//! the parser buffers partial lines across pushes, ignores blank lines and
//! `:` comment lines, and emits a delta per complete data line.

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur while parsing the chat stream.
#[derive(Debug, Error)]
pub enum StreamError {
    /// A data line carried JSON that could not be parsed.
    #[error("Failed to parse stream event: {0}")]
    Parse(String),
}

/// A parsed event from the chat stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatStreamEvent {
    /// A piece of assistant output.
    Delta(String),
    /// The `[DONE]` sentinel; no further events follow.
    Done,
}

#[derive(Debug, Deserialize)]
struct StreamPayload {
    #[serde(default)]
    choices: Vec<StreamChoice>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    #[serde(default)]
    delta: StreamDelta,
}

#[derive(Debug, Default, Deserialize)]
struct StreamDelta {
    #[serde(default)]
    content: Option<String>,
}

/// Incremental SSE line parser.
///
/// Feed raw chunks in read order with [`push`](Self::push); each call
/// returns the events completed by that chunk. A line split across two
/// chunks is held in the buffer until its newline arrives.
#[derive(Debug, Default)]
pub struct ChatStreamParser {
    buffer: String,
}

impl ChatStreamParser {
    /// Create an empty parser.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume a chunk and return the events it completed.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError`] on a malformed JSON data line. The offending
    /// line is consumed, so parsing can continue with the next chunk.
    pub fn push(&mut self, chunk: &str) -> Result<Vec<ChatStreamEvent>, StreamError> {
        self.buffer.push_str(chunk);

        let mut events = Vec::new();
        while let Some(newline) = self.buffer.find('\n') {
            let line: String = self.buffer.drain(..=newline).collect();
            if let Some(event) = Self::parse_line(line.trim_end_matches(['\n', '\r']))? {
                let done = event == ChatStreamEvent::Done;
                events.push(event);
                if done {
                    self.buffer.clear();
                    break;
                }
            }
        }
        Ok(events)
    }

    /// Any buffered partial line (for diagnostics; a well-formed stream
    /// ends with a newline and leaves nothing here).
    #[must_use]
    pub fn remainder(&self) -> &str {
        &self.buffer
    }

    fn parse_line(line: &str) -> Result<Option<ChatStreamEvent>, StreamError> {
        // Blank lines separate events; comment lines are keep-alives.
        if line.is_empty() || line.starts_with(':') {
            return Ok(None);
        }

        let Some(data) = line.strip_prefix("data:") else {
            // Other SSE fields (event:, id:, retry:) carry nothing for us.
            return Ok(None);
        };
        let data = data.trim_start();

        if data == "[DONE]" {
            return Ok(Some(ChatStreamEvent::Done));
        }

        let payload: StreamPayload = serde_json::from_str(data)
            .map_err(|e| StreamError::Parse(e.to_string()))?;

        let delta = payload
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.delta.content);

        Ok(delta.map(ChatStreamEvent::Delta))
    }
}

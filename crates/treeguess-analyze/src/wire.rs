//! Chat-completion request and response shapes.

use serde::{Deserialize, Serialize};

use crate::error::AnalyzeError;

/// Request body sent to the model endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub stream: bool,
}

impl ChatRequest {
    /// A non-streaming request holding one user message with one text part.
    pub fn user_text(model: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: vec![ContentPart::text(text)],
            }],
            stream: false,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: Vec<ContentPart>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContentPart {
    #[serde(rename = "type")]
    pub part_type: String,
    pub text: String,
}

impl ContentPart {
    fn text(text: impl Into<String>) -> Self {
        Self {
            part_type: "text".to_string(),
            text: text.into(),
        }
    }
}

/// Response body returned by the model endpoint.
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl ChatResponse {
    /// Parse a raw body and pull out `choices[0].message.content`.
    pub fn content_of(body: &str) -> Result<String, AnalyzeError> {
        let response: ChatResponse =
            serde_json::from_str(body).map_err(|e| AnalyzeError::Malformed(e.to_string()))?;
        response.into_content()
    }

    /// The first choice's message content.
    pub fn into_content(self) -> Result<String, AnalyzeError> {
        let choice = self
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AnalyzeError::Malformed("response has no choices".to_string()))?;

        choice
            .message
            .content
            .ok_or_else(|| AnalyzeError::Malformed("first choice has no content".to_string()))
    }
}

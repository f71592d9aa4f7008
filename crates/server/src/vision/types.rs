//! Types for the OpenAI-compatible chat-completions API.

use serde::{Deserialize, Serialize};

/// A message in a chat-completions conversation.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    /// The role of the message sender ("system" or "user").
    pub role: String,
    /// The content of the message.
    pub content: MessageContent,
}

impl ChatMessage {
    /// Build a plain-text system message.
    #[must_use]
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: MessageContent::Text(text.into()),
        }
    }

    /// Build a user message carrying text plus one image.
    #[must_use]
    pub fn user_with_image(text: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: MessageContent::Parts(vec![
                ContentPart::Text { text: text.into() },
                ContentPart::ImageUrl {
                    image_url: ImageUrl {
                        url: image_url.into(),
                    },
                },
            ]),
        }
    }
}

/// Content of a message - either plain text or a list of content parts.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum MessageContent {
    /// Simple text content.
    Text(String),
    /// Multiple content parts (for image input).
    Parts(Vec<ContentPart>),
}

/// A content part within a multimodal message.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum ContentPart {
    /// Text content.
    #[serde(rename = "text")]
    Text {
        /// The text content.
        text: String,
    },
    /// Image input, by URL or data URL.
    #[serde(rename = "image_url")]
    ImageUrl {
        /// The image reference.
        image_url: ImageUrl,
    },
}

/// An image reference inside a content part.
#[derive(Debug, Clone, Serialize)]
pub struct ImageUrl {
    /// HTTP(S) URL or `data:` URL of the image.
    pub url: String,
}

/// Structured-output request knob.
#[derive(Debug, Clone, Serialize)]
pub struct ResponseFormat {
    /// Format name; we only ever ask for "json_object".
    #[serde(rename = "type")]
    pub format_type: String,
}

impl ResponseFormat {
    /// Ask the model for a strict JSON object response.
    #[must_use]
    pub fn json_object() -> Self {
        Self {
            format_type: "json_object".to_string(),
        }
    }
}

/// Request body for the chat-completions API.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Model to use (e.g., "gpt-4o-mini").
    pub model: String,
    /// Conversation messages.
    pub messages: Vec<ChatMessage>,
    /// Structured-output mode, to reduce parse failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

/// Response from the chat-completions API.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    /// Generated completions; we only ever read the first.
    pub choices: Vec<Choice>,
}

/// One generated completion.
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    /// The generated message.
    pub message: ResponseMessage,
}

/// The assistant message inside a completion choice.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    /// Text content; absent for refusals or tool-only turns.
    pub content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_with_image_serializes_as_parts() {
        let msg = ChatMessage::user_with_image("Look at this.", "data:image/jpeg;base64,AAAA");
        let json = serde_json::to_value(&msg).expect("serialize");

        assert_eq!(json["role"], "user");
        assert_eq!(json["content"][0]["type"], "text");
        assert_eq!(json["content"][1]["type"], "image_url");
        assert_eq!(
            json["content"][1]["image_url"]["url"],
            "data:image/jpeg;base64,AAAA"
        );
    }

    #[test]
    fn test_system_message_serializes_as_plain_text() {
        let msg = ChatMessage::system("You are a stylist.");
        let json = serde_json::to_value(&msg).expect("serialize");
        assert_eq!(json["content"], "You are a stylist.");
    }

    #[test]
    fn test_response_format_tag() {
        let json = serde_json::to_value(ResponseFormat::json_object()).expect("serialize");
        assert_eq!(json["type"], "json_object");
    }

    #[test]
    fn test_chat_response_deserializes() {
        let json = r#"{
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "{\"verdict\":\"ok\"}"},
                 "finish_reason": "stop"}
            ]
        }"#;

        let response: ChatResponse = serde_json::from_str(json).expect("deserialize");
        assert_eq!(
            response.choices[0].message.content.as_deref(),
            Some("{\"verdict\":\"ok\"}")
        );
    }
}

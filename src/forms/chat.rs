use serde_derive::{Deserialize, Serialize};
use serde_valid::Validate;

pub const MAX_MESSAGE_LENGTH: usize = 4000;

// Counts chars rather than graphemes so combining marks cannot stretch the limit.
fn message_length(message: &String) -> Result<(), serde_valid::validation::Error> {
    let length = message.chars().count();
    if (1..=MAX_MESSAGE_LENGTH).contains(&length) {
        Ok(())
    } else {
        Err(serde_valid::validation::Error::Custom(format!(
            "message must be between 1 and {} characters, got {}",
            MAX_MESSAGE_LENGTH, length
        )))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// Prior turn in the OpenAI-style shape the Gradio chat interface expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryMessage {
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChatForm {
    #[validate(custom(message_length))]
    pub message: String,
    #[serde(default)]
    pub history: Vec<HistoryMessage>,
}

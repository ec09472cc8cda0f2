use serde_derive::{Deserialize, Serialize};

/// One exchange as `[user, assistant]`.
pub type HistoryPair = (String, String);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
    pub history: Vec<HistoryPair>,
}

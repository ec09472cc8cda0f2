use super::errors::ConnectorError;
use crate::forms::chat::HistoryMessage;
use crate::models::HistoryPair;
use async_trait::async_trait;
use std::sync::Arc;

/// Raw outcome of one remote prediction, before fallbacks are applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Prediction {
    pub reply: Option<String>,
    /// Updated conversation as returned by the remote app, empty when it returns none
    pub history: Vec<HistoryPair>,
}

/// A connected client able to run the remote chat operation.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn predict(
        &self,
        message: &str,
        history: &[HistoryMessage],
    ) -> Result<Prediction, ConnectorError>;
}

/// Builds a [`ChatBackend`]; called lazily by the chat service, possibly more
/// than once when an earlier attempt failed.
#[async_trait]
pub trait ChatBackendFactory: Send + Sync {
    async fn connect(&self) -> Result<Arc<dyn ChatBackend>, ConnectorError>;
}

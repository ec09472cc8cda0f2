//! Chat Service
//!
//! Owns the remote chat backend handle. The handle is built on the first
//! request and reused for the rest of the process; a failed build is not
//! remembered, so the next request tries again.

use crate::connectors::{ChatBackend, ChatBackendFactory, ConnectorError};
use crate::forms::chat::HistoryMessage;
use crate::models::ChatResponse;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Reply used when the remote app returns nothing
pub const NO_RESPONSE_REPLY: &str = "Sorry, no response.";

pub struct ChatService {
    factory: Arc<dyn ChatBackendFactory>,
    backend: Mutex<Option<Arc<dyn ChatBackend>>>,
}

impl ChatService {
    pub fn new(factory: Arc<dyn ChatBackendFactory>) -> Self {
        Self {
            factory,
            backend: Mutex::new(None),
        }
    }

    #[cfg(test)]
    async fn is_connected(&self) -> bool {
        self.backend.lock().await.is_some()
    }

    async fn backend(&self) -> Result<Arc<dyn ChatBackend>, ConnectorError> {
        // Held across construction so concurrent first requests build only once.
        let mut guard = self.backend.lock().await;
        if let Some(backend) = guard.as_ref() {
            return Ok(backend.clone());
        }

        let backend = self.factory.connect().await?;
        *guard = Some(backend.clone());
        Ok(backend)
    }

    /// One round trip to the remote app, no retry.
    #[tracing::instrument(name = "Send chat message", skip(self, message, history), fields(message_len = message.len()))]
    pub async fn send(
        &self,
        message: &str,
        history: &[HistoryMessage],
    ) -> Result<ChatResponse, ConnectorError> {
        let backend = self.backend().await?;
        let prediction = backend.predict(message, history).await?;

        Ok(ChatResponse {
            reply: prediction
                .reply
                .unwrap_or_else(|| NO_RESPONSE_REPLY.to_string()),
            history: prediction.history,
        })
    }
}

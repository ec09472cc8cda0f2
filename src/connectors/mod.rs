//! External Service Connectors
//!
//! The chat endpoint never talks HTTP to the model itself; it goes through the
//! traits in [`chat`] so routes stay independent of the remote app and tests
//! can swap in stubs.
//!
//! ## Architecture Pattern
//!
//! 1. [`ChatBackendFactory`] builds a connected [`ChatBackend`]
//! 2. [`gradio`] implements both against a Gradio app
//! 3. [`crate::services::ChatService`] owns the factory and the lazily built backend
//!
//! ## Testing
//!
//! ```ignore
//! struct StubBackend;
//!
//! #[async_trait]
//! impl ChatBackend for StubBackend {
//!     async fn predict(&self, _: &str, _: &[HistoryMessage]) -> Result<Prediction, ConnectorError> {
//!         Ok(Prediction { reply: Some("hi there".into()), history: vec![] })
//!     }
//! }
//! ```

pub mod chat;
pub mod errors;
pub mod gradio;

pub use chat::{ChatBackend, ChatBackendFactory, Prediction};
pub use errors::ConnectorError;
pub use gradio::{GradioClient, GradioConnector};

pub mod chat_service;

pub use chat_service::{ChatService, NO_RESPONSE_REPLY};

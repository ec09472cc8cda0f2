pub mod chat;
pub mod health_checks;
pub mod resume;

pub use health_checks::*;

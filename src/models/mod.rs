mod chat;
mod resume;

pub use chat::*;
pub use resume::*;

//! Conversation types shared by the wire format and the AI providers.

mod message;

pub use message::{Message, Role};

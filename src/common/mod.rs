pub mod commands;
pub mod events;
pub mod types;

pub use commands::AssistantCommand;
pub use events::ReplyFired;
pub use types::{ChatMessage, Language, Sender};

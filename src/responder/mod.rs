//! Reply selection for the simulated assistant.
//!
//! A [`ResponseProvider`] decides how long the assistant "thinks" and what it
//! says. The conversation only depends on this trait, so a real backend can
//! replace the canned lists without touching the conversation itself.

pub mod fixed;
pub mod random;

use std::sync::Arc;
use std::time::Duration;

pub use fixed::FixedResponder;
pub use random::RandomResponder;

use crate::config::{ReplyConfig, ReplyMode};
use crate::error::{AssistantError, Result};

pub trait ResponseProvider: Send + Sync {
    /// Wait before the reply is appended.
    fn delay(&self) -> Duration;

    /// Reply text for the submitted prompt.
    fn respond(&self, prompt: &str) -> String;
}

/// Builds the provider described by `config`.
pub fn from_config(config: &ReplyConfig) -> Result<Arc<dyn ResponseProvider>> {
    match config.mode {
        ReplyMode::Fixed => {
            if config.fixed_reply.trim().is_empty() {
                return Err(AssistantError::EmptyCandidates);
            }
            Ok(Arc::new(FixedResponder::new(
                config.fixed_reply.clone(),
                Duration::from_millis(config.delay_ms),
            )))
        }
        ReplyMode::Random => {
            let responder = RandomResponder::new(
                config.candidates.clone(),
                Duration::from_millis(config.min_delay_ms),
                Duration::from_millis(config.max_delay_ms),
            )?;
            Ok(Arc::new(responder))
        }
    }
}

use std::time::Duration;

use super::ResponseProvider;

pub const DEFAULT_FIXED_REPLY: &str =
    "I understand you're asking about that. Let me help you find the right information.";
pub const DEFAULT_FIXED_DELAY: Duration = Duration::from_millis(1000);

/// Always answers with the same text after the same delay.
#[derive(Debug, Clone)]
pub struct FixedResponder {
    reply: String,
    delay: Duration,
}

impl FixedResponder {
    pub fn new(reply: impl Into<String>, delay: Duration) -> Self {
        Self {
            reply: reply.into(),
            delay,
        }
    }
}

impl Default for FixedResponder {
    fn default() -> Self {
        Self::new(DEFAULT_FIXED_REPLY, DEFAULT_FIXED_DELAY)
    }
}

impl ResponseProvider for FixedResponder {
    fn delay(&self) -> Duration {
        self.delay
    }

    fn respond(&self, _prompt: &str) -> String {
        self.reply.clone()
    }
}

use std::time::Duration;

use rand::Rng;
use rand::seq::SliceRandom;

use super::ResponseProvider;
use crate::error::{AssistantError, Result};

pub const DEFAULT_CANDIDATES: [&str; 4] = [
    "That's a great question! Let me help you with that.",
    "I found some information for you.",
    "Here's what you need to know.",
    "Check this out, it might help.",
];
pub const DEFAULT_MIN_DELAY: Duration = Duration::from_millis(1000);
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_millis(3000);

/// Picks a reply uniformly from a candidate list after a delay drawn
/// uniformly from `[min_delay, max_delay)`.
#[derive(Debug, Clone)]
pub struct RandomResponder {
    candidates: Vec<String>,
    min_delay: Duration,
    max_delay: Duration,
}

impl RandomResponder {
    pub fn new(candidates: Vec<String>, min_delay: Duration, max_delay: Duration) -> Result<Self> {
        if candidates.is_empty() {
            return Err(AssistantError::EmptyCandidates);
        }
        if min_delay > max_delay {
            return Err(AssistantError::InvalidDelayRange {
                min_ms: min_delay.as_millis() as u64,
                max_ms: max_delay.as_millis() as u64,
            });
        }
        Ok(Self {
            candidates,
            min_delay,
            max_delay,
        })
    }
}

impl Default for RandomResponder {
    fn default() -> Self {
        Self {
            candidates: DEFAULT_CANDIDATES.iter().map(|c| c.to_string()).collect(),
            min_delay: DEFAULT_MIN_DELAY,
            max_delay: DEFAULT_MAX_DELAY,
        }
    }
}

impl ResponseProvider for RandomResponder {
    fn delay(&self) -> Duration {
        if self.min_delay == self.max_delay {
            return self.min_delay;
        }
        let min = self.min_delay.as_millis() as u64;
        let max = self.max_delay.as_millis() as u64;
        Duration::from_millis(rand::thread_rng().gen_range(min..max))
    }

    fn respond(&self, _prompt: &str) -> String {
        // `new` guarantees at least one candidate.
        self.candidates
            .choose(&mut rand::thread_rng())
            .cloned()
            .unwrap_or_default()
    }
}

use chrono::{DateTime, Utc};

use crate::common::Language;

/// A scheduled bot reply whose delay elapsed, sent back to the conversation
/// that scheduled it.
#[derive(Debug, Clone)]
pub struct ReplyFired {
    pub content: String,
    pub language: Language,
    pub fired_at: DateTime<Utc>,
}

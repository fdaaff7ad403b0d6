use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// One past conversation as listed on the student dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatHistoryEntry {
    pub id: String,
    pub title: String,
    pub last_message: String,
    pub timestamp: DateTime<Utc>,
    pub message_count: u32,
    pub category: String,
}

impl ChatHistoryEntry {
    fn sample(
        id: &str,
        title: &str,
        last_message: &str,
        age: Duration,
        message_count: u32,
        category: &str,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            last_message: last_message.to_string(),
            timestamp: now - age,
            message_count,
            category: category.to_string(),
        }
    }
}

/// The fixed sample history, newest first, aged relative to `now`.
pub fn sample_history(now: DateTime<Utc>) -> Vec<ChatHistoryEntry> {
    vec![
        ChatHistoryEntry::sample(
            "1",
            "Library Hours and Study Rooms",
            "Thank you! That helps a lot.",
            Duration::minutes(30),
            8,
            "Facilities",
            now,
        ),
        ChatHistoryEntry::sample(
            "2",
            "Course Registration for Spring 2024",
            "When does registration open?",
            Duration::hours(2),
            12,
            "Academic",
            now,
        ),
        ChatHistoryEntry::sample(
            "3",
            "Campus Dining Options",
            "Perfect, thanks for the dining hall hours!",
            Duration::days(1),
            5,
            "Dining",
            now,
        ),
        ChatHistoryEntry::sample(
            "4",
            "Student Health Services",
            "How do I schedule an appointment?",
            Duration::days(2),
            6,
            "Health",
            now,
        ),
        ChatHistoryEntry::sample(
            "5",
            "Parking Information",
            "Where can I get a parking permit?",
            Duration::days(3),
            4,
            "Transportation",
            now,
        ),
    ]
}

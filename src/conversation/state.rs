use chrono::{DateTime, Utc};

use crate::common::{ChatMessage, Language, ReplyFired, Sender};

pub const GREETING: &str = "Hello! I'm your Campus Assistant. I can help you with courses, schedules, facilities, events, and much more. What would you like to know?";

/// Ordered message log plus the input buffer of one chat session.
///
/// Messages are only ever appended; insertion order is display order.
#[derive(Debug, Clone)]
pub struct ConversationState {
    messages: Vec<ChatMessage>,
    input_text: String,
    language: Language,
    last_id: u64,
}

impl ConversationState {
    pub fn new(language: Language) -> Self {
        Self {
            messages: Vec::new(),
            input_text: String::new(),
            language,
            last_id: 0,
        }
    }

    /// A session opened with the assistant's greeting.
    pub fn with_greeting(language: Language, user_name: Option<&str>) -> Self {
        let mut state = Self::new(language);
        let greeting = match user_name.map(str::trim).filter(|name| !name.is_empty()) {
            Some(name) => format!(
                "Hi {name}! I'm your Campus Assistant. How can I help you today?"
            ),
            None => GREETING.to_string(),
        };
        state.push_message(greeting, Sender::Bot, Utc::now(), Some(language));
        state
    }

    /// Appends a user message unless `text` is blank. Clears the input
    /// buffer on success.
    pub fn push_user(&mut self, text: &str) -> Option<&ChatMessage> {
        if text.trim().is_empty() {
            return None;
        }
        self.input_text.clear();
        Some(self.push_message(text.to_string(), Sender::User, Utc::now(), None))
    }

    pub fn push_reply(&mut self, reply: ReplyFired) -> &ChatMessage {
        self.push_message(reply.content, Sender::Bot, reply.fired_at, Some(reply.language))
    }

    fn push_message(
        &mut self,
        content: String,
        sender: Sender,
        timestamp: DateTime<Utc>,
        language: Option<Language>,
    ) -> &ChatMessage {
        let id = self.next_id(timestamp);
        self.messages.push(ChatMessage {
            id,
            content,
            sender,
            timestamp,
            language,
        });
        &self.messages[self.messages.len() - 1]
    }

    /// Millisecond timestamp, bumped past the previous id when two messages
    /// land in the same millisecond (or the clock steps back).
    fn next_id(&mut self, timestamp: DateTime<Utc>) -> u64 {
        let millis = u64::try_from(timestamp.timestamp_millis()).unwrap_or(0);
        self.last_id = millis.max(self.last_id + 1);
        self.last_id
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn input(&self) -> &str {
        &self.input_text
    }

    pub fn input_mut(&mut self) -> &mut String {
        &mut self.input_text
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input_text = text.into();
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }
}

//! The conversation state holder.
//!
//! [`Conversation`] owns the message log of one session. Submitting text
//! appends the user's message right away and spawns a timer task that asks
//! the [`ResponseProvider`] for a reply once its delay elapses. Fired replies
//! travel back over a channel and are appended by the owner when it calls
//! [`Conversation::drain_replies`] or awaits [`Conversation::next_reply`], so
//! the log has a single mutator.
//!
//! Timers are independent: nothing cancels, de-duplicates or orders them.
//! With a randomized delay, replies to quick successive submissions can be
//! appended out of submission order.

mod state;

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::mpsc;

pub use state::ConversationState;

use crate::common::{ChatMessage, Language, ReplyFired};
use crate::responder::ResponseProvider;

pub struct Conversation {
    state: ConversationState,
    provider: Arc<dyn ResponseProvider>,
    reply_sender: mpsc::UnboundedSender<ReplyFired>,
    reply_receiver: mpsc::UnboundedReceiver<ReplyFired>,
    pending: usize,
}

impl Conversation {
    pub fn new(state: ConversationState, provider: Arc<dyn ResponseProvider>) -> Self {
        let (reply_sender, reply_receiver) = mpsc::unbounded_channel();
        Self {
            state,
            provider,
            reply_sender,
            reply_receiver,
            pending: 0,
        }
    }

    /// Appends `text` as a user message and schedules the bot reply.
    ///
    /// Blank text is a no-op and returns `None`. Must be called from within
    /// a tokio runtime.
    pub fn submit(&mut self, text: &str) -> Option<ChatMessage> {
        let message = self.state.push_user(text)?.clone();
        self.schedule_reply(&message.content);
        Some(message)
    }

    /// Submits the input buffer.
    pub fn submit_input(&mut self) -> Option<ChatMessage> {
        let text = self.state.input().to_string();
        self.submit(&text)
    }

    fn schedule_reply(&mut self, prompt: &str) {
        let provider = Arc::clone(&self.provider);
        let sender = self.reply_sender.clone();
        let language = self.state.language();
        let prompt = prompt.to_string();
        let delay = provider.delay();
        self.pending += 1;
        log::debug!("Reply scheduled in {}ms", delay.as_millis());

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let reply = ReplyFired {
                content: provider.respond(&prompt),
                language,
                fired_at: Utc::now(),
            };
            if sender.send(reply).is_err() {
                log::debug!("Conversation closed before reply fired; dropping it");
            }
        });
    }

    /// Appends every reply that has already fired, without waiting.
    pub fn drain_replies(&mut self) -> Vec<ChatMessage> {
        let mut appended = Vec::new();
        while let Ok(reply) = self.reply_receiver.try_recv() {
            appended.push(self.append_reply(reply));
        }
        appended
    }

    /// Waits for the next reply to fire and appends it.
    ///
    /// Pends forever when no reply is scheduled, which makes it safe to use
    /// as a `select!` branch.
    pub async fn next_reply(&mut self) -> Option<ChatMessage> {
        let reply = self.reply_receiver.recv().await?;
        Some(self.append_reply(reply))
    }

    fn append_reply(&mut self, reply: ReplyFired) -> ChatMessage {
        self.pending = self.pending.saturating_sub(1);
        let message = self.state.push_reply(reply).clone();
        log::debug!("Reply appended (id {})", message.id);
        message
    }

    /// Replies scheduled but not yet appended.
    pub fn pending_replies(&self) -> usize {
        self.pending
    }

    pub fn messages(&self) -> &[ChatMessage] {
        self.state.messages()
    }

    pub fn message_count(&self) -> usize {
        self.state.messages().len()
    }

    pub fn input(&self) -> &str {
        self.state.input()
    }

    /// The input buffer, for a text field to edit in place.
    pub fn input_mut(&mut self) -> &mut String {
        self.state.input_mut()
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.state.set_input(text);
    }

    pub fn language(&self) -> Language {
        self.state.language()
    }

    /// Applies to replies scheduled from now on.
    pub fn set_language(&mut self, language: Language) {
        self.state.set_language(language);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    use tokio::time::Instant;

    use super::*;
    use crate::common::Sender;
    use crate::responder::{FixedResponder, RandomResponder};
    use crate::responder::random::DEFAULT_CANDIDATES;

    /// Hands out delays in order, echoing the prompt back.
    struct ScriptedDelays(Mutex<VecDeque<Duration>>);

    impl ScriptedDelays {
        fn new(delays: &[u64]) -> Self {
            Self(Mutex::new(
                delays.iter().copied().map(Duration::from_millis).collect(),
            ))
        }
    }

    impl ResponseProvider for ScriptedDelays {
        fn delay(&self) -> Duration {
            self.0.lock().unwrap().pop_front().unwrap_or_default()
        }

        fn respond(&self, prompt: &str) -> String {
            format!("re: {prompt}")
        }
    }

    fn conversation(provider: impl ResponseProvider + 'static) -> Conversation {
        Conversation::new(ConversationState::new(Language::English), Arc::new(provider))
    }

    #[tokio::test(start_paused = true)]
    async fn submit_appends_now_and_replies_after_delay() {
        let mut conversation = conversation(FixedResponder::default());
        let start = Instant::now();

        let message = conversation.submit("library hours").unwrap();
        assert_eq!(conversation.message_count(), 1);
        assert_eq!(message.sender, Sender::User);
        assert_eq!(message.content, "library hours");
        assert_eq!(conversation.pending_replies(), 1);

        let reply = conversation.next_reply().await.unwrap();
        assert!(start.elapsed() >= Duration::from_secs(1));
        assert_eq!(conversation.message_count(), 2);
        assert_eq!(reply.sender, Sender::Bot);
        assert_eq!(reply.language, Some(Language::English));
        assert_eq!(conversation.messages()[1], reply);
        assert_eq!(conversation.pending_replies(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn nothing_is_appended_before_the_delay() {
        let mut conversation = conversation(FixedResponder::default());
        conversation.submit("dining hours");

        tokio::time::sleep(Duration::from_millis(999)).await;
        assert!(conversation.drain_replies().is_empty());
        assert_eq!(conversation.message_count(), 1);

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(conversation.drain_replies().len(), 1);
        assert_eq!(conversation.message_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn random_reply_comes_from_the_candidates() {
        let mut conversation = conversation(RandomResponder::default());
        conversation.submit("course registration");

        tokio::time::sleep(Duration::from_secs(3)).await;
        let replies = conversation.drain_replies();
        assert_eq!(replies.len(), 1);
        assert!(DEFAULT_CANDIDATES.contains(&replies[0].content.as_str()));
    }

    #[tokio::test(start_paused = true)]
    async fn blank_submissions_change_nothing() {
        let mut conversation = conversation(FixedResponder::default());
        assert!(conversation.submit("").is_none());
        assert!(conversation.submit("   ").is_none());
        assert_eq!(conversation.message_count(), 0);
        assert_eq!(conversation.pending_replies(), 0);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(conversation.drain_replies().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn submit_input_uses_and_clears_the_buffer() {
        let mut conversation = conversation(FixedResponder::default());
        conversation.set_input("where is the student center?");
        let message = conversation.submit_input().unwrap();
        assert_eq!(message.content, "where is the student center?");
        assert_eq!(conversation.input(), "");
    }

    #[tokio::test(start_paused = true)]
    async fn overlapping_replies_append_in_firing_order() {
        let mut conversation = conversation(ScriptedDelays::new(&[3000, 1000]));
        conversation.submit("slow");
        conversation.submit("fast");
        assert_eq!(conversation.message_count(), 2);

        let first = conversation.next_reply().await.unwrap();
        let second = conversation.next_reply().await.unwrap();
        assert_eq!(first.content, "re: fast");
        assert_eq!(second.content, "re: slow");
        assert_eq!(conversation.message_count(), 4);

        let senders: Vec<Sender> = conversation.messages().iter().map(|m| m.sender).collect();
        assert_eq!(senders, [Sender::User, Sender::User, Sender::Bot, Sender::Bot]);
    }

    #[tokio::test(start_paused = true)]
    async fn reply_keeps_language_from_submission_time() {
        let mut conversation = conversation(FixedResponder::default());
        conversation.set_language(Language::Spanish);
        conversation.submit("horario de la biblioteca");
        conversation.set_language(Language::English);

        let reply = conversation.next_reply().await.unwrap();
        assert_eq!(reply.language, Some(Language::Spanish));
    }
}

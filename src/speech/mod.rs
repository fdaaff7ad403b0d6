//! Optional speech capabilities.
//!
//! Either capability may be absent. Absent capabilities turn the matching
//! control into a no-op; nothing here ever fails the caller. Recognition and
//! synthesis both run as background tokio tasks so a UI frame never waits
//! on them.

mod command;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::task::{AbortHandle, JoinHandle};

pub use command::{CommandRecognizer, CommandSynthesizer};

use crate::common::Language;
use crate::config::SpeechConfig;
use crate::error::SpeechError;

#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Listens once and returns a single transcript.
    async fn recognize(&self, locale: &str) -> Result<String, SpeechError>;
}

#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Speaks `text`, returning when the utterance ends.
    async fn speak(&self, text: &str, locale: &str) -> Result<(), SpeechError>;
}

pub struct SpeechControls {
    recognizer: Option<Arc<dyn SpeechRecognizer>>,
    synthesizer: Option<Arc<dyn SpeechSynthesizer>>,
    listening: bool,
    transcript_sender: mpsc::UnboundedSender<Result<String, SpeechError>>,
    transcript_receiver: mpsc::UnboundedReceiver<Result<String, SpeechError>>,
    speaking: Arc<AtomicBool>,
    /// Bumped on every utterance and on cancel so a stale utterance ending
    /// late does not clear the flag of a newer one.
    utterance: Arc<AtomicU64>,
    current: Option<AbortHandle>,
    enabled: bool,
}

impl SpeechControls {
    pub fn new(
        recognizer: Option<Arc<dyn SpeechRecognizer>>,
        synthesizer: Option<Arc<dyn SpeechSynthesizer>>,
        enabled: bool,
    ) -> Self {
        let (transcript_sender, transcript_receiver) = mpsc::unbounded_channel();
        Self {
            recognizer,
            synthesizer,
            listening: false,
            transcript_sender,
            transcript_receiver,
            speaking: Arc::new(AtomicBool::new(false)),
            utterance: Arc::new(AtomicU64::new(0)),
            current: None,
            enabled,
        }
    }

    pub fn from_config(config: &SpeechConfig, enabled: bool) -> Self {
        let recognizer = config
            .recognizer_command
            .as_deref()
            .and_then(CommandRecognizer::new)
            .map(|r| Arc::new(r) as Arc<dyn SpeechRecognizer>);
        let synthesizer = config
            .synthesizer_command
            .as_deref()
            .and_then(CommandSynthesizer::new)
            .map(|s| Arc::new(s) as Arc<dyn SpeechSynthesizer>);

        log::info!(
            "Speech recognition {}, synthesis {}",
            if recognizer.is_some() { "available" } else { "disabled" },
            if synthesizer.is_some() { "available" } else { "disabled" },
        );
        Self::new(recognizer, synthesizer, enabled)
    }

    pub fn can_listen(&self) -> bool {
        self.recognizer.is_some()
    }

    pub fn can_speak(&self) -> bool {
        self.synthesizer.is_some()
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn is_speaking(&self) -> bool {
        self.speaking.load(Ordering::SeqCst)
    }

    /// Whether replies are spoken automatically.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Starts one recognition in the background. The outcome is picked up
    /// with [`SpeechControls::poll_transcript`].
    ///
    /// Returns `None` when recognition is unavailable or already running.
    pub fn listen(&mut self, language: Language) -> Option<JoinHandle<()>> {
        let recognizer = self.recognizer.clone()?;
        if self.listening {
            log::debug!("Already listening; ignoring second request");
            return None;
        }
        self.listening = true;

        let sender = self.transcript_sender.clone();
        let locale = language.locale();
        Some(tokio::spawn(async move {
            let result = recognizer.recognize(locale).await;
            if sender.send(result).is_err() {
                log::debug!("Speech controls dropped before recognition finished");
            }
        }))
    }

    /// The result of a finished recognition, if one is waiting. Clears the
    /// listening flag whether it succeeded or not.
    pub fn poll_transcript(&mut self) -> Option<Result<String, SpeechError>> {
        let result = self.transcript_receiver.try_recv().ok()?;
        self.listening = false;
        if let Err(err) = &result {
            log::warn!("Speech recognition failed: {err}");
        }
        Some(result)
    }

    /// Starts speaking `text` without waiting for it to finish, cutting off
    /// whatever was being said.
    ///
    /// Returns the handle of the utterance task, or `None` if synthesis is
    /// unavailable or turned off.
    pub fn speak(&mut self, text: &str, language: Language) -> Option<JoinHandle<()>> {
        let synthesizer = self.synthesizer.clone()?;
        if !self.enabled {
            return None;
        }
        self.stop_current();

        let generation = self.utterance.fetch_add(1, Ordering::SeqCst) + 1;
        self.speaking.store(true, Ordering::SeqCst);

        let speaking = Arc::clone(&self.speaking);
        let utterance = Arc::clone(&self.utterance);
        let text = text.to_string();
        let locale = language.locale();

        let handle = tokio::spawn(async move {
            if let Err(err) = synthesizer.speak(&text, locale).await {
                log::warn!("Speech synthesis failed: {err}");
            }
            if utterance.load(Ordering::SeqCst) == generation {
                speaking.store(false, Ordering::SeqCst);
            }
        });
        self.current = Some(handle.abort_handle());
        Some(handle)
    }

    /// Stops the current utterance, killing its program if it runs one.
    fn cancel(&mut self) {
        self.stop_current();
        self.utterance.fetch_add(1, Ordering::SeqCst);
        self.speaking.store(false, Ordering::SeqCst);
    }

    fn stop_current(&mut self) {
        if let Some(current) = self.current.take() {
            current.abort();
        }
    }

    /// Cancels speech in progress and flips auto-speak. Returns the new
    /// setting.
    pub fn toggle(&mut self) -> bool {
        if self.is_speaking() {
            self.cancel();
        }
        self.enabled = !self.enabled;
        self.enabled
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use tokio::sync::Notify;

    use super::*;

    struct Transcript(Result<String, SpeechError>);

    #[async_trait]
    impl SpeechRecognizer for Transcript {
        async fn recognize(&self, _locale: &str) -> Result<String, SpeechError> {
            self.0.clone()
        }
    }

    /// Records utterances; waits to be released when gated.
    #[derive(Default)]
    struct Recorder {
        spoken: Mutex<Vec<(String, String)>>,
        gate: Option<Arc<Notify>>,
    }

    #[async_trait]
    impl SpeechSynthesizer for Recorder {
        async fn speak(&self, text: &str, locale: &str) -> Result<(), SpeechError> {
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.spoken
                .lock()
                .unwrap()
                .push((text.to_string(), locale.to_string()));
            Ok(())
        }
    }

    #[tokio::test]
    async fn absent_capabilities_disable_controls() {
        let mut controls = SpeechControls::new(None, None, true);

        assert!(!controls.can_listen());
        assert!(!controls.can_speak());
        assert!(controls.listen(Language::English).is_none());
        assert!(controls.poll_transcript().is_none());
        assert!(controls.speak("hello", Language::English).is_none());
        assert!(!controls.is_listening());
        assert!(!controls.is_speaking());
    }

    #[tokio::test]
    async fn transcript_arrives_after_listening() {
        let recognizer = Arc::new(Transcript(Ok("library hours".to_string())));
        let mut controls = SpeechControls::new(Some(recognizer), None, true);

        let handle = controls.listen(Language::Spanish).unwrap();
        assert!(controls.is_listening());
        assert!(controls.listen(Language::Spanish).is_none());

        handle.await.unwrap();
        assert_eq!(
            controls.poll_transcript(),
            Some(Ok("library hours".to_string()))
        );
        assert!(!controls.is_listening());
        assert!(controls.poll_transcript().is_none());
    }

    #[tokio::test]
    async fn recognition_error_resets_listening() {
        let recognizer = Arc::new(Transcript(Err(SpeechError::NoTranscript)));
        let mut controls = SpeechControls::new(Some(recognizer), None, true);

        controls.listen(Language::English).unwrap().await.unwrap();
        assert_eq!(controls.poll_transcript(), Some(Err(SpeechError::NoTranscript)));
        assert!(!controls.is_listening());
    }

    #[tokio::test]
    async fn speaks_with_the_language_locale() {
        let recorder = Arc::new(Recorder::default());
        let mut controls = SpeechControls::new(None, Some(recorder.clone()), true);

        let handle = controls.speak("hola", Language::Spanish).unwrap();
        handle.await.unwrap();

        assert!(!controls.is_speaking());
        assert_eq!(
            *recorder.spoken.lock().unwrap(),
            [("hola".to_string(), "es-ES".to_string())]
        );
    }

    #[tokio::test]
    async fn toggle_cuts_off_speech_and_disables_it() {
        let recorder = Arc::new(Recorder {
            gate: Some(Arc::new(Notify::new())),
            ..Recorder::default()
        });
        let mut controls = SpeechControls::new(None, Some(recorder.clone()), true);

        let handle = controls.speak("long answer", Language::English).unwrap();
        assert!(controls.is_speaking());

        assert!(!controls.toggle());
        assert!(!controls.is_speaking());
        assert!(!controls.is_enabled());
        assert!(controls.speak("ignored", Language::English).is_none());

        assert!(handle.await.unwrap_err().is_cancelled());
        assert!(recorder.spoken.lock().unwrap().is_empty());

        assert!(controls.toggle());
        assert!(controls.is_enabled());
    }

    #[tokio::test]
    async fn new_reply_interrupts_the_previous_one() {
        let gate = Arc::new(Notify::new());
        let recorder = Arc::new(Recorder {
            gate: Some(gate.clone()),
            ..Recorder::default()
        });
        let mut controls = SpeechControls::new(None, Some(recorder.clone()), true);

        let first = controls.speak("first", Language::English).unwrap();
        let second = controls.speak("second", Language::English).unwrap();
        assert!(first.await.unwrap_err().is_cancelled());
        assert!(controls.is_speaking());

        gate.notify_one();
        second.await.unwrap();
        assert!(!controls.is_speaking());
        assert_eq!(recorder.spoken.lock().unwrap()[0].0, "second");
    }
}

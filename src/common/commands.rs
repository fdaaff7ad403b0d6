use crate::common::Language;

/// Action requested by a UI component, handled by the app after the frame's
/// panels are drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssistantCommand {
    /// Submit the given text as a user message.
    Submit(String),
    /// Submit whatever is in the input buffer.
    SendInput,
    /// Submit the FAQ question with this 1-based number.
    AskFaq(usize),
    /// Dictate into the input buffer.
    Listen,
    ToggleSpeech,
    SetLanguage(Language),
    ExportHistory,
    ExportTranscript,
}

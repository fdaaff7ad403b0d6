use std::path::Path;

use super::models::ChatHistoryEntry;
use crate::common::ChatMessage;
use crate::error::Result;
use crate::storage::write_file;

/// Writes `entries` as a pretty-printed JSON array.
pub fn export_history(path: &Path, entries: &[ChatHistoryEntry]) -> Result<()> {
    let json = serde_json::to_string_pretty(entries)?;
    write_file(path, &json)?;
    log::info!("Exported {} history entries to {}", entries.len(), path.display());
    Ok(())
}

/// Writes the live conversation as plain text, one line per message.
pub fn export_transcript(path: &Path, messages: &[ChatMessage]) -> Result<()> {
    write_file(path, &render_transcript(messages))?;
    log::info!("Exported {} messages to {}", messages.len(), path.display());
    Ok(())
}

pub fn render_transcript(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .map(|message| {
            format!(
                "[{}] {}: {}\n",
                message.timestamp.format("%H:%M:%S"),
                message.sender,
                message.content
            )
        })
        .collect()
}

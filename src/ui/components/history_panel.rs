use chrono::{DateTime, Utc};
use eframe::egui;

use crate::common::AssistantCommand;
use crate::history::ChatHistoryEntry;

pub fn render(
    ui: &mut egui::Ui,
    search: &mut String,
    entries: &[&ChatHistoryEntry],
    now: DateTime<Utc>,
) -> Option<AssistantCommand> {
    let mut command = None;
    ui.heading("Chat History");
    ui.separator();

    ui.horizontal(|ui| {
        ui.label("Search:");
        ui.text_edit_singleline(search);
    });
    if ui
        .button("Export")
        .on_hover_text("Save past conversations as JSON")
        .clicked()
    {
        command = Some(AssistantCommand::ExportHistory);
    }
    ui.separator();

    if entries.is_empty() {
        ui.label("No conversations match.");
        return command;
    }

    egui::ScrollArea::vertical().show(ui, |ui| {
        for entry in entries {
            ui.label(egui::RichText::new(&entry.title).strong());
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(&entry.category).small());
                ui.label(
                    egui::RichText::new(format!(
                        "{} messages, {}",
                        entry.message_count,
                        relative_time(entry.timestamp, now)
                    ))
                    .weak()
                    .small(),
                );
            });
            ui.label(egui::RichText::new(&entry.last_message).italics());
            ui.separator();
        }
    });
    command
}

fn relative_time(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(at);
    if elapsed.num_days() > 0 {
        format!("{}d ago", elapsed.num_days())
    } else if elapsed.num_hours() > 0 {
        format!("{}h ago", elapsed.num_hours())
    } else if elapsed.num_minutes() > 0 {
        format!("{}m ago", elapsed.num_minutes())
    } else {
        "just now".to_string()
    }
}

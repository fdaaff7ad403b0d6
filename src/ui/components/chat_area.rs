use chrono::Local;
use eframe::egui;

use crate::common::ChatMessage;

pub fn render(ui: &mut egui::Ui, messages: &[ChatMessage]) {
    egui::ScrollArea::vertical()
        .auto_shrink([false; 2])
        .stick_to_bottom(true)
        .show(ui, |ui| {
            for message in messages {
                ui.horizontal_wrapped(|ui| {
                    let time = message.timestamp.with_timezone(&Local).format("%H:%M");
                    ui.label(egui::RichText::new(format!("[{time}]")).weak());

                    let text = egui::RichText::new(message_line(message));
                    if message.is_bot() {
                        ui.label(text.color(egui::Color32::LIGHT_BLUE));
                    } else {
                        ui.label(text.strong());
                    }
                });
            }
        });
}

/// Sender and content, with a language badge on bot replies.
pub fn message_line(message: &ChatMessage) -> String {
    match (message.is_bot(), message.language) {
        (true, Some(language)) => format!(
            "{} ({}): {}",
            message.sender,
            language.code().to_uppercase(),
            message.content
        ),
        _ => format!("{}: {}", message.sender, message.content),
    }
}

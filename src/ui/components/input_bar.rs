use eframe::egui;

use crate::common::AssistantCommand;

/// What the input bar may offer this frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputControls {
    pub can_send: bool,
    pub can_listen: bool,
    pub listening: bool,
}

/// Edits `input_text` in place. Enter or "Send" asks for the buffer to be
/// submitted; the conversation clears it.
pub fn render(
    ui: &mut egui::Ui,
    input_text: &mut String,
    controls: InputControls,
) -> Option<AssistantCommand> {
    let mut command = None;
    ui.horizontal(|ui| {
        let response = ui.add(
            egui::TextEdit::singleline(input_text).hint_text("Ask me anything about campus..."),
        );
        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            command = Some(AssistantCommand::SendInput);
        }

        if ui
            .add_enabled(controls.can_send, egui::Button::new("Send"))
            .clicked()
        {
            command = Some(AssistantCommand::SendInput);
        }

        let voice = ui
            .add_enabled(
                controls.can_listen && !controls.listening,
                egui::Button::new("Voice"),
            )
            .on_disabled_hover_text(if controls.can_listen {
                "Listening..."
            } else {
                "Voice input is not available"
            });
        if voice.clicked() {
            command = Some(AssistantCommand::Listen);
        }
    });
    command
}

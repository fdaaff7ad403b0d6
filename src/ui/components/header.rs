use eframe::egui;

use crate::common::{AssistantCommand, Language};

/// Speech state shown in the header.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpeechStatus {
    pub can_speak: bool,
    pub enabled: bool,
    pub listening: bool,
    pub speaking: bool,
}

pub fn render(
    ui: &mut egui::Ui,
    language: Language,
    message_count: usize,
    speech: SpeechStatus,
) -> Option<AssistantCommand> {
    let mut command = None;
    ui.horizontal(|ui| {
        ui.heading("Campus Assistant");
        ui.label(egui::RichText::new(format!("{message_count} messages")).weak());
        ui.separator();

        let mut selected = language;
        egui::ComboBox::from_id_salt("language")
            .selected_text(selected.name())
            .show_ui(ui, |ui| {
                for option in Language::ALL {
                    ui.selectable_value(&mut selected, option, option.name());
                }
            });
        if selected != language {
            command = Some(AssistantCommand::SetLanguage(selected));
        }

        let label = if speech.enabled { "Speech on" } else { "Speech off" };
        if ui
            .add_enabled(speech.can_speak, egui::Button::new(label))
            .on_disabled_hover_text("Speech output is not available")
            .clicked()
        {
            command = Some(AssistantCommand::ToggleSpeech);
        }

        if speech.listening {
            ui.spinner();
            ui.label("Listening...");
        }
        if speech.speaking {
            ui.colored_label(egui::Color32::GREEN, "●");
            ui.label("Speaking...");
        }

        ui.separator();
        if ui.button("Save transcript").clicked() {
            command = Some(AssistantCommand::ExportTranscript);
        }
    });
    command
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::components::headless_frame;

    #[test]
    fn shows_indicators_without_asking() {
        let mut command = Some(AssistantCommand::SendInput);
        headless_frame(|ui| {
            command = render(
                ui,
                Language::Spanish,
                3,
                SpeechStatus {
                    can_speak: true,
                    enabled: true,
                    listening: true,
                    speaking: true,
                },
            );
        });
        assert_eq!(command, None);
    }
}

use eframe::egui;

use crate::common::AssistantCommand;
use crate::faq::{self, QUICK_HELP};

/// FAQ shortcuts. Clicking one asks for its question by number.
pub fn render(ui: &mut egui::Ui) -> Option<AssistantCommand> {
    let mut command = None;
    ui.heading("Quick Help");
    ui.separator();

    for (index, entry) in faq::all().enumerate() {
        let number = index + 1;
        if number == QUICK_HELP.len() + 1 {
            ui.add_space(8.0);
            ui.heading("Popular Questions");
            ui.separator();
        }

        ui.horizontal(|ui| {
            if ui.button(entry.question).clicked() {
                command = Some(AssistantCommand::AskFaq(number));
            }
            if let Some(category) = entry.category {
                ui.label(egui::RichText::new(category).weak().small());
            }
        });
    }
    command
}

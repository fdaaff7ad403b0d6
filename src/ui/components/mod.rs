pub mod chat_area;
pub mod header;
pub mod history_panel;
pub mod input_bar;
pub mod sidebar;

/// Runs one frame without a window and hands `draw` the central panel.
#[cfg(test)]
pub(crate) fn headless_frame(mut draw: impl FnMut(&mut eframe::egui::Ui)) {
    use eframe::egui;

    let ctx = egui::Context::default();
    let _ = ctx.run(egui::RawInput::default(), |ctx| {
        egui::CentralPanel::default().show(ctx, |ui| draw(ui));
    });
}

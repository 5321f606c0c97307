//! "New document" while the buffer has unsaved changes: save first, or
//! cancel and keep the current document.

use eframe::egui;

use crate::app_state::AppState;

pub fn show(ctx: &egui::Context, state: &mut AppState) {
    if !state.show_confirm_new {
        return;
    }
    egui::Window::new("Unsaved changes")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .show(ctx, |ui| {
            ui.label("Save the current document first?");
            ui.horizontal(|ui| {
                if ui.button("Yes").clicked() {
                    state.save_then_new();
                }
                if ui.button("Cancel").clicked() {
                    state.show_confirm_new = false;
                }
            });
        });
}

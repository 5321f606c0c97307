//! Prompt for the autosave interval in milliseconds. Invalid input keeps
//! the prompt open with the error; an empty input just dismisses it.

use eframe::egui;

use crate::app_state::AppState;

pub fn show(ctx: &egui::Context, state: &mut AppState) {
    if !state.show_interval_prompt {
        return;
    }
    let now = ctx.input(|i| i.time);
    egui::Window::new("Autosave interval")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .show(ctx, |ui| {
            ui.label("Autosave interval in milliseconds:");
            let response = ui.text_edit_singleline(&mut state.interval_input);
            if let Some(err) = &state.interval_error {
                ui.colored_label(egui::Color32::LIGHT_RED, err);
            }
            let submitted =
                response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            ui.horizontal(|ui| {
                if ui.button("OK").clicked() || submitted {
                    state.submit_interval(now);
                }
                if ui.button("Cancel").clicked() {
                    state.show_interval_prompt = false;
                    state.interval_error = None;
                }
            });
        });
}

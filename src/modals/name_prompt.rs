//! The naming modal: shown at startup and whenever the document identity
//! has to be re-resolved. Loops until a valid name is accepted, or the
//! user takes the auto-generated fallback.

use eframe::egui;

use crate::app_state::AppState;

pub fn show(ctx: &egui::Context, state: &mut AppState) {
    if !state.show_name_prompt {
        return;
    }
    egui::Window::new("Name document")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .show(ctx, |ui| {
            if state.offer_fallback {
                ui.label("The name cannot be empty. Use an auto-generated name?");
                ui.horizontal(|ui| {
                    if ui.button("Yes").clicked() {
                        state.accept_fallback();
                    }
                    if ui.button("No").clicked() {
                        state.decline_fallback();
                    }
                });
                return;
            }

            ui.label("Enter a name for this document:");
            let response = ui.text_edit_singleline(&mut state.name_input);
            if ctx.memory(|m| m.focus().is_none()) {
                response.request_focus();
            }
            if let Some(err) = &state.name_error {
                ui.colored_label(egui::Color32::LIGHT_RED, err);
            }
            let submitted =
                response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if ui.button("OK").clicked() || submitted {
                state.submit_name();
            }
        });
}

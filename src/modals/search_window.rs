//! Search window: sets the active highlight term for the editor.

use eframe::egui;

use crate::app_state::AppState;

pub fn show(ctx: &egui::Context, state: &mut AppState) {
    if !state.show_search {
        return;
    }
    let mut open = true;
    egui::Window::new("Search")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Search:");
                let response = ui.text_edit_singleline(&mut state.search_input);
                let submitted =
                    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if ui.button("Search").clicked() || submitted {
                    state.run_search();
                }
                if ui.button("Clear").clicked() {
                    state.clear_search();
                }
            });
        });
    if !open {
        state.show_search = false;
    }
}

//! Browser over the autosave directory: load an entry into the editor or
//! delete one (after confirmation). The listing is re-read every frame so
//! it always reflects the directory.

use eframe::egui;

use crate::app_state::AppState;

pub fn show(ctx: &egui::Context, state: &mut AppState) {
    if !state.show_autosave_browser {
        return;
    }

    let mut open = true;
    egui::Window::new("Autosave files")
        .open(&mut open)
        .collapsible(false)
        .default_size([320.0, 300.0])
        .show(ctx, |ui| {
            let entries = match state.store.list() {
                Ok(entries) => entries,
                Err(e) => {
                    ui.colored_label(
                        egui::Color32::LIGHT_RED,
                        format!("Could not list autosave files: {e}"),
                    );
                    return;
                }
            };
            if entries.is_empty() {
                ui.label("No autosaved files.");
                return;
            }

            let mut load: Option<String> = None;
            let mut ask_delete: Option<String> = None;
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for entry in &entries {
                        ui.horizontal(|ui| {
                            if ui.button(&entry.display_name).clicked() {
                                load = Some(entry.display_name.clone());
                            }
                            ui.with_layout(
                                egui::Layout::right_to_left(egui::Align::Center),
                                |ui| {
                                    if ui.button("Delete").clicked() {
                                        ask_delete = Some(entry.display_name.clone());
                                    }
                                },
                            );
                        });
                    }
                });
            if let Some(name) = load {
                state.load_autosave(&name);
            }
            if let Some(name) = ask_delete {
                state.delete_confirm = Some(name);
            }
        });
    if !open {
        state.show_autosave_browser = false;
    }

    // deletion always goes through a confirmation first
    if let Some(name) = state.delete_confirm.clone() {
        egui::Window::new("Confirm delete")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label(format!("Delete '{name}'?"));
                ui.horizontal(|ui| {
                    if ui.button("Yes").clicked() {
                        state.delete_autosave(&name);
                    }
                    if ui.button("No").clicked() {
                        state.delete_confirm = None;
                    }
                });
            });
    }
}

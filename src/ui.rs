//! The eframe application: menu bar, toolbar, the text area and the
//! status bar. All modal windows live under `modals`.

use std::time::Duration;

use eframe::egui;

use crate::app_state::{AppState, FONT_SIZES};
use crate::edit::EditAction;
use crate::{edit, modals, search};

pub struct JotterApp {
    state: AppState,
}

pub fn create_app() -> anyhow::Result<JotterApp> {
    Ok(JotterApp {
        state: AppState::new()?,
    })
}

impl eframe::App for JotterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let state = &mut self.state;

        let now = ctx.input(|i| i.time);
        state.tick(now);
        // make sure a frame runs when the next tick is due, even if the
        // user is idle
        ctx.request_repaint_after(Duration::from_secs_f64(
            state.scheduler.time_until_due(now).max(0.016),
        ));

        menu_bar(ctx, state);
        toolbar(ctx, state);
        status_bar(ctx, state);
        editor_panel(ctx, state);

        modals::name_prompt::show(ctx, state);
        modals::interval::show(ctx, state);
        modals::autosave_files::show(ctx, state);
        modals::search_window::show(ctx, state);
        modals::confirm_new::show(ctx, state);
    }
}

fn menu_bar(ctx: &egui::Context, state: &mut AppState) {
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("New").clicked() {
                    state.new_document();
                    ui.close_menu();
                }
                if ui.button("Open…").clicked() {
                    state.open_file();
                    ui.close_menu();
                }
                if ui.button("Save…").clicked() {
                    state.save_file();
                    ui.close_menu();
                }
                if ui.button("Save As…").clicked() {
                    state.save_file_as();
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("Quit").clicked() {
                    ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });
            ui.menu_button("Edit", |ui| {
                let mut item = |ui: &mut egui::Ui, label: &str, action: EditAction| {
                    if ui.button(label).clicked() {
                        state.pending_edit = Some(action);
                        ui.close_menu();
                    }
                };
                item(ui, "Undo", EditAction::Undo);
                item(ui, "Redo", EditAction::Redo);
                ui.separator();
                item(ui, "Cut", EditAction::Cut);
                item(ui, "Copy", EditAction::Copy);
                item(ui, "Paste", EditAction::Paste);
                item(ui, "Delete", EditAction::DeleteSelection);
                ui.separator();
                item(ui, "Select All", EditAction::SelectAll);
            });
            ui.menu_button("Autosave", |ui| {
                let label = if state.scheduler.config.enabled {
                    "Disable autosave"
                } else {
                    "Enable autosave"
                };
                if ui.button(label).clicked() {
                    state.toggle_autosave();
                    ui.close_menu();
                }
                if ui.button("Set interval…").clicked() {
                    state.open_interval_prompt();
                    ui.close_menu();
                }
                if ui.button("Open autosave files…").clicked() {
                    state.open_autosave_browser();
                    ui.close_menu();
                }
            });
            ui.menu_button("Font size", |ui| {
                for size in FONT_SIZES {
                    if ui
                        .selectable_label(state.font_size == size, format!("{size:.0}"))
                        .clicked()
                    {
                        state.font_size = size;
                        ui.close_menu();
                    }
                }
            });
        });
    });
}

fn toolbar(ctx: &egui::Context, state: &mut AppState) {
    egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            if ui.button("New").clicked() {
                state.new_document();
            }
            if ui.button("Open").clicked() {
                state.open_file();
            }
            if ui.button("Save").clicked() {
                state.save_file();
            }
            if ui.button("Search").clicked() {
                state.show_search = true;
            }
        });
    });
}

fn status_bar(ctx: &egui::Context, state: &AppState) {
    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            let name = state.document.display_name().unwrap_or("untitled");
            let marker = if state.document.modified { "*" } else { "" };
            let chars = state.document.content.chars().count();
            let words = state.document.content.split_whitespace().count();
            ui.label(format!(
                "File: {name}{marker} | Ln {}, Col {} | {chars} chars, {words} words",
                state.cursor_line, state.cursor_col
            ));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(&state.status);
            });
        });
    });
}

fn editor_id() -> egui::Id {
    egui::Id::new("editor_text")
}

fn editor_panel(ctx: &egui::Context, state: &mut AppState) {
    // menu-issued edit actions rewrite the buffer/cursor before the widget
    // reads them back
    edit::apply(ctx, state, editor_id());

    let term = state.search_term.clone();
    let font_size = state.font_size;
    let mut layouter = move |ui: &egui::Ui, text: &str, wrap_width: f32| {
        let mut job = highlight_layout(ui, text, term.as_deref(), font_size);
        job.wrap.max_width = wrap_width;
        ui.fonts(|f| f.layout_job(job))
    };

    // input is refused until an identity has been resolved
    let named = state.document.is_named();

    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let output = egui::TextEdit::multiline(&mut state.document.content)
                    .id(editor_id())
                    .font(egui::FontId::proportional(font_size))
                    .desired_width(f32::INFINITY)
                    .desired_rows(30)
                    .lock_focus(true)
                    .interactive(named)
                    .layouter(&mut layouter)
                    .show(ui);
                if output.response.changed() {
                    state.document.mark_modified();
                }
                if let Some(range) = output.cursor_range {
                    let (line, col) =
                        line_col(&state.document.content, range.primary.ccursor.index);
                    state.cursor_line = line;
                    state.cursor_col = col;
                }
            });
    });
}

/// Lay the buffer out with the active search term highlighted.
fn highlight_layout(
    ui: &egui::Ui,
    text: &str,
    term: Option<&str>,
    font_size: f32,
) -> egui::text::LayoutJob {
    let font_id = egui::FontId::proportional(font_size);
    let normal = egui::TextFormat {
        font_id: font_id.clone(),
        color: ui.visuals().text_color(),
        ..Default::default()
    };
    let mut job = egui::text::LayoutJob::default();

    let ranges = term
        .map(|t| search::find_matches(text, t))
        .unwrap_or_default();
    if ranges.is_empty() {
        job.append(text, 0.0, normal);
        return job;
    }

    let hit = egui::TextFormat {
        font_id,
        color: egui::Color32::BLACK,
        background: egui::Color32::YELLOW,
        ..Default::default()
    };
    let mut last = 0;
    for r in ranges {
        if r.start > last {
            job.append(&text[last..r.start], 0.0, normal.clone());
        }
        job.append(&text[r.start..r.end], 0.0, hit.clone());
        last = r.end;
    }
    if last < text.len() {
        job.append(&text[last..], 0.0, normal);
    }
    job
}

/// 1-based line/column for a char index into the buffer.
fn line_col(text: &str, char_index: usize) -> (usize, usize) {
    let mut line = 1;
    let mut col = 1;
    for (i, c) in text.chars().enumerate() {
        if i == char_index {
            break;
        }
        if c == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }
    (line, col)
}

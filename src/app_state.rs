//! Session state shared by every menu/toolbar handler, plus the command
//! handlers themselves. One instance lives for the whole process; there are
//! no ambient globals.

use std::fs;

use tracing::{info, warn};

use crate::autosave::AutosaveScheduler;
use crate::document::Document;
use crate::edit::EditAction;
use crate::naming;
use crate::store::AutosaveStore;

/// Font sizes offered in the menu.
pub const FONT_SIZES: [f32; 9] = [10.0, 12.0, 14.0, 16.0, 18.0, 20.0, 24.0, 28.0, 32.0];

/// A command that had to wait for the name prompt to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    /// Run the manual save dialog once the document has a name.
    Save,
    /// Save (dialog included), then clear and re-prompt for a new document.
    SaveThenNew,
}

pub struct AppState {
    pub document: Document,
    pub store: AutosaveStore,
    pub scheduler: AutosaveScheduler,

    pub font_size: f32,
    /// Last operation message, shown on the status bar.
    pub status: String,
    pub cursor_line: usize,
    pub cursor_col: usize,

    // Name prompt
    pub show_name_prompt: bool,
    pub name_input: String,
    pub name_error: Option<String>,
    /// When set, the prompt is showing the "use an auto-generated name?"
    /// yes/no choice instead of the input field.
    pub offer_fallback: bool,
    pub pending: Option<PendingAction>,

    // Interval prompt
    pub show_interval_prompt: bool,
    pub interval_input: String,
    pub interval_error: Option<String>,

    // Autosave file browser
    pub show_autosave_browser: bool,
    /// Name awaiting delete confirmation, if any.
    pub delete_confirm: Option<String>,

    // Search
    pub show_search: bool,
    pub search_input: String,
    /// Active highlight term; `None` means no highlighting.
    pub search_term: Option<String>,

    // "New document" while modified
    pub show_confirm_new: bool,

    /// Edit-menu action awaiting application to the text widget.
    pub pending_edit: Option<EditAction>,
}

impl AppState {
    pub fn new() -> anyhow::Result<Self> {
        let store = AutosaveStore::open(naming::AUTOSAVE_DIR)?;
        Ok(Self {
            document: Document::new(),
            store,
            scheduler: AutosaveScheduler::new(),
            font_size: 14.0,
            status: "Ready".to_owned(),
            cursor_line: 1,
            cursor_col: 1,
            // the session starts unnamed; resolve an identity before input
            show_name_prompt: true,
            name_input: String::new(),
            name_error: None,
            offer_fallback: false,
            pending: None,
            show_interval_prompt: false,
            interval_input: String::new(),
            interval_error: None,
            show_autosave_browser: false,
            delete_confirm: None,
            show_search: false,
            search_input: String::new(),
            search_term: None,
            show_confirm_new: false,
            pending_edit: None,
        })
    }

    /// Drive the autosave schedule from the frame clock.
    pub fn tick(&mut self, now: f64) {
        if let Some(msg) = self.scheduler.tick(now, &self.document, &self.store) {
            self.status = msg;
        }
    }

    /// Handle a submission from the name prompt.
    pub fn submit_name(&mut self) {
        match naming::validate_name(&self.name_input) {
            Ok(name) => self.resolve_name(name),
            Err(naming::NameError::Empty) => {
                // offer the generated fallback instead of rejecting outright
                self.name_error = None;
                self.offer_fallback = true;
            }
            Err(e) => self.name_error = Some(e.to_string()),
        }
    }

    /// The user accepted the auto-generated name.
    pub fn accept_fallback(&mut self) {
        let name = naming::fallback_name(self.store.dir());
        self.status = format!("Document named '{name}'");
        self.resolve_name(name);
    }

    /// The user declined the fallback; go back to the input field.
    pub fn decline_fallback(&mut self) {
        self.offer_fallback = false;
        self.name_input.clear();
    }

    fn resolve_name(&mut self, name: String) {
        let backing = self.store.path_for(&name);
        info!(name, "document identity resolved");
        self.document.resolve_identity(name, backing);
        self.show_name_prompt = false;
        self.offer_fallback = false;
        self.name_input.clear();
        self.name_error = None;
        match self.pending.take() {
            Some(PendingAction::Save) => self.run_save_dialog(),
            Some(PendingAction::SaveThenNew) => {
                self.run_save_dialog();
                self.reset_document();
            }
            None => {}
        }
    }

    /// "New": ask about unsaved changes first, otherwise clear right away.
    pub fn new_document(&mut self) {
        if self.document.modified {
            self.show_confirm_new = true;
        } else {
            self.reset_document();
        }
    }

    /// Confirmed "new": save through the dialog, then clear.
    pub fn save_then_new(&mut self) {
        self.show_confirm_new = false;
        if !self.document.is_named() {
            self.pending = Some(PendingAction::SaveThenNew);
            self.show_name_prompt = true;
            return;
        }
        self.run_save_dialog();
        self.reset_document();
    }

    /// Clear the buffer, drop the identity and require a fresh one.
    pub fn reset_document(&mut self) {
        self.show_confirm_new = false;
        self.document.clear();
        self.show_name_prompt = true;
        self.status = "New document".to_owned();
    }

    pub fn open_file(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Text Files", &["txt"])
            .pick_file()
        else {
            return;
        };
        match fs::read_to_string(&path) {
            Ok(content) => {
                self.document.open_from(&path, content);
                info!(path = %path.display(), "file opened");
                self.status = format!("Opened {}", path.display());
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "open failed");
                self.status = format!("Open failed: {e}");
            }
        }
    }

    /// "Save": an unnamed document must resolve its identity first; the
    /// actual write still goes through the save dialog.
    pub fn save_file(&mut self) {
        if !self.document.is_named() {
            self.pending = Some(PendingAction::Save);
            self.show_name_prompt = true;
            return;
        }
        self.run_save_dialog();
    }

    /// "Save As": straight to the dialog, name or not.
    pub fn save_file_as(&mut self) {
        self.run_save_dialog();
    }

    fn run_save_dialog(&mut self) {
        let mut dialog = rfd::FileDialog::new().add_filter("Text Files", &["txt"]);
        if let Some(name) = self.document.display_name() {
            dialog = dialog.set_file_name(format!("{name}.txt"));
        }
        let Some(path) = dialog.save_file() else {
            return;
        };
        match fs::write(&path, &self.document.content) {
            Ok(()) => {
                self.document.record_save(&path);
                info!(path = %path.display(), "file saved");
                self.status = format!("Saved {}", path.display());
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "save failed");
                self.status = format!("Save failed: {e}");
            }
        }
    }

    pub fn toggle_autosave(&mut self) {
        let enabled = self.scheduler.toggle();
        self.status = if enabled {
            "Autosave on".to_owned()
        } else {
            "Autosave off".to_owned()
        };
    }

    pub fn open_interval_prompt(&mut self) {
        self.interval_input = self.scheduler.config.interval_ms.to_string();
        self.interval_error = None;
        self.show_interval_prompt = true;
    }

    /// Handle a submission from the interval prompt. An empty input just
    /// dismisses the prompt; invalid input keeps it open with the error.
    pub fn submit_interval(&mut self, now: f64) {
        if self.interval_input.trim().is_empty() {
            self.show_interval_prompt = false;
            return;
        }
        match self
            .scheduler
            .set_interval_from_input(&self.interval_input, now)
        {
            Ok(ms) => {
                self.status = format!("Autosave interval set to {ms} ms");
                self.show_interval_prompt = false;
                self.interval_error = None;
            }
            Err(e) => self.interval_error = Some(e.to_string()),
        }
    }

    pub fn open_autosave_browser(&mut self) {
        match self.store.list() {
            Ok(entries) if entries.is_empty() => {
                self.status = "No autosaved files".to_owned();
            }
            Ok(_) => {
                self.delete_confirm = None;
                self.show_autosave_browser = true;
            }
            Err(e) => self.status = format!("Could not list autosave files: {e}"),
        }
    }

    /// Load an entry from the browser; closes the browser on success.
    pub fn load_autosave(&mut self, name: &str) {
        match self.store.load(name) {
            Ok(content) => {
                let path = self.store.path_for(name);
                self.document.open_from(&path, content);
                self.show_autosave_browser = false;
                self.status = format!("Loaded '{name}'");
            }
            Err(e) => {
                warn!(name, error = %e, "autosave load failed");
                self.status = format!("Load failed: {e}");
            }
        }
    }

    /// Delete a confirmed entry; closes the browser on success.
    pub fn delete_autosave(&mut self, name: &str) {
        self.delete_confirm = None;
        match self.store.delete(name) {
            Ok(()) => {
                self.show_autosave_browser = false;
                self.status = format!("Deleted '{name}'");
            }
            Err(e) => {
                warn!(name, error = %e, "autosave delete failed");
                self.status = format!("Delete failed: {e}");
            }
        }
    }

    pub fn run_search(&mut self) {
        let term = self.search_input.clone();
        if term.is_empty() {
            self.search_term = None;
            return;
        }
        let count = crate::search::find_matches(&self.document.content, &term).len();
        self.status = format!("{count} match(es) for '{term}'");
        self.search_term = Some(term);
    }

    pub fn clear_search(&mut self) {
        self.search_term = None;
    }
}

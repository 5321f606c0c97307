pub mod autosave_files;
pub mod confirm_new;
pub mod interval;
pub mod name_prompt;
pub mod search_window;

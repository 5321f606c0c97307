//! Edit-menu actions applied to the text widget: undo/redo through the
//! widget's own undo history, clipboard operations and selection edits.
//!
//! The menu handler only records the requested action; `apply` runs at the
//! start of the editor panel, before the widget is shown, so the rewritten
//! buffer and cursor state are picked up in the same frame.

use copypasta::{ClipboardContext, ClipboardProvider};
use eframe::egui;
use egui::text::{CCursor, CCursorRange};
use tracing::warn;

use crate::app_state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditAction {
    Undo,
    Redo,
    Cut,
    Copy,
    Paste,
    DeleteSelection,
    SelectAll,
}

/// Apply a pending edit action to the buffer and the widget's stored
/// cursor/undo state.
pub fn apply(ctx: &egui::Context, state: &mut AppState, editor_id: egui::Id) {
    let Some(action) = state.pending_edit.take() else {
        return;
    };
    // input is refused until an identity has been resolved
    if !state.document.is_named() {
        return;
    }
    let Some(mut widget_state) = egui::TextEdit::load_state(ctx, editor_id) else {
        return;
    };

    let char_len = state.document.content.chars().count();
    let range = widget_state
        .cursor
        .char_range()
        .unwrap_or_else(|| CCursorRange::one(CCursor::new(0)));
    let (start, end) = selection_bounds(&range, char_len);

    match action {
        EditAction::SelectAll => {
            widget_state.cursor.set_char_range(Some(CCursorRange::two(
                CCursor::new(0),
                CCursor::new(char_len),
            )));
        }
        EditAction::Copy => {
            if start < end {
                let selected = slice_chars(&state.document.content, start, end);
                if let Err(e) = set_clipboard(selected) {
                    warn!(error = %e, "clipboard copy failed");
                    state.status = format!("Copy failed: {e}");
                }
            }
        }
        EditAction::Cut => {
            if start < end {
                let selected = slice_chars(&state.document.content, start, end);
                match set_clipboard(selected) {
                    Ok(()) => {
                        splice(&mut state.document.content, start, end, "");
                        widget_state
                            .cursor
                            .set_char_range(Some(CCursorRange::one(CCursor::new(start))));
                        state.document.mark_modified();
                    }
                    Err(e) => {
                        // keep the text if it never reached the clipboard
                        warn!(error = %e, "clipboard cut failed");
                        state.status = format!("Cut failed: {e}");
                    }
                }
            }
        }
        EditAction::Paste => match clipboard_contents() {
            Ok(clip) if !clip.is_empty() => {
                splice(&mut state.document.content, start, end, &clip);
                let caret = start + clip.chars().count();
                widget_state
                    .cursor
                    .set_char_range(Some(CCursorRange::one(CCursor::new(caret))));
                state.document.mark_modified();
            }
            Ok(_) => {}
            Err(e) => {
                warn!(error = %e, "clipboard paste failed");
                state.status = format!("Paste failed: {e}");
            }
        },
        EditAction::DeleteSelection => {
            if start < end {
                splice(&mut state.document.content, start, end, "");
                widget_state
                    .cursor
                    .set_char_range(Some(CCursorRange::one(CCursor::new(start))));
                state.document.mark_modified();
            }
        }
        EditAction::Undo | EditAction::Redo => {
            let current = (range, state.document.content.clone());
            let mut undoer = widget_state.undoer();
            let restored = if action == EditAction::Undo {
                undoer.undo(&current).cloned()
            } else {
                undoer.redo(&current).cloned()
            };
            if let Some((new_range, new_text)) = restored {
                state.document.content = new_text;
                widget_state.cursor.set_char_range(Some(new_range));
                state.document.mark_modified();
            }
            widget_state.set_undoer(undoer);
        }
    }

    widget_state.store(ctx, editor_id);
    // hand focus back so the user can keep typing after the menu closes
    ctx.memory_mut(|m| m.request_focus(editor_id));
}

/// Ordered, clamped char bounds of the widget's selection.
fn selection_bounds(range: &CCursorRange, char_len: usize) -> (usize, usize) {
    let a = range.primary.index.min(char_len);
    let b = range.secondary.index.min(char_len);
    (a.min(b), a.max(b))
}

/// Byte offset of the `char_index`-th character (text length when past the end).
fn byte_index(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map_or(text.len(), |(i, _)| i)
}

fn slice_chars(text: &str, start: usize, end: usize) -> String {
    text[byte_index(text, start)..byte_index(text, end)].to_owned()
}

/// Replace the char range `[start, end)` with `replacement`.
fn splice(text: &mut String, start: usize, end: usize, replacement: &str) {
    let b0 = byte_index(text, start);
    let b1 = byte_index(text, end);
    text.replace_range(b0..b1, replacement);
}

fn set_clipboard(text: String) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut clipboard = ClipboardContext::new()?;
    clipboard.set_contents(text)?;
    Ok(())
}

fn clipboard_contents() -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
    let mut clipboard = ClipboardContext::new()?;
    clipboard.get_contents()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_bounds_are_ordered_and_clamped() {
        // a right-to-left selection still yields start <= end
        let backwards = CCursorRange::two(CCursor::new(7), CCursor::new(2));
        assert_eq!(selection_bounds(&backwards, 10), (2, 7));
        // a stale cursor beyond the buffer is clamped to its length
        let stale = CCursorRange::two(CCursor::new(3), CCursor::new(99));
        assert_eq!(selection_bounds(&stale, 5), (3, 5));
    }

    #[test]
    fn byte_index_handles_multibyte_text() {
        let text = "héllo";
        assert_eq!(byte_index(text, 0), 0);
        assert_eq!(byte_index(text, 1), 1);
        assert_eq!(byte_index(text, 2), 3); // é is two bytes
        assert_eq!(byte_index(text, 99), text.len());
    }

    #[test]
    fn splice_cuts_and_pastes_by_char_range() {
        let mut text = String::from("héllo world");
        // delete the selection, as Cut and Delete do
        splice(&mut text, 5, 11, "");
        assert_eq!(text, "héllo");
        // insert at a collapsed selection, as Paste does
        splice(&mut text, 5, 5, " again");
        assert_eq!(text, "héllo again");
        // replace a live selection, as pasting over one does
        splice(&mut text, 0, 5, "bye");
        assert_eq!(text, "bye again");
    }

    #[test]
    fn slice_chars_extracts_the_selection() {
        assert_eq!(slice_chars("héllo world", 6, 11), "world");
    }
}

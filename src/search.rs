//! Substring search over the buffer, used to highlight matches in the
//! text widget's layouter.

use std::ops::Range;

/// All non-overlapping, case-insensitive matches of `needle` in `haystack`,
/// as byte ranges into the original text. Case is folded with
/// `char::to_lowercase`, so "É" matches "é". Ranges always land on char
/// boundaries and are safe to slice for highlighting.
pub fn find_matches(haystack: &str, needle: &str) -> Vec<Range<usize>> {
    let needle_fold: Vec<char> = needle.to_lowercase().chars().collect();
    let mut out = Vec::new();
    if needle_fold.is_empty() {
        return out;
    }
    let mut start = 0;
    while start < haystack.len() {
        match match_len_at(haystack, start, &needle_fold) {
            Some(len) => {
                out.push(start..start + len);
                start += len;
            }
            None => {
                // step one char forward
                start += haystack[start..].chars().next().map_or(1, char::len_utf8);
            }
        }
    }
    out
}

/// Byte length of a match of the folded needle starting at `start`, if any.
/// A needle that ends partway through one character's case folding (e.g.
/// "i" against 'İ' → "i\u{307}") is not a match, which keeps every returned
/// range on a char boundary.
fn match_len_at(haystack: &str, start: usize, needle_fold: &[char]) -> Option<usize> {
    let mut want = needle_fold.iter();
    let mut next_want = want.next();
    let mut len = 0;
    for c in haystack[start..].chars() {
        for folded in c.to_lowercase() {
            match next_want {
                Some(&w) if w == folded => next_want = want.next(),
                _ => return None,
            }
        }
        len += c.len_utf8();
        if next_want.is_none() {
            return Some(len);
        }
    }
    None
}

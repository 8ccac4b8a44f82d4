//! Append-only notes ledger.
//!
//! Each append produces one line `[YYYY-MM-DD HH:MM]: <text>`. Lines are
//! joined with `\n`; earlier lines are never touched. The database applies
//! the same concatenation atomically in a single `UPDATE`.

use crate::types::Timestamp;

/// `strftime` pattern for the entry prefix (UTC, minute precision).
pub const NOTE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Separator between ledger entries.
pub const NOTE_SEPARATOR: char = '\n';

/// Format a ledger entry for `text` stamped at `at`.
///
/// Returns `None` when the text is empty after trimming, which callers treat
/// as a no-op rather than an error.
pub fn format_note_entry(text: &str, at: Timestamp) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(format!(
        "[{}]: {trimmed}",
        at.format(NOTE_TIMESTAMP_FORMAT)
    ))
}

/// Append `entry` to an existing ledger. An absent or empty ledger becomes
/// just the entry.
pub fn append_entry(existing: Option<&str>, entry: &str) -> String {
    match existing {
        Some(notes) if !notes.is_empty() => format!("{notes}{NOTE_SEPARATOR}{entry}"),
        _ => entry.to_string(),
    }
}

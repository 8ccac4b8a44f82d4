//! RFC 4180 CSV encoding for project exports.

use std::borrow::Cow;

/// Export header, in column order.
pub const EXPORT_HEADERS: [&str; 12] = [
    "ID",
    "Project Name",
    "Project Group",
    "Department",
    "Date to Client",
    "Date Assigned",
    "Assigned Attorney",
    "QCP Attorney",
    "Internal Deadline",
    "Delivery Deadline",
    "Status",
    "Notes",
];

/// Longest notes value written to an export, in characters.
pub const NOTES_MAX_CHARS: usize = 200;

const ELLIPSIS: &str = "...";

/// Record terminator (CRLF per RFC 4180).
pub const RECORD_TERMINATOR: &str = "\r\n";

/// Truncate notes longer than [`NOTES_MAX_CHARS`] to 197 characters plus
/// `...`. Counts characters, not bytes.
pub fn truncate_notes(notes: &str) -> Cow<'_, str> {
    if notes.chars().count() <= NOTES_MAX_CHARS {
        return Cow::Borrowed(notes);
    }
    let keep = NOTES_MAX_CHARS - ELLIPSIS.len();
    let mut out: String = notes.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    Cow::Owned(out)
}

/// Quote a field if it contains a comma, quote, CR or LF; embedded quotes
/// are doubled.
pub fn escape_field(field: &str) -> Cow<'_, str> {
    if !field.contains([',', '"', '\r', '\n']) {
        return Cow::Borrowed(field);
    }
    Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
}

/// Append one record to `out`.
pub fn write_record<S: AsRef<str>>(out: &mut String, fields: &[S]) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&escape_field(field.as_ref()));
    }
    out.push_str(RECORD_TERMINATOR);
}

/// Start a document with the export header row.
pub fn header_document() -> String {
    let mut out = String::new();
    write_record(&mut out, &EXPORT_HEADERS);
    out
}

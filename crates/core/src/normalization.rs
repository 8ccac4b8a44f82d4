//! Soft, case-insensitive value normalization.
//!
//! There is no canonical vocabulary table: the canonical spelling of a value
//! is whichever casing is already held by a live project. The database layer
//! supplies the existing values (in first-seen order); this module decides.

/// Find the existing value that matches `candidate` case-insensitively.
///
/// `existing` is scanned in order and the first match wins.
pub fn canonical_match<'a, I>(existing: I, candidate: &str) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let wanted = candidate.to_lowercase();
    existing
        .into_iter()
        .find(|value| !value.is_empty() && value.to_lowercase() == wanted)
}

/// Return the canonical spelling of `candidate`, or `candidate` unchanged
/// when it is empty or matches nothing.
pub fn normalize_value<'a, I>(existing: I, candidate: &str) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    if candidate.is_empty() {
        return String::new();
    }
    canonical_match(existing, candidate)
        .unwrap_or(candidate)
        .to_string()
}

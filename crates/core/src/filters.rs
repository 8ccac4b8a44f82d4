//! Filter and sort helpers for project listings.
//!
//! Filtering is deliberately forgiving: an unknown sort field falls back to
//! `delivery_deadline`, an unknown direction falls back to ascending, and
//! unknown status labels are skipped.

use crate::fields::ProjectField;
use crate::status::ProjectStatus;

/// Sort field used when none (or an unknown one) is requested.
pub const DEFAULT_SORT_FIELD: ProjectField = ProjectField::DeliveryDeadline;

/// Columns a free-text search term is matched against.
pub const SEARCH_FIELDS: &[ProjectField] = &[
    ProjectField::ProjectName,
    ProjectField::Department,
    ProjectField::Notes,
    ProjectField::ProjectGroup,
];

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// `desc` (any casing) sorts descending; anything else ascending.
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        match raw {
            Some(dir) if dir.trim().eq_ignore_ascii_case("desc") => SortDirection::Desc,
            _ => SortDirection::Asc,
        }
    }

    pub fn sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Resolve a requested sort field, falling back to the default.
pub fn resolve_sort_field(raw: Option<&str>) -> ProjectField {
    raw.and_then(|name| ProjectField::from_name(name.trim()))
        .unwrap_or(DEFAULT_SORT_FIELD)
}

/// Build the `ORDER BY` clause body. Nulls always sort last; `id` breaks ties
/// so paging through equal keys is stable.
pub fn order_by_clause(field: ProjectField, direction: SortDirection) -> String {
    if field == ProjectField::Id {
        return format!("id {}", direction.sql());
    }
    format!("{} {} NULLS LAST, id ASC", field.column(), direction.sql())
}

// ---------------------------------------------------------------------------
// Status set
// ---------------------------------------------------------------------------

/// Parse a comma-separated status list.
///
/// Returns `None` if the input holds no non-blank tokens (treated as "not
/// supplied"). Unknown labels are dropped, so a list made only of unknown
/// labels yields `Some(vec![])`, which matches nothing.
pub fn parse_status_list(raw: &str) -> Option<Vec<ProjectStatus>> {
    let tokens: Vec<&str> = raw
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect();
    if tokens.is_empty() {
        return None;
    }

    let mut statuses = Vec::new();
    for token in tokens {
        if let Ok(status) = token.parse::<ProjectStatus>() {
            if !statuses.contains(&status) {
                statuses.push(status);
            }
        }
    }
    Some(statuses)
}

/// The status set a listing actually filters on.
///
/// An explicit set wins. Otherwise completed projects are hidden unless
/// `include_completed` is set.
pub fn effective_statuses(
    requested: Option<&[ProjectStatus]>,
    include_completed: bool,
) -> Vec<ProjectStatus> {
    match requested {
        Some(statuses) => statuses.to_vec(),
        None if include_completed => ProjectStatus::ALL.to_vec(),
        None => ProjectStatus::active(),
    }
}

// ---------------------------------------------------------------------------
// Free-text search
// ---------------------------------------------------------------------------

/// Split a search string into terms. Every term must match somewhere.
pub fn split_search_terms(search: &str) -> Vec<&str> {
    search.split_whitespace().collect()
}

/// Build an `ILIKE` substring pattern for `term`, escaping the LIKE
/// metacharacters (`\`, `%`, `_`) so they match literally.
pub fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

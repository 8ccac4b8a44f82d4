//! Report helpers: weekly column selection and monthly statistics.

use chrono::{Datelike, Duration, NaiveDate, TimeZone, Utc};

use crate::error::CoreError;
use crate::fields::ProjectField;
use crate::types::{CivilDate, Timestamp};

// ---------------------------------------------------------------------------
// Weekly status report
// ---------------------------------------------------------------------------

/// Client-facing name for the delivery deadline in weekly reports.
pub const ANTICIPATED_COMPLETION: &str = "anticipated_completion";

/// Columns shown when the caller does not pick any.
pub const DEFAULT_WEEKLY_FIELDS: &[&str] = &[
    "project_name",
    "department",
    "assigned_attorney",
    "status",
    ANTICIPATED_COMPLETION,
];

/// Selectable weekly columns and their display headings.
pub const WEEKLY_FIELD_OPTIONS: &[(&str, &str)] = &[
    ("id", "ID"),
    ("project_name", "Project Name"),
    ("project_group", "Project Group"),
    ("department", "Department"),
    ("date_to_client", "Date to Client"),
    ("date_assigned_to_us", "Date Assigned"),
    ("assigned_attorney", "Assigned Attorney"),
    ("qcp_attorney", "QCP Attorney"),
    ("internal_deadline", "Internal Deadline"),
    (ANTICIPATED_COMPLETION, "Anticipated Completion"),
    ("status", "Status"),
];

/// One column of a weekly report row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeeklyColumn {
    /// The delivery deadline under its client-facing name.
    AnticipatedCompletion,
    /// A project field emitted under its own name.
    Field(ProjectField),
}

impl WeeklyColumn {
    /// Key used in the output row.
    pub fn key(self) -> &'static str {
        match self {
            WeeklyColumn::AnticipatedCompletion => ANTICIPATED_COMPLETION,
            WeeklyColumn::Field(field) => field.column(),
        }
    }

    /// The project field whose value fills this column.
    pub fn source(self) -> ProjectField {
        match self {
            WeeklyColumn::AnticipatedCompletion => ProjectField::DeliveryDeadline,
            WeeklyColumn::Field(field) => field,
        }
    }

    fn parse(name: &str) -> Option<Self> {
        if name == ANTICIPATED_COMPLETION {
            Some(WeeklyColumn::AnticipatedCompletion)
        } else {
            ProjectField::from_name(name).map(WeeklyColumn::Field)
        }
    }
}

/// Resolve requested weekly column names.
///
/// An empty request means the default set. Names that are neither
/// `anticipated_completion` nor a project field are skipped.
pub fn resolve_weekly_columns<S: AsRef<str>>(requested: &[S]) -> Vec<WeeklyColumn> {
    if requested.is_empty() {
        return DEFAULT_WEEKLY_FIELDS
            .iter()
            .filter_map(|name| WeeklyColumn::parse(name))
            .collect();
    }
    requested
        .iter()
        .filter_map(|name| WeeklyColumn::parse(name.as_ref().trim()))
        .collect()
}

/// Split a comma-separated `fields` parameter.
pub fn parse_field_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// Monthly statistics
// ---------------------------------------------------------------------------

pub const MIN_REPORT_YEAR: i32 = 1900;
pub const MAX_REPORT_YEAR: i32 = 2100;

/// A closed civil-month window in UTC: `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWindow {
    pub start: Timestamp,
    pub end: Timestamp,
}

/// Compute the UTC window covering `year`-`month`.
///
/// `end` is the last representable instant of the month (one microsecond
/// before the next month starts, matching PostgreSQL timestamp precision).
pub fn month_window(year: i32, month: u32) -> Result<MonthWindow, CoreError> {
    if !(1..=12).contains(&month) {
        return Err(CoreError::Validation(format!(
            "Invalid month: {month}. Must be 1-12."
        )));
    }
    if !(MIN_REPORT_YEAR..=MAX_REPORT_YEAR).contains(&year) {
        return Err(CoreError::Validation(format!(
            "Invalid year: {year}. Must be {MIN_REPORT_YEAR}-{MAX_REPORT_YEAR}."
        )));
    }

    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| CoreError::Internal(format!("no first day for {year}-{month}")))?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(|| CoreError::Internal(format!("no month after {year}-{month}")))?;

    let start = Utc.from_utc_datetime(&first.and_time(chrono::NaiveTime::MIN));
    let next = Utc.from_utc_datetime(&next_first.and_time(chrono::NaiveTime::MIN));

    Ok(MonthWindow {
        start,
        end: next - Duration::microseconds(1),
    })
}

/// Round to one decimal place, ties to even on the exact binary value.
///
/// `{:.1}` formats from the exact decimal expansion, so `2.25` becomes `2.2`
/// and `0.15` (stored as `0.1499...`) becomes `0.1`.
pub fn round_to_tenth(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}

/// Mean whole days from assignment to the `updated_at` date, rounded to one
/// decimal. `None` for an empty set.
pub fn average_days_to_completion<I>(completed: I) -> Option<f64>
where
    I: IntoIterator<Item = (Timestamp, CivilDate)>,
{
    let mut total: i64 = 0;
    let mut count: i64 = 0;
    for (updated_at, assigned) in completed {
        total += (updated_at.date_naive() - assigned).num_days();
        count += 1;
    }
    if count == 0 {
        return None;
    }
    Some(round_to_tenth(total as f64 / count as f64))
}

/// The current UTC year and month, used when a report request omits them.
pub fn current_year_month(now: Timestamp) -> (i32, u32) {
    (now.year(), now.month())
}

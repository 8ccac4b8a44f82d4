//! Dashboard deadline buckets.
//!
//! Active projects with a delivery deadline fall into exactly one bucket
//! relative to a caller-supplied `today`:
//!
//! ```text
//! deadline <  today                 -> Overdue
//! today <= deadline <= today + 7d   -> DueThisWeek
//! deadline >  today + 7d            -> LongerDeadline
//! ```
//!
//! `today` is always a parameter so the classification is deterministic.

use chrono::Duration;
use serde::Serialize;

use crate::status::ProjectStatus;
use crate::types::CivilDate;

/// Width of the "due this week" window, inclusive of both ends.
pub const DUE_SOON_WINDOW_DAYS: i64 = 7;

/// Default number of rows in the recently-completed list.
pub const DEFAULT_RECENTLY_COMPLETED_LIMIT: i64 = 10;

/// Upper bound accepted for the recently-completed list.
pub const MAX_RECENTLY_COMPLETED_LIMIT: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeadlineBucket {
    Overdue,
    DueThisWeek,
    LongerDeadline,
}

/// Last day (inclusive) of the due-this-week window.
pub fn week_horizon(today: CivilDate) -> CivilDate {
    today + Duration::days(DUE_SOON_WINDOW_DAYS)
}

/// Classify a delivery deadline relative to `today`.
pub fn classify(today: CivilDate, deadline: CivilDate) -> DeadlineBucket {
    if deadline < today {
        DeadlineBucket::Overdue
    } else if deadline <= week_horizon(today) {
        DeadlineBucket::DueThisWeek
    } else {
        DeadlineBucket::LongerDeadline
    }
}

/// Bucket for a project, or `None` if it belongs on no deadline list
/// (completed, or no delivery deadline set).
pub fn bucket_for(
    status: ProjectStatus,
    delivery_deadline: Option<CivilDate>,
    today: CivilDate,
) -> Option<DeadlineBucket> {
    match status {
        ProjectStatus::Completed => None,
        ProjectStatus::InProgress
        | ProjectStatus::UnderReview
        | ProjectStatus::WaitingOnClient
        | ProjectStatus::OnHold => delivery_deadline.map(|d| classify(today, d)),
    }
}

/// Clamp a requested recently-completed limit to `1..=MAX`.
pub fn clamp_recently_completed_limit(limit: Option<i64>) -> i64 {
    limit
        .unwrap_or(DEFAULT_RECENTLY_COMPLETED_LIMIT)
        .clamp(1, MAX_RECENTLY_COMPLETED_LIMIT)
}

//! Query parameter types for API handlers.
//!
//! Parameters arrive as raw strings and are parsed leniently: malformed
//! dates are dropped and unrecognized flags read as `false`, so a partially
//! filled filter form never turns into an error.

use chrono::NaiveDate;
use docket_core::filters::parse_status_list;
use docket_core::reports::{current_year_month, parse_field_list};
use docket_core::types::{CivilDate, Timestamp};
use docket_db::models::project::ProjectFilter;
use serde::Deserialize;

/// Filter and sort parameters shared by the project list and CSV export.
#[derive(Debug, Default, Deserialize)]
pub struct ProjectListParams {
    /// Comma-separated status labels.
    pub status: Option<String>,
    pub include_completed: Option<String>,
    pub department: Option<String>,
    pub assigned_attorney: Option<String>,
    pub qcp_attorney: Option<String>,
    pub search: Option<String>,
    pub delivery_deadline_from: Option<String>,
    pub delivery_deadline_to: Option<String>,
    pub date_assigned_from: Option<String>,
    pub date_assigned_to: Option<String>,
    pub include_deleted: Option<String>,
    pub sort_by: Option<String>,
    pub sort_dir: Option<String>,
}

impl ProjectListParams {
    pub fn into_filter(self) -> ProjectFilter {
        ProjectFilter {
            statuses: self.status.as_deref().and_then(parse_status_list),
            include_completed: parse_flag(self.include_completed.as_deref()),
            department: non_empty(self.department),
            assigned_attorney: non_empty(self.assigned_attorney),
            qcp_attorney: non_empty(self.qcp_attorney),
            search: non_empty(self.search),
            delivery_deadline_from: parse_date(self.delivery_deadline_from.as_deref()),
            delivery_deadline_to: parse_date(self.delivery_deadline_to.as_deref()),
            date_assigned_from: parse_date(self.date_assigned_from.as_deref()),
            date_assigned_to: parse_date(self.date_assigned_to.as_deref()),
            include_deleted: parse_flag(self.include_deleted.as_deref()),
            sort_by: non_empty(self.sort_by),
            sort_dir: non_empty(self.sort_dir),
        }
    }
}

/// Weekly report column selection (`?fields=a,b,c`).
#[derive(Debug, Default, Deserialize)]
pub struct WeeklyReportParams {
    pub fields: Option<String>,
}

impl WeeklyReportParams {
    pub fn field_names(&self) -> Vec<String> {
        self.fields.as_deref().map(parse_field_list).unwrap_or_default()
    }
}

/// Monthly report period. Missing or non-numeric values fall back to the
/// current month; numeric values out of range are rejected downstream.
#[derive(Debug, Default, Deserialize)]
pub struct MonthlyReportParams {
    pub year: Option<String>,
    pub month: Option<String>,
}

impl MonthlyReportParams {
    pub fn resolve(&self, now: Timestamp) -> (i32, u32) {
        let (current_year, current_month) = current_year_month(now);
        let year = parse_number(self.year.as_deref()).unwrap_or(current_year);
        let month = parse_number(self.month.as_deref()).unwrap_or(current_month);
        (year, month)
    }
}

/// Optional limit for the dashboard's recently-completed list.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardParams {
    pub limit: Option<String>,
}

fn parse_flag(raw: Option<&str>) -> bool {
    raw.map(|v| v.trim().to_ascii_lowercase())
        .is_some_and(|v| matches!(v.as_str(), "true" | "1" | "yes"))
}

fn parse_date(raw: Option<&str>) -> Option<CivilDate> {
    raw.and_then(|v| NaiveDate::parse_from_str(v.trim(), "%Y-%m-%d").ok())
}

pub(crate) fn parse_number<T: std::str::FromStr>(raw: Option<&str>) -> Option<T> {
    raw.and_then(|v| v.trim().parse().ok())
}

fn non_empty(raw: Option<String>) -> Option<String> {
    raw.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

//! Report models: weekly rows, monthly statistics, CSV rendering.

use std::collections::BTreeMap;

use docket_core::csv::{header_document, truncate_notes, write_record};
use docket_core::reports::WeeklyColumn;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::models::project::Project;

/// One weekly report row, keyed by column name in request order.
pub type WeeklyRow = IndexMap<String, Value>;

/// Project the requested columns out of a project.
pub fn weekly_row(project: &Project, columns: &[WeeklyColumn]) -> WeeklyRow {
    columns
        .iter()
        .map(|column| {
            (
                column.key().to_string(),
                project.field_value(column.source()),
            )
        })
        .collect()
}

/// Statistics for one civil month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyStats {
    pub year: i32,
    pub month: u32,
    pub projects_opened: i64,
    pub projects_completed: i64,
    pub by_department: BTreeMap<String, i64>,
    pub by_attorney: BTreeMap<String, i64>,
    pub avg_days_to_completion: Option<f64>,
}

/// Render projects as an RFC 4180 document with the fixed export header.
pub fn render_projects_csv(projects: &[Project]) -> String {
    let mut out = header_document();
    for project in projects {
        write_record(&mut out, &export_record(project));
    }
    out
}

fn export_record(project: &Project) -> [String; 12] {
    fn opt<T: ToString>(value: Option<T>) -> String {
        value.map(|v| v.to_string()).unwrap_or_default()
    }

    [
        project.id.to_string(),
        project.project_name.clone(),
        opt(project.project_group.as_deref()),
        project.department.clone(),
        project.date_to_client.to_string(),
        project.date_assigned_to_us.to_string(),
        project.assigned_attorney.clone(),
        project.qcp_attorney.clone(),
        opt(project.internal_deadline),
        opt(project.delivery_deadline),
        project.status.as_str().to_string(),
        project
            .notes
            .as_deref()
            .map(|notes| truncate_notes(notes).into_owned())
            .unwrap_or_default(),
    ]
}

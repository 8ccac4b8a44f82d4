//! Project entity model and DTOs.

use docket_core::error::CoreError;
use docket_core::fields::ProjectField;
use docket_core::notes::format_note_entry;
use docket_core::status::{parse_optional_status, ProjectStatus};
use docket_core::types::{CivilDate, DbId, Timestamp};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use validator::Validate;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub project_name: String,
    pub project_group: Option<String>,
    pub department: String,
    pub date_to_client: CivilDate,
    pub date_assigned_to_us: CivilDate,
    pub internal_deadline: Option<CivilDate>,
    pub delivery_deadline: Option<CivilDate>,
    pub assigned_attorney: String,
    pub qcp_attorney: String,
    #[sqlx(try_from = "String")]
    pub status: ProjectStatus,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

impl Project {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// The value of one field as JSON. Dates render as `YYYY-MM-DD`,
    /// timestamps as RFC 3339, absent values as `null`.
    pub fn field_value(&self, field: ProjectField) -> Value {
        fn text(value: Option<&str>) -> Value {
            value.map_or(Value::Null, Value::from)
        }
        fn date(value: Option<CivilDate>) -> Value {
            value.map_or(Value::Null, |d| Value::String(d.to_string()))
        }
        fn timestamp(value: Option<Timestamp>) -> Value {
            value.map_or(Value::Null, |t| Value::String(t.to_rfc3339()))
        }

        match field {
            ProjectField::Id => Value::from(self.id),
            ProjectField::ProjectName => text(Some(&self.project_name)),
            ProjectField::ProjectGroup => text(self.project_group.as_deref()),
            ProjectField::Department => text(Some(&self.department)),
            ProjectField::DateToClient => date(Some(self.date_to_client)),
            ProjectField::DateAssignedToUs => date(Some(self.date_assigned_to_us)),
            ProjectField::InternalDeadline => date(self.internal_deadline),
            ProjectField::DeliveryDeadline => date(self.delivery_deadline),
            ProjectField::AssignedAttorney => text(Some(&self.assigned_attorney)),
            ProjectField::QcpAttorney => text(Some(&self.qcp_attorney)),
            ProjectField::Status => Value::from(self.status.as_str()),
            ProjectField::Notes => text(self.notes.as_deref()),
            ProjectField::CreatedAt => timestamp(Some(self.created_at)),
            ProjectField::UpdatedAt => timestamp(Some(self.updated_at)),
            ProjectField::DeletedAt => timestamp(self.deleted_at),
        }
    }
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

/// Required fields in the order they are reported when missing.
const REQUIRED_FIELDS: &[&str] = &[
    "project_name",
    "department",
    "date_to_client",
    "date_assigned_to_us",
    "assigned_attorney",
    "qcp_attorney",
];

/// DTO for creating a new project, as received from a client.
///
/// Required fields are `Option` so a missing field surfaces as a validation
/// error naming every missing field, rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateProject {
    #[validate(required, length(min = 1))]
    pub project_name: Option<String>,
    pub project_group: Option<String>,
    #[validate(required, length(min = 1))]
    pub department: Option<String>,
    #[validate(required)]
    pub date_to_client: Option<CivilDate>,
    #[validate(required)]
    pub date_assigned_to_us: Option<CivilDate>,
    pub internal_deadline: Option<CivilDate>,
    pub delivery_deadline: Option<CivilDate>,
    #[validate(required, length(min = 1))]
    pub assigned_attorney: Option<String>,
    #[validate(required, length(min = 1))]
    pub qcp_attorney: Option<String>,
    /// Defaults to `In Progress` if omitted or blank.
    pub status: Option<String>,
    /// Initial note; stored as the first timestamped ledger entry.
    pub notes: Option<String>,
}

/// A validated project ready to insert (before normalization).
#[derive(Debug, Clone)]
pub struct NewProject {
    pub project_name: String,
    pub project_group: Option<String>,
    pub department: String,
    pub date_to_client: CivilDate,
    pub date_assigned_to_us: CivilDate,
    pub internal_deadline: Option<CivilDate>,
    pub delivery_deadline: Option<CivilDate>,
    pub assigned_attorney: String,
    pub qcp_attorney: String,
    pub status: ProjectStatus,
    pub notes: Option<String>,
}

impl CreateProject {
    /// Validate required fields and status, producing an insertable project.
    ///
    /// `now` stamps the initial note, if any.
    pub fn into_new_project(self, now: Timestamp) -> Result<NewProject, CoreError> {
        let input = CreateProject {
            project_name: trim_owned(self.project_name),
            department: trim_owned(self.department),
            assigned_attorney: trim_owned(self.assigned_attorney),
            qcp_attorney: trim_owned(self.qcp_attorney),
            ..self
        };

        if let Err(errors) = input.validate() {
            let field_errors = errors.field_errors();
            let missing: Vec<&str> = REQUIRED_FIELDS
                .iter()
                .copied()
                .filter(|name| field_errors.contains_key(*name))
                .collect();
            return Err(CoreError::Validation(format!(
                "Missing required fields: [{}]",
                missing.join(", ")
            )));
        }

        let status = parse_optional_status(input.status.as_deref())?.unwrap_or_default();

        // validate() guarantees the required fields are present.
        let (
            Some(project_name),
            Some(department),
            Some(date_to_client),
            Some(date_assigned_to_us),
            Some(assigned_attorney),
            Some(qcp_attorney),
        ) = (
            input.project_name,
            input.department,
            input.date_to_client,
            input.date_assigned_to_us,
            input.assigned_attorney,
            input.qcp_attorney,
        )
        else {
            return Err(CoreError::Internal(
                "required project fields missing after validation".to_string(),
            ));
        };

        Ok(NewProject {
            project_name,
            project_group: blank_to_none(input.project_group),
            department,
            date_to_client,
            date_assigned_to_us,
            internal_deadline: input.internal_deadline,
            delivery_deadline: input.delivery_deadline,
            assigned_attorney,
            qcp_attorney,
            status,
            notes: input
                .notes
                .as_deref()
                .and_then(|text| format_note_entry(text, now)),
        })
    }
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

/// DTO for patching an existing project. Every field is optional.
///
/// Nullable columns use `Option<Option<T>>`: absent leaves the column alone,
/// explicit `null` clears it. Notes are not patchable here; they only grow
/// through the notes ledger.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProject {
    pub project_name: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub project_group: Option<Option<String>>,
    pub department: Option<String>,
    pub date_to_client: Option<CivilDate>,
    pub date_assigned_to_us: Option<CivilDate>,
    #[serde(default, deserialize_with = "present")]
    pub internal_deadline: Option<Option<CivilDate>>,
    #[serde(default, deserialize_with = "present")]
    pub delivery_deadline: Option<Option<CivilDate>>,
    pub assigned_attorney: Option<String>,
    pub qcp_attorney: Option<String>,
    pub status: Option<String>,
}

/// A validated patch (before normalization).
#[derive(Debug, Clone, Default)]
pub struct ProjectPatch {
    pub project_name: Option<String>,
    pub project_group: Option<Option<String>>,
    pub department: Option<String>,
    pub date_to_client: Option<CivilDate>,
    pub date_assigned_to_us: Option<CivilDate>,
    pub internal_deadline: Option<Option<CivilDate>>,
    pub delivery_deadline: Option<Option<CivilDate>>,
    pub assigned_attorney: Option<String>,
    pub qcp_attorney: Option<String>,
    pub status: Option<ProjectStatus>,
}

impl UpdateProject {
    /// Validate the patch: required text fields may not be blanked and the
    /// status must be in the vocabulary.
    pub fn into_patch(self) -> Result<ProjectPatch, CoreError> {
        Ok(ProjectPatch {
            project_name: non_blank("project_name", self.project_name)?,
            project_group: self.project_group.map(blank_to_none),
            department: non_blank("department", self.department)?,
            date_to_client: self.date_to_client,
            date_assigned_to_us: self.date_assigned_to_us,
            internal_deadline: self.internal_deadline,
            delivery_deadline: self.delivery_deadline,
            assigned_attorney: non_blank("assigned_attorney", self.assigned_attorney)?,
            qcp_attorney: non_blank("qcp_attorney", self.qcp_attorney)?,
            status: parse_optional_status(self.status.as_deref())?,
        })
    }
}

/// Distinguish "field present (possibly null)" from "field absent".
fn present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

fn trim_owned(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string())
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    trim_owned(value).filter(|v| !v.is_empty())
}

fn non_blank(field: &str, value: Option<String>) -> Result<Option<String>, CoreError> {
    match trim_owned(value) {
        Some(v) if v.is_empty() => Err(CoreError::Validation(format!(
            "{field} cannot be empty"
        ))),
        other => Ok(other),
    }
}

// ---------------------------------------------------------------------------
// List filter
// ---------------------------------------------------------------------------

/// Structured filter for project listings and CSV export.
///
/// Every field is optional; the defaults hide completed and soft-deleted
/// projects and sort by delivery deadline ascending.
#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    /// Explicit status set. `None` means "all but Completed" unless
    /// `include_completed` is set.
    pub statuses: Option<Vec<ProjectStatus>>,
    pub include_completed: bool,
    /// Case-insensitive exact match.
    pub department: Option<String>,
    /// Case-insensitive exact match.
    pub assigned_attorney: Option<String>,
    /// Case-insensitive exact match.
    pub qcp_attorney: Option<String>,
    /// Whitespace-separated terms; each must appear in at least one of
    /// project name, department, notes, or project group.
    pub search: Option<String>,
    pub delivery_deadline_from: Option<CivilDate>,
    pub delivery_deadline_to: Option<CivilDate>,
    pub date_assigned_from: Option<CivilDate>,
    pub date_assigned_to: Option<CivilDate>,
    pub include_deleted: bool,
    /// Any project field name; unknown names sort by delivery deadline.
    pub sort_by: Option<String>,
    /// `asc` (default) or `desc`.
    pub sort_dir: Option<String>,
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};

    use super::*;

    fn complete_input() -> CreateProject {
        CreateProject {
            project_name: Some("Zoning appeal".to_string()),
            project_group: Some("  ".to_string()),
            department: Some(" Planning ".to_string()),
            date_to_client: CivilDate::from_ymd_opt(2026, 1, 5),
            date_assigned_to_us: CivilDate::from_ymd_opt(2026, 1, 6),
            internal_deadline: None,
            delivery_deadline: CivilDate::from_ymd_opt(2026, 2, 1),
            assigned_attorney: Some("A. Attorney".to_string()),
            qcp_attorney: Some("Q. Partner".to_string()),
            status: None,
            notes: None,
        }
    }

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2026, 1, 7, 14, 30, 0).unwrap()
    }

    #[test]
    fn create_defaults_status_and_trims() {
        let project = complete_input().into_new_project(now()).unwrap();
        assert_eq!(project.status, ProjectStatus::InProgress);
        assert_eq!(project.department, "Planning");
        assert_eq!(project.project_group, None);
        assert_eq!(project.notes, None);
    }

    #[test]
    fn create_reports_every_missing_field() {
        let input = CreateProject {
            project_name: Some("   ".to_string()),
            date_to_client: None,
            qcp_attorney: None,
            ..complete_input()
        };
        assert_matches!(
            input.into_new_project(now()),
            Err(CoreError::Validation(msg))
                if msg == "Missing required fields: [project_name, date_to_client, qcp_attorney]"
        );
    }

    #[test]
    fn create_rejects_unknown_status() {
        let input = CreateProject {
            status: Some("Archived".to_string()),
            ..complete_input()
        };
        assert_matches!(input.into_new_project(now()), Err(CoreError::Validation(_)));
    }

    #[test]
    fn create_stamps_initial_note() {
        let input = CreateProject {
            notes: Some(" Intake call done ".to_string()),
            ..complete_input()
        };
        let project = input.into_new_project(now()).unwrap();
        assert_eq!(
            project.notes.as_deref(),
            Some("[2026-01-07 14:30]: Intake call done")
        );
    }

    #[test]
    fn update_distinguishes_null_from_absent() {
        let patch: UpdateProject =
            serde_json::from_str(r#"{"delivery_deadline": null, "status": "Completed"}"#).unwrap();
        assert_eq!(patch.delivery_deadline, Some(None));
        assert_eq!(patch.internal_deadline, None);

        let patch = patch.into_patch().unwrap();
        assert_eq!(patch.status, Some(ProjectStatus::Completed));
    }

    #[test]
    fn update_ignores_notes() {
        let patch: UpdateProject =
            serde_json::from_str(r#"{"notes": "rewritten history"}"#).unwrap();
        let patch = patch.into_patch().unwrap();
        assert!(patch.project_name.is_none() && patch.status.is_none());
    }

    #[test]
    fn update_rejects_blank_required_text() {
        let patch = UpdateProject {
            department: Some("  ".to_string()),
            ..Default::default()
        };
        assert_matches!(
            patch.into_patch(),
            Err(CoreError::Validation(msg)) if msg == "department cannot be empty"
        );
    }
}

//! Project field vocabulary.
//!
//! Field names double as SQL column names, so every place that interpolates
//! a caller-supplied field name into a query goes through one of these enums
//! first. Nothing outside this whitelist ever reaches a query string.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// All project columns
// ---------------------------------------------------------------------------

/// Every column of the `projects` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectField {
    Id,
    ProjectName,
    ProjectGroup,
    Department,
    DateToClient,
    DateAssignedToUs,
    InternalDeadline,
    DeliveryDeadline,
    AssignedAttorney,
    QcpAttorney,
    Status,
    Notes,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

impl ProjectField {
    pub const ALL: &'static [ProjectField] = &[
        ProjectField::Id,
        ProjectField::ProjectName,
        ProjectField::ProjectGroup,
        ProjectField::Department,
        ProjectField::DateToClient,
        ProjectField::DateAssignedToUs,
        ProjectField::InternalDeadline,
        ProjectField::DeliveryDeadline,
        ProjectField::AssignedAttorney,
        ProjectField::QcpAttorney,
        ProjectField::Status,
        ProjectField::Notes,
        ProjectField::CreatedAt,
        ProjectField::UpdatedAt,
        ProjectField::DeletedAt,
    ];

    /// Column name (identical to the serialized field name).
    pub fn column(self) -> &'static str {
        match self {
            ProjectField::Id => "id",
            ProjectField::ProjectName => "project_name",
            ProjectField::ProjectGroup => "project_group",
            ProjectField::Department => "department",
            ProjectField::DateToClient => "date_to_client",
            ProjectField::DateAssignedToUs => "date_assigned_to_us",
            ProjectField::InternalDeadline => "internal_deadline",
            ProjectField::DeliveryDeadline => "delivery_deadline",
            ProjectField::AssignedAttorney => "assigned_attorney",
            ProjectField::QcpAttorney => "qcp_attorney",
            ProjectField::Status => "status",
            ProjectField::Notes => "notes",
            ProjectField::CreatedAt => "created_at",
            ProjectField::UpdatedAt => "updated_at",
            ProjectField::DeletedAt => "deleted_at",
        }
    }

    /// Look up a field by its exact column name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.column() == name)
    }
}

// ---------------------------------------------------------------------------
// Soft-normalized fields
// ---------------------------------------------------------------------------

/// Free-text fields whose casing is matched against existing values on write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizedField {
    Department,
    AssignedAttorney,
    QcpAttorney,
}

impl NormalizedField {
    pub const ALL: &'static [NormalizedField] = &[
        NormalizedField::Department,
        NormalizedField::AssignedAttorney,
        NormalizedField::QcpAttorney,
    ];

    pub fn column(self) -> &'static str {
        match self {
            NormalizedField::Department => "department",
            NormalizedField::AssignedAttorney => "assigned_attorney",
            NormalizedField::QcpAttorney => "qcp_attorney",
        }
    }
}

// ---------------------------------------------------------------------------
// Autocomplete fields
// ---------------------------------------------------------------------------

/// Fields exposed through the distinct-values (autocomplete) lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutocompleteField {
    Department,
    AssignedAttorney,
    QcpAttorney,
    Status,
    ProjectGroup,
}

impl AutocompleteField {
    pub const ALL: &'static [AutocompleteField] = &[
        AutocompleteField::Department,
        AutocompleteField::AssignedAttorney,
        AutocompleteField::QcpAttorney,
        AutocompleteField::Status,
        AutocompleteField::ProjectGroup,
    ];

    pub fn column(self) -> &'static str {
        match self {
            AutocompleteField::Department => "department",
            AutocompleteField::AssignedAttorney => "assigned_attorney",
            AutocompleteField::QcpAttorney => "qcp_attorney",
            AutocompleteField::Status => "status",
            AutocompleteField::ProjectGroup => "project_group",
        }
    }

    /// Parse a caller-supplied field name, rejecting anything outside the set.
    pub fn parse(name: &str) -> Result<Self, CoreError> {
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.column() == name)
            .ok_or_else(|| {
                let allowed: Vec<&str> = Self::ALL.iter().map(|f| f.column()).collect();
                CoreError::Validation(format!(
                    "Invalid field: {name}. Must be one of: {}",
                    allowed.join(", ")
                ))
            })
    }
}

impl From<NormalizedField> for AutocompleteField {
    fn from(field: NormalizedField) -> Self {
        match field {
            NormalizedField::Department => AutocompleteField::Department,
            NormalizedField::AssignedAttorney => AutocompleteField::AssignedAttorney,
            NormalizedField::QcpAttorney => AutocompleteField::QcpAttorney,
        }
    }
}

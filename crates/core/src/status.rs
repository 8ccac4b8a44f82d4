//! Project lifecycle status.
//!
//! Statuses are stored as their display label in a TEXT column guarded by a
//! CHECK constraint, so the label is both the wire value and the database
//! value. Parsing is exact (labels are case-sensitive).

use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

macro_rules! define_status_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $label)] $variant ),+
        }

        impl $name {
            /// Every status, in lifecycle order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The stored / displayed label.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            /// All labels, in lifecycle order.
            pub fn labels() -> Vec<&'static str> {
                Self::ALL.iter().map(|s| s.as_str()).collect()
            }
        }

        impl FromStr for $name {
            type Err = UnknownStatus;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($label => Ok($name::$variant),)+
                    other => Err(UnknownStatus(other.to_string())),
                }
            }
        }
    };
}

define_status_enum! {
    /// Where a project sits in its lifecycle.
    ProjectStatus {
        InProgress => "In Progress",
        UnderReview => "Under Review",
        WaitingOnClient => "Waiting on Client",
        OnHold => "On-Hold",
        Completed => "Completed",
    }
}

impl ProjectStatus {
    /// Whether the project is finished. Completed projects leave the
    /// deadline buckets and the weekly report.
    pub fn is_completed(self) -> bool {
        match self {
            ProjectStatus::Completed => true,
            ProjectStatus::InProgress
            | ProjectStatus::UnderReview
            | ProjectStatus::WaitingOnClient
            | ProjectStatus::OnHold => false,
        }
    }

    /// Statuses still being worked on (everything except `Completed`).
    pub fn active() -> Vec<ProjectStatus> {
        Self::ALL
            .iter()
            .copied()
            .filter(|s| !s.is_completed())
            .collect()
    }
}

impl Default for ProjectStatus {
    fn default() -> Self {
        ProjectStatus::InProgress
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for ProjectStatus {
    type Error = UnknownStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A status label outside the fixed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "Invalid status: {0}. Must be one of: {labels}",
    labels = ProjectStatus::labels().join(", ")
)]
pub struct UnknownStatus(pub String);

impl From<UnknownStatus> for CoreError {
    fn from(err: UnknownStatus) -> Self {
        CoreError::Validation(err.to_string())
    }
}

/// Parse an optional status supplied on a write.
///
/// Absent or blank input yields `None` (caller keeps / defaults the current
/// value); anything else must be an exact label.
pub fn parse_optional_status(raw: Option<&str>) -> Result<Option<ProjectStatus>, CoreError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(label) => Ok(Some(label.parse()?)),
    }
}

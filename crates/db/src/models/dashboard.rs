//! Dashboard response models.

use docket_core::types::CivilDate;
use serde::Serialize;

use crate::models::project::Project;

/// One dashboard list with its size.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectBucket {
    pub data: Vec<Project>,
    pub count: usize,
}

impl From<Vec<Project>> for ProjectBucket {
    fn from(data: Vec<Project>) -> Self {
        let count = data.len();
        Self { data, count }
    }
}

/// All four dashboard lists, computed against the same `today`.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub today: CivilDate,
    pub overdue: ProjectBucket,
    pub due_this_week: ProjectBucket,
    pub longer_deadline: ProjectBucket,
    pub recently_completed: ProjectBucket,
}

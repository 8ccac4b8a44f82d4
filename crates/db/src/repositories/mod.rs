//! Repository layer: one zero-sized struct per concern, methods take
//! `&PgPool` (or a connection) first.

pub mod dashboard_repo;
pub mod project_repo;
pub mod report_repo;

pub use dashboard_repo::DashboardRepo;
pub use project_repo::ProjectRepo;
pub use report_repo::{ReportError, ReportRepo};

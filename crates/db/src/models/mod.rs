//! Domain model structs and DTOs.
//!
//! - [`project`]: the `projects` row, create/update DTOs and the list filter
//! - [`dashboard`]: deadline bucket summary
//! - [`report`]: weekly rows, monthly statistics and CSV rendering

pub mod dashboard;
pub mod project;
pub mod report;

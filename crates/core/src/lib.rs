//! Domain logic for the legal project tracker.
//!
//! Everything in this crate is pure: no database handles, no HTTP types.
//! The `db` crate owns persistence and the `api` crate owns the HTTP
//! boundary; both lean on the vocabulary and rules defined here.

pub mod csv;
pub mod deadlines;
pub mod error;
pub mod fields;
pub mod filters;
pub mod normalization;
pub mod notes;
pub mod reports;
pub mod status;
pub mod types;

//! Docket API server library.
//!
//! Exposes config, state, error handling, handlers and routes so both the
//! binary entrypoint and the integration tests build the same router.

pub mod config;
pub mod error;
pub mod handlers;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;

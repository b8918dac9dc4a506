//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`fixture`] - A seeded in-memory backend with one user per role.
//! - [`http`] - One-shot request helpers for the axum router.

pub mod fixture;
pub mod http;

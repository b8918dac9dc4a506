//! Outbound adapters (driven side).
//!
//! - [`supabase`] - hosted Supabase project (production)
//! - [`memory`] - in-process backend for tests and local development

pub mod memory;
pub mod supabase;

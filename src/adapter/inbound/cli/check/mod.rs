//! Configuration and backend validation command handlers.

pub mod backend;
pub mod config;

//! Infrastructure configuration modules.

pub mod access;
pub mod backend;
pub mod logging;
pub mod server;
pub mod settings;
pub mod wallet;

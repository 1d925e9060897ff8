//! The battle engine: data model, stat derivation, initialization, pure
//! turn resolution, and the HTTP endpoints on top.

pub mod endpoints;
pub mod init;
pub mod resolve;
pub mod stats;
pub mod types;

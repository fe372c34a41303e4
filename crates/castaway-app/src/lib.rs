// Library root: re-exports all modules so integration tests and the binary
// share the same code paths.

pub mod commands;
pub mod config;
pub mod data;
pub mod report;

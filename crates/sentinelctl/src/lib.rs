//! sentinelctl library - console state and TUI, exposed for integration tests

pub mod app;
pub mod config;
pub mod logging;
pub mod snapshot;
pub mod tui;

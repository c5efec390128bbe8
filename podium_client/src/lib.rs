//! Internal modules for the podium terminal client.
//!
//! This library provides configuration, the HTTP API client, command
//! parsing and the terminal UI used by the podium_client binary.

pub mod api_client;
pub mod commands;
pub mod config;
pub mod logging;
pub mod tui_app;

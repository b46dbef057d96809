//! Atrium Host Library
//!
//! This library exposes host internals for integration testing.
//! The main entry point is the `atrium` binary.

pub mod cli;
pub mod config;
pub mod http;
pub mod menu;
pub mod state;

pub use config::Config;
pub use http::HttpTransport;
pub use state::AppState;

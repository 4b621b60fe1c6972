//! GridBudget HTTP server: wires the SQLite repositories into the core
//! services and exposes the budget operations over JSON.

pub mod api;
pub mod config;
pub mod error;
pub mod main_lib;

pub use main_lib::{build_state, init_tracing, AppState};

//! Server Assembly
//!
//! Startup configuration, the application state handed to every route, and
//! the initialization that wires the Postgres-backed store into the router.

pub mod config;
pub mod init;
pub mod state;

pub use config::AppConfig;
pub use state::AppState;

//! inkpost — a small HTTP service exposing CRUD operations on posts and
//! users, with token-based authentication, declarative request validation,
//! and centralized error formatting.
//!
//! Every route is served by a chain of composable stages (validate →
//! authenticate → execute → format → send) sharing a per-request context;
//! all failures converge on a single error funnel. See the `pipeline`
//! module for the chain driver and the `resources` modules for the chains
//! themselves.

pub mod auth;
pub mod error;
pub mod outbound;
pub mod pipeline;
pub mod resources;
pub mod routes;
pub mod server;
pub mod store;
pub mod validate;

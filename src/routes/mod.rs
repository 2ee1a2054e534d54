//! Route Assembly
//!
//! Combines the per-resource route tables into the application router.

pub mod router;

pub use router::create_router;

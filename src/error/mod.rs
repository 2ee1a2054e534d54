//! Error Module
//!
//! Defines the domain failure taxonomy used throughout the request pipeline
//! and the single conversion point that turns any failure into an HTTP
//! response.
//!
//! # Architecture
//!
//! - **`types`** - The `ApiError` taxonomy and constructors
//! - **`conversion`** - `IntoResponse` implementation (the error funnel)
//!
//! Every stage raises `ApiError`; the chain driver hands the error to the
//! funnel, which maps it to a status code and a JSON body. Non-domain faults
//! become a generic 500 and only their detail is logged server-side.

pub mod conversion;
pub mod types;

pub use types::ApiError;

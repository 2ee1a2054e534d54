//! Declarative Request Validation
//!
//! A schema is a list of field rules (`kind`, required or not) interpreted
//! by a generic validator. Validation is exhaustive: every rule is checked
//! and every failure collected, unknown fields are stripped rather than
//! rejected, and the cleaned value replaces the original request section.
//!
//! Resource-specific schemas live next to their resource (see
//! `resources::post::validation` and `resources::user::validation`).

pub mod schema;
pub mod stage;

pub use schema::{Kind, Schema};
pub use stage::ValidateStage;

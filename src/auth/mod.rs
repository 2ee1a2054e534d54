//! Authentication
//!
//! Token issuing/verification, password hashing, and the pipeline stage
//! that turns a bearer token into an [`Identity`] on the request context.
//!
//! Verification is purely cryptographic against the server secret: there is
//! no revocation list and no store lookup, so a token stays valid until its
//! expiry horizon. That statelessness is the deliberate trade-off.

pub mod password;
pub mod stage;
pub mod tokens;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::resources::user::model::Role;

pub use stage::AuthenticateStage;
pub use tokens::TokenService;

/// The authenticated caller, resolved from a verified token.
///
/// Attached to the request context by the authentication stage and
/// read-only downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: Uuid,
    pub role: Role,
}

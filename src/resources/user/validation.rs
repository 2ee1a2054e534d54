//! Request schemas for the user routes.

use crate::validate::{Kind, Schema};

/// Body schema for POST /api/users/register.
pub fn register() -> Schema {
    Schema::new()
        .require("name", Kind::text())
        .require("email", Kind::Email)
        .require("password", Kind::text_min(8))
}

/// Body schema for POST /api/users/login.
pub fn login() -> Schema {
    Schema::new()
        .require("email", Kind::Email)
        .require("password", Kind::text())
}

/// Body schema for POST /api/users/subscribe.
pub fn subscribe() -> Schema {
    Schema::new()
        .require("name", Kind::text())
        .require("email", Kind::Email)
}

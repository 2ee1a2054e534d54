//! Request schemas for the post routes.

use crate::validate::{Kind, Schema};

/// Body schema for POST /api/posts/create.
pub fn create() -> Schema {
    Schema::new()
        .require("title", Kind::text())
        .require("body", Kind::text())
}

/// Path-parameter schema for GET /api/posts/getData/{postId}.
pub fn get_data() -> Schema {
    Schema::new().require("postId", Kind::Id)
}

//! Post resource: creation, direct lookup, and listing.

pub mod model;
pub mod routes;
pub mod service;
pub mod stages;
pub mod validation;

pub use model::{NewPost, Post, PostView};
pub use service::PostService;

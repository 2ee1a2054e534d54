/**
 * Post Model
 *
 * The stored post document and the trimmed view returned by the API.
 * `title` and `body` are non-empty by the time a post is constructed —
 * the validation stage enforces that before any service call.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::Document;

/// A post as stored in the `posts` collection.
///
/// Never physically deleted: `soft_delete` hides it from listing while
/// keeping it reachable by direct id lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub soft_delete: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn new(title: String, body: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            body,
            soft_delete: false,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Document for Post {
    const COLLECTION: &'static str = "posts";

    fn id(&self) -> Uuid {
        self.id
    }

    fn soft_deleted(&self) -> bool {
        self.soft_delete
    }
}

/// Validated input for creating a post.
#[derive(Debug, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub body: String,
}

/// The client-facing shape of a post.
#[derive(Debug, Clone, Serialize)]
pub struct PostView {
    pub title: String,
    pub body: String,
}

impl From<&Post> for PostView {
    fn from(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            body: post.body.clone(),
        }
    }
}

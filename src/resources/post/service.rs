/**
 * Post Service
 *
 * Domain operations for posts over a store collection. The service wraps
 * raw store faults into typed failures; absence on lookup stays an explicit
 * `None` so callers can tell "not found" apart from "lookup failed".
 */

use std::sync::Arc;

use uuid::Uuid;

use crate::error::ApiError;
use crate::resources::post::model::{NewPost, Post};
use crate::store::Collection;

#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn Collection<Post>>,
}

impl PostService {
    pub fn new(posts: Arc<dyn Collection<Post>>) -> Self {
        Self { posts }
    }

    pub async fn create(&self, input: NewPost) -> Result<Post, ApiError> {
        let post = Post::new(input.title, input.body);
        self.posts.insert(&post).await?;
        tracing::info!(id = %post.id, "post created");
        Ok(post)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Post>, ApiError> {
        Ok(self.posts.find_by_id(id).await?)
    }

    /// All posts that are not soft-deleted.
    pub async fn list(&self) -> Result<Vec<Post>, ApiError> {
        Ok(self.posts.list_active().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryCollection;
    use crate::store::Document;

    fn service() -> (PostService, Arc<MemoryCollection<Post>>) {
        let collection = Arc::new(MemoryCollection::new());
        (PostService::new(collection.clone()), collection)
    }

    fn input(title: &str, body: &str) -> NewPost {
        NewPost {
            title: title.to_string(),
            body: body.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_then_get_round_trips() {
        let (service, _) = service();

        let created = service.create(input("Hello", "World")).await.unwrap();
        let fetched = service.get(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.title, "Hello");
        assert_eq!(fetched.body, "World");
    }

    #[tokio::test]
    async fn test_get_absent_is_none() {
        let (service, _) = service();
        assert!(service.get(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_excludes_soft_deleted() {
        let (service, collection) = service();

        service.create(input("visible", "post")).await.unwrap();
        let mut hidden = Post::new("hidden".to_string(), "post".to_string());
        hidden.soft_delete = true;
        collection.insert(&hidden).await.unwrap();

        let listed = service.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].title, "visible");

        // Direct lookup still reaches the soft-deleted post.
        assert!(service.get(hidden.id()).await.unwrap().is_some());
    }
}

/**
 * Post Pipeline Stages
 *
 * The business, formatting, and sending stages the post chains are built
 * from. Business stages park the fetched or created documents in the
 * context bag; formatting stages reduce them to client-facing views; the
 * send stages produce the terminal response.
 */

use async_trait::async_trait;
use serde_json::json;
use uuid::Uuid;

use crate::error::ApiError;
use crate::pipeline::{ApiReply, RequestContext, Stage, StageOutcome};
use crate::resources::post::model::{NewPost, Post, PostView};
use crate::resources::post::service::PostService;

/// Create a post from the validated body and park it in the context.
pub struct CreatePost {
    posts: PostService,
}

impl CreatePost {
    pub fn new(posts: PostService) -> Self {
        Self { posts }
    }
}

#[async_trait]
impl Stage for CreatePost {
    fn name(&self) -> &'static str {
        "posts.create"
    }

    async fn run(&self, ctx: &mut RequestContext) -> Result<StageOutcome, ApiError> {
        // The body already passed validation; a decode failure here is a
        // wiring mistake, not client input.
        let input: NewPost = serde_json::from_value(ctx.body().clone())
            .map_err(|err| ApiError::system(format!("validated body did not decode: {err}")))?;

        let post = self.posts.create(input).await?;
        ctx.put(post);
        Ok(StageOutcome::Next)
    }
}

/// Answer a successful creation with the confirmation message and id.
pub struct CreatedMessage;

#[async_trait]
impl Stage for CreatedMessage {
    fn name(&self) -> &'static str {
        "posts.created-message"
    }

    async fn run(&self, ctx: &mut RequestContext) -> Result<StageOutcome, ApiError> {
        let post: Post = ctx.take()?;
        Ok(StageOutcome::Respond(ApiReply::ok(json!({
            "message": "post created successfully",
            "id": post.id,
        }))))
    }
}

/// Fetch one post by the validated `postId` path parameter.
pub struct FetchPost {
    posts: PostService,
}

impl FetchPost {
    pub fn new(posts: PostService) -> Self {
        Self { posts }
    }
}

#[async_trait]
impl Stage for FetchPost {
    fn name(&self) -> &'static str {
        "posts.fetch"
    }

    async fn run(&self, ctx: &mut RequestContext) -> Result<StageOutcome, ApiError> {
        let raw = ctx
            .param("postId")
            .ok_or_else(|| ApiError::system("postId parameter missing from route"))?;
        let id = Uuid::parse_str(raw)
            .map_err(|err| ApiError::system(format!("validated postId did not parse: {err}")))?;

        let post = self
            .posts
            .get(id)
            .await?
            .ok_or_else(|| ApiError::not_found("post not found"))?;

        ctx.put(post);
        Ok(StageOutcome::Next)
    }
}

/// Fetch every active post.
pub struct FetchPosts {
    posts: PostService,
}

impl FetchPosts {
    pub fn new(posts: PostService) -> Self {
        Self { posts }
    }
}

#[async_trait]
impl Stage for FetchPosts {
    fn name(&self) -> &'static str {
        "posts.fetch-all"
    }

    async fn run(&self, ctx: &mut RequestContext) -> Result<StageOutcome, ApiError> {
        let posts = self.posts.list().await?;
        ctx.put(posts);
        Ok(StageOutcome::Next)
    }
}

/// Reduce the fetched post to its client-facing view.
pub struct FormatPost;

#[async_trait]
impl Stage for FormatPost {
    fn name(&self) -> &'static str {
        "posts.format"
    }

    async fn run(&self, ctx: &mut RequestContext) -> Result<StageOutcome, ApiError> {
        let post: Post = ctx.take()?;
        ctx.put(PostView::from(&post));
        Ok(StageOutcome::Next)
    }
}

/// Reduce the fetched post list to client-facing views.
pub struct FormatPosts;

#[async_trait]
impl Stage for FormatPosts {
    fn name(&self) -> &'static str {
        "posts.format-all"
    }

    async fn run(&self, ctx: &mut RequestContext) -> Result<StageOutcome, ApiError> {
        let posts: Vec<Post> = ctx.take()?;
        let views: Vec<PostView> = posts.iter().map(PostView::from).collect();
        ctx.put(views);
        Ok(StageOutcome::Next)
    }
}

/// Send the formatted post.
pub struct SendPost;

#[async_trait]
impl Stage for SendPost {
    fn name(&self) -> &'static str {
        "posts.send"
    }

    async fn run(&self, ctx: &mut RequestContext) -> Result<StageOutcome, ApiError> {
        let view: PostView = ctx.take()?;
        let payload = serde_json::to_value(view)
            .map_err(|err| ApiError::system(format!("failed to encode post view: {err}")))?;
        Ok(StageOutcome::Respond(ApiReply::ok(payload)))
    }
}

/// Send the formatted post list.
pub struct SendPosts;

#[async_trait]
impl Stage for SendPosts {
    fn name(&self) -> &'static str {
        "posts.send-all"
    }

    async fn run(&self, ctx: &mut RequestContext) -> Result<StageOutcome, ApiError> {
        let views: Vec<PostView> = ctx.take()?;
        let payload = serde_json::to_value(views)
            .map_err(|err| ApiError::system(format!("failed to encode post views: {err}")))?;
        Ok(StageOutcome::Respond(ApiReply::ok(payload)))
    }
}

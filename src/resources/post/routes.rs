/**
 * Post Routes
 *
 * Binds each post endpoint to its chain of stages:
 *
 * - `POST /api/posts/create`          validate → create → confirmation
 * - `GET  /api/posts/getData/{postId}` validate params → fetch → format → send
 * - `GET  /api/posts/list`             fetch all → format → send
 */

use axum::{
    extract::{Request, State},
    response::Response,
    routing::{get, post},
    Router,
};

use crate::pipeline::Chain;
use crate::resources::post::stages::{
    CreatePost, CreatedMessage, FetchPost, FetchPosts, FormatPost, FormatPosts, SendPost,
    SendPosts,
};
use crate::resources::post::validation;
use crate::server::state::AppState;
use crate::validate::ValidateStage;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/posts/create", post(create))
        .route("/api/posts/getData/{postId}", get(get_data))
        .route("/api/posts/list", get(list))
}

async fn create(State(state): State<AppState>, req: Request) -> Response {
    Chain::named("posts.create")
        .stage(ValidateStage::body(validation::create()))
        .stage(CreatePost::new(state.posts.clone()))
        .stage(CreatedMessage)
        .execute(req)
        .await
}

async fn get_data(State(state): State<AppState>, req: Request) -> Response {
    Chain::named("posts.getData")
        .stage(ValidateStage::params(validation::get_data()))
        .stage(FetchPost::new(state.posts.clone()))
        .stage(FormatPost)
        .stage(SendPost)
        .execute(req)
        .await
}

async fn list(State(state): State<AppState>, req: Request) -> Response {
    Chain::named("posts.list")
        .stage(FetchPosts::new(state.posts.clone()))
        .stage(FormatPosts)
        .stage(SendPosts)
        .execute(req)
        .await
}

/**
 * User Routes
 *
 * Binds each user endpoint to its chain of stages:
 *
 * - `POST /api/users/register`       validate → duplicate check → register
 * - `POST /api/users/login`          validate → login
 * - `POST /api/users/subscribe`      validate → forward to mailing service
 * - `GET  /api/users/getData/{id}`   authenticate → fetch profile → send
 * - `GET  /api/users`                same chain as getData
 *
 * The profile routes answer with the caller resolved from the bearer
 * token; the `{id}` path segment is accepted for compatibility but the
 * token is authoritative.
 */

use axum::{
    extract::{Request, State},
    response::Response,
    routing::{get, post},
    Router,
};

use crate::auth::AuthenticateStage;
use crate::pipeline::Chain;
use crate::resources::user::stages::{
    EnsureEmailUnique, FetchProfile, LoginUser, RegisterUser, SendProfile, SubscribeUser,
};
use crate::resources::user::validation;
use crate::server::state::AppState;
use crate::validate::ValidateStage;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/users/register", post(register))
        .route("/api/users/login", post(login))
        .route("/api/users/subscribe", post(subscribe))
        .route("/api/users/getData/{id}", get(get_data))
        .route("/api/users", get(get_data))
}

async fn register(State(state): State<AppState>, req: Request) -> Response {
    Chain::named("users.register")
        .stage(ValidateStage::body(validation::register()))
        .stage(EnsureEmailUnique::new(state.users.clone()))
        .stage(RegisterUser::new(state.users.clone()))
        .execute(req)
        .await
}

async fn login(State(state): State<AppState>, req: Request) -> Response {
    Chain::named("users.login")
        .stage(ValidateStage::body(validation::login()))
        .stage(LoginUser::new(state.users.clone()))
        .execute(req)
        .await
}

async fn subscribe(State(state): State<AppState>, req: Request) -> Response {
    Chain::named("users.subscribe")
        .stage(ValidateStage::body(validation::subscribe()))
        .stage(SubscribeUser::new(state.mailing.clone()))
        .execute(req)
        .await
}

async fn get_data(State(state): State<AppState>, req: Request) -> Response {
    Chain::named("users.getData")
        .stage(AuthenticateStage::new(state.tokens.clone()))
        .stage(FetchProfile::new(state.users.clone()))
        .stage(SendProfile)
        .execute(req)
        .await
}

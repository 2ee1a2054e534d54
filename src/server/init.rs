/**
 * Server Initialization
 *
 * Wires the validated configuration into a ready-to-serve router:
 * connects the Postgres pool, runs migrations, builds the store-backed
 * services, and hands the assembled state to the router. Any failure here
 * aborts startup.
 */

use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;
use thiserror::Error;

use crate::auth::TokenService;
use crate::outbound::mailing::MailingClient;
use crate::resources::post::{Post, PostService};
use crate::resources::user::{User, UserService};
use crate::routes::create_router;
use crate::server::config::AppConfig;
use crate::server::state::AppState;
use crate::store::postgres::PgCollection;

#[derive(Debug, Error)]
pub enum InitError {
    #[error("failed to connect to the document store: {0}")]
    Connect(#[from] sqlx::Error),

    #[error("failed to run store migrations: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Create the application router against the configured Postgres store.
pub async fn create_app(config: &AppConfig) -> Result<Router, InitError> {
    tracing::info!("connecting to document store");
    let pool = PgPool::connect(&config.database_url).await?;

    tracing::info!("running store migrations");
    sqlx::migrate!().run(&pool).await?;

    Ok(create_router(build_state(config, pool)))
}

/// Assemble the application state over an existing pool.
fn build_state(config: &AppConfig, pool: PgPool) -> AppState {
    let tokens = TokenService::new(config.token_secret.clone());

    let posts = PostService::new(Arc::new(PgCollection::<Post>::new(pool.clone())));
    let users = UserService::new(
        Arc::new(PgCollection::<User>::new(pool)),
        tokens.clone(),
    );

    let mailing = config
        .mailing
        .as_ref()
        .map(|mailing| Arc::new(MailingClient::new(mailing.base_url.clone(), mailing.token.clone())));
    if mailing.is_none() {
        tracing::warn!("MAILING_URL not set, mailing integration disabled");
    }

    AppState {
        posts,
        users,
        tokens,
        mailing,
    }
}

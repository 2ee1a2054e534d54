/**
 * Authentication Stage
 *
 * Extracts the bearer token from the request and verifies it. A missing or
 * malformed Authorization header and a failed verification both terminate
 * the chain with 401 before any downstream stage runs. On success the
 * resolved identity is attached to the request context.
 *
 * The stage never touches the document store; verification is purely
 * cryptographic. On routes that also validate input, validation runs first
 * — the token is read from the headers and is unaffected by body reshaping.
 */

use async_trait::async_trait;

use crate::auth::TokenService;
use crate::error::ApiError;
use crate::pipeline::{RequestContext, Stage, StageOutcome};

pub struct AuthenticateStage {
    tokens: TokenService,
}

impl AuthenticateStage {
    pub fn new(tokens: TokenService) -> Self {
        Self { tokens }
    }
}

#[async_trait]
impl Stage for AuthenticateStage {
    fn name(&self) -> &'static str {
        "authenticate"
    }

    async fn run(&self, ctx: &mut RequestContext) -> Result<StageOutcome, ApiError> {
        let token = ctx
            .bearer()
            .ok_or_else(|| ApiError::unauthorized("missing or malformed authorization header"))?;

        let identity = self
            .tokens
            .verify(token)
            .map_err(|err| {
                tracing::debug!(%err, "bearer token rejected");
                ApiError::unauthorized("invalid or expired token")
            })?;

        ctx.set_identity(identity);
        Ok(StageOutcome::Next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Identity;
    use crate::resources::user::model::Role;
    use axum::{body::Body, extract::Request, http::header::AUTHORIZATION};
    use uuid::Uuid;

    async fn ctx_with_header(header: Option<&str>) -> RequestContext {
        let mut builder = Request::builder().uri("/");
        if let Some(value) = header {
            builder = builder.header(AUTHORIZATION, value);
        }
        let req = builder.body(Body::empty()).unwrap();
        RequestContext::from_request(req).await.unwrap()
    }

    #[tokio::test]
    async fn test_valid_token_attaches_identity() {
        let tokens = TokenService::new("stage-secret");
        let identity = Identity {
            id: Uuid::new_v4(),
            role: Role::User,
        };
        let token = tokens.issue(&identity).unwrap();

        let mut ctx = ctx_with_header(Some(&format!("Bearer {token}"))).await;
        let stage = AuthenticateStage::new(tokens);

        let outcome = stage.run(&mut ctx).await.unwrap();
        assert!(matches!(outcome, StageOutcome::Next));
        assert_eq!(ctx.identity(), Some(&identity));
    }

    #[tokio::test]
    async fn test_missing_header_is_unauthorized() {
        let stage = AuthenticateStage::new(TokenService::new("stage-secret"));
        let mut ctx = ctx_with_header(None).await;

        let err = stage.run(&mut ctx).await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_non_bearer_scheme_is_unauthorized() {
        let stage = AuthenticateStage::new(TokenService::new("stage-secret"));
        let mut ctx = ctx_with_header(Some("Token abcdef")).await;

        let err = stage.run(&mut ctx).await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_tampered_token_is_unauthorized() {
        let theirs = TokenService::new("another-secret");
        let token = theirs
            .issue(&Identity {
                id: Uuid::new_v4(),
                role: Role::User,
            })
            .unwrap();

        let stage = AuthenticateStage::new(TokenService::new("stage-secret"));
        let mut ctx = ctx_with_header(Some(&format!("Bearer {token}"))).await;

        let err = stage.run(&mut ctx).await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized { .. }));
        assert!(ctx.identity().is_none());
    }
}

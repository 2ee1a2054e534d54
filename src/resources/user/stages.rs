/**
 * User Pipeline Stages
 *
 * Stages for the user chains: the duplicate-email pre-check, registration
 * and login (both terminal, answering 201 with a token), profile fetch for
 * the authenticated caller, and the mailing-list subscription forward.
 */

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::error::ApiError;
use crate::outbound::mailing::MailingClient;
use crate::pipeline::{ApiReply, RequestContext, Stage, StageOutcome};
use crate::resources::user::model::{Credentials, NewUser, User, UserView};
use crate::resources::user::service::UserService;

fn decode_body<T: serde::de::DeserializeOwned>(ctx: &RequestContext) -> Result<T, ApiError> {
    serde_json::from_value(ctx.body().clone())
        .map_err(|err| ApiError::system(format!("validated body did not decode: {err}")))
}

/// Reject a registration early when the email is already taken.
///
/// The store's uniqueness constraint still backstops this check against
/// concurrent registrations.
pub struct EnsureEmailUnique {
    users: UserService,
}

impl EnsureEmailUnique {
    pub fn new(users: UserService) -> Self {
        Self { users }
    }
}

#[async_trait]
impl Stage for EnsureEmailUnique {
    fn name(&self) -> &'static str {
        "users.ensure-email-unique"
    }

    async fn run(&self, ctx: &mut RequestContext) -> Result<StageOutcome, ApiError> {
        let email = ctx
            .body()
            .get("email")
            .and_then(|value| value.as_str())
            .ok_or_else(|| ApiError::system("validated body has no email field"))?;

        if self.users.is_email_taken(email).await? {
            return Err(ApiError::conflict("email already registered"));
        }
        Ok(StageOutcome::Next)
    }
}

/// Register the user and answer 201 with a fresh token.
pub struct RegisterUser {
    users: UserService,
}

impl RegisterUser {
    pub fn new(users: UserService) -> Self {
        Self { users }
    }
}

#[async_trait]
impl Stage for RegisterUser {
    fn name(&self) -> &'static str {
        "users.register"
    }

    async fn run(&self, ctx: &mut RequestContext) -> Result<StageOutcome, ApiError> {
        let input: NewUser = decode_body(ctx)?;
        let token = self.users.register(input).await?;
        Ok(StageOutcome::Respond(ApiReply::created(
            json!({ "token": token }),
        )))
    }
}

/// Verify credentials and answer 201 with a fresh token.
pub struct LoginUser {
    users: UserService,
}

impl LoginUser {
    pub fn new(users: UserService) -> Self {
        Self { users }
    }
}

#[async_trait]
impl Stage for LoginUser {
    fn name(&self) -> &'static str {
        "users.login"
    }

    async fn run(&self, ctx: &mut RequestContext) -> Result<StageOutcome, ApiError> {
        let credentials: Credentials = decode_body(ctx)?;
        let token = self
            .users
            .login(&credentials.email, &credentials.password)
            .await?;
        Ok(StageOutcome::Respond(ApiReply::created(
            json!({ "token": token }),
        )))
    }
}

/// Fetch the authenticated caller's own user document.
pub struct FetchProfile {
    users: UserService,
}

impl FetchProfile {
    pub fn new(users: UserService) -> Self {
        Self { users }
    }
}

#[async_trait]
impl Stage for FetchProfile {
    fn name(&self) -> &'static str {
        "users.fetch-profile"
    }

    async fn run(&self, ctx: &mut RequestContext) -> Result<StageOutcome, ApiError> {
        let identity = ctx
            .identity()
            .ok_or_else(|| ApiError::system("authentication stage did not run"))?;

        let user = self
            .users
            .get(identity.id)
            .await?
            .ok_or_else(|| ApiError::not_found("no logged in user"))?;

        ctx.put(user);
        Ok(StageOutcome::Next)
    }
}

/// Send the caller's profile, stripped of password material.
pub struct SendProfile;

#[async_trait]
impl Stage for SendProfile {
    fn name(&self) -> &'static str {
        "users.send-profile"
    }

    async fn run(&self, ctx: &mut RequestContext) -> Result<StageOutcome, ApiError> {
        let user: User = ctx.take()?;
        let view = serde_json::to_value(UserView::from(&user))
            .map_err(|err| ApiError::system(format!("failed to encode user view: {err}")))?;
        Ok(StageOutcome::Respond(ApiReply::ok(json!({ "user": view }))))
    }
}

/// Forward the subscriber to the external mailing-list service.
pub struct SubscribeUser {
    mailing: Option<Arc<MailingClient>>,
}

impl SubscribeUser {
    pub fn new(mailing: Option<Arc<MailingClient>>) -> Self {
        Self { mailing }
    }
}

#[async_trait]
impl Stage for SubscribeUser {
    fn name(&self) -> &'static str {
        "users.subscribe"
    }

    async fn run(&self, ctx: &mut RequestContext) -> Result<StageOutcome, ApiError> {
        let Some(mailing) = &self.mailing else {
            return Err(ApiError::unavailable("mailing integration is not configured"));
        };

        let body = ctx.body();
        let name = body.get("name").and_then(|v| v.as_str()).unwrap_or_default();
        let email = body
            .get("email")
            .and_then(|v| v.as_str())
            .ok_or_else(|| ApiError::system("validated body has no email field"))?;

        let payload = mailing.subscribe(name, email).await.map_err(|err| {
            ApiError::system(format!("mailing subscription failed: {err}"))
        })?;
        Ok(StageOutcome::Respond(ApiReply::ok(payload)))
    }
}

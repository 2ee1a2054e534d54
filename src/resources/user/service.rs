/**
 * User Service
 *
 * Registration, login, and profile lookup over the users collection.
 *
 * # Security
 *
 * - Passwords are bcrypt-hashed before the document is written.
 * - Login failures are indistinguishable between an unknown email and a
 *   wrong password, so the API never leaks which addresses exist.
 * - Successful registration and login answer with a signed token only.
 */

use std::sync::Arc;

use uuid::Uuid;

use crate::auth::{password, TokenService};
use crate::error::ApiError;
use crate::resources::user::model::{NewUser, User};
use crate::store::{Collection, StoreError};

/// The one message every login failure carries.
const LOGIN_FAILED: &str = "unable to login user";

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn Collection<User>>,
    tokens: TokenService,
}

impl UserService {
    pub fn new(users: Arc<dyn Collection<User>>, tokens: TokenService) -> Self {
        Self { users, tokens }
    }

    /// Create an account and answer with a fresh token.
    ///
    /// A duplicate email surfaces as a conflict failure; the store's
    /// uniqueness constraint is the final arbiter even if a pre-check
    /// raced with a concurrent registration.
    pub async fn register(&self, input: NewUser) -> Result<String, ApiError> {
        let password_hash = password::hash_password(&input.password)
            .map_err(|err| ApiError::system(format!("failed to hash password: {err}")))?;

        let user = User::new(input.name, input.email, password_hash);
        match self.users.insert(&user).await {
            Ok(()) => {}
            Err(StoreError::Duplicate { .. }) => {
                return Err(ApiError::conflict("email already registered"));
            }
            Err(err) => return Err(err.into()),
        }

        tracing::info!(id = %user.id, "user registered");
        self.issue_token(&user)
    }

    /// Verify credentials and answer with a fresh token.
    pub async fn login(&self, email: &str, candidate: &str) -> Result<String, ApiError> {
        let Some(user) = self.users.find_one("email", email).await? else {
            tracing::warn!("login attempt for unknown email");
            return Err(ApiError::unauthorized(LOGIN_FAILED));
        };

        let valid = password::verify_password(candidate, &user.password_hash)
            .map_err(|err| ApiError::system(format!("password verification failed: {err}")))?;
        if !valid {
            tracing::warn!(id = %user.id, "login attempt with wrong password");
            return Err(ApiError::unauthorized(LOGIN_FAILED));
        }

        tracing::info!(id = %user.id, "user logged in");
        self.issue_token(&user)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<User>, ApiError> {
        Ok(self.users.find_by_id(id).await?)
    }

    pub async fn is_email_taken(&self, email: &str) -> Result<bool, ApiError> {
        Ok(self.users.find_one("email", email).await?.is_some())
    }

    fn issue_token(&self, user: &User) -> Result<String, ApiError> {
        self.tokens
            .issue(&user.identity())
            .map_err(|err| ApiError::system(format!("failed to issue token: {err}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryCollection;

    fn service() -> (UserService, TokenService) {
        let tokens = TokenService::new("service-secret");
        let users = Arc::new(MemoryCollection::new());
        (UserService::new(users, tokens.clone()), tokens)
    }

    fn input(email: &str) -> NewUser {
        NewUser {
            name: "A".to_string(),
            email: email.to_string(),
            password: "long enough".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_issues_a_resolvable_token() {
        let (service, tokens) = service();

        let token = service.register(input("a@x.com")).await.unwrap();
        let identity = tokens.verify(&token).unwrap();

        let stored = service.get(identity.id).await.unwrap().unwrap();
        assert_eq!(stored.email, "a@x.com");
        assert_ne!(stored.password_hash, "long enough");
    }

    #[tokio::test]
    async fn test_duplicate_email_is_a_conflict() {
        let (service, _) = service();

        service.register(input("a@x.com")).await.unwrap();
        let err = service.register(input("a@x.com")).await.unwrap_err();
        assert!(matches!(err, ApiError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_login_round_trip_resolves_registering_user() {
        let (service, tokens) = service();

        let registered = service.register(input("a@x.com")).await.unwrap();
        let registered_id = tokens.verify(&registered).unwrap().id;

        let logged_in = service.login("a@x.com", "long enough").await.unwrap();
        assert_eq!(tokens.verify(&logged_in).unwrap().id, registered_id);
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email_fail_identically() {
        let (service, _) = service();
        service.register(input("a@x.com")).await.unwrap();

        let wrong_password = service.login("a@x.com", "nope").await.unwrap_err();
        let unknown_email = service.login("b@x.com", "nope").await.unwrap_err();

        match (wrong_password, unknown_email) {
            (
                ApiError::Unauthorized { message: first },
                ApiError::Unauthorized { message: second },
            ) => assert_eq!(first, second),
            other => panic!("expected two Unauthorized failures, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_is_email_taken() {
        let (service, _) = service();
        assert!(!service.is_email_taken("a@x.com").await.unwrap());
        service.register(input("a@x.com")).await.unwrap();
        assert!(service.is_email_taken("a@x.com").await.unwrap());
    }
}

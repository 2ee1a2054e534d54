/**
 * Application State
 *
 * The state constructed once at startup and cloned into every route
 * handler. It owns the resource services (which hold the store
 * collections), the token service with its process-wide secret, and the
 * optional mailing integration. Nothing in here is reached through
 * globals; components receive what they need from this struct.
 */

use std::sync::Arc;

use crate::auth::TokenService;
use crate::outbound::mailing::MailingClient;
use crate::resources::post::PostService;
use crate::resources::user::UserService;

#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    pub users: UserService,
    pub tokens: TokenService,
    pub mailing: Option<Arc<MailingClient>>,
}

//! Request-scoped identity.
//!
//! The extractor only checks the cookie's signature. The session store is
//! consulted when a handler asks for the user, so handlers decide when
//! authentication happens relative to their other checks.

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts, OriginalUri},
    http::{header::COOKIE, request::Parts},
};
use cookie::{time::Duration, Cookie, SameSite};
use session_store::{SessionId, SessionStore, UserId};

use crate::errors::{RouteError, RouteResult};
use crate::AppState;

pub const SESSION_COOKIE: &str = "RJ_session";

pub struct Session {
    id: Option<SessionId>,
    store: Arc<dyn SessionStore>,
    login_path: String,
    path: String,
}

impl Session {
    pub fn id(&self) -> Option<&SessionId> {
        self.id.as_ref()
    }

    pub async fn user_id(&self) -> RouteResult<Option<UserId>> {
        match &self.id {
            Some(id) => Ok(self.store.user_id(id).await?),
            None => Ok(None),
        }
    }

    /// The signed-in user, or a redirect to sign-in that returns here.
    pub async fn require_user_id(&self) -> RouteResult<UserId> {
        self.user_id().await?.ok_or_else(|| RouteError::Unauthenticated {
            location: login_location(&self.login_path, &self.path),
        })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Session
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let id = cookie_value(parts, SESSION_COOKIE).and_then(|raw| {
            let verified = app_state.signer.verify(&raw);
            if verified.is_none() {
                tracing::warn!("ignoring session cookie with a bad signature");
            }
            verified
        });

        // nested routers see a stripped uri
        let path = match parts.extensions.get::<OriginalUri>() {
            Some(OriginalUri(uri)) => uri.path().to_string(),
            None => parts.uri.path().to_string(),
        };

        Ok(Session {
            id,
            store: app_state.sessions.clone(),
            login_path: app_state.config.login_path.clone(),
            path,
        })
    }
}

fn cookie_value(parts: &Parts, name: &str) -> Option<String> {
    parts
        .headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|header| header.to_str().ok())
        .flat_map(|header| Cookie::split_parse(header))
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == name)
        .map(|cookie| cookie.value_trimmed().to_string())
}

fn login_location(login_path: &str, redirect_to: &str) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("redirectTo", redirect_to)
        .finish();
    format!("{}?{}", login_path, query)
}

/// Removal cookie for the session. Only ever written to end a session.
pub fn clear_session_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(Duration::ZERO)
        .secure(secure)
        .build()
}

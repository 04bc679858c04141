use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderValue},
    response::{IntoResponse, Redirect, Response},
};
use tracing::info;

use crate::errors::{RouteError, RouteResult};
use crate::extractors::{clear_session_cookie, Session};
use crate::views::document::render_route_error;
use crate::AppState;

pub async fn action(State(state): State<AppState>, session: Session) -> Response {
    match logout(&state, &session).await {
        Ok(response) => response,
        Err(err) => render_route_error(err),
    }
}

async fn logout(state: &AppState, session: &Session) -> RouteResult<Response> {
    if let Some(id) = session.id() {
        state.sessions.destroy(id).await?;
        info!("session ended");
    }

    let cleared = clear_session_cookie(state.config.is_production()).to_string();
    let cleared = HeaderValue::from_str(&cleared)
        .map_err(|err| RouteError::Unexpected(format!("Invalid session cookie: {}", err)))?;

    Ok((
        [(SET_COOKIE, cleared)],
        Redirect::to(&state.config.login_path),
    )
        .into_response())
}

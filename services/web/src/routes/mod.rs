use axum::{
    extract::OriginalUri,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use crate::errors::RouteError;
use crate::extractors::ResponseMode;
use crate::views::document::render_route_error;
use crate::AppState;

pub mod jokes;
mod logout;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health).fallback(method_not_allowed))
        .route("/logout", post(logout::action).fallback(method_not_allowed))
        .nest("/jokes", jokes::router())
        .fallback(not_found)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "remix-jokes"
    }))
}

async fn not_found(mode: ResponseMode, OriginalUri(uri): OriginalUri) -> Response {
    render_unmatched(
        mode,
        RouteError::Http {
            status: StatusCode::NOT_FOUND,
            message: format!("No route matches URL \"{}\"", uri.path()),
        },
    )
}

/// The path matched but no handler exists for the method.
async fn method_not_allowed(
    mode: ResponseMode,
    method: Method,
    OriginalUri(uri): OriginalUri,
) -> Response {
    render_unmatched(
        mode,
        RouteError::Http {
            status: StatusCode::METHOD_NOT_ALLOWED,
            message: format!(
                "You made a {} request to \"{}\" but the route has no handler for it",
                method,
                uri.path()
            ),
        },
    )
}

fn render_unmatched(mode: ResponseMode, error: RouteError) -> Response {
    match mode {
        ResponseMode::Data => error.into_response(),
        ResponseMode::Document => render_route_error(error),
    }
}

use axum::{
    extract::rejection::FormRejection,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use tracing::error;

/// Failure of a route's loader or action.
///
/// Expected outcomes carry the status and message a client sees; the joke
/// route's error boundary matches on these variants to pick its markup.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Pssh, nice try. That's not your joke")]
    Forbidden,

    /// No signed-in user; answered with a redirect to the sign-in page.
    #[error("sign-in required")]
    Unauthenticated { location: String },

    /// An HTTP failure raised outside the route's own checks.
    #[error("{message}")]
    Http { status: StatusCode, message: String },

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl RouteError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Unauthenticated { .. } => StatusCode::SEE_OTHER,
            Self::Http { status, .. } => *status,
            Self::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text safe to show a client. Internal details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            Self::Unexpected(_) => "Unexpected Server Error".to_string(),
            other => other.to_string(),
        }
    }
}

/// Loader data mode: the status with the message as a plain-text body.
impl IntoResponse for RouteError {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthenticated { location } => Redirect::to(&location).into_response(),
            other => (other.status(), other.public_message()).into_response(),
        }
    }
}

impl From<jokes_db::DbError> for RouteError {
    fn from(err: jokes_db::DbError) -> Self {
        error!(error = %err, "joke store failure");
        RouteError::Unexpected(format!("Database error: {}", err))
    }
}

impl From<session_store::SessionError> for RouteError {
    fn from(err: session_store::SessionError) -> Self {
        error!(error = %err, "session store failure");
        RouteError::Unexpected(format!("Session error: {}", err))
    }
}

impl From<FormRejection> for RouteError {
    fn from(rejection: FormRejection) -> Self {
        RouteError::Http {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

pub type RouteResult<T> = Result<T, RouteError>;

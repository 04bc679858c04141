use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use tracing::error;

use super::escape;
use crate::errors::RouteError;

pub const DEFAULT_TITLE: &str = "Remix: So great, it's funny!";

/// Wrap a page fragment in the site's HTML document.
pub fn document(title: Option<&str>, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\" />\n\
         <title>{}</title>\n\
         </head>\n\
         <body>\n{}\n</body>\n\
         </html>\n",
        escape(title.unwrap_or(DEFAULT_TITLE)),
        body
    )
}

pub fn page(body: &str) -> Html<String> {
    Html(document(None, body))
}

/// What reached the root error boundary.
#[derive(Debug)]
pub enum RootError<'a> {
    /// An HTTP error response no route handled.
    Response { status: StatusCode, message: &'a str },
    /// Anything else.
    Unknown,
}

pub fn root_error_page(error: RootError<'_>) -> Response {
    match error {
        RootError::Response { status, message } => {
            let title = format!(
                "{} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or_default()
            );
            let body = format!(
                "<div class=\"error-container\">\n\
                 <h1>Oops</h1>\n\
                 <p>Status: {}</p>\n\
                 <pre>{}</pre>\n\
                 </div>",
                status.as_u16(),
                escape(message)
            );
            (status, Html(document(Some(&title), &body))).into_response()
        }
        RootError::Unknown => {
            let body = "<div class=\"error-container\">\n\
                        <h4>App Error</h4>\n\
                        <pre>Unknown error</pre>\n\
                        </div>";
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(document(Some("Uh-oh!"), body)),
            )
                .into_response()
        }
    }
}

/// Render a route failure through the root boundary, for routes without
/// a boundary of their own.
pub fn render_route_error(error: RouteError) -> Response {
    match error {
        RouteError::Unauthenticated { .. } => error.into_response(),
        RouteError::Unexpected(ref detail) => {
            error!(error = %detail, "unexpected route failure");
            root_error_page(RootError::Unknown)
        }
        other => {
            let message = other.public_message();
            root_error_page(RootError::Response {
                status: other.status(),
                message: &message,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uses_the_default_title() {
        let html = document(None, "<p>hi</p>");
        assert!(html.contains("<title>Remix: So great, it&#39;s funny!</title>"));
        assert!(html.contains("<html lang=\"en\">"));
        assert!(html.contains("<p>hi</p>"));
    }

    #[test]
    fn response_errors_show_status_and_message() {
        let response = root_error_page(RootError::Response {
            status: StatusCode::NOT_FOUND,
            message: "Not Found",
        });
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn unknown_errors_are_internal() {
        let response = root_error_page(RootError::Unknown);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn unauthenticated_is_not_rendered() {
        let response = render_route_error(RouteError::Unauthenticated {
            location: "/login".into(),
        });
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }
}

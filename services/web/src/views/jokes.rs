use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use jokes_db::{Joke, JokeListItem};
use tracing::{error, warn};

use super::document::{document, page, root_error_page, RootError};
use super::escape;
use crate::errors::RouteError;
use crate::routes::jokes::new::ActionData;

pub fn joke_page(joke: &Joke) -> Html<String> {
    page(&format!(
        "<div>\n\
         <p>Here's your hilarious joke:</p>\n\
         <p>{content}</p>\n\
         <a href=\"/jokes/{id}\">{name} Permalink</a>\n\
         <form method=\"post\">\n\
         <button class=\"button\" name=\"intent\" type=\"submit\" value=\"delete\">Delete</button>\n\
         </form>\n\
         </div>",
        content = escape(&joke.content),
        id = escape(&joke.id),
        name = escape(&joke.name),
    ))
}

pub fn jokes_index_page(jokes: &[JokeListItem]) -> Html<String> {
    let items: String = jokes
        .iter()
        .map(|joke| {
            format!(
                "<li><a href=\"/jokes/{}\">{}</a></li>\n",
                escape(&joke.id),
                escape(&joke.name)
            )
        })
        .collect();

    page(&format!(
        "<main class=\"jokes-main\">\n\
         <a href=\"/jokes/new\" class=\"button\">Add your own</a>\n\
         <p>Here are a few more jokes to check out:</p>\n\
         <ul>\n{}</ul>\n\
         </main>",
        items
    ))
}

pub fn new_joke_page(data: &ActionData) -> Html<String> {
    let field_error = |message: &Option<String>, id: &str| match message {
        Some(message) => format!(
            "<p class=\"form-validation-error\" id=\"{}-error\" role=\"alert\">{}</p>\n",
            id,
            escape(message)
        ),
        None => String::new(),
    };
    let form_error = match &data.form_error {
        Some(message) => format!(
            "<p class=\"form-validation-error\" role=\"alert\">{}</p>\n",
            escape(message)
        ),
        None => String::new(),
    };

    page(&format!(
        "<div>\n\
         <p>Add your own hilarious joke</p>\n\
         <form method=\"post\">\n\
         <div>\n\
         <label>Name: <input type=\"text\" name=\"name\" value=\"{name}\" /></label>\n\
         {name_error}</div>\n\
         <div>\n\
         <label>Content: <textarea name=\"content\">{content}</textarea></label>\n\
         {content_error}</div>\n\
         <div>\n\
         {form_error}<button type=\"submit\" class=\"button\">Add</button>\n\
         </div>\n\
         </form>\n\
         </div>",
        name = escape(data.fields.name.as_deref().unwrap_or_default()),
        name_error = field_error(&data.field_errors.name, "name"),
        content = escape(data.fields.content.as_deref().unwrap_or_default()),
        content_error = field_error(&data.field_errors.content, "content"),
        form_error = form_error,
    ))
}

/// Raised when the joke boundary meets a status it does not handle.
#[derive(Debug, thiserror::Error)]
#[error("Unhandled error: {0}")]
pub struct UnhandledStatus(pub StatusCode);

/// Markup the joke route shows in place of the joke.
///
/// Only 400, 403 and 404 are expected here; any other HTTP status is
/// re-raised for the root boundary.
pub fn joke_boundary(joke_id: &str, error: &RouteError) -> Result<String, UnhandledStatus> {
    let joke_id = escape(joke_id);
    let message = match error {
        RouteError::BadRequest(_) => "What you're trying to do is not allowed.".to_string(),
        RouteError::NotFound(_) => format!("Huh? What the heck is \"{}\"?", joke_id),
        RouteError::Forbidden => format!("Sorry, but {} is not your joke.", joke_id),
        // a sign-in redirect is never boundary content
        RouteError::Http { .. } | RouteError::Unauthenticated { .. } => {
            return Err(UnhandledStatus(error.status()))
        }
        RouteError::Unexpected(_) => format!(
            "There was an error loading joke by the id {}. Sorry.",
            joke_id
        ),
    };
    Ok(format!("<div class=\"error-container\">\n{}\n</div>", message))
}

/// Document-mode response for a failed joke loader or action.
pub fn render_joke_error(joke_id: &str, error: RouteError) -> Response {
    if let RouteError::Unauthenticated { .. } = error {
        return error.into_response();
    }

    warn!(joke_id, error = %error, "joke route error");
    match joke_boundary(joke_id, &error) {
        Ok(markup) => (error.status(), Html(document(None, &markup))).into_response(),
        Err(unhandled) => {
            error!(joke_id, error = %unhandled, "joke boundary re-raised");
            root_error_page(RootError::Unknown)
        }
    }
}

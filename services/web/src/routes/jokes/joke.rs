use axum::{
    extract::{rejection::FormRejection, Path, State},
    response::{IntoResponse, Redirect, Response},
    Form, Json,
};
use jokes_db::{Joke, JokeRepository};
use serde::Serialize;
use tracing::{info, warn};

use crate::errors::{RouteError, RouteResult};
use crate::extractors::{ResponseMode, Session};
use crate::views::jokes::{joke_page, render_joke_error};
use crate::AppState;

use super::{first_value, FormFields};

#[derive(Debug, Serialize)]
pub struct JokeData {
    pub joke: Joke,
}

/// `GET /jokes/:joke_id`
pub async fn loader(
    State(state): State<AppState>,
    Path(joke_id): Path<String>,
    mode: ResponseMode,
) -> Response {
    let result = load_joke(state.jokes.as_ref(), &joke_id).await;
    match (result, mode) {
        (Ok(data), ResponseMode::Data) => Json(data).into_response(),
        (Ok(data), ResponseMode::Document) => joke_page(&data.joke).into_response(),
        (Err(err), ResponseMode::Data) => err.into_response(),
        (Err(err), ResponseMode::Document) => render_joke_error(&joke_id, err),
    }
}

/// `POST /jokes/:joke_id`
pub async fn action(
    State(state): State<AppState>,
    Path(joke_id): Path<String>,
    mode: ResponseMode,
    session: Session,
    form: Result<Form<FormFields>, FormRejection>,
) -> Response {
    let result = match form {
        Ok(Form(fields)) => {
            let intent = first_value(fields, "intent");
            delete_joke(state.jokes.as_ref(), &session, &joke_id, intent.as_deref()).await
        }
        Err(rejection) => Err(rejection.into()),
    };

    match (result, mode) {
        (Ok(redirect), _) => redirect.into_response(),
        (Err(err), ResponseMode::Data) => err.into_response(),
        (Err(err), ResponseMode::Document) => render_joke_error(&joke_id, err),
    }
}

/// Any visitor may read any joke.
pub async fn load_joke(jokes: &dyn JokeRepository, joke_id: &str) -> RouteResult<JokeData> {
    let joke = jokes
        .find_by_id(joke_id)
        .await?
        .ok_or_else(|| RouteError::not_found("What a joke! Not found."))?;

    Ok(JokeData { joke })
}

/// Delete a joke on behalf of its owner.
///
/// Checks run in order and the first failure wins: the intent, then the
/// caller's session, then existence, then ownership.
pub async fn delete_joke(
    jokes: &dyn JokeRepository,
    session: &Session,
    joke_id: &str,
    intent: Option<&str>,
) -> RouteResult<Redirect> {
    if intent != Some("delete") {
        return Err(RouteError::bad_request(format!(
            "The intent {} is not supported",
            intent.unwrap_or("null")
        )));
    }

    let user_id = session.require_user_id().await?;
    let joke = jokes
        .find_by_id(joke_id)
        .await?
        .ok_or_else(|| RouteError::not_found("Can't delete what does not exist"))?;

    if !joke.is_owned_by(user_id.as_str()) {
        warn!(joke_id, user_id = %user_id, "refusing to delete another jokester's joke");
        return Err(RouteError::Forbidden);
    }

    // a concurrent delete may win between the lookup and this call
    jokes.delete_by_id(joke_id).await.map_err(|err| {
        if err.is_not_found() {
            RouteError::not_found("Can't delete what does not exist")
        } else {
            err.into()
        }
    })?;
    info!(joke_id, user_id = %user_id, "joke deleted");

    Ok(Redirect::to("/jokes"))
}

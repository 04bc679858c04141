use axum::{
    extract::{rejection::FormRejection, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form, Json,
};
use jokes_db::{Joke, JokeRepository, NewJoke};
use serde::Serialize;
use tracing::info;

use crate::errors::RouteResult;
use crate::extractors::{ResponseMode, Session};
use crate::views::{document::render_route_error, jokes::new_joke_page};
use crate::AppState;

use super::{first_value, FormFields};

const MIN_NAME_LEN: usize = 3;
const MIN_CONTENT_LEN: usize = 10;

#[derive(Debug)]
pub struct NewJokeForm {
    pub name: Option<String>,
    pub content: Option<String>,
}

impl NewJokeForm {
    fn from_fields(fields: FormFields) -> Self {
        Self {
            name: first_value(fields.clone(), "name"),
            content: first_value(fields, "content"),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct FieldErrors {
    pub name: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct Fields {
    pub name: Option<String>,
    pub content: Option<String>,
}

/// What the form gets back when a submission is rejected.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionData {
    pub field_errors: FieldErrors,
    pub fields: Fields,
    pub form_error: Option<String>,
}

#[derive(Debug)]
pub enum CreateOutcome {
    Created(Joke),
    Invalid(ActionData),
}

/// `GET /jokes/new`
pub async fn loader(mode: ResponseMode) -> Response {
    match mode {
        ResponseMode::Data => Json(serde_json::Value::Null).into_response(),
        ResponseMode::Document => new_joke_page(&ActionData::default()).into_response(),
    }
}

/// `POST /jokes/new`
pub async fn action(
    State(state): State<AppState>,
    mode: ResponseMode,
    session: Session,
    form: Result<Form<FormFields>, FormRejection>,
) -> Response {
    let result = match form {
        Ok(Form(fields)) => {
            let form = NewJokeForm::from_fields(fields);
            create_joke(state.jokes.as_ref(), &session, form).await
        }
        Err(rejection) => Err(rejection.into()),
    };

    match (result, mode) {
        (Ok(CreateOutcome::Created(joke)), _) => {
            Redirect::to(&format!("/jokes/{}", joke.id)).into_response()
        }
        (Ok(CreateOutcome::Invalid(data)), ResponseMode::Data) => {
            (StatusCode::BAD_REQUEST, Json(data)).into_response()
        }
        (Ok(CreateOutcome::Invalid(data)), ResponseMode::Document) => {
            (StatusCode::BAD_REQUEST, new_joke_page(&data)).into_response()
        }
        (Err(err), ResponseMode::Data) => err.into_response(),
        (Err(err), ResponseMode::Document) => render_route_error(err),
    }
}

pub async fn create_joke(
    jokes: &dyn JokeRepository,
    session: &Session,
    form: NewJokeForm,
) -> RouteResult<CreateOutcome> {
    let user_id = session.require_user_id().await?;

    let (name, content) = match (form.name, form.content) {
        (Some(name), Some(content)) => (name, content),
        (name, content) => {
            return Ok(CreateOutcome::Invalid(ActionData {
                fields: Fields { name, content },
                form_error: Some("Form not submitted correctly.".to_string()),
                ..ActionData::default()
            }))
        }
    };

    let field_errors = FieldErrors {
        name: validate_joke_name(&name),
        content: validate_joke_content(&content),
    };
    if field_errors != FieldErrors::default() {
        return Ok(CreateOutcome::Invalid(ActionData {
            field_errors,
            fields: Fields {
                name: Some(name),
                content: Some(content),
            },
            form_error: None,
        }));
    }

    let joke = jokes
        .create(NewJoke::new(user_id.to_string(), name, content))
        .await?;
    info!(joke_id = %joke.id, user_id = %user_id, "joke created");

    Ok(CreateOutcome::Created(joke))
}

fn validate_joke_name(name: &str) -> Option<String> {
    (name.chars().count() < MIN_NAME_LEN).then(|| "That joke's name is too short".to_string())
}

fn validate_joke_content(content: &str) -> Option<String> {
    (content.chars().count() < MIN_CONTENT_LEN).then(|| "That joke is too short".to_string())
}

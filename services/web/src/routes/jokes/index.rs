use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use jokes_db::{JokeListItem, JokeRepository};
use serde::Serialize;

use crate::errors::RouteResult;
use crate::extractors::ResponseMode;
use crate::views::{document::render_route_error, jokes::jokes_index_page};
use crate::AppState;

/// How many jokes the listing shows.
pub const LISTING_LIMIT: i64 = 25;

#[derive(Debug, Serialize)]
pub struct JokesData {
    pub jokes: Vec<JokeListItem>,
}

pub async fn loader(State(state): State<AppState>, mode: ResponseMode) -> Response {
    match (list_jokes(state.jokes.as_ref()).await, mode) {
        (Ok(data), ResponseMode::Data) => Json(data).into_response(),
        (Ok(data), ResponseMode::Document) => jokes_index_page(&data.jokes).into_response(),
        (Err(err), ResponseMode::Data) => err.into_response(),
        (Err(err), ResponseMode::Document) => render_route_error(err),
    }
}

async fn list_jokes(jokes: &dyn JokeRepository) -> RouteResult<JokesData> {
    let jokes = jokes.list_recent(LISTING_LIMIT).await?;
    Ok(JokesData { jokes })
}

use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use jokes_db::{JokeRepository, PgJokeRepository};
use session_store::{RedisSessionStore, SessionSigner, SessionStore};
use tower::ServiceBuilder;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

pub mod config;
pub mod errors;
pub mod extractors;
pub mod routes;
pub mod views;

use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub jokes: Arc<dyn JokeRepository>,
    pub sessions: Arc<dyn SessionStore>,
    pub signer: SessionSigner,
    pub config: Arc<Config>,
}

impl AppState {
    /// Connect to PostgreSQL and Redis as configured.
    pub async fn connect(config: Config) -> anyhow::Result<Self> {
        let db_pool = jokes_db::create_pool(&config.database_url)
            .await
            .context("Failed to create database pool")?;
        let redis_pool = session_store::create_pool(&config.redis_url)
            .await
            .context("Failed to create Redis pool")?;
        let signer = SessionSigner::new(&config.session_secret)
            .context("Failed to configure session signing")?;

        Ok(Self {
            jokes: Arc::new(PgJokeRepository::new(db_pool)),
            sessions: Arc::new(RedisSessionStore::new(redis_pool)),
            signer,
            config: Arc::new(config),
        })
    }

    pub fn new(
        jokes: Arc<dyn JokeRepository>,
        sessions: Arc<dyn SessionStore>,
        signer: SessionSigner,
        config: Config,
    ) -> Self {
        Self {
            jokes,
            sessions,
            signer,
            config: Arc::new(config),
        }
    }
}

/// The full application: routes plus request tracing.
pub fn app(state: AppState) -> Router {
    routes::router()
        .layer(
            ServiceBuilder::new().layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                    .on_response(DefaultOnResponse::new().level(Level::INFO)),
            ),
        )
        .with_state(state)
}

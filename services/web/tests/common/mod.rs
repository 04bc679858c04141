#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use jokes_db::memory::MemoryJokeRepository;
use jokes_db::{Joke, JokeRepository};
use remix_jokes::config::Config;
use remix_jokes::AppState;
use serde_json::Value;
use session_store::memory::MemorySessionStore;
use session_store::{SessionSigner, SessionStore, UserId};
use tower::ServiceExt;

pub const SESSION_SECRET: &str = "integration-test-session-secret-0123456789";

/// Drives the application in-process against in-memory stores.
pub struct TestClient {
    app: Router,
    pub jokes: Arc<MemoryJokeRepository>,
    pub sessions: Arc<MemorySessionStore>,
    signer: SessionSigner,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
    }

    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("response body is not JSON")
    }
}

impl TestClient {
    pub fn new() -> Self {
        Self::with_repository(|jokes| jokes as Arc<dyn JokeRepository>)
    }

    /// Serve through a repository wrapped around the seeded in-memory one.
    pub fn with_repository(
        wrap: impl FnOnce(Arc<MemoryJokeRepository>) -> Arc<dyn JokeRepository>,
    ) -> Self {
        let jokes = Arc::new(MemoryJokeRepository::new());
        let sessions = Arc::new(MemorySessionStore::new());
        let signer = SessionSigner::new(SESSION_SECRET).expect("valid test secret");
        let state = AppState::new(
            wrap(jokes.clone()),
            sessions.clone(),
            signer.clone(),
            TestData::config(),
        );

        Self {
            app: remix_jokes::app(state),
            jokes,
            sessions,
            signer,
        }
    }

    /// Start a session for `user_id` and return the `Cookie` header value.
    pub async fn sign_in(&self, user_id: &str) -> String {
        let id = self
            .sessions
            .create(&UserId::new(user_id))
            .await
            .expect("session created");
        format!("RJ_session={}", self.signer.sign(&id))
    }

    pub fn seed(&self, joke: Joke) {
        self.jokes.insert(joke).expect("joke seeded");
    }

    /// Page request, as a browser would make it.
    pub async fn get_page(&self, path: &str) -> TestResponse {
        self.send(Request::get(path).body(Body::empty()).unwrap())
            .await
    }

    /// Loader data request.
    pub async fn get_data(&self, path: &str) -> TestResponse {
        self.send(
            Request::get(path)
                .header(header::ACCEPT, "application/json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    /// Submit a url-encoded form.
    pub async fn post_form(
        &self,
        path: &str,
        form: &str,
        cookie: Option<&str>,
        accept_json: bool,
    ) -> TestResponse {
        let mut builder = Request::post(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        if accept_json {
            builder = builder.header(header::ACCEPT, "application/json");
        }
        self.send(builder.body(Body::from(form.to_string())).unwrap())
            .await
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");

        TestResponse {
            status,
            headers,
            body: String::from_utf8(bytes.to_vec()).expect("body is utf-8"),
        }
    }
}

/// Test data generators
pub struct TestData;

impl TestData {
    pub fn config() -> Config {
        Config {
            port: 0,
            database_url: "postgres://unused".to_string(),
            redis_url: "redis://unused".to_string(),
            session_secret: SESSION_SECRET.to_string(),
            login_path: "/login".to_string(),
            environment: "test".to_string(),
        }
    }

    pub fn joke(id: &str, jokester_id: &str, name: &str, content: &str) -> Joke {
        let now = Utc::now();
        Joke {
            id: id.to_string(),
            jokester_id: jokester_id.to_string(),
            name: name.to_string(),
            content: content.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn chickens() -> Joke {
        Self::joke("abc", "u1", "Chickens", "Why did the chicken...")
    }

    /// A joke created `minutes_ago` minutes in the past.
    pub fn aged_joke(id: &str, name: &str, minutes_ago: i64) -> Joke {
        let mut joke = Self::joke(id, "u1", name, "An old but gold joke.");
        joke.created_at = Utc::now() - Duration::minutes(minutes_ago);
        joke.updated_at = joke.created_at;
        joke
    }
}

//! In-memory [`JokeRepository`] used by tests in place of PostgreSQL.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use crate::models::{Joke, JokeListItem, NewJoke};
use crate::repository::JokeRepository;
use crate::DbError;

#[derive(Debug, Default)]
pub struct MemoryJokeRepository {
    jokes: Mutex<Vec<Joke>>,
}

impl MemoryJokeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a joke exactly as given, replacing any joke with the same id.
    pub fn insert(&self, joke: Joke) -> Result<(), DbError> {
        let mut jokes = self.lock()?;
        jokes.retain(|existing| existing.id != joke.id);
        jokes.push(joke);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.lock().map(|jokes| jokes.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Joke>>, DbError> {
        self.jokes
            .lock()
            .map_err(|_| DbError::Connection("joke store lock poisoned".to_string()))
    }
}

#[async_trait]
impl JokeRepository for MemoryJokeRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Joke>, DbError> {
        Ok(self.lock()?.iter().find(|joke| joke.id == id).cloned())
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), DbError> {
        let mut jokes = self.lock()?;
        let before = jokes.len();
        jokes.retain(|joke| joke.id != id);
        if jokes.len() == before {
            return Err(DbError::Query(diesel::result::Error::NotFound));
        }
        Ok(())
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<JokeListItem>, DbError> {
        let limit = usize::try_from(limit).unwrap_or_default();
        let mut jokes: Vec<Joke> = self.lock()?.iter().rev().cloned().collect();
        // stable: ties keep newest-inserted first
        jokes.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(jokes
            .into_iter()
            .take(limit)
            .map(|joke| JokeListItem {
                id: joke.id,
                name: joke.name,
            })
            .collect())
    }

    async fn create(&self, new_joke: NewJoke) -> Result<Joke, DbError> {
        let now = Utc::now();
        let joke = Joke {
            id: new_joke.id,
            jokester_id: new_joke.jokester_id,
            name: new_joke.name,
            content: new_joke.content,
            created_at: now,
            updated_at: now,
        };
        self.insert(joke.clone())?;
        Ok(joke)
    }
}

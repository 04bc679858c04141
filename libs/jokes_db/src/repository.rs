//! Joke persistence behind a trait so the web service can run against
//! PostgreSQL in production and an in-memory store in tests.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::models::{Joke, JokeListItem, NewJoke};
use crate::schema::jokes;
use crate::{DbError, DbPool};

#[async_trait]
pub trait JokeRepository: Send + Sync {
    /// Look a joke up by id. A missing joke is `Ok(None)`, not an error.
    async fn find_by_id(&self, id: &str) -> Result<Option<Joke>, DbError>;

    /// Delete a joke by id.
    ///
    /// Callers check existence and ownership first; deleting a missing id
    /// fails with [`diesel::result::Error::NotFound`].
    async fn delete_by_id(&self, id: &str) -> Result<(), DbError>;

    /// Newest jokes first, at most `limit` of them.
    async fn list_recent(&self, limit: i64) -> Result<Vec<JokeListItem>, DbError>;

    async fn create(&self, new_joke: NewJoke) -> Result<Joke, DbError>;
}

#[derive(Clone)]
pub struct PgJokeRepository {
    pool: DbPool,
}

impl PgJokeRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JokeRepository for PgJokeRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Joke>, DbError> {
        let mut conn = self.pool.get().await?;

        let joke = jokes::table
            .find(id)
            .select(Joke::as_select())
            .first::<Joke>(&mut conn)
            .await
            .optional()?;

        Ok(joke)
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), DbError> {
        let mut conn = self.pool.get().await?;

        let deleted = diesel::delete(jokes::table.find(id))
            .execute(&mut conn)
            .await?;

        if deleted == 0 {
            return Err(DbError::Query(diesel::result::Error::NotFound));
        }
        debug!(joke_id = id, "joke deleted");
        Ok(())
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<JokeListItem>, DbError> {
        let mut conn = self.pool.get().await?;

        let items = jokes::table
            .order((jokes::created_at.desc(), jokes::id.desc()))
            .limit(limit)
            .select(JokeListItem::as_select())
            .load(&mut conn)
            .await?;

        Ok(items)
    }

    async fn create(&self, new_joke: NewJoke) -> Result<Joke, DbError> {
        let mut conn = self.pool.get().await?;

        let joke = diesel::insert_into(jokes::table)
            .values(&new_joke)
            .returning(Joke::as_returning())
            .get_result(&mut conn)
            .await?;

        debug!(joke_id = %joke.id, jokester_id = %joke.jokester_id, "joke created");
        Ok(joke)
    }
}

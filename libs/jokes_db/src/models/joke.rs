use crate::schema::jokes;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Queryable, Selectable)]
#[diesel(table_name = jokes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct Joke {
    pub id: String,
    pub jokester_id: String,
    pub name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Joke {
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.jokester_id == user_id
    }
}

/// Listing projection: enough to link to a joke.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Queryable, Selectable)]
#[diesel(table_name = jokes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct JokeListItem {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Insertable)]
#[diesel(table_name = jokes)]
#[serde(rename_all = "camelCase")]
pub struct NewJoke {
    pub id: String,
    pub jokester_id: String,
    pub name: String,
    pub content: String,
}

impl NewJoke {
    pub fn new(jokester_id: String, name: String, content: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            jokester_id,
            name,
            content,
        }
    }
}

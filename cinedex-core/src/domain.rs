//! Catalog domain types shared between persistence and the HTTP layer.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Display value used when the provider gives no runtime or plot.
pub const UNSPECIFIED: &str = "Non indiqué";

/// The three person kinds a movie relates to. Each kind is persisted in
/// its own table so an identifier can mean different things per role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonRole {
    Director,
    Producer,
    Actor,
}

impl PersonRole {
    /// Entity table for this role.
    pub(crate) fn table(&self) -> &'static str {
        match self {
            PersonRole::Director => "directors",
            PersonRole::Producer => "producers",
            PersonRole::Actor => "actors",
        }
    }

    /// Movie join table for this role.
    pub(crate) fn join_table(&self) -> &'static str {
        match self {
            PersonRole::Director => "movie_directors",
            PersonRole::Producer => "movie_producers",
            PersonRole::Actor => "movie_actors",
        }
    }
}

/// A director, producer, or actor row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Person {
    pub id: Uuid,
    pub name: String,
    pub imdb_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Movie {
    pub id: Uuid,
    pub imdb_id: String,
    pub title: String,
    /// Display string such as "2h22", not a machine duration.
    pub duration: String,
    pub summary: String,
    pub poster_url: String,
}

/// Fields required to insert a movie row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMovie {
    pub imdb_id: String,
    pub title: String,
    pub duration: String,
    pub summary: String,
    pub poster_url: String,
}

/// A person to attach to a movie, resolved through get-or-create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPerson {
    pub name: String,
    pub imdb_id: Option<String>,
}

/// List view of a movie: identity, poster, and the categories used for
/// filtering. Relations beyond categories are detail-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: Uuid,
    pub title: String,
    pub poster_url: String,
    pub categories: Vec<Category>,
}

/// Detail view of a movie with all four relation lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieDetail {
    #[serde(flatten)]
    pub movie: Movie,
    pub directors: Vec<Person>,
    pub producers: Vec<Person>,
    pub actors: Vec<Person>,
    pub categories: Vec<Category>,
}

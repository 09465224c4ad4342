//! Postgres-backed catalog repository.
//!
//! Related entities are normalized through `INSERT .. ON CONFLICT`
//! upserts, so concurrent imports of the same person or category resolve
//! at the database rather than through application locking.

use async_trait::async_trait;
use sqlx::postgres::{PgConnection, PgPool, PgPoolOptions};
use tracing::info;
use uuid::Uuid;

use crate::catalog::ports::{CatalogRepository, MovieFilters, MovieRelations};
use crate::domain::{
    Category, Movie, MovieDetail, MovieSummary, NewMovie, NewPerson, Person,
    PersonRole,
};
use crate::error::{CatalogError, Result};
use crate::validate::MSG_MOVIE_ALREADY_PRESENT;

#[derive(Clone)]
pub struct PostgresCatalogRepository {
    pool: PgPool,
}

impl std::fmt::Debug for PostgresCatalogRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresCatalogRepository")
            .field("pool_size", &self.pool.size())
            .field("idle_connections", &self.pool.num_idle())
            .finish()
    }
}

/// Escape LIKE/ILIKE metacharacters so a filter value matches literally.
///
/// Postgres treats `\` as the default escape character, so it must be
/// doubled before `%` and `_` are escaped with it.
fn escape_like_pattern(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// The trimmed identifier a person is matched on, when one is usable.
/// A person without one falls back to exact-name matching.
fn person_match_key(person: &NewPerson) -> Option<&str> {
    person
        .imdb_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
}

/// Append `row` unless a row with the same id is already attached.
/// Duplicate credits within one payload resolve to the same row, so
/// this is what keeps relation lists and join inserts deduplicated.
fn push_attached(attached: &mut Vec<Person>, row: Person) -> bool {
    if attached.iter().any(|p| p.id == row.id) {
        return false;
    }
    attached.push(row);
    true
}

#[derive(Debug, sqlx::FromRow)]
struct MovieListRow {
    id: Uuid,
    title: String,
    poster_url: String,
}

#[derive(Debug, sqlx::FromRow)]
struct MovieCategoryRow {
    movie_id: Uuid,
    id: Uuid,
    name: String,
}

impl PostgresCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str) -> Result<Self> {
        let max_connections = std::env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        info!(max_connections, "Connected to Postgres");
        Ok(Self::new(pool))
    }

    /// Apply pending migrations from `cinedex-core/migrations`.
    pub async fn initialize_schema(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| {
                CatalogError::Internal(format!("Migration failed: {}", e))
            })?;
        Ok(())
    }

    /// Fetch an existing person for this role or insert a new row.
    ///
    /// A person carrying an IMDb identifier is matched on it; otherwise
    /// the first row with the same name is reused.
    async fn get_or_create_person(
        conn: &mut PgConnection,
        role: PersonRole,
        person: &NewPerson,
    ) -> Result<Person> {
        if let Some(imdb_id) = person_match_key(person) {
            let sql = format!(
                "INSERT INTO {table} (name, imdb_id) VALUES ($1, $2) \
                 ON CONFLICT (imdb_id) DO UPDATE SET name = EXCLUDED.name \
                 RETURNING id, name, imdb_id",
                table = role.table(),
            );
            let row = sqlx::query_as::<_, Person>(&sql)
                .bind(&person.name)
                .bind(imdb_id)
                .fetch_one(&mut *conn)
                .await?;
            return Ok(row);
        }

        let select = format!(
            "SELECT id, name, imdb_id FROM {table} WHERE name = $1 LIMIT 1",
            table = role.table(),
        );
        if let Some(existing) = sqlx::query_as::<_, Person>(&select)
            .bind(&person.name)
            .fetch_optional(&mut *conn)
            .await?
        {
            return Ok(existing);
        }

        let insert = format!(
            "INSERT INTO {table} (name) VALUES ($1) RETURNING id, name, imdb_id",
            table = role.table(),
        );
        let row = sqlx::query_as::<_, Person>(&insert)
            .bind(&person.name)
            .fetch_one(&mut *conn)
            .await?;
        Ok(row)
    }

    /// Fetch an existing category by name or insert a new row.
    async fn get_or_create_category(
        conn: &mut PgConnection,
        name: &str,
    ) -> Result<Category> {
        let row = sqlx::query_as::<_, Category>(
            "INSERT INTO categories (name) VALUES ($1) \
             ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name \
             RETURNING id, name",
        )
        .bind(name)
        .fetch_one(&mut *conn)
        .await?;
        Ok(row)
    }

    async fn link_person(
        conn: &mut PgConnection,
        role: PersonRole,
        movie_id: Uuid,
        person_id: Uuid,
    ) -> Result<()> {
        let sql = format!(
            "INSERT INTO {join} (movie_id, person_id) VALUES ($1, $2) \
             ON CONFLICT DO NOTHING",
            join = role.join_table(),
        );
        sqlx::query(&sql)
            .bind(movie_id)
            .bind(person_id)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    async fn link_category(
        conn: &mut PgConnection,
        movie_id: Uuid,
        category_id: Uuid,
    ) -> Result<()> {
        sqlx::query(
            "INSERT INTO movie_categories (movie_id, category_id) \
             VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(movie_id)
        .bind(category_id)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    /// Resolve one person relation list, deduplicating by row id.
    async fn attach_people(
        conn: &mut PgConnection,
        role: PersonRole,
        movie_id: Uuid,
        people: &[NewPerson],
    ) -> Result<Vec<Person>> {
        let mut attached: Vec<Person> = Vec::new();
        for person in people {
            if person.name.trim().is_empty() {
                continue;
            }
            let row = Self::get_or_create_person(conn, role, person).await?;
            let row_id = row.id;
            if push_attached(&mut attached, row) {
                Self::link_person(conn, role, movie_id, row_id).await?;
            }
        }
        Ok(attached)
    }

    async fn people_for_movie(
        &self,
        role: PersonRole,
        movie_id: Uuid,
    ) -> Result<Vec<Person>> {
        let sql = format!(
            "SELECT p.id, p.name, p.imdb_id \
             FROM {table} p \
             JOIN {join} j ON j.person_id = p.id \
             WHERE j.movie_id = $1 \
             ORDER BY p.name",
            table = role.table(),
            join = role.join_table(),
        );
        let rows = sqlx::query_as::<_, Person>(&sql)
            .bind(movie_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn categories_for_movie(&self, movie_id: Uuid) -> Result<Vec<Category>> {
        let rows = sqlx::query_as::<_, Category>(
            "SELECT c.id, c.name \
             FROM categories c \
             JOIN movie_categories mc ON mc.category_id = c.id \
             WHERE mc.movie_id = $1 \
             ORDER BY c.name",
        )
        .bind(movie_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

#[async_trait]
impl CatalogRepository for PostgresCatalogRepository {
    async fn list_movies(
        &self,
        filters: MovieFilters,
    ) -> Result<Vec<MovieSummary>> {
        let rows = match filters.category.as_deref().map(str::trim) {
            Some(category) if !category.is_empty() => {
                sqlx::query_as::<_, MovieListRow>(
                    "SELECT DISTINCT m.id, m.title, m.poster_url \
                     FROM movies m \
                     JOIN movie_categories mc ON mc.movie_id = m.id \
                     JOIN categories c ON c.id = mc.category_id \
                     WHERE c.name ILIKE '%' || $1 || '%' \
                     ORDER BY m.title",
                )
                .bind(escape_like_pattern(category))
                .fetch_all(&self.pool)
                .await?
            }
            _ => {
                sqlx::query_as::<_, MovieListRow>(
                    "SELECT m.id, m.title, m.poster_url FROM movies m \
                     ORDER BY m.title",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
        let category_rows = sqlx::query_as::<_, MovieCategoryRow>(
            "SELECT mc.movie_id, c.id, c.name \
             FROM movie_categories mc \
             JOIN categories c ON c.id = mc.category_id \
             WHERE mc.movie_id = ANY($1) \
             ORDER BY c.name",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut movies: Vec<MovieSummary> = rows
            .into_iter()
            .map(|row| MovieSummary {
                id: row.id,
                title: row.title,
                poster_url: row.poster_url,
                categories: Vec::new(),
            })
            .collect();
        for category in category_rows {
            if let Some(movie) =
                movies.iter_mut().find(|m| m.id == category.movie_id)
            {
                movie.categories.push(Category {
                    id: category.id,
                    name: category.name,
                });
            }
        }

        Ok(movies)
    }

    async fn get_movie(&self, id: Uuid) -> Result<MovieDetail> {
        let movie = sqlx::query_as::<_, Movie>(
            "SELECT id, imdb_id, title, duration, summary, poster_url \
             FROM movies WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| {
            CatalogError::NotFound(format!("Film {} introuvable", id))
        })?;

        let (directors, producers, actors, categories) = tokio::join!(
            self.people_for_movie(PersonRole::Director, id),
            self.people_for_movie(PersonRole::Producer, id),
            self.people_for_movie(PersonRole::Actor, id),
            self.categories_for_movie(id),
        );

        Ok(MovieDetail {
            movie,
            directors: directors?,
            producers: producers?,
            actors: actors?,
            categories: categories?,
        })
    }

    async fn movie_exists(&self, imdb_id: &str) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM movies WHERE imdb_id = $1)",
        )
        .bind(imdb_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn create_movie(
        &self,
        movie: NewMovie,
        relations: MovieRelations,
    ) -> Result<MovieDetail> {
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query_as::<_, Movie>(
            "INSERT INTO movies (imdb_id, title, duration, summary, poster_url) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, imdb_id, title, duration, summary, poster_url",
        )
        .bind(&movie.imdb_id)
        .bind(&movie.title)
        .bind(&movie.duration)
        .bind(&movie.summary)
        .bind(&movie.poster_url)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db) = &e {
                if db.is_unique_violation() {
                    return CatalogError::AlreadyExists(
                        MSG_MOVIE_ALREADY_PRESENT.to_string(),
                    );
                }
            }
            CatalogError::Database(e)
        })?;

        let movie_id = inserted.id;
        let directors = Self::attach_people(
            &mut tx,
            PersonRole::Director,
            movie_id,
            &relations.directors,
        )
        .await?;
        let producers = Self::attach_people(
            &mut tx,
            PersonRole::Producer,
            movie_id,
            &relations.producers,
        )
        .await?;
        let actors = Self::attach_people(
            &mut tx,
            PersonRole::Actor,
            movie_id,
            &relations.actors,
        )
        .await?;

        let mut categories: Vec<Category> = Vec::new();
        for name in &relations.categories {
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            let category = Self::get_or_create_category(&mut tx, name).await?;
            if categories.iter().any(|c| c.id == category.id) {
                continue;
            }
            Self::link_category(&mut tx, movie_id, category.id).await?;
            categories.push(category);
        }

        tx.commit().await?;

        info!(
            movie_id = %movie_id,
            imdb_id = %inserted.imdb_id,
            title = %inserted.title,
            "Created movie"
        );

        Ok(MovieDetail {
            movie: inserted,
            directors,
            producers,
            actors,
            categories,
        })
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        let rows = sqlx::query_as::<_, Category>(
            "SELECT id, name FROM categories ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

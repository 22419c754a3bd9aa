// src/models/movie.rs
//
// Movie queries come in three shapes: public listings (approved rows only,
// genre and actor names aggregated into one string each), CMS listings (all
// statuses, plus the submitter's username), and the detail view. Filtered
// listings carry
// their total via COUNT(*) OVER() so one round trip serves both rows and
// pagination; plain listings use a separate COUNT.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

use crate::error::AppError;

/// Represents the 'movies' table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Movie {
    pub movie_id: i64,
    pub title: String,
    pub alternative_title: Option<String>,
    pub year: i32,
    pub synopsis: Option<String>,
    pub movie_rate: f64,
    pub views: i64,
    pub poster_url: Option<String>,
    pub release_status: String,
    pub approval_status: String,
    pub link_trailer: Option<String>,
    pub country_id: Option<String>,
    pub user_id: Option<i64>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

/// Public listing row: the movie plus its genre and actor names, each folded
/// into one string ('No Genre' / 'No Actor' when empty).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MovieCard {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub movie: Movie,
    pub genres: String,
    pub actors: String,
}

/// A [`MovieCard`] carrying the window count of all rows the query matched.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CountedMovieCard {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub card: MovieCard,
    pub total_count: i64,
}

/// Filter-sort row: the catalogue filter view keeps genres only.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FilteredMovie {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub movie: Movie,
    pub genres: String,
    pub total_count: i64,
}

/// CMS listing row: any approval status, genres and actors aggregated,
/// submitter's username attached.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MovieCms {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub movie: Movie,
    pub genres: String,
    pub actors: String,
    pub username: Option<String>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CountedMovieCms {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub row: MovieCms,
    pub total_count: i64,
}

/// Detail view: genres and platforms aggregated, country name resolved.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MovieDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub movie: Movie,
    pub genres: String,
    pub platforms: String,
    pub country_name: Option<String>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GenreRef {
    pub genre_id: i64,
    pub genre_name: String,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PlatformRef {
    pub platform_id: i64,
    pub platform_name: String,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AwardRef {
    pub award_id: i64,
    pub award_name: String,
}

/// Dashboard totals, one subselect per entity.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub total_movies: i64,
    pub total_genres: i64,
    pub total_actors: i64,
    pub total_countries: i64,
    pub total_awards: i64,
    pub total_users: i64,
}

/// Column values for create/update, already validated by the handler.
#[derive(Debug, Clone)]
pub struct MovieInput {
    pub title: String,
    pub alternative_title: Option<String>,
    pub year: i32,
    pub synopsis: Option<String>,
    pub movie_rate: f64,
    pub views: i64,
    pub poster_url: Option<String>,
    pub release_status: String,
    pub link_trailer: Option<String>,
    pub country_id: Option<String>,
}

/// Optional filter criteria for the public catalogue. Every field narrows
/// the approved set; `None` means "don't care".
#[derive(Debug, Default, Clone, Deserialize)]
pub struct MovieFilters {
    pub year: Option<i32>,
    pub genre_name: Option<String>,
    pub release_status: Option<String>,
    pub platform_name: Option<String>,
    pub award: Option<String>,
    pub country_name: Option<String>,
}

/// Genre names aggregated per movie, as a correlated subselect.
const GENRES_AGG: &str = "(SELECT COALESCE(STRING_AGG(DISTINCT g.genre_name, ', '), 'No Genre') \
     FROM categorized_as ca JOIN genres g ON g.genre_id = ca.genre_id \
     WHERE ca.movie_id = m.movie_id) AS genres";

const ACTORS_AGG: &str = "(SELECT COALESCE(STRING_AGG(DISTINCT a.actor_name, ', '), 'No Actor') \
     FROM acted_in ai JOIN actors a ON a.actor_id = ai.actor_id \
     WHERE ai.movie_id = m.movie_id) AS actors";

/// Maps a UI sort label to an ORDER BY clause. Every ordering ends with the
/// id descending so pagination stays stable across equal keys.
pub fn order_clause(sort_by: Option<&str>) -> &'static str {
    match sort_by {
        Some("A-Z") => "m.title ASC, m.movie_id DESC",
        Some("Z-A") => "m.title DESC, m.movie_id DESC",
        Some("Rating ↑") => "m.movie_rate ASC, m.movie_id DESC",
        Some("Rating ↓") => "m.movie_rate DESC, m.movie_id DESC",
        Some("Year ↑") => "m.year ASC, m.movie_id DESC",
        Some("Year ↓") => "m.year DESC, m.movie_id DESC",
        _ => "m.updated_at DESC, m.movie_id DESC",
    }
}

/// Composes the filtered catalogue query. Only approved movies are
/// considered; each present filter appends one predicate with a bound value.
pub fn filter_sort_query<'a>(
    filters: &'a MovieFilters,
    sort_by: Option<&str>,
    limit: i64,
    offset: i64,
) -> QueryBuilder<'a, Postgres> {
    let mut qb = QueryBuilder::new(format!(
        "SELECT m.*, COUNT(*) OVER() AS total_count, {} \
         FROM movies m WHERE m.approval_status = 'APPROVED'",
        GENRES_AGG
    ));

    if let Some(year) = filters.year {
        qb.push(" AND m.year = ");
        qb.push_bind(year);
    }
    if let Some(genre) = filters.genre_name.as_deref() {
        qb.push(
            " AND EXISTS (SELECT 1 FROM categorized_as ca JOIN genres g \
             ON g.genre_id = ca.genre_id \
             WHERE ca.movie_id = m.movie_id AND g.genre_name = ",
        );
        qb.push_bind(genre);
        qb.push(")");
    }
    if let Some(status) = filters.release_status.as_deref() {
        qb.push(" AND m.release_status = ");
        qb.push_bind(status);
    }
    if let Some(platform) = filters.platform_name.as_deref() {
        qb.push(
            " AND EXISTS (SELECT 1 FROM available_on ao JOIN platforms p \
             ON p.platform_id = ao.platform_id \
             WHERE ao.movie_id = m.movie_id AND p.platform_name = ",
        );
        qb.push_bind(platform);
        qb.push(")");
    }
    if let Some(award) = filters.award.as_deref() {
        qb.push(
            " AND EXISTS (SELECT 1 FROM awarded aw JOIN awards a \
             ON a.award_id = aw.award_id \
             WHERE aw.movie_id = m.movie_id AND a.award_name = ",
        );
        qb.push_bind(award);
        qb.push(")");
    }
    if let Some(country) = filters.country_name.as_deref() {
        qb.push(" AND m.country_id IN (SELECT country_id FROM countries WHERE country_name = ");
        qb.push_bind(country);
        qb.push(")");
    }

    qb.push(" ORDER BY ");
    qb.push(order_clause(sort_by));
    qb.push(" LIMIT ");
    qb.push_bind(limit);
    qb.push(" OFFSET ");
    qb.push_bind(offset);

    qb
}

impl Movie {
    /// Approved catalogue page, newest updates first.
    pub async fn get_all(
        pool: &PgPool,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<MovieCard>, i64), AppError> {
        let sql = format!(
            "SELECT m.*, {}, {} FROM movies m WHERE m.approval_status = 'APPROVED' \
             ORDER BY m.updated_at DESC, m.movie_id DESC LIMIT $1 OFFSET $2",
            GENRES_AGG, ACTORS_AGG
        );
        let rows = sqlx::query_as::<_, MovieCard>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get all movies: {}", e)))?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM movies WHERE approval_status = 'APPROVED'",
        )
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to get all movies: {}", e)))?;

        Ok((rows, total))
    }

    /// Moderation view over every movie, any status.
    pub async fn get_all_cms(
        pool: &PgPool,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<MovieCms>, i64), AppError> {
        let sql = format!(
            "SELECT m.*, {}, {}, u.username FROM movies m \
             LEFT JOIN users u ON u.user_id = m.user_id \
             ORDER BY m.updated_at DESC, m.movie_id DESC LIMIT $1 OFFSET $2",
            GENRES_AGG, ACTORS_AGG
        );
        let rows = sqlx::query_as::<_, MovieCms>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get CMS movies: {}", e)))?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM movies")
            .fetch_one(pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get CMS movies: {}", e)))?;

        Ok((rows, total))
    }

    /// Like [`get_all_cms`] but restricted to one submitter's movies.
    ///
    /// [`get_all_cms`]: Movie::get_all_cms
    pub async fn get_all_cms_user(
        pool: &PgPool,
        user_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<MovieCms>, i64), AppError> {
        let sql = format!(
            "SELECT m.*, {}, {}, u.username FROM movies m \
             LEFT JOIN users u ON u.user_id = m.user_id \
             WHERE m.user_id = $1 \
             ORDER BY m.updated_at DESC, m.movie_id DESC LIMIT $2 OFFSET $3",
            GENRES_AGG, ACTORS_AGG
        );
        let rows = sqlx::query_as::<_, MovieCms>(&sql)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get user's CMS movies: {}", e)))?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM movies WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get user's CMS movies: {}", e)))?;

        Ok((rows, total))
    }

    /// Catalogue search across title, alternative title and actor names.
    pub async fn search(
        pool: &PgPool,
        keyword: &str,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<CountedMovieCard>, AppError> {
        let sql = format!(
            "SELECT m.*, COUNT(*) OVER() AS total_count, {}, {} \
             FROM movies m WHERE m.approval_status = 'APPROVED' AND (\
               m.title ILIKE '%' || $1 || '%' \
               OR m.alternative_title ILIKE '%' || $1 || '%' \
               OR EXISTS (SELECT 1 FROM acted_in ai JOIN actors a \
                  ON a.actor_id = ai.actor_id \
                  WHERE ai.movie_id = m.movie_id \
                  AND a.actor_name ILIKE '%' || $1 || '%')) \
             ORDER BY m.updated_at DESC, m.movie_id DESC LIMIT $2 OFFSET $3",
            GENRES_AGG, ACTORS_AGG
        );
        sqlx::query_as::<_, CountedMovieCard>(&sql)
            .bind(keyword)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to search movies: {}", e)))
    }

    /// Title-only search over every movie, for the admin CMS.
    pub async fn search_by_title(
        pool: &PgPool,
        keyword: &str,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<CountedMovieCms>, AppError> {
        let sql = format!(
            "SELECT m.*, COUNT(*) OVER() AS total_count, {}, {}, u.username \
             FROM movies m LEFT JOIN users u ON u.user_id = m.user_id \
             WHERE m.title ILIKE '%' || $1 || '%' \
             ORDER BY m.updated_at DESC, m.movie_id DESC LIMIT $2 OFFSET $3",
            GENRES_AGG, ACTORS_AGG
        );
        sqlx::query_as::<_, CountedMovieCms>(&sql)
            .bind(keyword)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to search movies by title: {}", e)))
    }

    /// Title-only search over one submitter's movies.
    pub async fn search_by_title_user(
        pool: &PgPool,
        keyword: &str,
        user_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<CountedMovieCms>, AppError> {
        let sql = format!(
            "SELECT m.*, COUNT(*) OVER() AS total_count, {}, {}, u.username \
             FROM movies m LEFT JOIN users u ON u.user_id = m.user_id \
             WHERE m.title ILIKE '%' || $1 || '%' AND m.user_id = $2 \
             ORDER BY m.updated_at DESC, m.movie_id DESC LIMIT $3 OFFSET $4",
            GENRES_AGG, ACTORS_AGG
        );
        sqlx::query_as::<_, CountedMovieCms>(&sql)
            .bind(keyword)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to search movies by title: {}", e)))
    }

    /// CMS listing narrowed to one approval status.
    pub async fn filter_by_status(
        pool: &PgPool,
        approval_status: &str,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<CountedMovieCms>, AppError> {
        let sql = format!(
            "SELECT m.*, COUNT(*) OVER() AS total_count, {}, {}, u.username \
             FROM movies m LEFT JOIN users u ON u.user_id = m.user_id \
             WHERE m.approval_status = $1 \
             ORDER BY m.updated_at DESC, m.movie_id DESC LIMIT $2 OFFSET $3",
            GENRES_AGG, ACTORS_AGG
        );
        sqlx::query_as::<_, CountedMovieCms>(&sql)
            .bind(approval_status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to filter movies by status: {}", e)))
    }

    /// CMS listing narrowed to one approval status and one submitter.
    pub async fn filter_by_status_user(
        pool: &PgPool,
        approval_status: &str,
        user_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<CountedMovieCms>, AppError> {
        let sql = format!(
            "SELECT m.*, COUNT(*) OVER() AS total_count, {}, {}, u.username \
             FROM movies m LEFT JOIN users u ON u.user_id = m.user_id \
             WHERE m.approval_status = $1 AND m.user_id = $2 \
             ORDER BY m.updated_at DESC, m.movie_id DESC LIMIT $3 OFFSET $4",
            GENRES_AGG, ACTORS_AGG
        );
        sqlx::query_as::<_, CountedMovieCms>(&sql)
            .bind(approval_status)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to filter movies by status: {}", e)))
    }

    /// Filtered and sorted catalogue page.
    pub async fn filter_sorted(
        pool: &PgPool,
        filters: &MovieFilters,
        sort_by: Option<&str>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<FilteredMovie>, AppError> {
        let mut qb = filter_sort_query(filters, sort_by, limit, offset);
        qb.build_query_as::<FilteredMovie>()
            .fetch_all(pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to filter movies: {}", e)))
    }

    pub async fn get_by_id(pool: &PgPool, id: i64) -> Result<Option<MovieDetail>, AppError> {
        let sql = format!(
            "SELECT m.*, {}, \
             (SELECT COALESCE(STRING_AGG(DISTINCT p.platform_name, ', '), '') \
              FROM available_on ao JOIN platforms p ON p.platform_id = ao.platform_id \
              WHERE ao.movie_id = m.movie_id) AS platforms, \
             c.country_name \
             FROM movies m LEFT JOIN countries c ON c.country_id = m.country_id \
             WHERE m.movie_id = $1",
            GENRES_AGG
        );
        sqlx::query_as::<_, MovieDetail>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get movie by id: {}", e)))
    }

    /// Approved movies sharing at least one genre with `movie_id`, itself
    /// excluded.
    pub async fn get_by_same_genre(
        pool: &PgPool,
        movie_id: i64,
        limit: i64,
    ) -> Result<Vec<MovieCard>, AppError> {
        let sql = format!(
            "SELECT m.*, {}, {} FROM movies m \
             WHERE m.approval_status = 'APPROVED' AND m.movie_id <> $1 \
             AND EXISTS (SELECT 1 FROM categorized_as ca \
                 WHERE ca.movie_id = m.movie_id AND ca.genre_id IN \
                 (SELECT genre_id FROM categorized_as WHERE movie_id = $1)) \
             ORDER BY m.updated_at DESC, m.movie_id DESC LIMIT $2",
            GENRES_AGG, ACTORS_AGG
        );
        sqlx::query_as::<_, MovieCard>(&sql)
            .bind(movie_id)
            .bind(limit)
            .fetch_all(pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get movies by same genre: {}", e)))
    }

    /// Inserts a movie on behalf of `user_id`. Admin submissions go live
    /// immediately; everyone else waits for moderation.
    pub async fn create(
        pool: &PgPool,
        input: &MovieInput,
        user_id: i64,
    ) -> Result<Movie, AppError> {
        let role = sqlx::query_scalar::<_, String>("SELECT role FROM users WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to create movie: {}", e)))?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let approval_status = if role == "ADMIN" {
            "APPROVED"
        } else {
            "UNAPPROVED"
        };

        sqlx::query_as::<_, Movie>(
            "INSERT INTO movies \
             (title, alternative_title, year, synopsis, movie_rate, views, poster_url, \
              release_status, approval_status, link_trailer, country_id, user_id, \
              created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, \
              CURRENT_TIMESTAMP, CURRENT_TIMESTAMP) RETURNING *",
        )
        .bind(&input.title)
        .bind(&input.alternative_title)
        .bind(input.year)
        .bind(&input.synopsis)
        .bind(input.movie_rate)
        .bind(input.views)
        .bind(&input.poster_url)
        .bind(&input.release_status)
        .bind(approval_status)
        .bind(&input.link_trailer)
        .bind(&input.country_id)
        .bind(user_id)
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to create movie: {}", e)))
    }

    pub async fn update(
        pool: &PgPool,
        id: i64,
        input: &MovieInput,
    ) -> Result<Option<Movie>, AppError> {
        sqlx::query_as::<_, Movie>(
            "UPDATE movies SET title = $1, alternative_title = $2, year = $3, \
             synopsis = $4, movie_rate = $5, views = $6, \
             poster_url = COALESCE($7, poster_url), release_status = $8, \
             link_trailer = $9, country_id = $10, updated_at = CURRENT_TIMESTAMP \
             WHERE movie_id = $11 RETURNING *",
        )
        .bind(&input.title)
        .bind(&input.alternative_title)
        .bind(input.year)
        .bind(&input.synopsis)
        .bind(input.movie_rate)
        .bind(input.views)
        .bind(&input.poster_url)
        .bind(&input.release_status)
        .bind(&input.link_trailer)
        .bind(&input.country_id)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to update movie: {}", e)))
    }

    pub async fn update_approval_status(
        pool: &PgPool,
        id: i64,
        approval_status: &str,
    ) -> Result<Option<Movie>, AppError> {
        sqlx::query_as::<_, Movie>(
            "UPDATE movies SET approval_status = $1, updated_at = CURRENT_TIMESTAMP \
             WHERE movie_id = $2 RETURNING *",
        )
        .bind(approval_status)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            AppError::Internal(format!("Failed to update movie approval status: {}", e))
        })
    }

    /// Removes a movie and all of its junction rows in one transaction.
    pub async fn delete(pool: &PgPool, id: i64) -> Result<u64, AppError> {
        let mut tx = pool.begin().await?;

        for table in ["available_on", "categorized_as", "awarded", "acted_in"] {
            let sql = format!("DELETE FROM {} WHERE movie_id = $1", table);
            sqlx::query(&sql).bind(id).execute(&mut *tx).await?;
        }

        let result = sqlx::query("DELETE FROM movies WHERE movie_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected())
    }

    // Junction writes. Re-attaching an existing pair is a no-op; the return
    // value says whether a row was actually inserted.

    pub async fn add_genre(pool: &PgPool, movie_id: i64, genre_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query(
            "INSERT INTO categorized_as (movie_id, genre_id) VALUES ($1, $2) \
             ON CONFLICT DO NOTHING",
        )
        .bind(movie_id)
        .bind(genre_id)
        .execute(pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to add genre to movie: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn add_platform(
        pool: &PgPool,
        movie_id: i64,
        platform_id: i64,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            "INSERT INTO available_on (movie_id, platform_id) VALUES ($1, $2) \
             ON CONFLICT DO NOTHING",
        )
        .bind(movie_id)
        .bind(platform_id)
        .execute(pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to add platform to movie: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn add_award(pool: &PgPool, movie_id: i64, award_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query(
            "INSERT INTO awarded (movie_id, award_id) VALUES ($1, $2) \
             ON CONFLICT DO NOTHING",
        )
        .bind(movie_id)
        .bind(award_id)
        .execute(pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to add award to movie: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn add_actor(pool: &PgPool, movie_id: i64, actor_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query(
            "INSERT INTO acted_in (movie_id, actor_id) VALUES ($1, $2) \
             ON CONFLICT DO NOTHING",
        )
        .bind(movie_id)
        .bind(actor_id)
        .execute(pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to add actor to movie: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    // Junction reads for the detail/edit views.

    pub async fn get_genres(pool: &PgPool, movie_id: i64) -> Result<Vec<GenreRef>, AppError> {
        sqlx::query_as::<_, GenreRef>(
            "SELECT g.genre_id, g.genre_name FROM genres g \
             JOIN categorized_as ca ON ca.genre_id = g.genre_id \
             WHERE ca.movie_id = $1 ORDER BY g.genre_name",
        )
        .bind(movie_id)
        .fetch_all(pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to get genres for movie: {}", e)))
    }

    pub async fn get_platforms(
        pool: &PgPool,
        movie_id: i64,
    ) -> Result<Vec<PlatformRef>, AppError> {
        sqlx::query_as::<_, PlatformRef>(
            "SELECT p.platform_id, p.platform_name FROM platforms p \
             JOIN available_on ao ON ao.platform_id = p.platform_id \
             WHERE ao.movie_id = $1 ORDER BY p.platform_name",
        )
        .bind(movie_id)
        .fetch_all(pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to get platforms for movie: {}", e)))
    }

    pub async fn get_awards(pool: &PgPool, movie_id: i64) -> Result<Vec<AwardRef>, AppError> {
        sqlx::query_as::<_, AwardRef>(
            "SELECT a.award_id, a.award_name FROM awards a \
             JOIN awarded aw ON aw.award_id = a.award_id \
             WHERE aw.movie_id = $1 ORDER BY a.award_name",
        )
        .bind(movie_id)
        .fetch_all(pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to get awards for movie: {}", e)))
    }

    // Wishlists.

    pub async fn add_to_wishlist(
        pool: &PgPool,
        user_id: i64,
        movie_id: i64,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            "INSERT INTO wishlists (user_id, movie_id) VALUES ($1, $2) \
             ON CONFLICT DO NOTHING",
        )
        .bind(user_id)
        .bind(movie_id)
        .execute(pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to add movie to wishlist: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn remove_from_wishlist(
        pool: &PgPool,
        user_id: i64,
        movie_id: i64,
    ) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM wishlists WHERE user_id = $1 AND movie_id = $2")
            .bind(user_id)
            .bind(movie_id)
            .execute(pool)
            .await
            .map_err(|e| {
                AppError::Internal(format!("Failed to remove movie from wishlist: {}", e))
            })?;

        Ok(result.rows_affected())
    }

    pub async fn get_wishlist(pool: &PgPool, user_id: i64) -> Result<Vec<MovieCard>, AppError> {
        let sql = format!(
            "SELECT m.*, {}, {} FROM movies m \
             JOIN wishlists w ON w.movie_id = m.movie_id \
             WHERE w.user_id = $1 ORDER BY m.updated_at DESC, m.movie_id DESC",
            GENRES_AGG, ACTORS_AGG
        );
        sqlx::query_as::<_, MovieCard>(&sql)
            .bind(user_id)
            .fetch_all(pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get wishlist: {}", e)))
    }

    /// Dashboard entity counts, gathered in one round trip.
    pub async fn get_totals(pool: &PgPool) -> Result<Totals, AppError> {
        sqlx::query_as::<_, Totals>(
            "SELECT \
             (SELECT COUNT(*) FROM movies) AS total_movies, \
             (SELECT COUNT(*) FROM genres) AS total_genres, \
             (SELECT COUNT(*) FROM actors) AS total_actors, \
             (SELECT COUNT(*) FROM countries) AS total_countries, \
             (SELECT COUNT(*) FROM awards) AS total_awards, \
             (SELECT COUNT(*) FROM users) AS total_users",
        )
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to get totals: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_movie() -> Movie {
        Movie {
            movie_id: 1,
            title: "Contoh".to_string(),
            alternative_title: None,
            year: 2024,
            synopsis: None,
            movie_rate: 0.0,
            views: 0,
            poster_url: None,
            release_status: "COMPLETED".to_string(),
            approval_status: "APPROVED".to_string(),
            link_trailer: None,
            country_id: None,
            user_id: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn listing_row_carries_both_aggregates() {
        let card = MovieCard {
            movie: sample_movie(),
            genres: "No Genre".to_string(),
            actors: "No Actor".to_string(),
        };
        let v = serde_json::to_value(&card).unwrap();
        assert_eq!(v["genres"], "No Genre");
        assert_eq!(v["actors"], "No Actor");
        assert_eq!(v["title"], "Contoh");
    }

    #[test]
    fn counted_listing_row_flattens_aggregates_and_count() {
        let row = CountedMovieCard {
            card: MovieCard {
                movie: sample_movie(),
                genres: "Action".to_string(),
                actors: "Tara Basro".to_string(),
            },
            total_count: 7,
        };
        let v = serde_json::to_value(&row).unwrap();
        assert_eq!(v["genres"], "Action");
        assert_eq!(v["actors"], "Tara Basro");
        assert_eq!(v["total_count"], 7);
    }

    #[test]
    fn filter_query_keeps_genres_only() {
        let filters = MovieFilters::default();
        let qb = filter_sort_query(&filters, None, 10, 0);
        assert!(qb.sql().contains("AS genres"));
        assert!(!qb.sql().contains("AS actors"));
    }

    #[test]
    fn order_clause_defaults_to_recency() {
        assert_eq!(order_clause(None), "m.updated_at DESC, m.movie_id DESC");
        assert_eq!(
            order_clause(Some("anything else")),
            "m.updated_at DESC, m.movie_id DESC"
        );
    }

    #[test]
    fn order_clause_maps_ui_labels() {
        assert_eq!(order_clause(Some("A-Z")), "m.title ASC, m.movie_id DESC");
        assert_eq!(order_clause(Some("Z-A")), "m.title DESC, m.movie_id DESC");
        assert_eq!(
            order_clause(Some("Rating ↓")),
            "m.movie_rate DESC, m.movie_id DESC"
        );
        assert_eq!(order_clause(Some("Year ↑")), "m.year ASC, m.movie_id DESC");
    }

    #[test]
    fn filter_query_without_filters_only_constrains_approval() {
        let filters = MovieFilters::default();
        let qb = filter_sort_query(&filters, None, 10, 0);
        let sql = qb.sql();
        assert!(sql.contains("m.approval_status = 'APPROVED'"));
        assert!(!sql.contains("m.year ="));
        assert!(!sql.contains("genre_name ="));
        assert!(sql.contains("ORDER BY m.updated_at DESC, m.movie_id DESC"));
    }

    #[test]
    fn filter_query_binds_each_present_filter() {
        let filters = MovieFilters {
            year: Some(2020),
            genre_name: Some("Action".to_string()),
            release_status: Some("COMPLETED".to_string()),
            platform_name: Some("Netflix".to_string()),
            award: Some("Best Picture".to_string()),
            country_name: Some("Japan".to_string()),
        };
        let qb = filter_sort_query(&filters, Some("A-Z"), 10, 20);
        let sql = qb.sql();
        assert!(sql.contains("m.year = $1"));
        assert!(sql.contains("g.genre_name = $2"));
        assert!(sql.contains("m.release_status = $3"));
        assert!(sql.contains("p.platform_name = $4"));
        assert!(sql.contains("a.award_name = $5"));
        assert!(sql.contains("country_name = $6"));
        assert!(sql.contains("ORDER BY m.title ASC, m.movie_id DESC"));
        assert!(sql.contains("LIMIT $7 OFFSET $8"));
    }

    #[test]
    fn filter_query_carries_window_count() {
        let filters = MovieFilters::default();
        let qb = filter_sort_query(&filters, None, 10, 0);
        assert!(qb.sql().contains("COUNT(*) OVER() AS total_count"));
    }
}

// src/models/actor.rs

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::error::AppError;

/// Represents the 'actors' table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Actor {
    pub actor_id: i64,
    pub actor_name: String,
    pub birth_date: Option<NaiveDate>,
    pub foto_url: Option<String>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

/// Column values for create/update, already validated by the handler.
#[derive(Debug)]
pub struct ActorInput {
    pub actor_name: String,
    pub birth_date: Option<NaiveDate>,
    pub foto_url: Option<String>,
}

impl Actor {
    pub async fn get_all(pool: &PgPool) -> Result<Vec<Actor>, AppError> {
        sqlx::query_as::<_, Actor>("SELECT * FROM actors ORDER BY updated_at DESC")
            .fetch_all(pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get all actors: {}", e)))
    }

    pub async fn get_by_id(pool: &PgPool, id: i64) -> Result<Option<Actor>, AppError> {
        sqlx::query_as::<_, Actor>("SELECT * FROM actors WHERE actor_id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get actor by id: {}", e)))
    }

    pub async fn get_paginated(
        pool: &PgPool,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Actor>, i64), AppError> {
        let rows = sqlx::query_as::<_, Actor>(
            "SELECT * FROM actors ORDER BY updated_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to get paginated actors: {}", e)))?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM actors")
            .fetch_one(pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get paginated actors: {}", e)))?;

        Ok((rows, total))
    }

    /// Case-insensitive substring search on the name column. The wildcard
    /// concatenation happens in SQL; the keyword itself stays a bound value.
    pub async fn search_by_name(
        pool: &PgPool,
        keyword: &str,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Actor>, i64), AppError> {
        let rows = sqlx::query_as::<_, Actor>(
            "SELECT * FROM actors WHERE actor_name ILIKE '%' || $1 || '%' \
             ORDER BY updated_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(keyword)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to search actors by actor name: {}", e)))?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM actors WHERE actor_name ILIKE '%' || $1 || '%'",
        )
        .bind(keyword)
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to search actors by actor name: {}", e)))?;

        Ok((rows, total))
    }

    pub async fn get_by_movie(pool: &PgPool, movie_id: i64) -> Result<Vec<Actor>, AppError> {
        sqlx::query_as::<_, Actor>(
            "SELECT * FROM actors WHERE actor_id IN \
             (SELECT actor_id FROM acted_in WHERE movie_id = $1)",
        )
        .bind(movie_id)
        .fetch_all(pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to get actors by movie: {}", e)))
    }

    pub async fn create(pool: &PgPool, input: &ActorInput) -> Result<Actor, AppError> {
        sqlx::query_as::<_, Actor>(
            "INSERT INTO actors (actor_name, birth_date, foto_url, created_at, updated_at) \
             VALUES ($1, $2, $3, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP) RETURNING *",
        )
        .bind(&input.actor_name)
        .bind(input.birth_date)
        .bind(&input.foto_url)
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to create actor: {}", e)))
    }

    pub async fn update(
        pool: &PgPool,
        id: i64,
        input: &ActorInput,
    ) -> Result<Option<Actor>, AppError> {
        sqlx::query_as::<_, Actor>(
            "UPDATE actors SET actor_name = $1, birth_date = $2, foto_url = $3, \
             updated_at = CURRENT_TIMESTAMP WHERE actor_id = $4 RETURNING *",
        )
        .bind(&input.actor_name)
        .bind(input.birth_date)
        .bind(&input.foto_url)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to update actor: {}", e)))
    }

    pub async fn update_name(
        pool: &PgPool,
        id: i64,
        actor_name: &str,
    ) -> Result<Option<Actor>, AppError> {
        sqlx::query_as::<_, Actor>(
            "UPDATE actors SET actor_name = $1, updated_at = CURRENT_TIMESTAMP \
             WHERE actor_id = $2 RETURNING *",
        )
        .bind(actor_name)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to update actor name: {}", e)))
    }

    /// Deletes an actor. The dependent-row check and the delete run in one
    /// transaction so a junction row cannot slip in between them.
    pub async fn delete(pool: &PgPool, id: i64) -> Result<u64, AppError> {
        let mut tx = pool.begin().await?;

        let dependents =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM acted_in WHERE actor_id = $1")
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;

        if dependents > 0 {
            return Err(AppError::BadRequest(
                "Aktor masih terkait dengan movie".to_string(),
            ));
        }

        let result = sqlx::query("DELETE FROM actors WHERE actor_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected())
    }

    pub async fn total(pool: &PgPool) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM actors")
            .fetch_one(pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get total actors: {}", e)))
    }
}

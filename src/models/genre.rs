// src/models/genre.rs

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::error::AppError;

/// Represents the 'genres' table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Genre {
    pub genre_id: i64,
    pub genre_name: String,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

impl Genre {
    pub async fn get_all(pool: &PgPool) -> Result<Vec<Genre>, AppError> {
        sqlx::query_as::<_, Genre>("SELECT * FROM genres ORDER BY updated_at ASC NULLS LAST")
            .fetch_all(pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get all genres: {}", e)))
    }

    pub async fn get_by_id(pool: &PgPool, id: i64) -> Result<Option<Genre>, AppError> {
        sqlx::query_as::<_, Genre>("SELECT * FROM genres WHERE genre_id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get genre by id: {}", e)))
    }

    pub async fn get_paginated(
        pool: &PgPool,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Genre>, i64), AppError> {
        let rows = sqlx::query_as::<_, Genre>(
            "SELECT * FROM genres ORDER BY updated_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to get paginated genres: {}", e)))?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM genres")
            .fetch_one(pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get paginated genres: {}", e)))?;

        Ok((rows, total))
    }

    pub async fn search_by_name(
        pool: &PgPool,
        keyword: &str,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Genre>, i64), AppError> {
        let rows = sqlx::query_as::<_, Genre>(
            "SELECT * FROM genres WHERE genre_name ILIKE '%' || $1 || '%' \
             ORDER BY updated_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(keyword)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to search genres by genre name: {}", e)))?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM genres WHERE genre_name ILIKE '%' || $1 || '%'",
        )
        .bind(keyword)
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to search genres by genre name: {}", e)))?;

        Ok((rows, total))
    }

    pub async fn create(pool: &PgPool, genre_name: &str) -> Result<Genre, AppError> {
        sqlx::query_as::<_, Genre>(
            "INSERT INTO genres (genre_name, created_at, updated_at) \
             VALUES ($1, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP) RETURNING *",
        )
        .bind(genre_name)
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to create genre: {}", e)))
    }

    pub async fn update_name(
        pool: &PgPool,
        id: i64,
        genre_name: &str,
    ) -> Result<Option<Genre>, AppError> {
        sqlx::query_as::<_, Genre>(
            "UPDATE genres SET genre_name = $1, updated_at = CURRENT_TIMESTAMP \
             WHERE genre_id = $2 RETURNING *",
        )
        .bind(genre_name)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to update genre: {}", e)))
    }

    /// Deletes a genre unless a movie still references it. Check and delete
    /// share one transaction.
    pub async fn delete(pool: &PgPool, id: i64) -> Result<u64, AppError> {
        let mut tx = pool.begin().await?;

        let dependents =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM categorized_as WHERE genre_id = $1")
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;

        if dependents > 0 {
            return Err(AppError::BadRequest(
                "Genre masih terkait dengan movie.".to_string(),
            ));
        }

        let result = sqlx::query("DELETE FROM genres WHERE genre_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected())
    }

    pub async fn total(pool: &PgPool) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM genres")
            .fetch_one(pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get total genres: {}", e)))
    }
}

// src/models/award.rs

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::error::AppError;

/// Represents the 'awards' table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Award {
    pub award_id: i64,
    pub award_name: String,
    pub year: Option<i32>,
    pub country_id: Option<String>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

impl Award {
    pub async fn get_all(pool: &PgPool) -> Result<Vec<Award>, AppError> {
        sqlx::query_as::<_, Award>("SELECT * FROM awards ORDER BY updated_at DESC")
            .fetch_all(pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get all awards: {}", e)))
    }

    pub async fn get_by_id(pool: &PgPool, id: i64) -> Result<Option<Award>, AppError> {
        sqlx::query_as::<_, Award>("SELECT * FROM awards WHERE award_id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get award by id: {}", e)))
    }

    pub async fn get_paginated(
        pool: &PgPool,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Award>, i64), AppError> {
        let rows = sqlx::query_as::<_, Award>(
            "SELECT * FROM awards ORDER BY updated_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to get paginated awards: {}", e)))?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM awards")
            .fetch_one(pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get paginated awards: {}", e)))?;

        Ok((rows, total))
    }

    pub async fn search_by_name(
        pool: &PgPool,
        keyword: &str,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Award>, i64), AppError> {
        let rows = sqlx::query_as::<_, Award>(
            "SELECT * FROM awards WHERE award_name ILIKE '%' || $1 || '%' \
             ORDER BY updated_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(keyword)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to search awards by award name: {}", e)))?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM awards WHERE award_name ILIKE '%' || $1 || '%'",
        )
        .bind(keyword)
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to search awards by award name: {}", e)))?;

        Ok((rows, total))
    }

    pub async fn create(
        pool: &PgPool,
        award_name: &str,
        year: Option<i32>,
        country_id: Option<&str>,
    ) -> Result<Award, AppError> {
        sqlx::query_as::<_, Award>(
            "INSERT INTO awards (award_name, year, country_id, created_at, updated_at) \
             VALUES ($1, $2, $3, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP) RETURNING *",
        )
        .bind(award_name)
        .bind(year)
        .bind(country_id)
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to create award: {}", e)))
    }

    pub async fn update(
        pool: &PgPool,
        id: i64,
        award_name: &str,
        year: Option<i32>,
        country_id: Option<&str>,
    ) -> Result<Option<Award>, AppError> {
        sqlx::query_as::<_, Award>(
            "UPDATE awards SET award_name = $1, year = $2, country_id = $3, \
             updated_at = CURRENT_TIMESTAMP WHERE award_id = $4 RETURNING *",
        )
        .bind(award_name)
        .bind(year)
        .bind(country_id)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to update award: {}", e)))
    }

    pub async fn update_name(
        pool: &PgPool,
        id: i64,
        award_name: &str,
    ) -> Result<Option<Award>, AppError> {
        sqlx::query_as::<_, Award>(
            "UPDATE awards SET award_name = $1, updated_at = CURRENT_TIMESTAMP \
             WHERE award_id = $2 RETURNING *",
        )
        .bind(award_name)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to update award name: {}", e)))
    }

    /// Deletes an award unless a movie still holds it. Check and delete
    /// share one transaction.
    pub async fn delete(pool: &PgPool, id: i64) -> Result<u64, AppError> {
        let mut tx = pool.begin().await?;

        let dependents =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM awarded WHERE award_id = $1")
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;

        if dependents > 0 {
            return Err(AppError::BadRequest(
                "Award ini masih memiliki daftar movie yang terkait. \
                 Silakan hapus movie terlebih dahulu sebelum menghapus award ini."
                    .to_string(),
            ));
        }

        let result = sqlx::query("DELETE FROM awards WHERE award_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected())
    }

    pub async fn total(pool: &PgPool) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM awards")
            .fetch_one(pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get total awards: {}", e)))
    }
}

// src/models/platform.rs

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::error::AppError;

/// Represents the 'platforms' table. Minimal CRUD slice; the id is
/// caller-supplied.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Platform {
    pub platform_id: i64,
    pub platform_name: String,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

impl Platform {
    pub async fn get_all(pool: &PgPool) -> Result<Vec<Platform>, AppError> {
        sqlx::query_as::<_, Platform>("SELECT * FROM platforms")
            .fetch_all(pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get all platforms: {}", e)))
    }

    pub async fn get_by_id(pool: &PgPool, id: i64) -> Result<Option<Platform>, AppError> {
        sqlx::query_as::<_, Platform>("SELECT * FROM platforms WHERE platform_id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get platform by id: {}", e)))
    }

    pub async fn create(
        pool: &PgPool,
        platform_id: i64,
        platform_name: &str,
    ) -> Result<Platform, AppError> {
        sqlx::query_as::<_, Platform>(
            "INSERT INTO platforms (platform_id, platform_name, created_at, updated_at) \
             VALUES ($1, $2, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP) RETURNING *",
        )
        .bind(platform_id)
        .bind(platform_name)
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to create platform: {}", e)))
    }

    pub async fn update(
        pool: &PgPool,
        id: i64,
        platform_id: i64,
        platform_name: &str,
    ) -> Result<Option<Platform>, AppError> {
        sqlx::query_as::<_, Platform>(
            "UPDATE platforms SET platform_id = $1, platform_name = $2, \
             updated_at = CURRENT_TIMESTAMP WHERE platform_id = $3 RETURNING *",
        )
        .bind(platform_id)
        .bind(platform_name)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to update platform: {}", e)))
    }

    pub async fn delete(pool: &PgPool, id: i64) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM platforms WHERE platform_id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to delete platform: {}", e)))?;

        Ok(result.rows_affected())
    }
}

// src/models/country.rs

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::error::AppError;

/// Represents the 'countries' table. The id is caller-supplied (a short
/// country code), not generated.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Country {
    pub country_id: String,
    pub country_name: String,
    pub flag_url: Option<String>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

impl Country {
    pub async fn get_all(pool: &PgPool) -> Result<Vec<Country>, AppError> {
        sqlx::query_as::<_, Country>("SELECT * FROM countries ORDER BY updated_at ASC NULLS LAST")
            .fetch_all(pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get all countries: {}", e)))
    }

    pub async fn get_by_id(pool: &PgPool, id: &str) -> Result<Option<Country>, AppError> {
        sqlx::query_as::<_, Country>("SELECT * FROM countries WHERE country_id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get country by id: {}", e)))
    }

    pub async fn get_paginated(
        pool: &PgPool,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Country>, i64), AppError> {
        let rows = sqlx::query_as::<_, Country>(
            "SELECT * FROM countries ORDER BY updated_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to get paginated countries: {}", e)))?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM countries")
            .fetch_one(pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get paginated countries: {}", e)))?;

        Ok((rows, total))
    }

    pub async fn search_by_name(
        pool: &PgPool,
        keyword: &str,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Country>, i64), AppError> {
        let rows = sqlx::query_as::<_, Country>(
            "SELECT * FROM countries WHERE country_name ILIKE '%' || $1 || '%' \
             ORDER BY updated_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(keyword)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            AppError::Internal(format!("Failed to search countries by country name: {}", e))
        })?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM countries WHERE country_name ILIKE '%' || $1 || '%'",
        )
        .bind(keyword)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            AppError::Internal(format!("Failed to search countries by country name: {}", e))
        })?;

        Ok((rows, total))
    }

    pub async fn create(
        pool: &PgPool,
        country_id: &str,
        country_name: &str,
        flag_url: Option<&str>,
    ) -> Result<Country, AppError> {
        sqlx::query_as::<_, Country>(
            "INSERT INTO countries (country_id, country_name, flag_url, created_at, updated_at) \
             VALUES ($1, $2, $3, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP) RETURNING *",
        )
        .bind(country_id)
        .bind(country_name)
        .bind(flag_url)
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to create country: {}", e)))
    }

    pub async fn update(
        pool: &PgPool,
        id: &str,
        country_id: &str,
        country_name: &str,
        flag_url: Option<&str>,
    ) -> Result<Option<Country>, AppError> {
        sqlx::query_as::<_, Country>(
            "UPDATE countries SET country_id = $1, country_name = $2, flag_url = $3, \
             updated_at = CURRENT_TIMESTAMP WHERE country_id = $4 RETURNING *",
        )
        .bind(country_id)
        .bind(country_name)
        .bind(flag_url)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to update country: {}", e)))
    }

    pub async fn update_name(
        pool: &PgPool,
        id: &str,
        country_name: &str,
    ) -> Result<Option<Country>, AppError> {
        sqlx::query_as::<_, Country>(
            "UPDATE countries SET country_name = $1, updated_at = CURRENT_TIMESTAMP \
             WHERE country_id = $2 RETURNING *",
        )
        .bind(country_name)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to update country: {}", e)))
    }

    /// Deletes a country unless movies or awards still reference it.
    /// Both checks and the delete share one transaction.
    pub async fn delete(pool: &PgPool, id: &str) -> Result<u64, AppError> {
        let mut tx = pool.begin().await?;

        let movie_refs =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM movies WHERE country_id = $1")
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;

        if movie_refs > 0 {
            return Err(AppError::BadRequest(
                "Negara ini masih memiliki daftar movie yang terkait. \
                 Silakan hapus movie terlebih dahulu sebelum menghapus negara ini."
                    .to_string(),
            ));
        }

        let award_refs =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM awards WHERE country_id = $1")
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;

        if award_refs > 0 {
            return Err(AppError::BadRequest(
                "Negara ini masih memiliki daftar award yang terkait. \
                 Silakan hapus award terlebih dahulu sebelum menghapus negara ini."
                    .to_string(),
            ));
        }

        let result = sqlx::query("DELETE FROM countries WHERE country_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected())
    }

    pub async fn total(pool: &PgPool) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM countries")
            .fetch_one(pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get total countries: {}", e)))
    }
}

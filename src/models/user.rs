// src/models/user.rs

use chrono::NaiveDateTime;
use rand::Rng;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::error::AppError;
use crate::utils::time;

/// Represents the 'users' table. Credentials and one-time tokens never leave
/// the server, so they are skipped on serialization.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub user_id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: Option<String>,
    pub role: String,
    pub is_verified: bool,
    pub is_suspended: bool,
    #[serde(skip_serializing)]
    pub verification_token: Option<String>,
    #[serde(skip_serializing)]
    pub verification_token_expiration: Option<NaiveDateTime>,
    #[serde(skip_serializing)]
    pub reset_password_token: Option<String>,
    #[serde(skip_serializing)]
    pub reset_token_expiration: Option<NaiveDateTime>,
    pub foto_profil_url: Option<String>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

/// Verification and reset codes are 4 digits, valid for 3 minutes.
const CODE_TTL_MINUTES: i64 = 3;

fn generate_code() -> String {
    rand::thread_rng().gen_range(1000..10000).to_string()
}

impl User {
    pub async fn get_paginated(
        pool: &PgPool,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<User>, i64), AppError> {
        let rows = sqlx::query_as::<_, User>(
            "SELECT * FROM users ORDER BY updated_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to get paginated users: {}", e)))?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get paginated users: {}", e)))?;

        Ok((rows, total))
    }

    pub async fn search_by_username(
        pool: &PgPool,
        keyword: &str,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<User>, i64), AppError> {
        let rows = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE username ILIKE '%' || $1 || '%' \
             ORDER BY updated_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(keyword)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to search users by username: {}", e)))?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM users WHERE username ILIKE '%' || $1 || '%'",
        )
        .bind(keyword)
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to search users by username: {}", e)))?;

        Ok((rows, total))
    }

    pub async fn get_by_id(pool: &PgPool, id: i64) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE user_id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get user by id: {}", e)))
    }

    pub async fn get_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get user by email: {}", e)))
    }

    /// Inserts an unverified account and stamps it with a fresh verification
    /// code. Returns the row and the code so the caller can mail it.
    pub async fn create(
        pool: &PgPool,
        username: &str,
        email: &str,
        password_hash: Option<&str>,
        role: &str,
        is_verified: bool,
    ) -> Result<(User, String), AppError> {
        let code = generate_code();
        let expiration = time::expiry_in_minutes(CODE_TTL_MINUTES);

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users \
             (username, email, password, role, is_verified, verification_token, \
              verification_token_expiration, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP) \
             RETURNING *",
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .bind(is_verified)
        .bind(&code)
        .bind(expiration)
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to create user: {}", e)))?;

        Ok((user, code))
    }

    pub async fn update(
        pool: &PgPool,
        id: i64,
        username: &str,
        email: &str,
    ) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET username = $1, email = $2, updated_at = CURRENT_TIMESTAMP \
             WHERE user_id = $3 RETURNING *",
        )
        .bind(username)
        .bind(email)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to update user: {}", e)))
    }

    pub async fn update_profile(
        pool: &PgPool,
        id: i64,
        username: &str,
        foto_profil_url: Option<&str>,
    ) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET username = $1, \
             foto_profil_url = COALESCE($2, foto_profil_url), \
             updated_at = CURRENT_TIMESTAMP WHERE user_id = $3 RETURNING *",
        )
        .bind(username)
        .bind(foto_profil_url)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to update user profile: {}", e)))
    }

    pub async fn update_role(pool: &PgPool, id: i64, role: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET role = $1, updated_at = CURRENT_TIMESTAMP \
             WHERE user_id = $2 RETURNING *",
        )
        .bind(role)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to update user role: {}", e)))
    }

    pub async fn update_suspend(
        pool: &PgPool,
        id: i64,
        is_suspended: bool,
    ) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET is_suspended = $1, updated_at = CURRENT_TIMESTAMP \
             WHERE user_id = $2 RETURNING *",
        )
        .bind(is_suspended)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to update user suspension: {}", e)))
    }

    /// Marks the account verified and clears the one-time code.
    pub async fn mark_verified(pool: &PgPool, id: i64) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET is_verified = TRUE, verification_token = NULL, \
             verification_token_expiration = NULL, updated_at = CURRENT_TIMESTAMP \
             WHERE user_id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to mark user verified: {}", e)))
    }

    /// Issues a fresh verification code for an existing account.
    pub async fn refresh_verification_token(
        pool: &PgPool,
        id: i64,
    ) -> Result<String, AppError> {
        let code = generate_code();
        let expiration = time::expiry_in_minutes(CODE_TTL_MINUTES);

        sqlx::query(
            "UPDATE users SET verification_token = $1, verification_token_expiration = $2, \
             updated_at = CURRENT_TIMESTAMP WHERE user_id = $3",
        )
        .bind(&code)
        .bind(expiration)
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to refresh verification token: {}", e)))?;

        Ok(code)
    }

    /// Issues a fresh password-reset code for the account behind `email`.
    pub async fn refresh_reset_token(pool: &PgPool, email: &str) -> Result<String, AppError> {
        let code = generate_code();
        let expiration = time::expiry_in_minutes(CODE_TTL_MINUTES);

        sqlx::query(
            "UPDATE users SET reset_password_token = $1, reset_token_expiration = $2, \
             updated_at = CURRENT_TIMESTAMP WHERE email = $3",
        )
        .bind(&code)
        .bind(expiration)
        .bind(email)
        .execute(pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to refresh reset token: {}", e)))?;

        Ok(code)
    }

    /// Checks `token` against the account's current reset code. A match that
    /// has not expired clears the code and returns the user.
    pub async fn verify_reset_token(
        pool: &PgPool,
        email: &str,
        token: &str,
    ) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE email = $1 AND reset_password_token = $2",
        )
        .bind(email)
        .bind(token)
        .fetch_optional(pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to verify reset token: {}", e)))?
        .ok_or_else(|| AppError::BadRequest("Invalid token".to_string()))?;

        if let Some(expiration) = user.reset_token_expiration {
            if time::is_expired(expiration) {
                return Err(AppError::BadRequest("Token expired".to_string()));
            }
        }

        sqlx::query(
            "UPDATE users SET reset_password_token = NULL, reset_token_expiration = NULL \
             WHERE email = $1",
        )
        .bind(email)
        .execute(pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to verify reset token: {}", e)))?;

        Ok(user)
    }

    /// Stores the new password hash and clears the reset code. Returns the
    /// number of rows touched; zero means no such account.
    pub async fn reset_password(
        pool: &PgPool,
        email: &str,
        password_hash: &str,
    ) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE users SET password = $1, reset_password_token = NULL, \
             reset_token_expiration = NULL, updated_at = CURRENT_TIMESTAMP \
             WHERE email = $2",
        )
        .bind(password_hash)
        .bind(email)
        .execute(pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to reset password: {}", e)))?;

        Ok(result.rows_affected())
    }

    pub async fn delete(pool: &PgPool, id: i64) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to delete user: {}", e)))?;

        Ok(result.rows_affected())
    }

    pub async fn total(pool: &PgPool) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get total users: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_codes_are_four_digits() {
        for _ in 0..50 {
            let code = generate_code();
            assert_eq!(code.len(), 4);
            assert!(code.parse::<u32>().is_ok());
        }
    }
}

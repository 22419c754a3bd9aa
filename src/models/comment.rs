// src/models/comment.rs

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::error::AppError;

/// Represents the 'comments' table. One row per (user, movie) pair.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Comment {
    pub comment_id: i64,
    pub comment_rate: f64,
    pub detail_comment: String,
    pub approval_status: String,
    pub user_id: i64,
    pub movie_id: i64,
    pub created_time: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

/// Comment joined with the commenter's username and the movie title, for
/// moderation listings.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct CommentWithContext {
    pub comment_id: i64,
    pub comment_rate: f64,
    pub detail_comment: String,
    pub approval_status: String,
    pub user_id: i64,
    pub movie_id: i64,
    pub created_time: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
    pub username: Option<String>,
    pub title: Option<String>,
}

/// Comment as shown under a movie detail page: the commenter's username and
/// avatar ride along.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct CommentOnMovie {
    pub comment_id: i64,
    pub comment_rate: f64,
    pub detail_comment: String,
    pub approval_status: String,
    pub user_id: i64,
    pub movie_id: i64,
    pub created_time: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
    pub username: Option<String>,
    pub foto_profil_url: Option<String>,
}

const CONTEXT_SELECT: &str = "SELECT c.*, u.username, m.title \
     FROM comments c \
     LEFT JOIN users u ON u.user_id = c.user_id \
     LEFT JOIN movies m ON m.movie_id = c.movie_id";

impl Comment {
    pub async fn get_all(pool: &PgPool) -> Result<Vec<CommentWithContext>, AppError> {
        let sql = format!("{} ORDER BY c.updated_at DESC", CONTEXT_SELECT);
        sqlx::query_as::<_, CommentWithContext>(&sql)
            .fetch_all(pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get all comments: {}", e)))
    }

    pub async fn get_by_id(pool: &PgPool, id: i64) -> Result<Option<Comment>, AppError> {
        sqlx::query_as::<_, Comment>("SELECT * FROM comments WHERE comment_id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get comment by id: {}", e)))
    }

    pub async fn get_paginated(
        pool: &PgPool,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<CommentWithContext>, i64), AppError> {
        let sql = format!(
            "{} ORDER BY c.updated_at DESC LIMIT $1 OFFSET $2",
            CONTEXT_SELECT
        );
        let rows = sqlx::query_as::<_, CommentWithContext>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get paginated comments: {}", e)))?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM comments")
            .fetch_one(pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get paginated comments: {}", e)))?;

        Ok((rows, total))
    }

    pub async fn filter_by_approval_status(
        pool: &PgPool,
        approval_status: &str,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<CommentWithContext>, i64), AppError> {
        let sql = format!(
            "{} WHERE c.approval_status = $1 ORDER BY c.updated_at DESC LIMIT $2 OFFSET $3",
            CONTEXT_SELECT
        );
        let rows = sqlx::query_as::<_, CommentWithContext>(&sql)
            .bind(approval_status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
            .map_err(|e| {
                AppError::Internal(format!("Failed to filter comments by approval status: {}", e))
            })?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM comments WHERE approval_status = $1",
        )
        .bind(approval_status)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            AppError::Internal(format!("Failed to filter comments by approval status: {}", e))
        })?;

        Ok((rows, total))
    }

    /// Approved comments for one movie's detail page, oldest first.
    pub async fn get_by_movie(
        pool: &PgPool,
        movie_id: i64,
    ) -> Result<Vec<CommentOnMovie>, AppError> {
        sqlx::query_as::<_, CommentOnMovie>(
            "SELECT c.*, u.username, u.foto_profil_url \
             FROM comments c \
             LEFT JOIN users u ON u.user_id = c.user_id \
             WHERE c.movie_id = $1 AND c.approval_status = 'APPROVED' \
             ORDER BY c.created_time ASC",
        )
        .bind(movie_id)
        .fetch_all(pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to get comments by movie: {}", e)))
    }

    pub async fn get_approved(pool: &PgPool) -> Result<Vec<CommentWithContext>, AppError> {
        let sql = format!(
            "{} WHERE c.approval_status = 'APPROVED' ORDER BY c.updated_at DESC",
            CONTEXT_SELECT
        );
        sqlx::query_as::<_, CommentWithContext>(&sql)
            .fetch_all(pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get approved comments: {}", e)))
    }

    /// Inserts a new comment, pending moderation. A user gets one comment per
    /// movie; the unique index backstops the pre-check.
    pub async fn create(
        pool: &PgPool,
        user_id: i64,
        movie_id: i64,
        comment_rate: f64,
        detail_comment: &str,
    ) -> Result<Comment, AppError> {
        let existing = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM comments WHERE user_id = $1 AND movie_id = $2",
        )
        .bind(user_id)
        .bind(movie_id)
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to create comment: {}", e)))?;

        if existing > 0 {
            return Err(AppError::BadRequest(
                "User has already commented on this movie. Please edit your existing comment."
                    .to_string(),
            ));
        }

        sqlx::query_as::<_, Comment>(
            "INSERT INTO comments \
             (user_id, movie_id, comment_rate, detail_comment, approval_status, created_time, updated_at) \
             VALUES ($1, $2, $3, $4, 'UNAPPROVED', CURRENT_TIMESTAMP, CURRENT_TIMESTAMP) \
             RETURNING *",
        )
        .bind(user_id)
        .bind(movie_id)
        .bind(comment_rate)
        .bind(detail_comment)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            let msg = e.to_string();
            if msg.contains("23505") || msg.contains("duplicate key") {
                AppError::BadRequest(
                    "User has already commented on this movie. Please edit your existing comment."
                        .to_string(),
                )
            } else {
                AppError::Internal(format!("Failed to create comment: {}", e))
            }
        })
    }

    /// Admin edit: rewrites rate and text and marks the comment approved.
    pub async fn update(
        pool: &PgPool,
        id: i64,
        comment_rate: f64,
        detail_comment: &str,
    ) -> Result<Option<Comment>, AppError> {
        sqlx::query_as::<_, Comment>(
            "UPDATE comments SET comment_rate = $1, detail_comment = $2, \
             approval_status = 'APPROVED', updated_at = CURRENT_TIMESTAMP \
             WHERE comment_id = $3 RETURNING *",
        )
        .bind(comment_rate)
        .bind(detail_comment)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to update comment: {}", e)))
    }

    /// Self-service edit keyed by (user, movie). Edits drop the comment back
    /// to pending moderation.
    pub async fn update_by_user_and_movie(
        pool: &PgPool,
        user_id: i64,
        movie_id: i64,
        comment_rate: f64,
        detail_comment: &str,
    ) -> Result<Option<Comment>, AppError> {
        sqlx::query_as::<_, Comment>(
            "UPDATE comments SET comment_rate = $1, detail_comment = $2, \
             approval_status = 'UNAPPROVED', updated_at = CURRENT_TIMESTAMP \
             WHERE user_id = $3 AND movie_id = $4 RETURNING *",
        )
        .bind(comment_rate)
        .bind(detail_comment)
        .bind(user_id)
        .bind(movie_id)
        .fetch_optional(pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to update comment: {}", e)))
    }

    pub async fn update_approval_status(
        pool: &PgPool,
        id: i64,
        approval_status: &str,
    ) -> Result<Option<Comment>, AppError> {
        sqlx::query_as::<_, Comment>(
            "UPDATE comments SET approval_status = $1, updated_at = CURRENT_TIMESTAMP \
             WHERE comment_id = $2 RETURNING *",
        )
        .bind(approval_status)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            AppError::Internal(format!("Failed to update comment approval status: {}", e))
        })
    }

    pub async fn delete(pool: &PgPool, id: i64) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM comments WHERE comment_id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to delete comment: {}", e)))?;

        Ok(result.rows_affected())
    }

    pub async fn total(pool: &PgPool) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM comments")
            .fetch_one(pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get total comments: {}", e)))
    }
}

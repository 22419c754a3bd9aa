// src/handlers/comment.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;

use crate::error::AppError;
use crate::models::ListQuery;
use crate::models::comment::Comment;

pub async fn get_all(State(pool): State<PgPool>) -> Result<impl IntoResponse, AppError> {
    Ok(Json(Comment::get_all(&pool).await?))
}

pub async fn get_paginated(
    State(pool): State<PgPool>,
    Query(q): Query<ListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (rows, total) = Comment::get_paginated(&pool, q.offset(), q.limit()).await?;
    Ok(Json(json!({ "data": rows, "totalEntries": total })))
}

pub async fn get_by_id(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let comment = Comment::get_by_id(&pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))?;
    Ok(Json(comment))
}

pub async fn get_by_movie(
    State(pool): State<PgPool>,
    Path(movie_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(Comment::get_by_movie(&pool, movie_id).await?))
}

pub async fn get_approved(State(pool): State<PgPool>) -> Result<impl IntoResponse, AppError> {
    Ok(Json(Comment::get_approved(&pool).await?))
}

#[derive(Debug, Deserialize)]
pub struct ApprovalQuery {
    pub approval_status: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

pub async fn filter_by_approval_status(
    State(pool): State<PgPool>,
    Query(q): Query<ApprovalQuery>,
) -> Result<impl IntoResponse, AppError> {
    let list = ListQuery {
        page: q.page,
        limit: q.limit,
    };
    let status = q.approval_status.unwrap_or_default();

    let (rows, total) =
        Comment::filter_by_approval_status(&pool, &status, list.offset(), list.limit()).await?;
    Ok(Json(json!({ "data": rows, "totalEntries": total })))
}

#[derive(Debug, Deserialize)]
pub struct CommentBody {
    pub user_id: i64,
    pub movie_id: i64,
    #[serde(default)]
    pub comment_rate: f64,
    #[serde(default)]
    pub detail_comment: String,
}

pub async fn create(
    State(pool): State<PgPool>,
    Json(body): Json<CommentBody>,
) -> Result<impl IntoResponse, AppError> {
    let comment = Comment::create(
        &pool,
        body.user_id,
        body.movie_id,
        body.comment_rate,
        &body.detail_comment,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

#[derive(Debug, Deserialize)]
pub struct CommentEditBody {
    #[serde(default)]
    pub comment_rate: f64,
    #[serde(default)]
    pub detail_comment: String,
}

pub async fn update(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
    Json(body): Json<CommentEditBody>,
) -> Result<impl IntoResponse, AppError> {
    let comment = Comment::update(&pool, id, body.comment_rate, &body.detail_comment)
        .await?
        .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))?;
    Ok(Json(comment))
}

pub async fn update_by_user_and_movie(
    State(pool): State<PgPool>,
    Path((user_id, movie_id)): Path<(i64, i64)>,
    Json(body): Json<CommentEditBody>,
) -> Result<impl IntoResponse, AppError> {
    let comment = Comment::update_by_user_and_movie(
        &pool,
        user_id,
        movie_id,
        body.comment_rate,
        &body.detail_comment,
    )
    .await?
    .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))?;
    Ok(Json(comment))
}

#[derive(Debug, Deserialize)]
pub struct ApprovalBody {
    pub approval_status: String,
}

pub async fn update_approval_status(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
    Json(body): Json<ApprovalBody>,
) -> Result<impl IntoResponse, AppError> {
    let comment = Comment::update_approval_status(&pool, id, &body.approval_status)
        .await?
        .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))?;
    Ok(Json(comment))
}

pub async fn delete(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    if Comment::delete(&pool, id).await? == 0 {
        return Err(AppError::NotFound("Comment not found".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_total(State(pool): State<PgPool>) -> Result<impl IntoResponse, AppError> {
    let total = Comment::total(&pool).await?;
    Ok(Json(json!({ "total": total })))
}

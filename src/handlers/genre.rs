// src/handlers/genre.rs

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
use crate::models::genre::Genre;

pub async fn get_all(
    State(pool): State<PgPool>,
    Query(q): Query<ListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (rows, total) = Genre::get_paginated(&pool, q.offset(), q.limit()).await?;
    Ok(Json(json!({ "data": rows, "totalEntries": total })))
}

pub async fn get_by_id(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let genre = Genre::get_by_id(&pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Genre not found".to_string()))?;
    Ok(Json(genre))
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub keyword: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

pub async fn search(
    State(pool): State<PgPool>,
    Query(q): Query<SearchQuery>,
) -> Result<impl IntoResponse, AppError> {
    let list = ListQuery {
        page: q.page,
        limit: q.limit,
    };
    let keyword = q.keyword.unwrap_or_default();

    let (rows, total) = Genre::search_by_name(&pool, &keyword, list.offset(), list.limit()).await?;
    if rows.is_empty() {
        return Err(AppError::NotFound("No results found".to_string()));
    }

    Ok(Json(json!({ "data": rows, "totalEntries": total })))
}

#[derive(Debug, Deserialize)]
pub struct GenreBody {
    pub genre_name: String,
}

pub async fn create(
    State(pool): State<PgPool>,
    Json(body): Json<GenreBody>,
) -> Result<impl IntoResponse, AppError> {
    let genre = Genre::create(&pool, &body.genre_name).await?;
    Ok((StatusCode::CREATED, Json(genre)))
}

pub async fn update_name(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
    Json(body): Json<GenreBody>,
) -> Result<impl IntoResponse, AppError> {
    let genre = Genre::update_name(&pool, id, &body.genre_name)
        .await?
        .ok_or_else(|| AppError::NotFound("Genre not found".to_string()))?;
    Ok(Json(genre))
}

pub async fn delete(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    if Genre::delete(&pool, id).await? == 0 {
        return Err(AppError::NotFound("Genre not found".to_string()));
    }
    Ok(Json(json!({ "message": "Genre deleted successfully!" })))
}

pub async fn get_total(State(pool): State<PgPool>) -> Result<impl IntoResponse, AppError> {
    let total = Genre::total(&pool).await?;
    Ok(Json(json!({ "total": total })))
}

// src/handlers/actor.rs

use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;

use crate::error::AppError;
use crate::handlers::read_form;
use crate::models::ListQuery;
use crate::models::actor::{Actor, ActorInput};
use crate::utils::upload::ImageHost;

pub async fn get_all(State(pool): State<PgPool>) -> Result<impl IntoResponse, AppError> {
    Ok(Json(Actor::get_all(&pool).await?))
}

pub async fn get_paginated(
    State(pool): State<PgPool>,
    Query(q): Query<ListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (rows, total) = Actor::get_paginated(&pool, q.offset(), q.limit()).await?;
    Ok(Json(json!({ "data": rows, "totalEntries": total })))
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

    let (rows, total) = Actor::search_by_name(&pool, &keyword, list.offset(), list.limit()).await?;
    if rows.is_empty() {
        return Err(AppError::NotFound(
            "Tidak ada hasil yang ditemukan".to_string(),
        ));
    }

    Ok(Json(json!({ "data": rows, "totalEntries": total })))
}

pub async fn get_by_id(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let actor = Actor::get_by_id(&pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Aktor tidak ditemukan".to_string()))?;
    Ok(Json(actor))
}

pub async fn get_by_movie(
    State(pool): State<PgPool>,
    Path(movie_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(Actor::get_by_movie(&pool, movie_id).await?))
}

fn parse_birth_date(raw: Option<&str>) -> Option<NaiveDate> {
    raw.and_then(|v| v.parse().ok())
}

pub async fn create(
    State(pool): State<PgPool>,
    State(images): State<ImageHost>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut form = read_form(multipart).await?;

    // The photo is mandatory on create.
    let file = form
        .file
        .take()
        .ok_or_else(|| AppError::BadRequest("File foto tidak dapat diunggah".to_string()))?;
    let foto_url = images.upload(file, "actors").await?;

    let input = ActorInput {
        actor_name: form.get_non_empty("actor_name").unwrap_or_default().to_string(),
        birth_date: parse_birth_date(form.get_non_empty("birth_date")),
        foto_url: Some(foto_url),
    };

    let actor = Actor::create(&pool, &input).await?;
    Ok((StatusCode::CREATED, Json(actor)))
}

pub async fn update(
    State(pool): State<PgPool>,
    State(images): State<ImageHost>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut form = read_form(multipart).await?;

    let file = form
        .file
        .take()
        .ok_or_else(|| AppError::BadRequest("File foto tidak dapat diunggah".to_string()))?;
    let foto_url = images.upload(file, "actors").await?;

    let input = ActorInput {
        actor_name: form.get_non_empty("actor_name").unwrap_or_default().to_string(),
        birth_date: parse_birth_date(form.get_non_empty("birth_date")),
        foto_url: Some(foto_url),
    };

    let actor = Actor::update(&pool, id, &input)
        .await?
        .ok_or_else(|| AppError::NotFound("Aktor tidak ditemukan".to_string()))?;
    Ok(Json(actor))
}

#[derive(Debug, Deserialize)]
pub struct UpdateNameBody {
    pub actor_name: String,
}

pub async fn update_name(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateNameBody>,
) -> Result<impl IntoResponse, AppError> {
    let actor = Actor::update_name(&pool, id, &body.actor_name)
        .await?
        .ok_or_else(|| AppError::NotFound("Aktor tidak ditemukan".to_string()))?;
    Ok(Json(actor))
}

pub async fn delete(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    if Actor::delete(&pool, id).await? == 0 {
        return Err(AppError::NotFound("Aktor tidak ditemukan".to_string()));
    }
    Ok(Json(json!({ "message": "Aktor berhasil dihapus" })))
}

pub async fn get_total(State(pool): State<PgPool>) -> Result<impl IntoResponse, AppError> {
    let total = Actor::total(&pool).await?;
    Ok(Json(json!({ "total": total })))
}

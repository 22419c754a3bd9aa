// src/handlers/award.rs

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
use crate::models::award::Award;

pub async fn get_all(State(pool): State<PgPool>) -> Result<impl IntoResponse, AppError> {
    Ok(Json(Award::get_all(&pool).await?))
}

/// Awards default to a smaller page size than the rest of the CMS tables.
#[derive(Debug, Deserialize)]
pub struct AwardListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

pub async fn get_paginated(
    State(pool): State<PgPool>,
    Query(q): Query<AwardListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let list = ListQuery {
        page: q.page,
        limit: Some(q.limit.unwrap_or(5)),
    };
    let (rows, total) = Award::get_paginated(&pool, list.offset(), list.limit()).await?;
    Ok(Json(json!({ "data": rows, "totalEntries": total })))
}

pub async fn get_by_id(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let award = Award::get_by_id(&pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Award not found".to_string()))?;
    Ok(Json(award))
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

    let (rows, total) = Award::search_by_name(&pool, &keyword, list.offset(), list.limit()).await?;
    if rows.is_empty() {
        return Err(AppError::NotFound("No results found".to_string()));
    }

    Ok(Json(json!({ "data": rows, "totalEntries": total })))
}

#[derive(Debug, Deserialize)]
pub struct AwardBody {
    pub award_name: String,
    pub year: Option<i32>,
    pub country_id: Option<String>,
}

pub async fn create(
    State(pool): State<PgPool>,
    Json(body): Json<AwardBody>,
) -> Result<impl IntoResponse, AppError> {
    let award = Award::create(&pool, &body.award_name, body.year, body.country_id.as_deref()).await?;
    Ok((StatusCode::CREATED, Json(award)))
}

pub async fn update(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
    Json(body): Json<AwardBody>,
) -> Result<impl IntoResponse, AppError> {
    let award = Award::update(
        &pool,
        id,
        &body.award_name,
        body.year,
        body.country_id.as_deref(),
    )
    .await?
    .ok_or_else(|| AppError::NotFound("Award not found".to_string()))?;
    Ok(Json(award))
}

#[derive(Debug, Deserialize)]
pub struct UpdateNameBody {
    pub award_name: String,
}

pub async fn update_name(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateNameBody>,
) -> Result<impl IntoResponse, AppError> {
    let award = Award::update_name(&pool, id, &body.award_name)
        .await?
        .ok_or_else(|| AppError::NotFound("Award not found".to_string()))?;
    Ok(Json(award))
}

pub async fn delete(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    if Award::delete(&pool, id).await? == 0 {
        return Err(AppError::NotFound("Award not found".to_string()));
    }
    Ok(Json(json!({ "message": "Award deleted successfully!" })))
}

pub async fn get_total(State(pool): State<PgPool>) -> Result<impl IntoResponse, AppError> {
    let total = Award::total(&pool).await?;
    Ok(Json(json!({ "total": total })))
}

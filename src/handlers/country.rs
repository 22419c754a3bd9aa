// src/handlers/country.rs

use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;

use crate::error::AppError;
use crate::handlers::read_form;
use crate::models::ListQuery;
use crate::models::country::Country;
use crate::utils::upload::ImageHost;

pub async fn get_all(
    State(pool): State<PgPool>,
    Query(q): Query<ListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (rows, total) = Country::get_paginated(&pool, q.offset(), q.limit()).await?;
    Ok(Json(json!({ "data": rows, "totalEntries": total })))
}

pub async fn get_by_id(
    State(pool): State<PgPool>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let country = Country::get_by_id(&pool, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("Country not found".to_string()))?;
    Ok(Json(country))
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

    let (rows, total) =
        Country::search_by_name(&pool, &keyword, list.offset(), list.limit()).await?;
    if rows.is_empty() {
        return Err(AppError::NotFound("No results found".to_string()));
    }

    Ok(Json(json!({ "data": rows, "totalEntries": total })))
}

pub async fn create(
    State(pool): State<PgPool>,
    State(images): State<ImageHost>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut form = read_form(multipart).await?;

    let flag_url = match form.file.take() {
        Some(file) => Some(images.upload(file, "flags").await?),
        None => None,
    };

    let country_id = form
        .get_non_empty("country_id")
        .ok_or_else(|| AppError::BadRequest("country_id is required".to_string()))?;
    let country_name = form
        .get_non_empty("country_name")
        .ok_or_else(|| AppError::BadRequest("country_name is required".to_string()))?;

    let country = Country::create(&pool, country_id, country_name, flag_url.as_deref()).await?;
    Ok((StatusCode::CREATED, Json(country)))
}

pub async fn update(
    State(pool): State<PgPool>,
    State(images): State<ImageHost>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut form = read_form(multipart).await?;

    let flag_url = match form.file.take() {
        Some(file) => Some(images.upload(file, "flags").await?),
        None => form.get_non_empty("flag_url").map(str::to_string),
    };

    let country_id = form.get_non_empty("country_id").unwrap_or(&id);
    let country_name = form
        .get_non_empty("country_name")
        .ok_or_else(|| AppError::BadRequest("country_name is required".to_string()))?;

    let country = Country::update(&pool, &id, country_id, country_name, flag_url.as_deref())
        .await?
        .ok_or_else(|| AppError::NotFound("Country not found".to_string()))?;
    Ok(Json(country))
}

#[derive(Debug, Deserialize)]
pub struct UpdateNameBody {
    pub country_name: String,
}

pub async fn update_name(
    State(pool): State<PgPool>,
    Path(id): Path<String>,
    Json(body): Json<UpdateNameBody>,
) -> Result<impl IntoResponse, AppError> {
    let country = Country::update_name(&pool, &id, &body.country_name)
        .await?
        .ok_or_else(|| AppError::NotFound("Country not found".to_string()))?;
    Ok(Json(country))
}

pub async fn delete(
    State(pool): State<PgPool>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if Country::delete(&pool, &id).await? == 0 {
        return Err(AppError::NotFound("Country not found".to_string()));
    }
    Ok(Json(json!({ "message": "Country deleted successfully!" })))
}

pub async fn get_total(State(pool): State<PgPool>) -> Result<impl IntoResponse, AppError> {
    let total = Country::total(&pool).await?;
    Ok(Json(json!({ "total": total })))
}

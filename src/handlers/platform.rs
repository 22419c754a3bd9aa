// src/handlers/platform.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use sqlx::PgPool;

use crate::error::AppError;
use crate::models::platform::Platform;

pub async fn get_all(State(pool): State<PgPool>) -> Result<impl IntoResponse, AppError> {
    Ok(Json(Platform::get_all(&pool).await?))
}

pub async fn get_by_id(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let platform = Platform::get_by_id(&pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Platform not found".to_string()))?;
    Ok(Json(platform))
}

#[derive(Debug, Deserialize)]
pub struct PlatformBody {
    pub platform_id: i64,
    pub platform_name: String,
}

pub async fn create(
    State(pool): State<PgPool>,
    Json(body): Json<PlatformBody>,
) -> Result<impl IntoResponse, AppError> {
    let platform = Platform::create(&pool, body.platform_id, &body.platform_name).await?;
    Ok((StatusCode::CREATED, Json(platform)))
}

pub async fn update(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
    Json(body): Json<PlatformBody>,
) -> Result<impl IntoResponse, AppError> {
    let platform = Platform::update(&pool, id, body.platform_id, &body.platform_name)
        .await?
        .ok_or_else(|| AppError::NotFound("Platform not found".to_string()))?;
    Ok(Json(platform))
}

pub async fn delete(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    if Platform::delete(&pool, id).await? == 0 {
        return Err(AppError::NotFound("Platform not found".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}

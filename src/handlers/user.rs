// src/handlers/user.rs
//
// Admin-facing user management plus the self-service profile update. The
// authentication endpoints live in handlers::auth.

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
use crate::models::user::User;
use crate::utils::hash;
use crate::utils::upload::ImageHost;

pub async fn get_all(
    State(pool): State<PgPool>,
    Query(q): Query<ListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (users, total) = User::get_paginated(&pool, q.offset(), q.limit()).await?;
    Ok(Json(json!({ "users": users, "totalEntries": total })))
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub username: Option<String>,
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
    let username = q.username.unwrap_or_default();

    let (users, total) =
        User::search_by_username(&pool, &username, list.offset(), list.limit()).await?;
    if users.is_empty() {
        return Err(AppError::NotFound("No results found".to_string()));
    }

    Ok(Json(json!({ "users": users, "totalEntries": total })))
}

pub async fn get_by_id(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let user = User::get_by_id(&pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
    Ok(Json(user))
}

pub async fn get_by_email(
    State(pool): State<PgPool>,
    Path(email): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = User::get_by_email(&pool, &email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
    Ok(Json(user))
}

#[derive(Debug, Deserialize)]
pub struct CreateUserBody {
    pub username: String,
    pub email: String,
    pub password: String,
}

pub async fn create(
    State(pool): State<PgPool>,
    Json(body): Json<CreateUserBody>,
) -> Result<impl IntoResponse, AppError> {
    let password_hash = hash::hash_password(&body.password)?;
    let (user, _code) = User::create(
        &pool,
        &body.username,
        &body.email,
        Some(&password_hash),
        "USER",
        false,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserBody {
    pub username: String,
    pub email: String,
}

pub async fn update(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateUserBody>,
) -> Result<impl IntoResponse, AppError> {
    let user = User::update(&pool, id, &body.username, &body.email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
    Ok(Json(user))
}

pub async fn update_profile(
    State(pool): State<PgPool>,
    State(images): State<ImageHost>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut form = read_form(multipart).await?;

    let foto_profil_url = match form.file.take() {
        Some(file) => Some(images.upload(file, "profiles").await?),
        None => None,
    };

    let username = form
        .get_non_empty("username")
        .ok_or_else(|| AppError::BadRequest("username is required".to_string()))?;

    let user = User::update_profile(&pool, id, username, foto_profil_url.as_deref())
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
    Ok(Json(user))
}

#[derive(Debug, Deserialize)]
pub struct RoleBody {
    pub role: String,
}

pub async fn update_role(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
    Json(body): Json<RoleBody>,
) -> Result<impl IntoResponse, AppError> {
    let user = User::update_role(&pool, id, &body.role)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
    Ok(Json(user))
}

#[derive(Debug, Deserialize)]
pub struct SuspendBody {
    pub is_suspended: bool,
}

pub async fn update_suspend(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
    Json(body): Json<SuspendBody>,
) -> Result<impl IntoResponse, AppError> {
    let user = User::update_suspend(&pool, id, body.is_suspended)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
    Ok(Json(user))
}

pub async fn delete(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    if User::delete(&pool, id).await? == 0 {
        return Err(AppError::NotFound("User not found".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_total(State(pool): State<PgPool>) -> Result<impl IntoResponse, AppError> {
    let total = User::total(&pool).await?;
    Ok(Json(json!({ "total": total })))
}

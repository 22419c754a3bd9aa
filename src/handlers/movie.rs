// src/handlers/movie.rs
//
// Catalogue, CMS and relation endpoints for movies. Listing responses all
// share one shape: { movies, totalPages, currentPage, totalCount }. Form
// validation answers with the raw message text, matching the contract the
// frontend already depends on.

use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::PgPool;

use crate::error::AppError;
use crate::handlers::read_form;
use crate::models::movie::{Movie, MovieFilters, MovieInput};
use crate::models::{ListQuery, total_pages};
use crate::utils::upload::ImageHost;

fn listing<T: Serialize>(
    movies: Vec<T>,
    total_count: i64,
    page: i64,
    limit: i64,
) -> Json<serde_json::Value> {
    Json(json!({
        "movies": movies,
        "totalPages": total_pages(total_count, limit),
        "currentPage": page,
        "totalCount": total_count,
    }))
}

const VALID_RELEASE_STATUSES: [&str; 3] = ["COMPLETED", "UPCOMING", "ONGOING"];
const VALID_APPROVAL_STATUSES: [&str; 2] = ["APPROVED", "UNAPPROVED"];

/// Validates the movie form and assembles a [`MovieInput`]. Failure messages
/// are the exact strings the frontend surfaces to the user.
fn validate_movie_form(form: &super::FormData) -> Result<MovieInput, AppError> {
    let title = form
        .get_non_empty("title")
        .ok_or_else(|| AppError::Validation("Judul film (title) wajib diisi.".to_string()))?;

    let year_raw = form
        .get_non_empty("year")
        .ok_or_else(|| AppError::Validation("Tahun (year) wajib diisi.".to_string()))?;
    let year: i32 = year_raw
        .parse()
        .map_err(|_| AppError::Validation("Tahun (year) harus berupa angka.".to_string()))?;

    let release_status = form.get_non_empty("release_status").unwrap_or_default();
    if !release_status.is_empty() && !VALID_RELEASE_STATUSES.contains(&release_status) {
        return Err(AppError::Validation(
            "release_status harus salah satu dari: \"COMPLETED\", \"UPCOMING\", atau \"ONGOING\"."
                .to_string(),
        ));
    }

    if let Some(approval) = form.get_non_empty("approval_status") {
        if !VALID_APPROVAL_STATUSES.contains(&approval) {
            return Err(AppError::Validation(
                "approval_status harus salah satu dari: \"APPROVED\" atau \"UNAPPROVED\"."
                    .to_string(),
            ));
        }
    }

    if let Some(trailer) = form.get_non_empty("link_trailer") {
        if !trailer.starts_with("https://") {
            return Err(AppError::Validation(
                "link_trailer harus berupa URL yang valid.".to_string(),
            ));
        }
    }

    if let Some(country_id) = form.get_non_empty("country_id") {
        if country_id.chars().count() != 2 {
            return Err(AppError::Validation(
                "country_id harus berupa string dengan panjang 2 karakter.".to_string(),
            ));
        }
    }

    let movie_rate: f64 = match form.get_non_empty("movie_rate") {
        Some(raw) => raw.parse().map_err(|_| {
            AppError::Validation("Tipe data tidak valid: movie_rate harus berupa angka.".to_string())
        })?,
        None => 0.0,
    };

    let views: i64 = match form.get_non_empty("views") {
        Some(raw) => raw.parse().map_err(|_| {
            AppError::Validation("Tipe data tidak valid: views harus berupa angka.".to_string())
        })?,
        None => 0,
    };

    Ok(MovieInput {
        title: title.to_string(),
        alternative_title: form.get_non_empty("alternative_title").map(str::to_string),
        year,
        synopsis: form.get_non_empty("synopsis").map(str::to_string),
        movie_rate,
        views,
        poster_url: form.get_non_empty("poster_url").map(str::to_string),
        release_status: release_status.to_string(),
        link_trailer: form.get_non_empty("link_trailer").map(str::to_string),
        country_id: form.get_non_empty("country_id").map(str::to_string),
    })
}

// ---------------------------------------------------------------------------
// Listings

pub async fn get_all(
    State(pool): State<PgPool>,
    Query(q): Query<ListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (movies, total) = Movie::get_all(&pool, q.offset(), q.limit()).await?;
    Ok(listing(movies, total, q.page(), q.limit()))
}

pub async fn get_all_cms(
    State(pool): State<PgPool>,
    Query(q): Query<ListQuery>,
) -> Result<impl IntoResponse, AppError> {
    if !q.is_valid() {
        return Err(AppError::Validation(
            "Parameter page atau limit tidak valid".to_string(),
        ));
    }

    let (movies, total) = Movie::get_all_cms(&pool, q.offset(), q.limit()).await?;
    Ok(listing(movies, total, q.page(), q.limit()))
}

#[derive(Debug, Deserialize)]
pub struct CmsUserQuery {
    pub user_id: Option<i64>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl CmsUserQuery {
    fn list(&self) -> ListQuery {
        ListQuery {
            page: self.page,
            limit: self.limit,
        }
    }
}

pub async fn get_all_cms_user(
    State(pool): State<PgPool>,
    Query(q): Query<CmsUserQuery>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = q
        .user_id
        .ok_or_else(|| AppError::Validation("User ID diperlukan".to_string()))?;
    let list = q.list();

    let (movies, total) = Movie::get_all_cms_user(&pool, user_id, list.offset(), list.limit()).await?;
    Ok(listing(movies, total, list.page(), list.limit()))
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

    let rows = Movie::search(&pool, &keyword, list.offset(), list.limit()).await?;
    let total = rows.first().map(|r| r.total_count).unwrap_or(0);
    Ok(listing(rows, total, list.page(), list.limit()))
}

#[derive(Debug, Deserialize)]
pub struct TitleQuery {
    pub title: Option<String>,
    pub user_id: Option<i64>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

pub async fn search_by_title(
    State(pool): State<PgPool>,
    Query(q): Query<TitleQuery>,
) -> Result<impl IntoResponse, AppError> {
    let list = ListQuery {
        page: q.page,
        limit: q.limit,
    };
    let title = q.title.unwrap_or_default();

    let rows = Movie::search_by_title(&pool, &title, list.offset(), list.limit()).await?;
    let total = rows.first().map(|r| r.total_count).unwrap_or(0);
    Ok(listing(rows, total, list.page(), list.limit()))
}

pub async fn search_by_title_user(
    State(pool): State<PgPool>,
    Query(q): Query<TitleQuery>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = q
        .user_id
        .ok_or_else(|| AppError::Validation("User ID is required".to_string()))?;
    let list = ListQuery {
        page: q.page,
        limit: q.limit,
    };
    let title = q.title.unwrap_or_default();

    let rows =
        Movie::search_by_title_user(&pool, &title, user_id, list.offset(), list.limit()).await?;
    let total = rows.first().map(|r| r.total_count).unwrap_or(0);
    Ok(listing(rows, total, list.page(), list.limit()))
}

#[derive(Debug, Deserialize)]
pub struct FilterSortQuery {
    pub year: Option<i32>,
    pub genre_name: Option<String>,
    pub release_status: Option<String>,
    pub platform_name: Option<String>,
    pub award: Option<String>,
    pub country_name: Option<String>,
    pub sort_by: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

pub async fn filter_sort(
    State(pool): State<PgPool>,
    Query(q): Query<FilterSortQuery>,
) -> Result<impl IntoResponse, AppError> {
    let list = ListQuery {
        page: q.page,
        limit: q.limit,
    };
    let filters = MovieFilters {
        year: q.year,
        genre_name: q.genre_name,
        release_status: q.release_status,
        platform_name: q.platform_name,
        award: q.award,
        country_name: q.country_name,
    };

    let rows = Movie::filter_sorted(
        &pool,
        &filters,
        q.sort_by.as_deref(),
        list.offset(),
        list.limit(),
    )
    .await?;
    let total = rows.first().map(|r| r.total_count).unwrap_or(0);
    Ok(listing(rows, total, list.page(), list.limit()))
}

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub approval_status: Option<String>,
    pub user_id: Option<i64>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

pub async fn filter_by_status(
    State(pool): State<PgPool>,
    Query(q): Query<StatusQuery>,
) -> Result<impl IntoResponse, AppError> {
    let list = ListQuery {
        page: q.page,
        limit: q.limit,
    };
    let status = q.approval_status.unwrap_or_default();

    let rows = Movie::filter_by_status(&pool, &status, list.offset(), list.limit()).await?;
    let total = rows.first().map(|r| r.total_count).unwrap_or(0);
    Ok(listing(rows, total, list.page(), list.limit()))
}

pub async fn filter_by_status_user(
    State(pool): State<PgPool>,
    Query(q): Query<StatusQuery>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = q
        .user_id
        .ok_or_else(|| AppError::Validation("User ID is required".to_string()))?;
    let list = ListQuery {
        page: q.page,
        limit: q.limit,
    };
    let status = q.approval_status.unwrap_or_default();

    let rows =
        Movie::filter_by_status_user(&pool, &status, user_id, list.offset(), list.limit()).await?;
    let total = rows.first().map(|r| r.total_count).unwrap_or(0);
    Ok(listing(rows, total, list.page(), list.limit()))
}

// ---------------------------------------------------------------------------
// Detail reads

pub async fn get_by_id(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let movie = Movie::get_by_id(&pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Movie tidak ditemukan".to_string()))?;
    Ok(Json(movie))
}

pub async fn get_by_same_genre(
    State(pool): State<PgPool>,
    Path(movie_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let movies = Movie::get_by_same_genre(&pool, movie_id, 10).await?;
    Ok(Json(movies))
}

pub async fn get_totals(State(pool): State<PgPool>) -> Result<impl IntoResponse, AppError> {
    let totals = Movie::get_totals(&pool).await?;
    Ok(Json(totals))
}

pub async fn get_platforms(
    State(pool): State<PgPool>,
    Path(movie_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(Movie::get_platforms(&pool, movie_id).await?))
}

pub async fn get_genres(
    State(pool): State<PgPool>,
    Path(movie_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(Movie::get_genres(&pool, movie_id).await?))
}

pub async fn get_awards(
    State(pool): State<PgPool>,
    Path(movie_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(Movie::get_awards(&pool, movie_id).await?))
}

// ---------------------------------------------------------------------------
// Mutations

pub async fn create(
    State(pool): State<PgPool>,
    State(images): State<ImageHost>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let form = read_form(multipart).await?;
    let mut input = validate_movie_form(&form)?;

    let user_id: i64 = form
        .get_non_empty("user_id")
        .and_then(|v| v.parse().ok())
        .ok_or_else(|| AppError::Validation("user_id harus berupa angka.".to_string()))?;

    if let Some(file) = form.file {
        input.poster_url = Some(images.upload(file, "posters").await?);
    }

    let movie = Movie::create(&pool, &input, user_id).await?;
    Ok((StatusCode::CREATED, Json(movie)))
}

pub async fn update(
    State(pool): State<PgPool>,
    State(images): State<ImageHost>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let form = read_form(multipart).await?;
    let mut input = validate_movie_form(&form)?;

    if let Some(file) = form.file {
        input.poster_url = Some(images.upload(file, "posters").await?);
    }

    let movie = Movie::update(&pool, id, &input)
        .await?
        .ok_or_else(|| AppError::NotFound("Movie tidak ditemukan".to_string()))?;
    Ok(Json(movie))
}

pub async fn update_approval_status(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let movie = Movie::update_approval_status(&pool, id, "APPROVED")
        .await?
        .ok_or_else(|| AppError::NotFound("Movie tidak ditemukan".to_string()))?;
    Ok(Json(movie))
}

pub async fn delete(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    Movie::delete(&pool, id).await?;
    Ok(Json(json!({ "message": "Film berhasil dihapus" })))
}

// ---------------------------------------------------------------------------
// Relation attachment

/// Outcome of one junction insert; re-attaching an existing pair is reported,
/// not treated as an error.
#[derive(Debug, Serialize)]
pub struct AttachResult {
    pub success: bool,
    pub message: String,
}

impl From<bool> for AttachResult {
    fn from(inserted: bool) -> Self {
        if inserted {
            AttachResult {
                success: true,
                message: "Data inserted successfully".to_string(),
            }
        } else {
            AttachResult {
                success: false,
                message: "Data already exists".to_string(),
            }
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AttachPlatformsBody {
    pub movie_id: Option<i64>,
    pub platform_ids: Option<Vec<i64>>,
}

pub async fn attach_platforms(
    State(pool): State<PgPool>,
    Json(body): Json<AttachPlatformsBody>,
) -> Result<impl IntoResponse, AppError> {
    let (movie_id, ids) = match (body.movie_id, body.platform_ids) {
        (Some(movie_id), Some(ids)) if !ids.is_empty() => (movie_id, ids),
        _ => {
            return Err(AppError::Validation(
                "Input tidak valid: movie_id dan platform_ids diperlukan.".to_string(),
            ));
        }
    };

    let results = try_join_all(ids.iter().map(|&id| Movie::add_platform(&pool, movie_id, id)))
        .await?
        .into_iter()
        .map(AttachResult::from)
        .collect::<Vec<_>>();
    Ok((StatusCode::CREATED, Json(results)))
}

#[derive(Debug, Deserialize)]
pub struct AttachGenresBody {
    pub movie_id: Option<i64>,
    pub genre_ids: Option<Vec<i64>>,
}

pub async fn attach_genres(
    State(pool): State<PgPool>,
    Json(body): Json<AttachGenresBody>,
) -> Result<impl IntoResponse, AppError> {
    let (movie_id, ids) = match (body.movie_id, body.genre_ids) {
        (Some(movie_id), Some(ids)) if !ids.is_empty() => (movie_id, ids),
        _ => {
            return Err(AppError::Validation(
                "Input tidak valid: movie_id dan genre_ids diperlukan.".to_string(),
            ));
        }
    };

    let results = try_join_all(ids.iter().map(|&id| Movie::add_genre(&pool, movie_id, id)))
        .await?
        .into_iter()
        .map(AttachResult::from)
        .collect::<Vec<_>>();
    Ok((StatusCode::CREATED, Json(results)))
}

#[derive(Debug, Deserialize)]
pub struct AttachAwardsBody {
    pub movie_id: Option<i64>,
    pub award_ids: Option<Vec<i64>>,
}

pub async fn attach_awards(
    State(pool): State<PgPool>,
    Json(body): Json<AttachAwardsBody>,
) -> Result<impl IntoResponse, AppError> {
    let (movie_id, ids) = match (body.movie_id, body.award_ids) {
        (Some(movie_id), Some(ids)) if !ids.is_empty() => (movie_id, ids),
        _ => {
            return Err(AppError::Validation(
                "Input tidak valid: movie_id dan award_ids diperlukan.".to_string(),
            ));
        }
    };

    let results = try_join_all(ids.iter().map(|&id| Movie::add_award(&pool, movie_id, id)))
        .await?
        .into_iter()
        .map(AttachResult::from)
        .collect::<Vec<_>>();
    Ok((StatusCode::CREATED, Json(results)))
}

#[derive(Debug, Deserialize)]
pub struct AttachActorsBody {
    pub movie_id: Option<i64>,
    pub actor_ids: Option<Vec<i64>>,
}

pub async fn attach_actors(
    State(pool): State<PgPool>,
    Json(body): Json<AttachActorsBody>,
) -> Result<impl IntoResponse, AppError> {
    let (movie_id, ids) = match (body.movie_id, body.actor_ids) {
        (Some(movie_id), Some(ids)) if !ids.is_empty() => (movie_id, ids),
        _ => {
            return Err(AppError::Validation(
                "Input tidak valid: movie_id dan actor_ids diperlukan.".to_string(),
            ));
        }
    };

    let results = try_join_all(ids.iter().map(|&id| Movie::add_actor(&pool, movie_id, id)))
        .await?
        .into_iter()
        .map(AttachResult::from)
        .collect::<Vec<_>>();
    Ok((StatusCode::CREATED, Json(results)))
}

// ---------------------------------------------------------------------------
// Wishlists

#[derive(Debug, Deserialize)]
pub struct WishlistBody {
    pub user_id: Option<i64>,
    pub movie_id: Option<i64>,
}

pub async fn add_to_wishlist(
    State(pool): State<PgPool>,
    Json(body): Json<WishlistBody>,
) -> Result<impl IntoResponse, AppError> {
    let (user_id, movie_id) = match (body.user_id, body.movie_id) {
        (Some(user_id), Some(movie_id)) => (user_id, movie_id),
        _ => {
            return Err(AppError::Validation(
                "Invalid input: user_id and movie_id are required.".to_string(),
            ));
        }
    };

    if Movie::add_to_wishlist(&pool, user_id, movie_id).await? {
        Ok((
            StatusCode::CREATED,
            Json(json!({ "message": "Movie added to wishlist" })),
        ))
    } else {
        Err(AppError::BadRequest("Movie already in wishlist".to_string()))
    }
}

pub async fn remove_from_wishlist(
    State(pool): State<PgPool>,
    Path((user_id, movie_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse, AppError> {
    if Movie::remove_from_wishlist(&pool, user_id, movie_id).await? > 0 {
        Ok(Json(json!({ "message": "Movie removed from wishlist" })))
    } else {
        Err(AppError::BadRequest("Movie not in wishlist".to_string()))
    }
}

pub async fn get_wishlist(
    State(pool): State<PgPool>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(Movie::get_wishlist(&pool, user_id).await?))
}

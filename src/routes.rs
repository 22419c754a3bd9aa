// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware,
    routing::{delete, get, patch, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{actor, auth, award, comment, country, genre, movie, platform, user},
    state::AppState,
    utils::jwt::{admin_middleware, auth_middleware},
};

/// Assembles the main application router.
///
/// * Nests one sub-router per entity under /api.
/// * Applies global middleware (Trace, CORS with credentials for the cookie).
/// * Injects global state (pool, config, mailer, image host).
pub fn create_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true);

    let require_auth = middleware::from_fn_with_state(state.config.clone(), auth_middleware);

    // Static paths sit above the dynamic /{id} routes.
    let movie_routes = Router::new()
        .route("/count", get(movie::get_totals))
        .route("/cms", get(movie::get_all_cms))
        .route("/cms/user", get(movie::get_all_cms_user))
        .route("/search", get(movie::search))
        .route("/searchByTitle", get(movie::search_by_title))
        .route("/searchByTitle/user", get(movie::search_by_title_user))
        .route("/filter-sort", get(movie::filter_sort))
        .route("/filter-status", get(movie::filter_by_status))
        .route("/filter-status/user", get(movie::filter_by_status_user))
        .route("/same-genre/{movie_id}", get(movie::get_by_same_genre))
        .route("/availability/{movie_id}", get(movie::get_platforms))
        .route("/categorized-as/{movie_id}", get(movie::get_genres))
        .route("/awarded/{movie_id}", get(movie::get_awards))
        .route("/acted-in/{movie_id}", get(actor::get_by_movie))
        .route("/", get(movie::get_all).post(movie::create))
        .route("/availability", post(movie::attach_platforms))
        .route("/categorized-as", post(movie::attach_genres))
        .route("/awarded", post(movie::attach_awards))
        .route("/acted-in", post(movie::attach_actors))
        .route("/approval-status/{id}", put(movie::update_approval_status))
        .route(
            "/{id}",
            get(movie::get_by_id)
                .put(movie::update)
                .delete(movie::delete),
        )
        // Wishlists require a logged-in user.
        .merge(
            Router::new()
                .route(
                    "/wishlist",
                    post(movie::add_to_wishlist),
                )
                .route("/wishlist/{user_id}", get(movie::get_wishlist))
                .route(
                    "/wishlist/{user_id}/{movie_id}",
                    delete(movie::remove_from_wishlist),
                )
                .layer(require_auth.clone()),
        );

    let actor_routes = Router::new()
        .route("/count", get(actor::get_total))
        .route("/search", get(actor::search))
        .route("/paginated", get(actor::get_paginated))
        .route("/", get(actor::get_all).post(actor::create))
        .route("/movie/{movie_id}", get(actor::get_by_movie))
        .route("/{id}/name", put(actor::update_name))
        .route(
            "/{id}",
            get(actor::get_by_id)
                .put(actor::update)
                .delete(actor::delete),
        );

    let genre_routes = Router::new()
        .route("/count", get(genre::get_total))
        .route("/search", get(genre::search))
        .route("/", get(genre::get_all).post(genre::create))
        .route("/{id}/name", put(genre::update_name))
        .route(
            "/{id}",
            get(genre::get_by_id)
                .put(genre::update_name)
                .delete(genre::delete),
        );

    let award_routes = Router::new()
        .route("/count", get(award::get_total))
        .route("/search", get(award::search))
        .route("/paginated", get(award::get_paginated))
        .route("/", get(award::get_all).post(award::create))
        .route("/{id}/name", put(award::update_name))
        .route(
            "/{id}",
            get(award::get_by_id)
                .put(award::update)
                .delete(award::delete),
        );

    let country_routes = Router::new()
        .route("/count", get(country::get_total))
        .route("/search", get(country::search))
        .route("/", get(country::get_all).post(country::create))
        .route("/{id}/name", put(country::update_name))
        .route(
            "/{id}",
            get(country::get_by_id)
                .put(country::update)
                .delete(country::delete),
        );

    let platform_routes = Router::new()
        .route("/", get(platform::get_all).post(platform::create))
        .route(
            "/{id}",
            get(platform::get_by_id)
                .put(platform::update)
                .delete(platform::delete),
        );

    let comment_routes = Router::new()
        .route("/count", get(comment::get_total))
        .route("/approved", get(comment::get_approved))
        .route("/paginated", get(comment::get_paginated))
        .route("/approval", get(comment::filter_by_approval_status))
        .route("/", get(comment::get_all))
        .route("/movie/{movie_id}", get(comment::get_by_movie))
        .route("/{id}/approval", patch(comment::update_approval_status))
        .route(
            "/user/{user_id}/movie/{movie_id}",
            put(comment::update_by_user_and_movie),
        )
        .route(
            "/{id}",
            get(comment::get_by_id)
                .put(comment::update)
                .delete(comment::delete),
        )
        // Posting a comment requires a logged-in user.
        .merge(
            Router::new()
                .route("/", post(comment::create))
                .layer(require_auth.clone()),
        );

    let user_routes = Router::new()
        .route("/count", get(user::get_total))
        .route("/profile", get(auth::profile))
        .route("/search", get(user::search))
        .route("/", get(user::get_all).post(user::create))
        .route("/email/{email}", get(user::get_by_email))
        .route("/{id}/profile", put(user::update_profile))
        .route("/{id}", get(user::get_by_id).put(user::update))
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/verify-email", post(auth::verify_email))
        .route("/resend-token", post(auth::resend_token))
        .route("/forgot-password", post(auth::forgot_password))
        .route("/verify-reset-token", post(auth::verify_reset_token))
        .route("/reset-password", post(auth::reset_password))
        .route(
            "/update-verification-reset-token",
            post(auth::update_verification_reset_token),
        )
        .route("/auth/google", get(auth::google_redirect))
        .route("/auth/google/callback", get(auth::google_callback))
        // Role, suspension and removal are admin-only.
        .merge(
            Router::new()
                .route("/{id}/role", put(user::update_role))
                .route("/{id}/suspend", put(user::update_suspend))
                .route("/{id}", delete(user::delete))
                .layer(middleware::from_fn(admin_middleware))
                .layer(require_auth.clone()),
        );

    Router::new()
        .nest("/api/movies", movie_routes)
        .nest("/api/actors", actor_routes)
        .nest("/api/genres", genre_routes)
        .nest("/api/awards", award_routes)
        .nest("/api/countries", country_routes)
        .nest("/api/platforms", platform_routes)
        .nest("/api/comments", comment_routes)
        .nest("/api/users", user_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

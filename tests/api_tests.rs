// tests/api_tests.rs

use dramaku::{
    config::Config,
    routes,
    state::AppState,
    utils::{mail::Mailer, upload::ImageHost},
};
use sqlx::postgres::PgPoolOptions;

/// Spawns the app on a random port against the database named by
/// DATABASE_URL. Returns None (and the test passes vacuously) when no
/// database is configured, so the suite can run in environments without
/// Postgres.
async fn spawn_app() -> Option<String> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set, skipping integration test");
        return None;
    };

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&database_url)
        .await
        .expect("Failed to connect to Postgres for testing.");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate database");

    let config = Config {
        database_url: database_url.clone(),
        jwt_secret: "test_secret_for_integration_tests".to_string(),
        port: 0,
        rust_log: "error".to_string(),
        production: false,
        client_url: "http://localhost:3000".to_string(),
        allowed_origins: vec!["http://localhost:3000".to_string()],
        email_user: None,
        email_pass: None,
        smtp_host: "smtp.gmail.com".to_string(),
        cloudinary_cloud_name: None,
        cloudinary_upload_preset: None,
        google_client_id: None,
        google_client_secret: None,
        google_callback_url: None,
    };

    // No SMTP credentials: the mailer logs and skips instead of sending.
    let mailer = Mailer::from_config(&config).expect("Failed to build mailer");
    let images = ImageHost::from_config(&config);

    let state = AppState {
        pool,
        config,
        mailer,
        images,
    };
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Some(address)
}

fn unique(prefix: &str) -> String {
    format!("{}_{}", prefix, &uuid::Uuid::new_v4().to_string()[..8])
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let Some(address) = spawn_app().await else {
        return;
    };
    let client = reqwest::Client::new();

    let response = client
        .get(&format!("{}/random_path_that_does_not_exist", address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn register_rejects_short_username() {
    let Some(address) = spawn_app().await else {
        return;
    };
    let client = reqwest::Client::new();

    let response = client
        .post(&format!("{}/api/users/register", address))
        .json(&serde_json::json!({
            "username": "yo",
            "email": format!("{}@example.com", unique("mail")),
            "password": "password123"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn register_login_profile_flow() {
    let Some(address) = spawn_app().await else {
        return;
    };
    // Cookie store keeps the http-only token cookie between requests.
    let client = reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .unwrap();

    let username = unique("user");
    let email = format!("{}@example.com", username);
    let password = "password123";

    let response = client
        .post(&format!("{}/api/users/register", address))
        .json(&serde_json::json!({
            "username": username,
            "email": email,
            "password": password
        }))
        .send()
        .await
        .expect("Register failed");
    assert_eq!(response.status().as_u16(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body["message"],
        "Registration successful, check your email for verification code."
    );

    let response = client
        .post(&format!("{}/api/users/login", address))
        .json(&serde_json::json!({ "email": email, "password": password }))
        .send()
        .await
        .expect("Login failed");
    assert_eq!(response.status().as_u16(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Login successful");

    let response = client
        .get(&format!("{}/api/users/profile", address))
        .send()
        .await
        .expect("Profile request failed");
    assert_eq!(response.status().as_u16(), 200);

    let profile: serde_json::Value = response.json().await.unwrap();
    assert_eq!(profile["username"], username);
    assert_eq!(profile["email"], email);
    assert_eq!(profile["role"], "USER");
}

#[tokio::test]
async fn login_unknown_user_returns_404() {
    let Some(address) = spawn_app().await else {
        return;
    };
    let client = reqwest::Client::new();

    let response = client
        .post(&format!("{}/api/users/login", address))
        .json(&serde_json::json!({
            "email": format!("{}@nowhere.example", unique("ghost")),
            "password": "whatever"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 404);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "User not found");
}

#[tokio::test]
async fn login_wrong_password_returns_401() {
    let Some(address) = spawn_app().await else {
        return;
    };
    let client = reqwest::Client::new();

    let username = unique("user");
    let email = format!("{}@example.com", username);

    client
        .post(&format!("{}/api/users/register", address))
        .json(&serde_json::json!({
            "username": username,
            "email": email,
            "password": "password123"
        }))
        .send()
        .await
        .expect("Register failed");

    let response = client
        .post(&format!("{}/api/users/login", address))
        .json(&serde_json::json!({ "email": email, "password": "not-the-password" }))
        .send()
        .await
        .expect("Login failed");

    assert_eq!(response.status().as_u16(), 401);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Invalid credentials");
}

#[tokio::test]
async fn verify_email_rejects_bogus_token() {
    let Some(address) = spawn_app().await else {
        return;
    };
    let client = reqwest::Client::new();

    let response = client
        .post(&format!("{}/api/users/verify-email", address))
        .json(&serde_json::json!({
            "email": format!("{}@nowhere.example", unique("ghost")),
            "verification_token": "0000"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Invalid token");
}

#[tokio::test]
async fn profile_without_cookie_returns_401() {
    let Some(address) = spawn_app().await else {
        return;
    };
    let client = reqwest::Client::new();

    let response = client
        .get(&format!("{}/api/users/profile", address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn wishlist_requires_authentication() {
    let Some(address) = spawn_app().await else {
        return;
    };
    let client = reqwest::Client::new();

    let response = client
        .post(&format!("{}/api/movies/wishlist", address))
        .json(&serde_json::json!({ "user_id": 1, "movie_id": 1 }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn role_update_forbidden_for_regular_user() {
    let Some(address) = spawn_app().await else {
        return;
    };
    let client = reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .unwrap();

    let username = unique("user");
    let email = format!("{}@example.com", username);
    let password = "password123";

    client
        .post(&format!("{}/api/users/register", address))
        .json(&serde_json::json!({
            "username": username,
            "email": email,
            "password": password
        }))
        .send()
        .await
        .expect("Register failed");

    client
        .post(&format!("{}/api/users/login", address))
        .json(&serde_json::json!({ "email": email, "password": password }))
        .send()
        .await
        .expect("Login failed");

    let profile: serde_json::Value = client
        .get(&format!("{}/api/users/profile", address))
        .send()
        .await
        .expect("Profile request failed")
        .json()
        .await
        .unwrap();
    let user_id = profile["user_id"].as_i64().expect("user_id missing");

    let response = client
        .put(&format!("{}/api/users/{}/role", address, user_id))
        .json(&serde_json::json!({ "role": "ADMIN" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 403);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body["message"],
        "Access forbidden: Insufficient permissions"
    );
}

#[tokio::test]
async fn movie_listing_has_pagination_shape() {
    let Some(address) = spawn_app().await else {
        return;
    };
    let client = reqwest::Client::new();

    let response = client
        .get(&format!("{}/api/movies?page=1&limit=5", address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["movies"].is_array());
    assert_eq!(body["currentPage"], 1);
    assert!(body["totalPages"].is_number());
    assert!(body["totalCount"].is_number());
}

#[tokio::test]
async fn movie_create_rejects_non_numeric_year() {
    let Some(address) = spawn_app().await else {
        return;
    };
    let client = reqwest::Client::new();

    let form = reqwest::multipart::Form::new()
        .text("title", "Some Movie")
        .text("year", "abc");

    let response = client
        .post(&format!("{}/api/movies", address))
        .multipart(form)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
    // Form validation answers with the raw message text.
    let body = response.text().await.unwrap();
    assert_eq!(body, "Tahun (year) harus berupa angka.");
}

#[tokio::test]
async fn movie_create_rejects_missing_title() {
    let Some(address) = spawn_app().await else {
        return;
    };
    let client = reqwest::Client::new();

    let form = reqwest::multipart::Form::new().text("year", "2024");

    let response = client
        .post(&format!("{}/api/movies", address))
        .multipart(form)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
    let body = response.text().await.unwrap();
    assert_eq!(body, "Judul film (title) wajib diisi.");
}

#[tokio::test]
async fn attach_genres_requires_ids() {
    let Some(address) = spawn_app().await else {
        return;
    };
    let client = reqwest::Client::new();

    let response = client
        .post(&format!("{}/api/movies/categorized-as", address))
        .json(&serde_json::json!({ "movie_id": 1 }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
    let body = response.text().await.unwrap();
    assert_eq!(body, "Input tidak valid: movie_id dan genre_ids diperlukan.");
}

#[tokio::test]
async fn actor_search_without_match_returns_404() {
    let Some(address) = spawn_app().await else {
        return;
    };
    let client = reqwest::Client::new();

    let response = client
        .get(&format!(
            "{}/api/actors/search?keyword={}",
            address,
            unique("no_such_actor")
        ))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 404);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Tidak ada hasil yang ditemukan");
}

#[tokio::test]
async fn genre_create_search_delete_flow() {
    let Some(address) = spawn_app().await else {
        return;
    };
    let client = reqwest::Client::new();

    let name = unique("Genre");

    let response = client
        .post(&format!("{}/api/genres", address))
        .json(&serde_json::json!({ "genre_name": name }))
        .send()
        .await
        .expect("Create failed");
    assert_eq!(response.status().as_u16(), 201);

    let genre: serde_json::Value = response.json().await.unwrap();
    let genre_id = genre["genre_id"].as_i64().expect("genre_id missing");
    assert_eq!(genre["genre_name"], name);

    let response = client
        .get(&format!("{}/api/genres/search?keyword={}", address, name))
        .send()
        .await
        .expect("Search failed");
    assert_eq!(response.status().as_u16(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["totalEntries"], 1);

    let response = client
        .delete(&format!("{}/api/genres/{}", address, genre_id))
        .send()
        .await
        .expect("Delete failed");
    assert_eq!(response.status().as_u16(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Genre deleted successfully!");

    let response = client
        .get(&format!("{}/api/genres/{}", address, genre_id))
        .send()
        .await
        .expect("Get failed");
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn platform_crud_flow() {
    let Some(address) = spawn_app().await else {
        return;
    };
    let client = reqwest::Client::new();

    // Platform ids are caller-supplied; derive a unique one per run.
    let platform_id = (uuid::Uuid::new_v4().as_u128() % 1_000_000_000) as i64;
    let name = unique("Platform");

    let response = client
        .post(&format!("{}/api/platforms", address))
        .json(&serde_json::json!({
            "platform_id": platform_id,
            "platform_name": name
        }))
        .send()
        .await
        .expect("Create failed");
    assert_eq!(response.status().as_u16(), 201);

    let response = client
        .get(&format!("{}/api/platforms/{}", address, platform_id))
        .send()
        .await
        .expect("Get failed");
    assert_eq!(response.status().as_u16(), 200);

    let platform: serde_json::Value = response.json().await.unwrap();
    assert_eq!(platform["platform_name"], name);

    let renamed = unique("Platform");
    let response = client
        .put(&format!("{}/api/platforms/{}", address, platform_id))
        .json(&serde_json::json!({
            "platform_id": platform_id,
            "platform_name": renamed
        }))
        .send()
        .await
        .expect("Update failed");
    assert_eq!(response.status().as_u16(), 200);

    let platform: serde_json::Value = response.json().await.unwrap();
    assert_eq!(platform["platform_name"], renamed);

    let response = client
        .delete(&format!("{}/api/platforms/{}", address, platform_id))
        .send()
        .await
        .expect("Delete failed");
    assert_eq!(response.status().as_u16(), 204);

    let response = client
        .get(&format!("{}/api/platforms/{}", address, platform_id))
        .send()
        .await
        .expect("Get failed");
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn counts_are_exposed() {
    let Some(address) = spawn_app().await else {
        return;
    };
    let client = reqwest::Client::new();

    let response = client
        .get(&format!("{}/api/movies/count", address))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 200);

    let totals: serde_json::Value = response.json().await.unwrap();
    assert!(totals["totalMovies"].is_number());
    assert!(totals["totalUsers"].is_number());

    let response = client
        .get(&format!("{}/api/genres/count", address))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["total"].is_number());
}

// ---------------------------------------------------------------------------
// Seeded scenarios: these connect to the database directly to set up state
// the public API cannot produce on its own.

async fn test_pool() -> sqlx::PgPool {
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    PgPoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await
        .expect("Failed to connect to test DB")
}

async fn seed_movie(pool: &sqlx::PgPool) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO movies (title, year, release_status) \
         VALUES ($1, 2024, 'COMPLETED') RETURNING movie_id",
    )
    .bind(unique("Movie"))
    .fetch_one(pool)
    .await
    .expect("Failed to seed movie")
}

/// Registers a fresh user, logs in, and returns the cookie-carrying client
/// plus the new user's id.
async fn register_and_login(address: &str) -> (reqwest::Client, i64) {
    let client = reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .unwrap();

    let username = unique("user");
    let email = format!("{}@example.com", username);
    let password = "password123";

    client
        .post(&format!("{}/api/users/register", address))
        .json(&serde_json::json!({
            "username": username,
            "email": email,
            "password": password
        }))
        .send()
        .await
        .expect("Register failed");

    client
        .post(&format!("{}/api/users/login", address))
        .json(&serde_json::json!({ "email": email, "password": password }))
        .send()
        .await
        .expect("Login failed");

    let profile: serde_json::Value = client
        .get(&format!("{}/api/users/profile", address))
        .send()
        .await
        .expect("Profile request failed")
        .json()
        .await
        .unwrap();

    let user_id = profile["user_id"].as_i64().expect("user_id missing");
    (client, user_id)
}

#[tokio::test]
async fn actor_create_without_photo_is_rejected() {
    let Some(address) = spawn_app().await else {
        return;
    };
    let client = reqwest::Client::new();

    let form = reqwest::multipart::Form::new().text("actor_name", unique("Actor"));

    let response = client
        .post(&format!("{}/api/actors", address))
        .multipart(form)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "File foto tidak dapat diunggah");
}

#[tokio::test]
async fn country_create_requires_country_id() {
    let Some(address) = spawn_app().await else {
        return;
    };
    let client = reqwest::Client::new();

    let form = reqwest::multipart::Form::new().text("country_name", unique("Country"));

    let response = client
        .post(&format!("{}/api/countries", address))
        .multipart(form)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "country_id is required");
}

#[tokio::test]
async fn profile_update_changes_username() {
    let Some(address) = spawn_app().await else {
        return;
    };
    let (client, user_id) = register_and_login(&address).await;

    let renamed = unique("renamed");
    let form = reqwest::multipart::Form::new().text("username", renamed.clone());

    let response = client
        .put(&format!("{}/api/users/{}/profile", address, user_id))
        .multipart(form)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    let user: serde_json::Value = response.json().await.unwrap();
    assert_eq!(user["username"], renamed);
}

#[tokio::test]
async fn suspended_user_cannot_login() {
    let Some(address) = spawn_app().await else {
        return;
    };
    let pool = test_pool().await;
    let client = reqwest::Client::new();

    let username = unique("user");
    let email = format!("{}@example.com", username);
    let password = "password123";

    client
        .post(&format!("{}/api/users/register", address))
        .json(&serde_json::json!({
            "username": username,
            "email": email,
            "password": password
        }))
        .send()
        .await
        .expect("Register failed");

    sqlx::query("UPDATE users SET is_suspended = TRUE WHERE email = $1")
        .bind(&email)
        .execute(&pool)
        .await
        .unwrap();

    let response = client
        .post(&format!("{}/api/users/login", address))
        .json(&serde_json::json!({ "email": email, "password": password }))
        .send()
        .await
        .expect("Login failed");

    assert_eq!(response.status().as_u16(), 403);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "User is suspended");
}

#[tokio::test]
async fn expired_verification_token_returns_400() {
    let Some(address) = spawn_app().await else {
        return;
    };
    let pool = test_pool().await;
    let client = reqwest::Client::new();

    let username = unique("user");
    let email = format!("{}@example.com", username);

    client
        .post(&format!("{}/api/users/register", address))
        .json(&serde_json::json!({
            "username": username,
            "email": email,
            "password": "password123"
        }))
        .send()
        .await
        .expect("Register failed");

    let token: Option<String> =
        sqlx::query_scalar("SELECT verification_token FROM users WHERE email = $1")
            .bind(&email)
            .fetch_one(&pool)
            .await
            .unwrap();
    let token = token.expect("verification token not stored");

    sqlx::query(
        "UPDATE users SET verification_token_expiration = '2000-01-01 00:00:00' WHERE email = $1",
    )
    .bind(&email)
    .execute(&pool)
    .await
    .unwrap();

    let response = client
        .post(&format!("{}/api/users/verify-email", address))
        .json(&serde_json::json!({ "email": email, "verification_token": token }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Token expired, please request a new one.");
}

#[tokio::test]
async fn second_comment_on_same_movie_is_rejected() {
    let Some(address) = spawn_app().await else {
        return;
    };
    let pool = test_pool().await;
    let (client, user_id) = register_and_login(&address).await;
    let movie_id = seed_movie(&pool).await;

    let body = serde_json::json!({
        "user_id": user_id,
        "movie_id": movie_id,
        "comment_rate": 4.0,
        "detail_comment": "Ceritanya bagus"
    });

    let response = client
        .post(&format!("{}/api/comments", address))
        .json(&body)
        .send()
        .await
        .expect("First comment failed");
    assert_eq!(response.status().as_u16(), 201);

    let response = client
        .post(&format!("{}/api/comments", address))
        .json(&body)
        .send()
        .await
        .expect("Second comment failed");

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body["message"],
        "User has already commented on this movie. Please edit your existing comment."
    );
}

#[tokio::test]
async fn attaching_genre_twice_reports_existing() {
    let Some(address) = spawn_app().await else {
        return;
    };
    let pool = test_pool().await;
    let client = reqwest::Client::new();
    let movie_id = seed_movie(&pool).await;

    let genre_id: i64 =
        sqlx::query_scalar("INSERT INTO genres (genre_name) VALUES ($1) RETURNING genre_id")
            .bind(unique("Genre"))
            .fetch_one(&pool)
            .await
            .unwrap();

    let body = serde_json::json!({ "movie_id": movie_id, "genre_ids": [genre_id] });

    let response = client
        .post(&format!("{}/api/movies/categorized-as", address))
        .json(&body)
        .send()
        .await
        .expect("First attach failed");
    assert_eq!(response.status().as_u16(), 201);
    let results: serde_json::Value = response.json().await.unwrap();
    assert_eq!(results[0]["success"], true);
    assert_eq!(results[0]["message"], "Data inserted successfully");

    let response = client
        .post(&format!("{}/api/movies/categorized-as", address))
        .json(&body)
        .send()
        .await
        .expect("Second attach failed");
    assert_eq!(response.status().as_u16(), 201);
    let results: serde_json::Value = response.json().await.unwrap();
    assert_eq!(results[0]["success"], false);
    assert_eq!(results[0]["message"], "Data already exists");
}

#[tokio::test]
async fn genre_linked_to_movie_cannot_be_deleted() {
    let Some(address) = spawn_app().await else {
        return;
    };
    let pool = test_pool().await;
    let client = reqwest::Client::new();
    let movie_id = seed_movie(&pool).await;

    let genre_id: i64 =
        sqlx::query_scalar("INSERT INTO genres (genre_name) VALUES ($1) RETURNING genre_id")
            .bind(unique("Genre"))
            .fetch_one(&pool)
            .await
            .unwrap();
    sqlx::query("INSERT INTO categorized_as (movie_id, genre_id) VALUES ($1, $2)")
        .bind(movie_id)
        .bind(genre_id)
        .execute(&pool)
        .await
        .unwrap();

    let response = client
        .delete(&format!("{}/api/genres/{}", address, genre_id))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Genre masih terkait dengan movie.");
}

#[tokio::test]
async fn actor_linked_to_movie_cannot_be_deleted() {
    let Some(address) = spawn_app().await else {
        return;
    };
    let pool = test_pool().await;
    let client = reqwest::Client::new();
    let movie_id = seed_movie(&pool).await;

    let actor_id: i64 =
        sqlx::query_scalar("INSERT INTO actors (actor_name) VALUES ($1) RETURNING actor_id")
            .bind(unique("Actor"))
            .fetch_one(&pool)
            .await
            .unwrap();
    sqlx::query("INSERT INTO acted_in (movie_id, actor_id) VALUES ($1, $2)")
        .bind(movie_id)
        .bind(actor_id)
        .execute(&pool)
        .await
        .unwrap();

    let response = client
        .delete(&format!("{}/api/actors/{}", address, actor_id))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Aktor masih terkait dengan movie");
}

#[tokio::test]
async fn award_linked_to_movie_cannot_be_deleted() {
    let Some(address) = spawn_app().await else {
        return;
    };
    let pool = test_pool().await;
    let client = reqwest::Client::new();
    let movie_id = seed_movie(&pool).await;

    let award_id: i64 =
        sqlx::query_scalar("INSERT INTO awards (award_name) VALUES ($1) RETURNING award_id")
            .bind(unique("Award"))
            .fetch_one(&pool)
            .await
            .unwrap();
    sqlx::query("INSERT INTO awarded (movie_id, award_id) VALUES ($1, $2)")
        .bind(movie_id)
        .bind(award_id)
        .execute(&pool)
        .await
        .unwrap();

    let response = client
        .delete(&format!("{}/api/awards/{}", address, award_id))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body["message"],
        "Award ini masih memiliki daftar movie yang terkait. \
         Silakan hapus movie terlebih dahulu sebelum menghapus award ini."
    );
}

#[tokio::test]
async fn country_referenced_by_movie_cannot_be_deleted() {
    let Some(address) = spawn_app().await else {
        return;
    };
    let pool = test_pool().await;
    let client = reqwest::Client::new();

    let country_id = unique("ZZ");
    sqlx::query("INSERT INTO countries (country_id, country_name) VALUES ($1, $2)")
        .bind(&country_id)
        .bind(unique("Country"))
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query(
        "INSERT INTO movies (title, year, release_status, country_id) \
         VALUES ($1, 2024, 'COMPLETED', $2)",
    )
    .bind(unique("Movie"))
    .bind(&country_id)
    .execute(&pool)
    .await
    .unwrap();

    let response = client
        .delete(&format!("{}/api/countries/{}", address, country_id))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body["message"],
        "Negara ini masih memiliki daftar movie yang terkait. \
         Silakan hapus movie terlebih dahulu sebelum menghapus negara ini."
    );
}

#[tokio::test]
async fn movie_delete_removes_junction_rows() {
    let Some(address) = spawn_app().await else {
        return;
    };
    let pool = test_pool().await;
    let client = reqwest::Client::new();
    let movie_id = seed_movie(&pool).await;

    let genre_id: i64 =
        sqlx::query_scalar("INSERT INTO genres (genre_name) VALUES ($1) RETURNING genre_id")
            .bind(unique("Genre"))
            .fetch_one(&pool)
            .await
            .unwrap();
    sqlx::query("INSERT INTO categorized_as (movie_id, genre_id) VALUES ($1, $2)")
        .bind(movie_id)
        .bind(genre_id)
        .execute(&pool)
        .await
        .unwrap();

    let response = client
        .delete(&format!("{}/api/movies/{}", address, movie_id))
        .send()
        .await
        .expect("Delete failed");
    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Film berhasil dihapus");

    let response = client
        .get(&format!("{}/api/movies/{}", address, movie_id))
        .send()
        .await
        .expect("Get failed");
    assert_eq!(response.status().as_u16(), 404);

    let remaining: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM categorized_as WHERE movie_id = $1")
            .bind(movie_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(remaining, 0);
}

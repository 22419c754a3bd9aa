// src/config.rs

use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub port: u16,
    pub rust_log: String,

    /// `production` switches the token cookie to Secure + SameSite=None.
    pub production: bool,

    /// Frontend origin the OAuth callback redirects to.
    pub client_url: String,
    /// Comma-separated list of origins allowed by CORS.
    pub allowed_origins: Vec<String>,

    // SMTP credentials for verification / reset codes.
    pub email_user: Option<String>,
    pub email_pass: Option<String>,
    pub smtp_host: String,

    // Cloud image host (unsigned upload).
    pub cloudinary_cloud_name: Option<String>,
    pub cloudinary_upload_preset: Option<String>,

    // Google OAuth.
    pub google_client_id: Option<String>,
    pub google_client_secret: Option<String>,
    pub google_callback_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set");

        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let production = env::var("APP_ENV")
            .map(|v| v == "production")
            .unwrap_or(false);

        let client_url =
            env::var("CLIENT_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self {
            database_url,
            jwt_secret,
            port,
            rust_log,
            production,
            client_url,
            allowed_origins,
            email_user: env::var("EMAIL_USER").ok(),
            email_pass: env::var("EMAIL_PASS").ok(),
            smtp_host: env::var("SMTP_HOST").unwrap_or_else(|_| "smtp.gmail.com".to_string()),
            cloudinary_cloud_name: env::var("CLOUDINARY_CLOUD_NAME").ok(),
            cloudinary_upload_preset: env::var("CLOUDINARY_UPLOAD_PRESET").ok(),
            google_client_id: env::var("GOOGLE_CLIENT_ID").ok(),
            google_client_secret: env::var("GOOGLE_CLIENT_SECRET").ok(),
            google_callback_url: env::var("GOOGLE_CALLBACK_URL").ok(),
        }
    }
}

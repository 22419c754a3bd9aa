// src/main.rs

use std::net::SocketAddr;
use std::time::Duration;

use dotenvy::dotenv;
use sqlx::Executor;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use dramaku::config::Config;
use dramaku::routes;
use dramaku::state::AppState;
use dramaku::utils::{mail::Mailer, upload::ImageHost};

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    // Lazy pool: the process boots even when the database is still coming
    // up, and every session is pinned to the Jakarta timezone so token
    // expiry stamps compare correctly.
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .after_connect(|conn, _meta| {
            Box::pin(async move {
                conn.execute("SET TIME ZONE 'Asia/Jakarta'").await?;
                Ok(())
            })
        })
        .connect_lazy(&config.database_url)
        .expect("Invalid DATABASE_URL");

    match pool.acquire().await {
        Ok(_) => tracing::info!("Database connected..."),
        Err(e) => tracing::warn!("Database not reachable yet, continuing anyway: {}", e),
    }

    // Run Migrations Automatically
    match sqlx::migrate!("./migrations").run(&pool).await {
        Ok(()) => tracing::info!("Migrations applied successfully."),
        Err(e) => tracing::warn!("Failed to run migrations, continuing anyway: {}", e),
    }

    let mailer = Mailer::from_config(&config).expect("Failed to build mailer");
    if !mailer.is_configured() {
        tracing::warn!("EMAIL_USER / EMAIL_PASS not set, outgoing mail is disabled");
    }

    let images = ImageHost::from_config(&config);
    if !images.is_configured() {
        tracing::warn!("Cloudinary credentials not set, image uploads are disabled");
    }

    // Create AppState
    let state = AppState {
        pool: pool.clone(),
        config: config.clone(),
        mailer,
        images,
    };

    // Create the Axum application router
    let app = routes::create_router(state);

    // Bind to the listening address
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();

    // Start the server
    axum::serve(listener, app).await.unwrap();
}

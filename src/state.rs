use axum::extract::FromRef;
use sqlx::PgPool;

use crate::{
    config::Config,
    utils::{mail::Mailer, upload::ImageHost},
};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Config,
    pub mailer: Mailer,
    pub images: ImageHost,
}

impl FromRef<AppState> for PgPool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for Mailer {
    fn from_ref(state: &AppState) -> Self {
        state.mailer.clone()
    }
}

impl FromRef<AppState> for ImageHost {
    fn from_ref(state: &AppState) -> Self {
        state.images.clone()
    }
}

// src/utils/jwt.rs

use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{config::Config, error::AppError};

/// Session tokens live for one day.
pub const TOKEN_TTL_SECS: u64 = 24 * 60 * 60;

/// Name of the http-only session cookie.
pub const TOKEN_COOKIE: &str = "token";

/// JWT Claims carried by the `token` cookie.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Claims {
    pub user_id: i64,
    pub email: String,
    /// 'USER' or 'ADMIN'.
    pub role: String,
    /// Expiration time as Unix timestamp.
    pub exp: usize,
}

/// Signs a session JWT for the user with a 1-day expiry.
pub fn sign_jwt(user_id: i64, email: &str, role: &str, secret: &str) -> Result<String, AppError> {
    let expiration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| AppError::Internal(e.to_string()))?
        .as_secs() as usize
        + TOKEN_TTL_SECS as usize;

    let claims = Claims {
        user_id,
        email: email.to_owned(),
        role: role.to_owned(),
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(e.to_string()))
}

/// Verifies and decodes a JWT string.
pub fn verify_jwt(token: &str, secret: &str) -> Result<Claims, AppError> {
    let token_data = decode(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::Auth("Invalid token".to_string()))?;

    Ok(token_data.claims)
}

/// Builds the http-only session cookie. In production the cookie is sent
/// cross-site (Secure + SameSite=None); locally it stays Strict over http.
pub fn token_cookie(token: String, production: bool) -> Cookie<'static> {
    let mut cookie = Cookie::new(TOKEN_COOKIE, token);
    cookie.set_http_only(true);
    cookie.set_path("/");
    cookie.set_max_age(time::Duration::seconds(TOKEN_TTL_SECS as i64));
    cookie.set_secure(production);
    cookie.set_same_site(if production {
        SameSite::None
    } else {
        SameSite::Strict
    });
    cookie
}

/// Expired cookie used to log out.
pub fn clear_token_cookie(production: bool) -> Cookie<'static> {
    let mut cookie = token_cookie(String::new(), production);
    cookie.set_max_age(time::Duration::ZERO);
    cookie
}

/// Axum Middleware: Authentication.
///
/// Validates the `token` cookie and injects `Claims` into the request
/// extensions for handlers to use. Missing or invalid tokens answer 401.
pub async fn auth_middleware(
    State(config): State<Config>,
    jar: CookieJar,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = jar
        .get(TOKEN_COOKIE)
        .map(|c| c.value().to_owned())
        .ok_or(AppError::Auth("Token not found".to_string()))?;

    let claims = verify_jwt(&token, &config.jwt_secret)?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Axum Middleware: Admin Authorization.
///
/// Must be used AFTER `auth_middleware`. Checks the injected `Claims` for
/// the ADMIN role; otherwise answers 403.
pub async fn admin_middleware(req: Request<Body>, next: Next) -> Result<Response, AppError> {
    let claims = req
        .extensions()
        .get::<Claims>()
        .ok_or(AppError::Auth("Token not found".to_string()))?;

    if claims.role != "ADMIN" {
        return Err(AppError::Forbidden(
            "Access forbidden: Insufficient permissions".to_string(),
        ));
    }

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_and_verify_roundtrip() {
        let token = sign_jwt(42, "a@b.c", "USER", "secret").unwrap();
        let claims = verify_jwt(&token, "secret").unwrap();
        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.email, "a@b.c");
        assert_eq!(claims.role, "USER");
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = sign_jwt(1, "a@b.c", "ADMIN", "secret").unwrap();
        assert!(verify_jwt(&token, "other").is_err());
    }

    #[test]
    fn production_cookie_is_cross_site() {
        let cookie = token_cookie("t".into(), true);
        assert!(cookie.secure().unwrap_or(false));
        assert_eq!(cookie.same_site(), Some(SameSite::None));
        assert!(cookie.http_only().unwrap_or(false));
    }

    #[test]
    fn dev_cookie_stays_strict() {
        let cookie = token_cookie("t".into(), false);
        assert!(!cookie.secure().unwrap_or(false));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
    }
}

// src/handlers/auth.rs
//
// Registration, email verification, login via http-only JWT cookie, password
// reset, and the Google OAuth code-exchange flow. Verification and reset
// codes are 4 digits and expire after 3 minutes; expiry is evaluated in
// Asia/Jakarta wall-clock time.

use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Redirect},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

use crate::config::Config;
use crate::error::AppError;
use crate::models::user::User;
use crate::utils::mail::Mailer;
use crate::utils::{hash, jwt, time};

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterBody {
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
}

pub async fn register(
    State(pool): State<PgPool>,
    State(mailer): State<Mailer>,
    Json(body): Json<RegisterBody>,
) -> Result<impl IntoResponse, AppError> {
    body.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let password_hash = hash::hash_password(&body.password)?;
    let (_user, code) = User::create(
        &pool,
        &body.username,
        &body.email,
        Some(&password_hash),
        "USER",
        false,
    )
    .await?;

    mailer.send_verification_code(&body.email, &code).await?;

    Ok(Json(json!({
        "message": "Registration successful, check your email for verification code."
    })))
}

#[derive(Debug, Deserialize)]
pub struct VerifyEmailBody {
    pub email: String,
    pub verification_token: String,
}

pub async fn verify_email(
    State(pool): State<PgPool>,
    Json(body): Json<VerifyEmailBody>,
) -> Result<impl IntoResponse, AppError> {
    let user = User::get_by_email(&pool, &body.email).await?;

    let user = match user {
        Some(u) if u.verification_token.as_deref() == Some(body.verification_token.as_str()) => u,
        _ => return Err(AppError::BadRequest("Invalid token".to_string())),
    };

    if let Some(expiration) = user.verification_token_expiration {
        if time::is_expired(expiration) {
            return Err(AppError::BadRequest(
                "Token expired, please request a new one.".to_string(),
            ));
        }
    }

    User::mark_verified(&pool, user.user_id).await?;
    Ok(Json(json!({ "message": "Email verified successfully" })))
}

#[derive(Debug, Deserialize)]
pub struct EmailBody {
    pub email: String,
}

pub async fn resend_token(
    State(pool): State<PgPool>,
    State(mailer): State<Mailer>,
    Json(body): Json<EmailBody>,
) -> Result<impl IntoResponse, AppError> {
    let user = User::get_by_email(&pool, &body.email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    if user.is_verified {
        return Err(AppError::BadRequest("User already verified".to_string()));
    }

    let code = User::refresh_verification_token(&pool, user.user_id).await?;
    mailer.resend_verification_code(&body.email, &code).await?;

    Ok(Json(json!({
        "message": "Verification code resent, please check your email."
    })))
}

#[derive(Debug, Deserialize)]
pub struct LoginBody {
    pub email: String,
    pub password: String,
}

pub async fn login(
    State(pool): State<PgPool>,
    State(config): State<Config>,
    jar: CookieJar,
    Json(body): Json<LoginBody>,
) -> Result<impl IntoResponse, AppError> {
    let user = User::get_by_email(&pool, &body.email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    if user.is_suspended {
        return Err(AppError::Forbidden("User is suspended".to_string()));
    }

    // OAuth-provisioned accounts carry no password and cannot log in here.
    let stored_hash = user
        .password
        .as_deref()
        .ok_or_else(|| AppError::Auth("Invalid credentials".to_string()))?;

    if !hash::verify_password(&body.password, stored_hash)? {
        return Err(AppError::Auth("Invalid credentials".to_string()));
    }

    let token = jwt::sign_jwt(user.user_id, &user.email, &user.role, &config.jwt_secret)?;
    let jar = jar.add(jwt::token_cookie(token, config.production));

    Ok((jar, Json(json!({ "message": "Login successful" }))))
}

pub async fn logout(State(config): State<Config>, jar: CookieJar) -> impl IntoResponse {
    let jar = jar.add(jwt::clear_token_cookie(config.production));
    (jar, Json(json!({ "message": "Logged out successfully" })))
}

pub async fn profile(
    State(pool): State<PgPool>,
    State(config): State<Config>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    let token = jar
        .get(jwt::TOKEN_COOKIE)
        .map(|c| c.value().to_owned())
        .ok_or_else(|| AppError::Auth("Token not found".to_string()))?;

    let claims = jwt::verify_jwt(&token, &config.jwt_secret)?;

    let user = User::get_by_id(&pool, claims.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(json!({
        "user_id": user.user_id,
        "username": user.username,
        "email": user.email,
        "role": user.role,
        "foto_profil_url": user.foto_profil_url,
    })))
}

pub async fn forgot_password(
    State(pool): State<PgPool>,
    State(mailer): State<Mailer>,
    Json(body): Json<EmailBody>,
) -> Result<impl IntoResponse, AppError> {
    User::get_by_email(&pool, &body.email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let code = User::refresh_reset_token(&pool, &body.email).await?;
    mailer.send_reset_code(&body.email, &code).await?;

    Ok(Json(json!({
        "message": "Password reset code sent, please check your email."
    })))
}

#[derive(Debug, Deserialize)]
pub struct VerifyResetBody {
    pub email: String,
    pub reset_password_token: String,
}

pub async fn verify_reset_token(
    State(pool): State<PgPool>,
    Json(body): Json<VerifyResetBody>,
) -> Result<impl IntoResponse, AppError> {
    let user = User::verify_reset_token(&pool, &body.email, &body.reset_password_token).await?;

    Ok(Json(json!({
        "message": "Token verified, proceed to reset password",
        "user_id": user.user_id,
    })))
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordBody {
    pub email: String,
    pub new_password: String,
}

pub async fn reset_password(
    State(pool): State<PgPool>,
    Json(body): Json<ResetPasswordBody>,
) -> Result<impl IntoResponse, AppError> {
    let password_hash = hash::hash_password(&body.new_password)?;

    if User::reset_password(&pool, &body.email, &password_hash).await? == 0 {
        return Err(AppError::BadRequest(
            "Failed to reset password - user not found or token not valid.".to_string(),
        ));
    }

    Ok(Json(json!({ "message": "Password reset successful" })))
}

pub async fn update_verification_reset_token(
    State(pool): State<PgPool>,
    Json(body): Json<EmailBody>,
) -> Result<impl IntoResponse, AppError> {
    if body.email.is_empty() {
        return Err(AppError::BadRequest("Email is required".to_string()));
    }

    let user = User::get_by_email(&pool, &body.email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let token = User::refresh_verification_token(&pool, user.user_id).await?;

    Ok(Json(json!({
        "message": "Verification reset token updated successfully",
        "token": token,
    })))
}

// ---------------------------------------------------------------------------
// Google OAuth

/// Builds the consent-screen URL. The callback URL goes through proper query
/// encoding so reserved characters in it cannot corrupt the query string.
fn consent_url(client_id: &str, callback_url: &str) -> Result<String, AppError> {
    let url = reqwest::Url::parse_with_params(
        "https://accounts.google.com/o/oauth2/v2/auth",
        &[
            ("client_id", client_id),
            ("redirect_uri", callback_url),
            ("response_type", "code"),
            ("scope", "profile email"),
        ],
    )
    .map_err(|e| AppError::Internal(format!("Failed to build consent URL: {}", e)))?;

    Ok(url.into())
}

/// Sends the browser to Google's consent screen.
pub async fn google_redirect(State(config): State<Config>) -> Result<impl IntoResponse, AppError> {
    let (client_id, callback_url) = match (&config.google_client_id, &config.google_callback_url) {
        (Some(id), Some(cb)) => (id, cb),
        _ => {
            return Err(AppError::Internal(
                "Google OAuth is not configured".to_string(),
            ));
        }
    };

    let url = consent_url(client_id, callback_url)?;
    Ok(Redirect::temporary(&url))
}

#[derive(Debug, Deserialize)]
pub struct OAuthCallbackQuery {
    pub code: String,
}

#[derive(Debug, Deserialize)]
struct GoogleTokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct GoogleUserInfo {
    email: String,
    name: Option<String>,
}

/// Exchanges the authorization code, provisions an account on first login,
/// sets the session cookie and bounces back to the frontend.
pub async fn google_callback(
    State(pool): State<PgPool>,
    State(config): State<Config>,
    jar: CookieJar,
    Query(q): Query<OAuthCallbackQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (client_id, client_secret, callback_url) = match (
        &config.google_client_id,
        &config.google_client_secret,
        &config.google_callback_url,
    ) {
        (Some(id), Some(secret), Some(cb)) => (id, secret, cb),
        _ => {
            return Err(AppError::Internal(
                "Google OAuth is not configured".to_string(),
            ));
        }
    };

    let client = reqwest::Client::new();

    let token: GoogleTokenResponse = client
        .post("https://oauth2.googleapis.com/token")
        .form(&[
            ("code", q.code.as_str()),
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("redirect_uri", callback_url),
            ("grant_type", "authorization_code"),
        ])
        .send()
        .await
        .map_err(|e| AppError::Internal(format!("OAuth token exchange failed: {}", e)))?
        .json()
        .await
        .map_err(|e| AppError::Internal(format!("Invalid OAuth token response: {}", e)))?;

    let info: GoogleUserInfo = client
        .get("https://www.googleapis.com/oauth2/v2/userinfo")
        .bearer_auth(&token.access_token)
        .send()
        .await
        .map_err(|e| AppError::Internal(format!("OAuth userinfo request failed: {}", e)))?
        .json()
        .await
        .map_err(|e| AppError::Internal(format!("Invalid OAuth userinfo response: {}", e)))?;

    let user = match User::get_by_email(&pool, &info.email).await? {
        Some(user) => user,
        None => {
            let username = info.name.unwrap_or_else(|| info.email.clone());
            let (user, _code) =
                User::create(&pool, &username, &info.email, None, "USER", true).await?;
            user
        }
    };

    if user.is_suspended {
        return Err(AppError::Forbidden("User is suspended".to_string()));
    }

    let token = jwt::sign_jwt(user.user_id, &user.email, &user.role, &config.jwt_secret)?;
    let jar = jar.add(jwt::token_cookie(token, config.production));

    Ok((jar, Redirect::temporary(&config.client_url)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consent_url_encodes_redirect_uri() {
        let url = consent_url("client-123", "https://app.example.com/cb?next=/home&lang=id")
            .unwrap();
        assert!(url.starts_with("https://accounts.google.com/o/oauth2/v2/auth?"));
        assert!(url.contains("client_id=client-123"));
        // Reserved characters in the callback stay inside the parameter value.
        assert!(url.contains(
            "redirect_uri=https%3A%2F%2Fapp.example.com%2Fcb%3Fnext%3D%2Fhome%26lang%3Did"
        ));
        assert!(url.contains("response_type=code"));
        assert!(url.contains("scope=profile+email"));
    }
}

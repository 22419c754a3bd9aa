// src/utils/mail.rs
//
// Delivers verification and reset codes over SMTP. When EMAIL_USER /
// EMAIL_PASS are not configured the mailer is disabled and sends are logged
// and skipped, so local development works without credentials.

use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::header::ContentType, transport::smtp::authentication::Credentials,
};

use crate::{config::Config, error::AppError};

#[derive(Clone)]
pub struct Mailer {
    from: Option<String>,
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
}

impl Mailer {
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let (user, pass) = match (&config.email_user, &config.email_pass) {
            (Some(user), Some(pass)) => (user.clone(), pass.clone()),
            _ => {
                return Ok(Self {
                    from: None,
                    transport: None,
                });
            }
        };

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
            .map_err(|e| AppError::Internal(format!("Failed to build SMTP transport: {}", e)))?
            .credentials(Credentials::new(user.clone(), pass))
            .build();

        Ok(Self {
            from: Some(user),
            transport: Some(transport),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.transport.is_some()
    }

    async fn send(&self, to: &str, subject: &str, body: String) -> Result<(), AppError> {
        let (from, transport) = match (&self.from, &self.transport) {
            (Some(from), Some(transport)) => (from, transport),
            _ => {
                tracing::warn!("Mailer not configured, skipping mail to {}", to);
                return Ok(());
            }
        };

        let email = Message::builder()
            .from(from
                .parse()
                .map_err(|e| AppError::Internal(format!("Invalid sender address: {}", e)))?)
            .to(to
                .parse()
                .map_err(|e| AppError::BadRequest(format!("Invalid recipient address: {}", e)))?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| AppError::Internal(format!("Failed to build email: {}", e)))?;

        transport
            .send(email)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to send email: {}", e)))?;

        Ok(())
    }

    pub async fn send_verification_code(&self, to: &str, code: &str) -> Result<(), AppError> {
        self.send(
            to,
            "Email Verification",
            format!("Your verification code is: {}", code),
        )
        .await
    }

    pub async fn resend_verification_code(&self, to: &str, code: &str) -> Result<(), AppError> {
        self.send(
            to,
            "Resend Email Verification",
            format!("Your new verification code is: {}", code),
        )
        .await
    }

    pub async fn send_reset_code(&self, to: &str, code: &str) -> Result<(), AppError> {
        self.send(
            to,
            "Password Reset Request",
            format!("Your password reset code is: {}", code),
        )
        .await
    }
}

// src/utils/upload.rs
//
// Forwards uploaded image bytes to the Cloudinary unsigned-upload HTTP
// endpoint and hands back the hosted URL that gets persisted on the entity.

use axum::extract::multipart::Field;
use serde::Deserialize;

use crate::{config::Config, error::AppError};

/// One file pulled out of a multipart form.
pub struct UploadedFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub async fn from_field(field: Field<'_>) -> Result<Self, AppError> {
        let filename = field.file_name().unwrap_or("upload").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read uploaded file: {}", e)))?
            .to_vec();

        Ok(Self {
            filename,
            content_type,
            bytes,
        })
    }
}

#[derive(Debug, Deserialize)]
struct CloudinaryResponse {
    secure_url: String,
}

/// HTTP client for the cloud image host.
#[derive(Clone)]
pub struct ImageHost {
    client: reqwest::Client,
    upload_url: Option<String>,
    upload_preset: Option<String>,
}

impl ImageHost {
    pub fn from_config(config: &Config) -> Self {
        let upload_url = config.cloudinary_cloud_name.as_ref().map(|cloud| {
            format!("https://api.cloudinary.com/v1_1/{}/image/upload", cloud)
        });

        Self {
            client: reqwest::Client::new(),
            upload_url,
            upload_preset: config.cloudinary_upload_preset.clone(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.upload_url.is_some() && self.upload_preset.is_some()
    }

    /// Uploads the file into `folder` (e.g. "actors", "flags", "posters")
    /// and returns the hosted URL.
    pub async fn upload(&self, file: UploadedFile, folder: &str) -> Result<String, AppError> {
        let (url, preset) = match (&self.upload_url, &self.upload_preset) {
            (Some(url), Some(preset)) => (url, preset),
            _ => {
                return Err(AppError::Internal(
                    "Image host is not configured".to_string(),
                ));
            }
        };

        let part = reqwest::multipart::Part::bytes(file.bytes)
            .file_name(file.filename)
            .mime_str(&file.content_type)
            .map_err(|e| AppError::BadRequest(format!("Invalid file content type: {}", e)))?;

        let form = reqwest::multipart::Form::new()
            .text("upload_preset", preset.clone())
            .text("folder", folder.to_string())
            .part("file", part);

        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to upload image: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Internal(format!(
                "Image host rejected upload ({}): {}",
                status, body
            )));
        }

        let parsed: CloudinaryResponse = response
            .json()
            .await
            .map_err(|e| AppError::Internal(format!("Invalid image host response: {}", e)))?;

        Ok(parsed.secure_url)
    }
}

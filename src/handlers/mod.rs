// src/handlers/mod.rs

pub mod actor;
pub mod auth;
pub mod award;
pub mod comment;
pub mod country;
pub mod genre;
pub mod movie;
pub mod platform;
pub mod user;

use std::collections::HashMap;

use axum::extract::Multipart;

use crate::error::AppError;
use crate::utils::upload::UploadedFile;

/// Text fields and the (optional, single) file of a multipart form.
pub struct FormData {
    fields: HashMap<String, String>,
    pub file: Option<UploadedFile>,
}

impl FormData {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(|s| s.as_str())
    }

    /// Field value with empty strings treated as absent.
    pub fn get_non_empty(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|v| !v.is_empty())
    }
}

/// Drains a multipart body into text fields plus at most one file part.
/// Parts carrying a filename are treated as the upload; the last one wins.
pub async fn read_form(mut multipart: Multipart) -> Result<FormData, AppError> {
    let mut fields = HashMap::new();
    let mut file = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart form: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if field.file_name().is_some() {
            file = Some(UploadedFile::from_field(field).await?);
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(format!("Invalid multipart form: {}", e)))?;
            fields.insert(name, value);
        }
    }

    Ok(FormData { fields, file })
}

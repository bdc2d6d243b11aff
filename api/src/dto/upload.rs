//! Multipart forms carrying one `image` file plus text fields

use std::collections::HashMap;

use actix_multipart::{Field, Multipart};
use futures_util::TryStreamExt;

use bo_core::errors::{DomainError, ValidationError};
use bo_core::services::storage::ImageUpload;

use crate::handlers::ApiError;

const IMAGE_FIELD: &str = "image";
const MAX_TEXT_FIELD_BYTES: usize = 16 * 1024;
/// Parts accepted per form, the image included
const MAX_PARTS: usize = 16;

#[derive(Debug, Default)]
pub struct UploadForm {
    fields: HashMap<String, String>,
    image: Option<ImageUpload>,
}

impl UploadForm {
    /// Drain a multipart payload. An image larger than `max_image_bytes`
    /// is rejected while streaming.
    pub async fn read(mut payload: Multipart, max_image_bytes: usize) -> Result<Self, ApiError> {
        let mut form = Self::default();
        let mut parts = 0;

        while let Some(mut field) = payload.try_next().await.map_err(malformed)? {
            parts += 1;
            if parts > MAX_PARTS {
                return Err(ApiError::bad_request(format!(
                    "A form may carry at most {} fields",
                    MAX_PARTS
                )));
            }
            let disposition = field.content_disposition().clone();
            let name = disposition.get_name().unwrap_or_default().to_string();

            if name == IMAGE_FIELD {
                if form.image.is_some() {
                    return Err(ApiError::bad_request("Only one image may be uploaded"));
                }
                let content_type = field
                    .content_type()
                    .map(|mime| mime.essence_str().to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());
                let bytes = read_field(&mut field, max_image_bytes)
                    .await?
                    .ok_or(ValidationError::FileTooLarge {
                        max_bytes: max_image_bytes,
                    })
                    .map_err(DomainError::from)?;
                form.image = Some(ImageUpload {
                    file_name: disposition.get_filename().unwrap_or("upload").to_string(),
                    content_type,
                    bytes,
                });
            } else {
                let bytes = read_field(&mut field, MAX_TEXT_FIELD_BYTES)
                    .await?
                    .ok_or_else(|| ApiError::bad_request(format!("Field {} is too long", name)))?;
                let value = String::from_utf8(bytes)
                    .map_err(|_| ApiError::bad_request(format!("Field {} is not valid UTF-8", name)))?;
                form.fields.insert(name, value);
            }
        }

        Ok(form)
    }

    /// Trimmed text field; blank counts as absent
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    pub fn require_text(&self, name: &str) -> Result<&str, DomainError> {
        self.text(name)
            .ok_or_else(|| ValidationError::required(name).into())
    }

    /// Numeric text field
    pub fn integer(&self, name: &str) -> Result<Option<i64>, DomainError> {
        self.text(name)
            .map(|value| {
                value.parse::<i64>().map_err(|_| {
                    ValidationError::InvalidFormat {
                        field: name.to_string(),
                    }
                    .into()
                })
            })
            .transpose()
    }

    pub fn take_image(&mut self) -> Option<ImageUpload> {
        self.image.take()
    }

    pub fn require_image(&mut self) -> Result<ImageUpload, DomainError> {
        self.take_image()
            .ok_or_else(|| ValidationError::required(IMAGE_FIELD).into())
    }
}

fn malformed(err: actix_multipart::MultipartError) -> ApiError {
    ApiError::bad_request(format!("Invalid multipart body: {}", err))
}

/// Collect a field's bytes, or `None` once it grows past `limit`
async fn read_field(field: &mut Field, limit: usize) -> Result<Option<Vec<u8>>, ApiError> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.try_next().await.map_err(malformed)? {
        if bytes.len() + chunk.len() > limit {
            return Ok(None);
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(Some(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(fields: &[(&str, &str)]) -> UploadForm {
        UploadForm {
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            image: None,
        }
    }

    #[test]
    fn blank_text_is_absent() {
        let form = form(&[("name", "  "), ("rating", " 4 ")]);
        assert_eq!(form.text("name"), None);
        assert!(form.require_text("name").is_err());
        assert_eq!(form.integer("rating").unwrap(), Some(4));
    }

    #[test]
    fn non_numeric_rating_is_invalid() {
        let form = form(&[("rating", "five")]);
        assert!(form.integer("rating").is_err());
    }

    #[test]
    fn missing_image_is_required() {
        let mut form = form(&[]);
        let err = form.require_image().unwrap_err();
        assert_eq!(err, ValidationError::required("image").into());
    }
}

//! Common utilities for file upload handlers

use axum::extract::Multipart;
use bytes::Bytes;
use reelvault_core::AppError;

/// Normalize a MIME type by stripping parameters and case
/// (e.g. "video/mp4; codecs=avc1" -> "video/mp4").
pub fn normalize_media_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .map(|s| s.trim())
        .unwrap_or(content_type)
        .to_lowercase()
}

/// Extract the named file field from a multipart form.
///
/// Returns the field's bytes and declared content type. Exactly one field
/// with the given name is accepted; anything else about the form that we
/// cannot process maps to a 422.
pub async fn extract_multipart_field(
    mut multipart: Multipart,
    field_name: &str,
) -> Result<(Bytes, String), AppError> {
    let mut file_data: Option<Bytes> = None;
    let mut content_type: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::UnprocessableForm(format!("Failed to read multipart form: {}", e)))?
    {
        let name = field.name().map(|s| s.to_string()).unwrap_or_default();

        if name == field_name {
            if file_data.is_some() {
                return Err(AppError::UnprocessableForm(format!(
                    "Multiple '{}' fields are not allowed",
                    field_name
                )));
            }
            content_type = field.content_type().map(|s: &str| s.to_string());

            let data = field.bytes().await.map_err(|e| {
                AppError::UnprocessableForm(format!("Failed to read file data: {}", e))
            })?;

            file_data = Some(data);
        }
    }

    let file_data = file_data.ok_or_else(|| {
        AppError::UnprocessableForm(format!("Missing '{}' form field", field_name))
    })?;

    let content_type =
        content_type.unwrap_or_else(|| "application/octet-stream".to_string());

    Ok((file_data, content_type))
}

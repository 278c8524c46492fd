//! Media download and `data:` URI encoding.

use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::header::CONTENT_TYPE;

use crate::{error::AppError, model::guild::MediaPayload};

const DEFAULT_CONTENT_TYPE: &str = "image/png";

/// Downloads a file over HTTP.
///
/// # Arguments
/// - `client` - Shared reqwest client
/// - `url` - URL of the image, usually a Discord CDN link
///
/// # Returns
/// - `Ok(MediaPayload)` - Body and content type (`image/png` when the server sent none)
/// - `Err(AppError::ReqwestErr)` - Request failed or returned a non-success status
pub async fn download(client: &reqwest::Client, url: &str) -> Result<MediaPayload, AppError> {
    let response = client.get(url).send().await?.error_for_status()?;

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or(DEFAULT_CONTENT_TYPE)
        .to_string();
    let bytes = response.bytes().await?.to_vec();

    Ok(MediaPayload {
        content_type,
        bytes,
    })
}

/// Encodes a payload as `data:<mime>;base64,<data>`, the form Discord accepts for
/// image uploads.
pub fn to_data_uri(payload: &MediaPayload) -> String {
    format!(
        "data:{};base64,{}",
        payload.content_type,
        STANDARD.encode(&payload.bytes)
    )
}

/// Decodes a `data:` URI back into raw bytes.
///
/// # Returns
/// - `Ok(MediaPayload)` - Decoded content type and bytes
/// - `Err(AppError::BadRequest)` - Not a base64 `data:` URI
pub fn from_data_uri(uri: &str) -> Result<MediaPayload, AppError> {
    let invalid = || AppError::BadRequest("Invalid base64 image data".to_string());

    let rest = uri.strip_prefix("data:").ok_or_else(invalid)?;
    let (content_type, data) = rest.split_once(";base64,").ok_or_else(invalid)?;
    let bytes = STANDARD.decode(data).map_err(|_| invalid())?;

    Ok(MediaPayload {
        content_type: content_type.to_string(),
        bytes,
    })
}

use base64::{engine::general_purpose, Engine as _};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("The provided URL is not an image")]
    NotAnImage,
    #[error("Failed to fetch image: {0}")]
    Fetch(#[from] reqwest::Error),
}

/// Image fetched and inlined as a data URI
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidImage {
    pub data_uri: String,
    pub content_type: String,
}

impl ValidImage {
    /// Size of the decoded image in bytes
    pub fn byte_len(&self) -> usize {
        let payload = self.data_uri.rsplit(',').next().unwrap_or_default();
        payload.len() / 4 * 3 - payload.chars().rev().take_while(|c| *c == '=').count()
    }
}

/// Fetch `url` and inline it when the server declares an image content type
pub async fn validate_image_url(http: &Client, url: &str) -> Result<ValidImage, ImageError> {
    let response = http.get(url).send().await?.error_for_status()?;

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .filter(|ct| ct.starts_with("image/"))
        .map(str::to_string)
        .ok_or(ImageError::NotAnImage)?;

    let bytes = response.bytes().await?;
    let encoded = general_purpose::STANDARD.encode(&bytes);

    Ok(ValidImage {
        data_uri: format!("data:{};base64,{}", content_type, encoded),
        content_type,
    })
}

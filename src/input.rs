//! Classification of free-form user input
//!
//! A single message may carry several Figma links, several image links and
//! one inline image at the same time; every category found is reported.

use crate::api::FigmaUrl;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+").expect("valid URL pattern"));

static IMAGE_EXTENSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\.(jpg|jpeg|png|gif|webp|svg)(\?.*)?$").expect("valid extension pattern")
});

static IMAGE_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)/images?/").expect("valid image path pattern"));

static DATA_URI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"data:image/[^;]+;base64,[a-zA-Z0-9+/]+=*").expect("valid data URI pattern")
});

/// Image hosts recognised regardless of path shape
const IMAGE_HOSTS: &[&str] = &["imgur.com", "ibb.co"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputType {
    FigmaUrl,
    ImageUrl,
    ImageData,
}

impl std::fmt::Display for InputType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputType::FigmaUrl => write!(f, "figma_url"),
            InputType::ImageUrl => write!(f, "image_url"),
            InputType::ImageData => write!(f, "image_data"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaUrlMatch {
    pub url: String,
    pub figma_info: FigmaUrl,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageUrlMatch {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputAnalysis {
    pub figma_urls: Vec<FigmaUrlMatch>,
    pub image_urls: Vec<ImageUrlMatch>,
    pub has_data_uri: bool,
    /// Empty when no inline image was found
    pub data_uri: String,
    pub original_text: String,
    /// Categories present, in `figma_url`, `image_url`, `image_data` order
    pub types: Vec<InputType>,
    pub is_multi_type_input: bool,
    pub is_plain_text: bool,
}

/// Classify every URL and the first inline image found in `text`
pub fn classify(text: &str) -> InputAnalysis {
    let mut figma_urls = Vec::new();
    let mut image_urls = Vec::new();

    for found in URL_PATTERN.find_iter(text) {
        let url = found.as_str();

        if FigmaUrl::is_figma_url(url) {
            if let Some(figma_info) = FigmaUrl::parse(url) {
                figma_urls.push(FigmaUrlMatch {
                    url: url.to_string(),
                    figma_info,
                });
                continue;
            }
        }

        if looks_like_image(url) {
            image_urls.push(ImageUrlMatch {
                url: url.to_string(),
            });
        }
    }

    let data_uri = DATA_URI
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();
    let has_data_uri = !data_uri.is_empty();

    let mut types = Vec::new();
    if !figma_urls.is_empty() {
        types.push(InputType::FigmaUrl);
    }
    if !image_urls.is_empty() {
        types.push(InputType::ImageUrl);
    }
    if has_data_uri {
        types.push(InputType::ImageData);
    }

    InputAnalysis {
        figma_urls,
        image_urls,
        has_data_uri,
        data_uri,
        original_text: text.to_string(),
        is_multi_type_input: types.len() > 1,
        is_plain_text: types.is_empty(),
        types,
    }
}

/// Heuristic: image extension, an `/image/` or `/images/` path, or a known image host
pub fn looks_like_image(url: &str) -> bool {
    IMAGE_EXTENSION.is_match(url)
        || IMAGE_PATH.is_match(url)
        || IMAGE_HOSTS.iter().any(|host| url.contains(host))
}

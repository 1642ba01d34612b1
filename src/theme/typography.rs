use super::push_unique;
use crate::api::types::{DesignFile, Node, TypeStyle};
use serde::Serialize;

/// Distinct typography seen across the TEXT nodes of a file
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypographyProfile {
    pub font_families: Vec<String>,
    /// Ascending numeric order
    pub font_sizes: Vec<f64>,
    /// `family-size-weight-italic|normal` keys
    pub text_styles: Vec<String>,
}

pub fn extract_typography(file: &DesignFile) -> TypographyProfile {
    let mut profile = TypographyProfile::default();
    if let Some(document) = &file.document {
        collect_typography(document, &mut profile);
    }
    profile.font_sizes.sort_by(|a, b| a.total_cmp(b));
    profile
}

fn collect_typography(node: &Node, profile: &mut TypographyProfile) {
    if node.is_text() {
        if let Some(style) = &node.style {
            if let Some(family) = present_family(style) {
                push_unique(&mut profile.font_families, family.to_string());
            }
            if let Some(size) = present_number(style.font_size) {
                push_unique(&mut profile.font_sizes, size);
            }
            push_unique(&mut profile.text_styles, style_key(style));
        }
    }
    for child in node.children() {
        collect_typography(child, profile);
    }
}

fn present_family(style: &TypeStyle) -> Option<&str> {
    style.font_family.as_deref().filter(|f| !f.is_empty())
}

/// Zero and NaN count as absent
fn present_number(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0 && !v.is_nan())
}

fn style_key(style: &TypeStyle) -> String {
    let family = present_family(style).unwrap_or("Unknown");
    let size = present_number(style.font_size).unwrap_or(0.0);
    let weight = present_number(style.font_weight)
        .map(|w| w.to_string())
        .unwrap_or_else(|| "normal".to_string());
    let slant = if style.italic.unwrap_or(false) {
        "italic"
    } else {
        "normal"
    };
    format!("{}-{}-{}-{}", family, size, weight, slant)
}

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// File payload returned by /v1/files/:key
///
/// Every field is optional: responses are read leniently and absent values fall
/// back to neutral defaults in the consumers.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignFile {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub last_modified: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub version: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub thumbnail_url: Option<String>,
    pub document: Option<Node>,
    #[serde(default, deserialize_with = "lenient")]
    pub styles: Option<Map<String, Value>>,
}

impl DesignFile {
    /// Decode a raw API response without mutating it
    ///
    /// Roots that are neither objects nor `null` carry no fields and decode to
    /// the defaults; only `null` and a malformed `document` tree are errors.
    pub fn from_value(raw: &Value) -> Result<Self, serde_json::Error> {
        match raw {
            Value::Object(_) | Value::Null => Self::deserialize(raw),
            _ => Ok(Self::default()),
        }
    }
}

/// Metadata of the wrong JSON type reads as absent
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Generic node in the Figma document tree
#[derive(Debug, Default, Deserialize)]
pub struct Node {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub node_type: Option<String>,
    pub children: Option<Vec<Node>>,
    pub fills: Option<Vec<Paint>>,
    pub strokes: Option<Vec<Paint>>,
    pub style: Option<TypeStyle>,
}

impl Node {
    pub fn kind(&self) -> &str {
        self.node_type.as_deref().unwrap_or_default()
    }

    pub fn fills(&self) -> &[Paint] {
        self.fills.as_deref().unwrap_or_default()
    }

    pub fn strokes(&self) -> &[Paint] {
        self.strokes.as_deref().unwrap_or_default()
    }

    pub fn children(&self) -> &[Node] {
        self.children.as_deref().unwrap_or_default()
    }

    pub fn is_text(&self) -> bool {
        self.kind() == "TEXT"
    }
}

/// Paint (fill or stroke)
#[derive(Debug, Default, Deserialize)]
pub struct Paint {
    #[serde(rename = "type")]
    pub paint_type: Option<String>,
    pub color: Option<Color>,
}

impl Paint {
    /// Hex value of a solid paint, `None` for gradients, images and colorless paints
    pub fn solid_hex(&self) -> Option<String> {
        if self.paint_type.as_deref() != Some("SOLID") {
            return None;
        }
        self.color.as_ref().map(Color::to_hex)
    }
}

/// RGB color with channels in `[0, 1]`; alpha is ignored
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct Color {
    #[serde(default)]
    pub r: f64,
    #[serde(default)]
    pub g: f64,
    #[serde(default)]
    pub b: f64,
}

impl Color {
    /// Convert to lowercase hex string (#rrggbb)
    pub fn to_hex(&self) -> String {
        format!(
            "#{:02x}{:02x}{:02x}",
            channel_to_byte(self.r),
            channel_to_byte(self.g),
            channel_to_byte(self.b)
        )
    }
}

fn channel_to_byte(channel: f64) -> u8 {
    // NaN saturates to 0 in the cast
    (channel * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Typography style of a TEXT node
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeStyle {
    pub font_family: Option<String>,
    pub font_size: Option<f64>,
    pub font_weight: Option<f64>,
    pub italic: Option<bool>,
}

/// Image export response from /v1/images/:key
#[derive(Debug, Default, Deserialize)]
pub struct ImageResponse {
    #[serde(default)]
    pub images: HashMap<String, Option<String>>,
    pub err: Option<String>,
}

impl ImageResponse {
    pub fn url_for(&self, node_id: &str) -> Option<&str> {
        self.images.get(node_id).and_then(|u| u.as_deref())
    }
}

/// Light file summary without the design tree
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    pub name: Option<String>,
    pub last_modified: Option<String>,
    pub version: Option<String>,
    pub thumbnail_url: Option<String>,
    pub document_info: DocumentSummary,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSummary {
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub node_type: Option<String>,
    pub children_count: usize,
}

impl From<DesignFile> for FileInfo {
    fn from(file: DesignFile) -> Self {
        let document_info = file
            .document
            .map(|doc| DocumentSummary {
                children_count: doc.children().len(),
                id: doc.id,
                name: doc.name,
                node_type: doc.node_type,
            })
            .unwrap_or_default();

        Self {
            name: file.name,
            last_modified: file.last_modified,
            version: file.version,
            thumbnail_url: file.thumbnail_url,
            document_info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_hex_rounds_and_pads() {
        let red = Color { r: 1.0, g: 0.0, b: 0.0 };
        assert_eq!(red.to_hex(), "#ff0000");

        let grey = Color { r: 0.5, g: 0.5, b: 0.5 };
        assert_eq!(grey.to_hex(), "#808080");

        let near_black = Color { r: 0.01, g: 0.0, b: 0.0 };
        assert_eq!(near_black.to_hex(), "#030000");
    }

    #[test]
    fn test_hex_clamps_out_of_range_channels() {
        let odd = Color { r: 1.5, g: -0.2, b: f64::NAN };
        assert_eq!(odd.to_hex(), "#ff0000");
    }

    #[test]
    fn test_non_solid_paint_has_no_hex() {
        let paint: Paint = serde_json::from_value(json!({
            "type": "GRADIENT_LINEAR",
            "color": { "r": 1, "g": 1, "b": 1 }
        }))
        .unwrap();
        assert_eq!(paint.solid_hex(), None);

        let colorless: Paint = serde_json::from_value(json!({ "type": "SOLID" })).unwrap();
        assert_eq!(colorless.solid_hex(), None);
    }

    #[test]
    fn test_lenient_decode_ignores_unknown_fields() {
        let raw = json!({
            "name": "Landing",
            "schemaVersion": 14,
            "document": {
                "id": "0:0",
                "type": "DOCUMENT",
                "children": [{ "id": "0:1", "type": "CANVAS", "absoluteBoundingBox": null }]
            }
        });
        let file = DesignFile::from_value(&raw).unwrap();
        let document = file.document.unwrap();
        assert_eq!(document.kind(), "DOCUMENT");
        assert_eq!(document.children().len(), 1);
        assert!(document.children()[0].fills().is_empty());
    }

    #[test]
    fn test_file_info_counts_pages() {
        let raw = json!({
            "name": "Landing",
            "version": "42",
            "thumbnailUrl": "https://cdn.example.com/t.png",
            "document": { "id": "0:0", "name": "Document", "type": "DOCUMENT", "children": [{}, {}] }
        });
        let info = FileInfo::from(DesignFile::from_value(&raw).unwrap());
        assert_eq!(info.document_info.children_count, 2);
        assert_eq!(info.document_info.node_type.as_deref(), Some("DOCUMENT"));
        assert_eq!(info.version.as_deref(), Some("42"));
    }
}

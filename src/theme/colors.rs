use super::push_unique;
use crate::api::types::{DesignFile, Node};

/// Collect every distinct solid fill and stroke color as `#rrggbb`
///
/// Pre-order walk from the document root; colors appear in first-seen order.
pub fn extract_colors(file: &DesignFile) -> Vec<String> {
    let mut colors = Vec::new();
    if let Some(document) = &file.document {
        collect_colors(document, &mut colors);
    }
    colors
}

fn collect_colors(node: &Node, colors: &mut Vec<String>) {
    for paint in node.fills().iter().chain(node.strokes()) {
        if let Some(hex) = paint.solid_hex() {
            push_unique(colors, hex);
        }
    }
    for child in node.children() {
        collect_colors(child, colors);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn colors_of(raw: Value) -> Vec<String> {
        extract_colors(&DesignFile::from_value(&raw).unwrap())
    }

    #[test]
    fn test_no_document_no_colors() {
        assert!(colors_of(json!({})).is_empty());
        assert!(colors_of(json!({ "document": { "type": "DOCUMENT" } })).is_empty());
    }

    #[test]
    fn test_fills_and_strokes_are_collected() {
        let colors = colors_of(json!({
            "document": {
                "type": "DOCUMENT",
                "children": [{
                    "type": "FRAME",
                    "fills": [{ "type": "SOLID", "color": { "r": 1, "g": 0, "b": 0, "a": 1 } }],
                    "strokes": [{ "type": "SOLID", "color": { "r": 0, "g": 0, "b": 1, "a": 1 } }],
                    "children": [{
                        "type": "RECTANGLE",
                        "fills": [
                            { "type": "IMAGE", "imageRef": "abc" },
                            { "type": "SOLID", "color": { "r": 0, "g": 1, "b": 0, "a": 0.5 } }
                        ]
                    }]
                }]
            }
        }));
        assert_eq!(colors, vec!["#ff0000", "#0000ff", "#00ff00"]);
    }

    #[test]
    fn test_duplicates_collapse_after_rounding() {
        let colors = colors_of(json!({
            "document": {
                "children": [
                    { "fills": [{ "type": "SOLID", "color": { "r": 1, "g": 0, "b": 0 } }] },
                    { "fills": [{ "type": "SOLID", "color": { "r": 1, "g": 0, "b": 0.001 } }] },
                    { "strokes": [{ "type": "SOLID", "color": { "r": 1, "g": 0, "b": 0 } }] }
                ]
            }
        }));
        assert_eq!(colors, vec!["#ff0000"]);
    }

    #[test]
    fn test_gradients_are_ignored() {
        let colors = colors_of(json!({
            "document": {
                "fills": [{ "type": "GRADIENT_RADIAL", "gradientStops": [] }]
            }
        }));
        assert!(colors.is_empty());
    }
}

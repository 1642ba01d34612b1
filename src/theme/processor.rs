use super::{extract_colors, extract_typography, TypographyProfile};
use crate::api::types::{DesignFile, Node};
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

const DEFAULT_NAME: &str = "Untitled";
const DEFAULT_DOCUMENT_TYPE: &str = "DOCUMENT";

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("Failed to process Figma data: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Top-level file metadata with every fallback spelled out
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentInfo {
    pub name: String,
    pub last_modified: String,
    pub version: String,
    pub document_type: String,
}

impl Default for DocumentInfo {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            last_modified: String::new(),
            version: String::new(),
            document_type: DEFAULT_DOCUMENT_TYPE.to_string(),
        }
    }
}

impl DocumentInfo {
    fn from_file(file: &DesignFile) -> Self {
        let defaults = Self::default();
        Self {
            name: non_empty(file.name.as_deref(), defaults.name),
            last_modified: non_empty(file.last_modified.as_deref(), defaults.last_modified),
            version: non_empty(file.version.as_deref(), defaults.version),
            document_type: non_empty(
                file.document.as_ref().and_then(|d| d.node_type.as_deref()),
                defaults.document_type,
            ),
        }
    }
}

fn non_empty(value: Option<&str>, fallback: String) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => fallback,
    }
}

/// One page (direct child of the document)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: String,
    pub child_count: usize,
}

impl From<&Node> for PageInfo {
    fn from(page: &Node) -> Self {
        Self {
            id: page.id.clone().unwrap_or_default(),
            name: page.name.clone().unwrap_or_default(),
            node_type: page.node_type.clone().unwrap_or_default(),
            child_count: page.children().len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Theme {
    pub colors: Vec<String>,
    pub typography: TypographyProfile,
}

/// Summary of a raw file response, with the input kept for later analysis
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedDesign {
    pub document_info: DocumentInfo,
    pub pages_info: Vec<PageInfo>,
    pub styles: Map<String, Value>,
    pub theme: Theme,
    pub raw_data: Value,
}

/// Summarise a raw Figma file response
///
/// Absent or wrongly typed metadata falls back to defaults; only a `null`
/// root or a malformed `document` tree is reported as an error.
pub fn process(raw: &Value) -> Result<ProcessedDesign, ProcessError> {
    let file = DesignFile::from_value(raw)?;

    let pages_info: Vec<PageInfo> = file
        .document
        .as_ref()
        .map(|doc| doc.children().iter().map(PageInfo::from).collect())
        .unwrap_or_default();

    Ok(ProcessedDesign {
        document_info: DocumentInfo::from_file(&file),
        pages_info,
        styles: file.styles.clone().unwrap_or_default(),
        theme: Theme {
            colors: extract_colors(&file),
            typography: extract_typography(&file),
        },
        raw_data: raw.clone(),
    })
}

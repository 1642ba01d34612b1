use super::process::print_theme;
use super::{is_local, load_design};
use crate::api::types::DesignFile;
use crate::api::FigmaUrl;
use crate::cli::SourceArgs;
use crate::config::Config;
use crate::output;
use crate::theme::processor::Theme;
use crate::theme::{extract_colors, extract_typography};
use anyhow::{anyhow, Result};
use serde_json::{json, Value};

pub async fn run(source: SourceArgs, node: Option<String>, config: &Config) -> Result<()> {
    let node = node.or_else(|| {
        if is_local(&source.source) {
            None
        } else {
            FigmaUrl::resolve(&source.source).and_then(|url| url.node_id)
        }
    });

    let data = load_design(config, &source.source, node.as_deref()).await?;
    let data = match &node {
        Some(node_id) => node_document(&data, node_id)?,
        None => data,
    };

    let file = DesignFile::from_value(&data)
        .map_err(|e| anyhow!("Failed to process Figma data: {}", e))?;
    let theme = Theme {
        colors: extract_colors(&file),
        typography: extract_typography(&file),
    };

    if output::is_json() {
        output::print_json(&theme)?;
    } else {
        print_theme(&theme);
    }
    Ok(())
}

/// Re-root a `/nodes` response on one node so the extractors can walk it
fn node_document(data: &Value, node_id: &str) -> Result<Value> {
    let document = data
        .get("nodes")
        .and_then(|nodes| nodes.get(node_id))
        .and_then(|entry| entry.get("document"))
        .ok_or_else(|| anyhow!("Node {} not found in response", node_id))?;
    Ok(json!({ "document": document }))
}

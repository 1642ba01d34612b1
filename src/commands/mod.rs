pub mod classify;
pub mod config;
pub mod files;
pub mod images;
pub mod process;
pub mod prompt;
pub mod theme;
pub mod tools;
pub mod validate;

use crate::api::{FigmaClient, FigmaUrl};
use crate::auth::get_token_with_source;
use crate::config::Config;
use crate::output;
use anyhow::{anyhow, Context, Result};
use serde_json::Value;
use std::io::Read;
use std::path::Path;

/// Client for the configured API root with the resolved token, if any
pub(crate) fn figma_client(config: &Config) -> Result<FigmaClient> {
    let token = match get_token_with_source(config) {
        Some(found) => {
            output::print_verbose(&format!("Using token from {}", found.source));
            Some(found.token)
        }
        None => {
            output::print_verbose("No Figma token found");
            None
        }
    };
    FigmaClient::with_base_url(token, config.api.base_url.as_str())
}

pub(crate) fn resolve_target(input: &str) -> Result<FigmaUrl> {
    FigmaUrl::resolve(input).ok_or_else(|| anyhow!("Invalid Figma URL: {}", input))
}

/// Read an argument file, or stdin for `None` and `-`
pub(crate) fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        None | Some("-") => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
        Some(path) => std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path)),
    }
}

pub(crate) fn is_local(source: &str) -> bool {
    source == "-" || Path::new(source).is_file()
}

/// Load design JSON from a saved file, stdin, or the API
///
/// With a node id the API is asked for that node only and the answer keeps
/// the `/nodes` response shape. Local input is returned as-is.
pub(crate) async fn load_design(config: &Config, source: &str, node: Option<&str>) -> Result<Value> {
    if is_local(source) {
        let text = read_input(Some(source))?;
        return serde_json::from_str(&text).context("Input is not valid JSON");
    }

    let target = resolve_target(source)?;
    let client = figma_client(config)?;

    let data = match node {
        Some(node_id) => {
            output::print_status(&format!("Fetching node {} of {}...", node_id, target.file_key));
            client.get_node(&target.file_key, node_id).await?
        }
        None => {
            output::print_status(&format!("Fetching file {}...", target.file_key));
            client.get_file(&target.file_key).await?
        }
    };
    Ok(data)
}

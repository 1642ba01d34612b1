use super::{figma_client, resolve_target};
use crate::api::types::FileInfo;
use crate::api::{ApiResponse, FigmaClient};
use crate::cli::FilesCommands;
use crate::config::Config;
use crate::output;
use anyhow::{anyhow, Result};
use colored::Colorize;

pub async fn run(command: FilesCommands, config: &Config) -> Result<()> {
    let client = figma_client(config)?;

    match command {
        FilesCommands::Get { file_key_or_url } => get(&client, &file_key_or_url).await,
        FilesCommands::Node {
            file_key_or_url,
            node,
        } => node_data(&client, &file_key_or_url, node).await,
        FilesCommands::Info { file_key_or_url } => info(&client, &file_key_or_url).await,
    }
}

async fn get(client: &FigmaClient, file_key_or_url: &str) -> Result<()> {
    let target = resolve_target(file_key_or_url)?;
    output::print_status(&format!("Fetching file {}...", target.file_key));
    let result = client.get_file(&target.file_key).await;
    print_response(ApiResponse::from(result))
}

async fn node_data(client: &FigmaClient, file_key_or_url: &str, node: Option<String>) -> Result<()> {
    let target = resolve_target(file_key_or_url)?;
    let node_id = node
        .filter(|n| !n.is_empty())
        .or(target.node_id)
        .ok_or_else(|| anyhow!("Missing node ID: include node-id in the URL or pass --node"))?;

    output::print_status(&format!("Fetching node {} of {}...", node_id, target.file_key));
    let result = client.get_node(&target.file_key, &node_id).await;
    print_response(ApiResponse::from(result))
}

/// Raw data on stdout; in JSON mode the whole `{success, data|error}` envelope
fn print_response(response: ApiResponse<serde_json::Value>) -> Result<()> {
    if output::is_json() {
        output::print_json(&response)?;
    }
    match (response.data, response.error) {
        (_, Some(error)) => Err(error.into()),
        (Some(data), None) => {
            if !output::is_json() {
                output::print_json(&data)?;
            }
            Ok(())
        }
        (None, None) => Ok(()),
    }
}

async fn info(client: &FigmaClient, file_key_or_url: &str) -> Result<()> {
    let target = resolve_target(file_key_or_url)?;
    let info = client.get_file_info(&target.file_key).await?;

    if output::is_json() {
        output::print_json(&info)?;
        return Ok(());
    }
    print_info(&target.file_key, &info);
    Ok(())
}

fn print_info(file_key: &str, info: &FileInfo) {
    let or_dash = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());

    output::print_heading(&format!("File: {}", or_dash(&info.name)));
    output::print_raw(&format!("  Key: {}", file_key.cyan()));
    output::print_raw(&format!("  Last modified: {}", or_dash(&info.last_modified)));
    output::print_raw(&format!("  Version: {}", or_dash(&info.version)));
    if let Some(thumbnail) = &info.thumbnail_url {
        output::print_raw(&format!("  Thumbnail: {}", thumbnail.dimmed()));
    }

    let doc = &info.document_info;
    output::print_raw(&format!(
        "  Document: {} ({}) [{}], {} page(s)",
        or_dash(&doc.name),
        or_dash(&doc.node_type).dimmed(),
        or_dash(&doc.id).cyan(),
        doc.children_count
    ));
}

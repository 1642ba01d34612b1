use super::{figma_client, resolve_target};
use crate::api::types::ImageResponse;
use crate::api::{FigmaClient, FigmaUrl, NodeImageRequest};
use crate::cli::ImagesCommands;
use crate::config::Config;
use crate::output;
use anyhow::{bail, Result};
use colored::Colorize;
use std::path::PathBuf;
use tabled::Tabled;

#[derive(Tabled)]
struct UrlRow {
    #[tabled(rename = "Node")]
    node_id: String,
    #[tabled(rename = "SVG URL")]
    url: String,
}

pub async fn run(command: ImagesCommands, config: &Config) -> Result<()> {
    let client = figma_client(config)?;

    match command {
        ImagesCommands::Urls {
            file_key_or_url,
            node,
        } => {
            let (file_key, node_ids) = targets(&file_key_or_url, node)?;
            urls(&client, &file_key, &node_ids).await
        }
        ImagesCommands::Download {
            file_key_or_url,
            node,
            output,
        } => {
            let (file_key, node_ids) = targets(&file_key_or_url, node)?;
            let dir = output
                .or_else(|| config.download.output_dir.as_ref().map(PathBuf::from))
                .unwrap_or_else(|| PathBuf::from("."));
            download(&client, &file_key, &node_ids, dir).await
        }
    }
}

/// File key plus node IDs from the flags and the URL's node-id
fn targets(file_key_or_url: &str, mut node_ids: Vec<String>) -> Result<(String, Vec<String>)> {
    let parsed = resolve_target(file_key_or_url)?;
    if let Some(url_node_id) = parsed.node_id {
        if !node_ids.contains(&url_node_id) {
            node_ids.push(url_node_id);
        }
    }
    if node_ids.is_empty() {
        bail!("No nodes specified. Use --node or a URL with ?node-id=");
    }
    Ok((parsed.file_key, node_ids))
}

async fn urls(client: &FigmaClient, file_key: &str, node_ids: &[String]) -> Result<()> {
    let raw = client.get_image_urls(file_key, node_ids).await?;
    if output::is_json() {
        output::print_json(&raw)?;
        return Ok(());
    }

    let images: ImageResponse = serde_json::from_value(raw)?;
    if let Some(err) = &images.err {
        output::print_warning(err);
    }
    let rows: Vec<UrlRow> = node_ids
        .iter()
        .map(|id| UrlRow {
            node_id: id.clone(),
            url: images.url_for(id).unwrap_or("-").to_string(),
        })
        .collect();
    output::print_table(&rows);
    Ok(())
}

async fn download(client: &FigmaClient, file_key: &str, node_ids: &[String], dir: PathBuf) -> Result<()> {
    let requests: Vec<NodeImageRequest> = node_ids
        .iter()
        .map(|id| NodeImageRequest {
            node_id: id.clone(),
            file_name: FigmaUrl::node_file_name(id),
        })
        .collect();

    output::print_status(&format!(
        "Exporting {} node(s) as SVG to {}...",
        requests.len(),
        dir.display()
    ));

    let pb = output::progress_bar(requests.len() as u64);
    let batch = client
        .download_nodes(file_key, &requests, &dir, |outcome| {
            pb.set_message(outcome.file_name.clone());
            pb.inc(1);
        })
        .await;
    pb.finish_and_clear();
    let batch = batch?;

    if output::is_json() {
        output::print_json(&batch)?;
    } else {
        for outcome in &batch.downloads {
            match (&outcome.path, &outcome.error) {
                (Some(path), _) => output::print_raw(&format!("  {} {}", "✓".green(), path)),
                (None, error) => output::print_raw(&format!(
                    "  {} {} ({})",
                    "✗".red(),
                    outcome.node_id,
                    error.as_deref().unwrap_or("unknown error")
                )),
            }
        }
    }

    let failed = batch.downloads.iter().filter(|d| !d.success).count();
    if failed > 0 {
        output::print_warning(&batch.message);
    } else {
        output::print_success(&batch.message);
    }
    Ok(())
}

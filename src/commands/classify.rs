use super::read_input;
use crate::input::{classify, InputAnalysis};
use crate::output;
use anyhow::Result;
use colored::Colorize;
use tabled::Tabled;

#[derive(Tabled)]
struct FoundRow {
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Node")]
    node: String,
}

pub async fn run(text: Vec<String>) -> Result<()> {
    let text = if text.is_empty() {
        read_input(None)?
    } else {
        text.join(" ")
    };

    let analysis = classify(&text);
    if output::is_json() {
        output::print_json(&analysis)?;
        return Ok(());
    }

    print_analysis(&analysis);
    Ok(())
}

fn print_analysis(analysis: &InputAnalysis) {
    if analysis.is_plain_text {
        output::print_raw(&format!("{}", "Plain text: no design links or images found".dimmed()));
        return;
    }

    let types: Vec<String> = analysis.types.iter().map(|t| t.to_string()).collect();
    output::print_heading(&format!("Detected: {}", types.join(", ")));
    if analysis.is_multi_type_input {
        output::print_status("Input mixes several design sources");
    }

    let mut rows: Vec<FoundRow> = analysis
        .figma_urls
        .iter()
        .map(|m| FoundRow {
            kind: "figma".to_string(),
            value: m.figma_info.file_key.clone(),
            node: m.figma_info.node_id.clone().unwrap_or_default(),
        })
        .collect();
    rows.extend(analysis.image_urls.iter().map(|m| FoundRow {
        kind: "image".to_string(),
        value: m.url.clone(),
        node: String::new(),
    }));
    if analysis.has_data_uri {
        rows.push(FoundRow {
            kind: "inline".to_string(),
            value: abbreviate(&analysis.data_uri, 48),
            node: String::new(),
        });
    }

    output::print_table(&rows);
}

/// Shorten long values for table cells
fn abbreviate(value: &str, max: usize) -> String {
    match value.char_indices().nth(max) {
        Some((cut, _)) => format!("{}…", &value[..cut]),
        None => value.to_string(),
    }
}

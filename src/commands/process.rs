use super::load_design;
use crate::cli::SourceArgs;
use crate::config::Config;
use crate::output;
use crate::theme::processor::Theme;
use crate::theme::{process, ProcessedDesign};
use anyhow::Result;
use colored::Colorize;
use tabled::Tabled;

#[derive(Tabled)]
struct PageRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Page")]
    name: String,
    #[tabled(rename = "Type")]
    node_type: String,
    #[tabled(rename = "Children")]
    child_count: usize,
}

pub async fn run(args: SourceArgs, config: &Config) -> Result<()> {
    let data = load_design(config, &args.source, None).await?;
    let design = process(&data)?;

    if output::is_json() {
        let mut value = serde_json::to_value(&design)?;
        // The input is already in the caller's hands
        if let Some(map) = value.as_object_mut() {
            map.remove("rawData");
        }
        output::print_json(&value)?;
        return Ok(());
    }

    print_summary(&design);
    Ok(())
}

fn print_summary(design: &ProcessedDesign) {
    let info = &design.document_info;
    output::print_heading(&format!("File: {}", info.name));
    output::print_raw(&format!("  Type: {}", info.document_type));
    if !info.last_modified.is_empty() {
        output::print_raw(&format!("  Last modified: {}", info.last_modified));
    }
    if !info.version.is_empty() {
        output::print_raw(&format!("  Version: {}", info.version));
    }
    output::print_raw(&format!("  Styles: {}", design.styles.len()));
    output::print_raw("");

    let pages: Vec<PageRow> = design
        .pages_info
        .iter()
        .map(|p| PageRow {
            id: p.id.clone(),
            name: p.name.clone(),
            node_type: p.node_type.clone(),
            child_count: p.child_count,
        })
        .collect();
    output::print_heading("Pages");
    output::print_table(&pages);
    output::print_raw("");

    print_theme(&design.theme);
}

/// Colors as swatches, then the typography profile
pub(crate) fn print_theme(theme: &Theme) {
    output::print_heading(&format!("Colors ({})", theme.colors.len()));
    for hex in &theme.colors {
        output::print_raw(&format!("  {} {}", swatch(hex), hex));
    }

    let typography = &theme.typography;
    output::print_heading("Typography");
    output::print_raw(&format!("  Families: {}", typography.font_families.join(", ")));
    let sizes: Vec<String> = typography.font_sizes.iter().map(|s| s.to_string()).collect();
    output::print_raw(&format!("  Sizes: {}", sizes.join(", ")));
    for style in &typography.text_styles {
        output::print_raw(&format!("  {}", style.dimmed()));
    }
}

/// Two-cell block in the color itself
fn swatch(hex: &str) -> String {
    let channel = |i: usize| {
        hex.get(i..i + 2)
            .and_then(|h| u8::from_str_radix(h, 16).ok())
            .unwrap_or(0)
    };
    "  ".on_truecolor(channel(1), channel(3), channel(5)).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swatch_tolerates_bad_hex() {
        colored::control::set_override(false);
        assert_eq!(swatch("#zz"), "  ");
        assert_eq!(swatch("#ff8000"), "  ");
    }
}

use super::{figma_client, read_input};
use crate::cli::ToolsCommands;
use crate::config::Config;
use crate::output;
use crate::tools::{specs, Toolbox};
use anyhow::{Context, Result};
use colored::Colorize;
use serde_json::Value;
use tabled::Tabled;

#[derive(Tabled)]
struct ToolRow {
    #[tabled(rename = "Tool")]
    id: &'static str,
    #[tabled(rename = "Description")]
    description: &'static str,
}

pub async fn run(command: ToolsCommands, config: &Config) -> Result<()> {
    match command {
        ToolsCommands::List { schemas } => list(schemas),
        ToolsCommands::Call { id, args } => call(&id, &args, config).await,
    }
}

fn list(schemas: bool) -> Result<()> {
    let specs = specs();
    if output::is_json() {
        output::print_json(&specs)?;
        return Ok(());
    }

    if schemas {
        for spec in &specs {
            output::print_raw(&format!("{}  {}", spec.id.cyan().bold(), spec.description));
            output::print_raw(&serde_json::to_string_pretty(&spec.input_schema)?);
            output::print_raw("");
        }
        return Ok(());
    }

    let rows: Vec<ToolRow> = specs
        .iter()
        .map(|s| ToolRow {
            id: s.id,
            description: s.description,
        })
        .collect();
    output::print_table(&rows);
    Ok(())
}

async fn call(id: &str, args: &str, config: &Config) -> Result<()> {
    let args = if args == "-" {
        read_input(None)?
    } else {
        args.to_string()
    };
    let args: Value = serde_json::from_str(&args).context("Tool arguments must be a JSON object")?;

    let toolbox = Toolbox::new(figma_client(config)?);
    output::print_verbose(&format!("Calling {}", id));
    let result = toolbox.call(id, args).await;
    output::print_json(&result)?;
    Ok(())
}

use super::read_input;
use crate::config::Config;
use crate::output;
use crate::prompt::{assemble, DesignKind};
use anyhow::{bail, Result};
use serde_json::json;

pub async fn run(analysis: Option<String>, kind: Option<String>, config: &Config) -> Result<()> {
    let analysis = read_input(analysis.as_deref())?;
    if analysis.trim().is_empty() {
        bail!("Analysis is empty");
    }

    let kind = match kind {
        Some(name) => {
            let kind = DesignKind::from_name(&name);
            if kind.to_string() != name.trim().to_ascii_lowercase() {
                output::print_warning(&format!("Unknown design kind '{}', using {}", name, kind));
            }
            kind
        }
        None => config.prompt.default_kind,
    };
    output::print_verbose(&format!("Using the {} template", kind));

    let prompt = assemble(analysis.trim_end(), kind);
    if output::is_json() {
        output::print_json(&json!({ "prompt": prompt }))?;
    } else {
        output::print_raw(&prompt);
    }
    Ok(())
}

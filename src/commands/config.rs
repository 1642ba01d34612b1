use crate::api::client::FIGMA_API_BASE;
use crate::auth::get_token_with_source;
use crate::cli::ConfigCommands;
use crate::config::Config;
use crate::output;
use crate::prompt::DesignKind;
use anyhow::{anyhow, bail, Result};

const MASK: &str = "***";

pub async fn run(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Path => path(),
        ConfigCommands::Get { key } => get(&key),
        ConfigCommands::Set { key, value, unset } => set(&key, value.as_deref(), unset),
    }
}

fn show() -> Result<()> {
    let mut config = Config::load()?;
    if let Some(found) = get_token_with_source(&config) {
        output::print_status(&format!("Token source: {}", found.source));
    }
    if config.figma_token.is_some() {
        config.figma_token = Some(MASK.to_string());
    }

    if output::is_json() {
        output::print_json(&config)?;
    } else {
        output::print_raw(&toml::to_string_pretty(&config)?);
    }
    Ok(())
}

fn path() -> Result<()> {
    let path = Config::config_path().ok_or_else(|| anyhow!("Could not determine config path"))?;
    output::print_raw(&path.display().to_string());
    Ok(())
}

fn get(key: &str) -> Result<()> {
    let config = Config::load()?;
    output::print_raw(&get_value(&config, key)?);
    Ok(())
}

fn set(key: &str, value: Option<&str>, unset: bool) -> Result<()> {
    let mut config = Config::load().unwrap_or_else(|e| {
        output::print_warning(&format!("{:#}; starting from defaults", e));
        Config::default()
    });
    set_value(&mut config, key, value, unset)?;
    config.save()?;
    output::print_success("Config updated");
    Ok(())
}

fn get_value(config: &Config, key: &str) -> Result<String> {
    match normalize_key(key).as_str() {
        "figma_token" => Ok(config.token().map(|_| MASK.to_string()).unwrap_or_default()),
        "api.base_url" => Ok(config.api.base_url.clone()),
        "download.output_dir" => Ok(config.download.output_dir.clone().unwrap_or_default()),
        "prompt.default_kind" => Ok(config.prompt.default_kind.to_string()),
        _ => Err(anyhow!("Unknown config key: {}", key)),
    }
}

fn set_value(config: &mut Config, key: &str, value: Option<&str>, unset: bool) -> Result<()> {
    let required = || value.ok_or_else(|| anyhow!("Value is required"));

    match normalize_key(key).as_str() {
        "figma_token" => {
            config.figma_token = if unset { None } else { Some(required()?.trim().to_string()) };
        }
        "api.base_url" => {
            if unset {
                config.api.base_url = FIGMA_API_BASE.to_string();
            } else {
                let v = required()?.trim();
                if url::Url::parse(v).is_err() {
                    bail!("Invalid base URL: {}", v);
                }
                config.api.base_url = v.trim_end_matches('/').to_string();
            }
        }
        "download.output_dir" => {
            config.download.output_dir = if unset { None } else { Some(required()?.to_string()) };
        }
        "prompt.default_kind" => {
            if unset {
                config.prompt.default_kind = DesignKind::default();
            } else {
                let v = required()?.trim().to_lowercase();
                if !matches!(v.as_str(), "image" | "figma" | "mixed") {
                    bail!("Invalid design kind: {}", v);
                }
                config.prompt.default_kind = DesignKind::from_name(&v);
            }
        }
        _ => bail!("Unknown config key: {}", key),
    }

    Ok(())
}

fn normalize_key(key: &str) -> String {
    key.trim()
        .to_lowercase()
        .replace('-', "_")
        .replace(' ', "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key(" Prompt.Default-Kind "), "prompt.default_kind");
        assert_eq!(normalize_key("figma-token"), "figma_token");
    }

    #[test]
    fn test_set_and_get() {
        let mut config = Config::default();
        set_value(&mut config, "download.output-dir", Some("assets"), false).unwrap();
        set_value(&mut config, "prompt.default_kind", Some("Figma"), false).unwrap();
        set_value(&mut config, "api.base_url", Some("http://localhost:9000/v1/"), false).unwrap();

        assert_eq!(get_value(&config, "download.output_dir").unwrap(), "assets");
        assert_eq!(get_value(&config, "prompt.default_kind").unwrap(), "figma");
        assert_eq!(get_value(&config, "api.base_url").unwrap(), "http://localhost:9000/v1");
    }

    #[test]
    fn test_token_is_masked() {
        let mut config = Config::default();
        assert_eq!(get_value(&config, "figma_token").unwrap(), "");
        set_value(&mut config, "figma_token", Some("secret"), false).unwrap();
        assert_eq!(config.token(), Some("secret"));
        assert_eq!(get_value(&config, "figma_token").unwrap(), "***");
    }

    #[test]
    fn test_unset_restores_defaults() {
        let mut config = Config::default();
        set_value(&mut config, "api.base_url", Some("http://localhost:9000"), false).unwrap();
        set_value(&mut config, "api.base_url", None, true).unwrap();
        assert_eq!(config.api.base_url, FIGMA_API_BASE);

        set_value(&mut config, "download.output_dir", Some("x"), false).unwrap();
        set_value(&mut config, "download.output_dir", None, true).unwrap();
        assert!(config.download.output_dir.is_none());
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut config = Config::default();
        assert!(set_value(&mut config, "prompt.default_kind", Some("sketch"), false).is_err());
        assert!(set_value(&mut config, "api.base_url", Some("not a url"), false).is_err());
        assert!(set_value(&mut config, "download.output_dir", None, false).is_err());
        assert!(set_value(&mut config, "nope", Some("x"), false).is_err());
    }
}

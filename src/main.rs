mod api;
mod auth;
mod cli;
mod commands;
mod config;
mod input;
mod output;
mod prompt;
mod theme;
mod tools;
mod validate;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use output::{OutputFormat, Verbosity};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    output::init(format, Verbosity::from_flags(cli.quiet, cli.verbose), !cli.no_color);

    if let Err(e) = run(cli.command).await {
        output::print_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// Commands that never read the config file
fn needs_config(command: &Commands) -> bool {
    !matches!(
        command,
        Commands::Classify { .. } | Commands::Config { .. } | Commands::Prompt { kind: Some(_), .. }
    )
}

async fn run(command: Commands) -> Result<()> {
    let config = if needs_config(&command) {
        Config::load()?
    } else {
        Config::default()
    };

    match command {
        Commands::Classify { text } => commands::classify::run(text).await,
        Commands::Process(args) => commands::process::run(args, &config).await,
        Commands::Theme { source, node } => commands::theme::run(source, node, &config).await,
        Commands::Prompt { analysis, kind } => commands::prompt::run(analysis, kind, &config).await,
        Commands::Files { command } => commands::files::run(command, &config).await,
        Commands::Images { command } => commands::images::run(command, &config).await,
        Commands::Validate { url } => commands::validate::run(&url, &config).await,
        Commands::Tools { command } => commands::tools::run(command, &config).await,
        Commands::Config { command } => commands::config::run(command).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(args: &[&str]) -> Commands {
        let argv = std::iter::once("figprompt").chain(args.iter().copied());
        Cli::try_parse_from(argv).unwrap().command
    }

    #[test]
    fn test_config_only_loaded_when_used() {
        assert!(!needs_config(&command(&["config", "path"])));
        assert!(!needs_config(&command(&["config", "set", "api.base_url", "http://x"])));
        assert!(!needs_config(&command(&["classify", "hello"])));
        assert!(!needs_config(&command(&["prompt", "--kind", "figma"])));

        assert!(needs_config(&command(&["prompt"])));
        assert!(needs_config(&command(&["files", "info", "ABC"])));
        assert!(needs_config(&command(&["tools", "list"])));
    }
}

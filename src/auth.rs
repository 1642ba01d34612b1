use crate::config::Config;
use std::env;

/// Environment variables checked for a token, in priority order
pub const TOKEN_ENV_VARS: [&str; 2] = ["FIGMA_ACCESS_TOKEN", "FIGMA_TOKEN"];

/// Token source information for debugging
#[derive(Debug, Clone, PartialEq)]
pub enum TokenSource {
    Environment(&'static str),
    ConfigFile,
}

impl std::fmt::Display for TokenSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenSource::Environment(var) => write!(f, "environment variable ({})", var),
            TokenSource::ConfigFile => write!(f, "config file"),
        }
    }
}

/// Result of token retrieval with source information
#[derive(Debug)]
pub struct TokenResult {
    pub token: String,
    pub source: TokenSource,
}

/// Find a token through `lookup` (environment) first, then the config file
///
/// Empty values are skipped. No token at all is not an error here; API
/// operations report it as a 401 when they need one.
pub fn resolve_token<F>(lookup: F, config: &Config) -> Option<TokenResult>
where
    F: Fn(&str) -> Option<String>,
{
    for var in TOKEN_ENV_VARS {
        if let Some(token) = lookup(var).filter(|t| !t.trim().is_empty()) {
            return Some(TokenResult {
                token,
                source: TokenSource::Environment(var),
            });
        }
    }

    config.token().map(|token| TokenResult {
        token: token.to_string(),
        source: TokenSource::ConfigFile,
    })
}

/// Get the Figma token along with its source
pub fn get_token_with_source(config: &Config) -> Option<TokenResult> {
    resolve_token(|var| env::var(var).ok(), config)
}

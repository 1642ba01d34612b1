use serde::Serialize;
use url::Url;

/// Host fragment that marks a Figma design link
const FIGMA_HOST: &str = "figma.com";

/// Parsed Figma URL components
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaUrl {
    /// The file key (never empty)
    pub file_key: String,
    /// The node ID from the `node-id` query parameter, URL-decoded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
}

impl FigmaUrl {
    /// Parse a Figma design URL
    ///
    /// The file key is whatever sits in the second path segment, as in
    /// `/file/<key>/<name>` or `/proto/<key>/<name>`; other path shapes are not
    /// rejected, they just yield whatever lands there. Returns `None` for
    /// non-URLs, non-Figma hosts and paths too short to carry a key.
    pub fn parse(input: &str) -> Option<Self> {
        let url = Url::parse(input).ok()?;

        let host = url.host_str()?;
        if !host.contains(FIGMA_HOST) {
            return None;
        }

        // "/file/abc123/Name" splits into ["", "file", "abc123", "Name"]
        let file_key = url.path().split('/').nth(2).filter(|s| !s.is_empty())?;

        let node_id = url
            .query_pairs()
            .find(|(key, _)| key == "node-id")
            .map(|(_, value)| value.into_owned())
            .filter(|value| !value.is_empty());

        Some(Self {
            file_key: file_key.to_string(),
            node_id,
        })
    }

    /// Resolve tool input that is either a Figma URL or a bare file key
    ///
    /// Input that mentions the Figma host but does not parse is rejected
    /// rather than being mistaken for a key.
    pub fn resolve(input: &str) -> Option<Self> {
        let input = input.trim();
        if Self::is_figma_url(input) {
            return Self::parse(input);
        }
        if input.is_empty() {
            return None;
        }
        Some(Self {
            file_key: input.to_string(),
            node_id: None,
        })
    }

    /// Check if a string looks like a Figma URL
    pub fn is_figma_url(input: &str) -> bool {
        input.contains(FIGMA_HOST)
    }

    /// File name for an exported node, e.g. `1:2` -> `1-2.svg`
    pub fn node_file_name(node_id: &str) -> String {
        format!("{}.svg", node_id.replace(':', "-"))
    }
}

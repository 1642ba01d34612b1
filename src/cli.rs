use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "figprompt")]
#[command(author, version, about = "Turn Figma designs and screenshots into front-end development briefs")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Print machine-readable JSON instead of tables and text
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress status messages
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Show extra diagnostics
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Detect Figma links, image links and inline images in a message
    Classify {
        /// Message text (read from stdin when omitted)
        text: Vec<String>,
    },

    /// Summarise a Figma file: document, pages, styles and theme
    Process(SourceArgs),

    /// Extract colors and typography from a Figma file or node
    Theme {
        #[command(flatten)]
        source: SourceArgs,
        /// Restrict extraction to one node (taken from the URL's node-id when omitted)
        #[arg(short, long)]
        node: Option<String>,
    },

    /// Wrap a design analysis in a development brief
    Prompt {
        /// File holding the analysis (stdin when omitted or "-")
        analysis: Option<String>,
        /// Design source: image, figma or mixed (defaults to prompt.default_kind)
        #[arg(short, long)]
        kind: Option<String>,
    },

    /// Fetch raw Figma file data
    Files {
        #[command(subcommand)]
        command: FilesCommands,
    },

    /// Export nodes as SVG
    Images {
        #[command(subcommand)]
        command: ImagesCommands,
    },

    /// Check that a URL serves an image and print it as a data URI
    Validate {
        /// Image URL
        url: String,
    },

    /// Inspect and invoke the orchestrator tools
    Tools {
        #[command(subcommand)]
        command: ToolsCommands,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Where a Figma document comes from
#[derive(clap::Args)]
pub struct SourceArgs {
    /// Saved file JSON, "-" for stdin, or a Figma file key or URL to fetch
    pub source: String,
}

#[derive(Subcommand)]
pub enum FilesCommands {
    /// Get the full file JSON
    Get {
        /// Figma file key or URL (e.g., abc123 or https://figma.com/file/abc123/...)
        file_key_or_url: String,
    },
    /// Get the JSON of a single node
    Node {
        /// Figma file key or URL (with ?node-id=...)
        file_key_or_url: String,
        /// Node ID; overrides the URL's node-id
        #[arg(short, long)]
        node: Option<String>,
    },
    /// Show file metadata without the design tree
    Info {
        /// Figma file key or URL
        file_key_or_url: String,
    },
}

#[derive(Subcommand)]
pub enum ImagesCommands {
    /// Print SVG export URLs for nodes
    Urls {
        /// Figma file key or URL (e.g., abc123 or https://figma.com/file/abc123/...?node-id=1-2)
        file_key_or_url: String,
        /// Node IDs to export (can be specified multiple times). If URL contains node-id, it will be used.
        #[arg(short, long)]
        node: Vec<String>,
    },
    /// Download nodes as SVG files
    Download {
        /// Figma file key or URL
        file_key_or_url: String,
        /// Node IDs to export (can be specified multiple times)
        #[arg(short, long)]
        node: Vec<String>,
        /// Output directory (defaults to download.output_dir, then ".")
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ToolsCommands {
    /// List tool ids and descriptions
    List {
        /// Include input schemas
        #[arg(long)]
        schemas: bool,
    },
    /// Invoke a tool with JSON arguments
    Call {
        /// Tool id
        id: String,
        /// JSON object of arguments ("-" reads stdin)
        #[arg(default_value = "{}")]
        args: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the current configuration (token masked)
    Show,
    /// Print the config file path
    Path,
    /// Get a single config value
    Get {
        /// Key, e.g. api.base_url
        key: String,
    },
    /// Set a config value
    Set {
        /// Key, e.g. download.output_dir
        key: String,
        /// New value
        value: Option<String>,
        /// Remove the value instead
        #[arg(long, conflicts_with = "value")]
        unset: bool,
    },
}

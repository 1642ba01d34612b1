//! Tool boundary for an external LLM orchestrator
//!
//! Each tool takes a JSON object matching its declared input schema and
//! returns a JSON object. Failures are always data (`{"error": ...}` or
//! `{"success": false, ...}`), never panics or transport errors.

use crate::api::{ApiError, FigmaClient, FigmaUrl, NodeImageRequest};
use crate::input::classify;
use crate::prompt::{assemble, DesignKind};
use crate::theme::process;
use crate::validate::validate_image_url;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt::Display;
use std::path::Path;

pub const ANALYZE_INPUT: &str = "analyze_input";
pub const VALIDATE_IMAGE_URL: &str = "validate_image_url";
pub const PROCESS_FIGMA_DATA: &str = "process_figma_data";
pub const GENERATE_PAGE_PROMPT: &str = "generate_page_prompt";
pub const FIGMA_GET_FILE_DATA: &str = "figma_get_file_data";
pub const FIGMA_GET_NODE_DATA: &str = "figma_get_node_data";
pub const FIGMA_GET_FILE_INFO: &str = "figma_get_file_info";
pub const GET_FIGMA_DATA: &str = "get_figma_data";
pub const DOWNLOAD_FIGMA_IMAGES: &str = "download_figma_images";

/// Declared tool: id, description and JSON schema of its input
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolSpec {
    pub id: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

/// `{success: true, ...fields}` or `{success: false, error: "..."}`
#[derive(Debug, Serialize)]
pub struct Report<T> {
    success: bool,
    #[serde(flatten)]
    value: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T, E: Display> From<Result<T, E>> for Report<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self {
                success: true,
                value: Some(value),
                error: None,
            },
            Err(e) => Self {
                success: false,
                value: None,
                error: Some(e.to_string()),
            },
        }
    }
}

/// Error object of the Figma tools; status is absent for input problems
#[derive(Debug, Serialize)]
struct ErrorDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<u16>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

impl ErrorDetail {
    fn message(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
            reason: None,
        }
    }
}

impl From<ApiError> for ErrorDetail {
    fn from(e: ApiError) -> Self {
        Self {
            status: Some(e.status),
            message: e.message,
            reason: e.reason,
        }
    }
}

fn failure(detail: ErrorDetail) -> Value {
    json!({ "success": false, "error": detail })
}

#[derive(Deserialize)]
struct AnalyzeInputArgs {
    input: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ValidateImageArgs {
    image_url: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProcessArgs {
    #[serde(default)]
    figma_data: Value,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptArgs {
    analysis_result: String,
    #[serde(default)]
    design_type: DesignKind,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileArgs {
    input: String,
    personal_access_token: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NodeArgs {
    input: String,
    node_id: Option<String>,
    personal_access_token: Option<String>,
}

// `depth` is part of the declared schema but the API has no depth filter
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DesignDataArgs {
    file_key: String,
    node_id: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DownloadArgs {
    file_key: String,
    nodes: Vec<NodeImageRequest>,
    local_path: String,
}

/// Dispatches tool calls against one Figma client
pub struct Toolbox {
    client: FigmaClient,
}

impl Toolbox {
    pub fn new(client: FigmaClient) -> Self {
        Self { client }
    }

    /// Invoke a tool by id; unknown ids and malformed arguments yield `{"error"}`
    pub async fn call(&self, id: &str, args: Value) -> Value {
        match self.dispatch(id, args).await {
            Ok(value) => value,
            Err(message) => json!({ "error": message }),
        }
    }

    async fn dispatch(&self, id: &str, args: Value) -> Result<Value, String> {
        let output = match id {
            ANALYZE_INPUT => {
                let args: AnalyzeInputArgs = parse_args(args)?;
                encode(&classify(&args.input))
            }
            VALIDATE_IMAGE_URL => {
                let args: ValidateImageArgs = parse_args(args)?;
                let result = validate_image_url(self.client.http(), &args.image_url).await;
                encode(&Report::from(result))
            }
            PROCESS_FIGMA_DATA => {
                let args: ProcessArgs = parse_args(args)?;
                encode(&Report::from(process(&args.figma_data)))
            }
            GENERATE_PAGE_PROMPT => {
                let args: PromptArgs = parse_args(args)?;
                json!({ "prompt": assemble(&args.analysis_result, args.design_type) })
            }
            FIGMA_GET_FILE_DATA => self.file_data(parse_args(args)?).await,
            FIGMA_GET_NODE_DATA => self.node_data(parse_args(args)?).await,
            FIGMA_GET_FILE_INFO => self.file_info(parse_args(args)?).await,
            GET_FIGMA_DATA => self.design_data(parse_args(args)?).await,
            DOWNLOAD_FIGMA_IMAGES => self.download_images(parse_args(args)?).await,
            other => return Err(format!("Unknown tool: {}", other)),
        };
        Ok(output)
    }

    /// Per-call token wins over the configured one
    fn client_for(&self, token: Option<String>) -> FigmaClient {
        match token.filter(|t| !t.trim().is_empty()) {
            Some(token) => self.client.with_token(Some(token)),
            None => self.client.clone(),
        }
    }

    async fn file_data(&self, args: FileArgs) -> Value {
        let Some(target) = FigmaUrl::resolve(&args.input) else {
            return failure(ErrorDetail::message("Invalid Figma URL"));
        };
        let client = self.client_for(args.personal_access_token);
        match client.get_file(&target.file_key).await {
            Ok(data) => json!({ "success": true, "fileKey": target.file_key, "data": data }),
            Err(e) => failure(e.into()),
        }
    }

    async fn node_data(&self, args: NodeArgs) -> Value {
        let Some(target) = FigmaUrl::resolve(&args.input) else {
            return failure(ErrorDetail::message("Invalid Figma URL"));
        };
        let Some(node_id) = args.node_id.filter(|n| !n.is_empty()).or(target.node_id) else {
            return failure(ErrorDetail::message(
                "Missing node ID: include node-id in the URL or pass nodeId explicitly",
            ));
        };
        let client = self.client_for(args.personal_access_token);
        match client.get_node(&target.file_key, &node_id).await {
            Ok(data) => json!({
                "success": true,
                "fileKey": target.file_key,
                "nodeId": node_id,
                "data": data,
            }),
            Err(e) => failure(e.into()),
        }
    }

    async fn file_info(&self, args: FileArgs) -> Value {
        let Some(target) = FigmaUrl::resolve(&args.input) else {
            return failure(ErrorDetail::message("Invalid Figma URL"));
        };
        let client = self.client_for(args.personal_access_token);
        match client.get_file_info(&target.file_key).await {
            Ok(info) => json!({ "success": true, "fileKey": target.file_key, "fileInfo": info }),
            Err(e) => failure(e.into()),
        }
    }

    async fn design_data(&self, args: DesignDataArgs) -> Value {
        let result = match args.node_id.as_deref().filter(|n| !n.is_empty()) {
            Some(node_id) => self.client.get_node(&args.file_key, node_id).await,
            None => self.client.get_file(&args.file_key).await,
        };
        match result {
            Ok(data) => data,
            Err(e) => json!({ "error": format!("Error fetching file: {}", encode(&e)) }),
        }
    }

    async fn download_images(&self, args: DownloadArgs) -> Value {
        let result = self
            .client
            .download_nodes(&args.file_key, &args.nodes, Path::new(&args.local_path), |_| {})
            .await;
        match result {
            Ok(batch) => {
                let mut value = encode(&batch);
                value["success"] = Value::Bool(true);
                value
            }
            Err(e) => json!({ "error": format!("Error downloading images: {}", e) }),
        }
    }
}

fn parse_args<T: DeserializeOwned>(args: Value) -> Result<T, String> {
    serde_json::from_value(args).map_err(|e| format!("Invalid arguments: {}", e))
}

fn encode<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or_else(|e| json!({ "error": e.to_string() }))
}

/// Declared tools with their input schemas
pub fn specs() -> Vec<ToolSpec> {
    let figma_token = json!({
        "type": "string",
        "description": "Figma personal access token; the configured token is used when omitted"
    });

    vec![
        ToolSpec {
            id: ANALYZE_INPUT,
            description: "Detect Figma links, image links and inline images in user input",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "input": { "type": "string", "description": "Raw user message" }
                },
                "required": ["input"]
            }),
        },
        ToolSpec {
            id: VALIDATE_IMAGE_URL,
            description: "Check that a URL serves an image and return it as a base64 data URI",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "imageUrl": { "type": "string", "description": "Image URL" }
                },
                "required": ["imageUrl"]
            }),
        },
        ToolSpec {
            id: PROCESS_FIGMA_DATA,
            description: "Summarise a raw Figma file response: document, pages, styles, colors and typography",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "figmaData": { "description": "Raw JSON returned by the Figma files endpoint" }
                },
                "required": ["figmaData"]
            }),
        },
        ToolSpec {
            id: GENERATE_PAGE_PROMPT,
            description: "Wrap a design analysis in a structured front-end development brief",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "analysisResult": { "type": "string", "description": "Model analysis of the design" },
                    "designType": {
                        "type": "string",
                        "enum": ["image", "figma", "mixed"],
                        "description": "Source of the analysis"
                    }
                },
                "required": ["analysisResult", "designType"]
            }),
        },
        ToolSpec {
            id: FIGMA_GET_FILE_DATA,
            description: "Fetch the full JSON of a Figma file from a URL or file key",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "input": { "type": "string", "description": "Figma URL or file key" },
                    "personalAccessToken": figma_token
                },
                "required": ["input"]
            }),
        },
        ToolSpec {
            id: FIGMA_GET_NODE_DATA,
            description: "Fetch the JSON of one node, from a URL with node-id or a file key plus nodeId",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "input": { "type": "string", "description": "Figma URL (with node-id) or file key" },
                    "nodeId": { "type": "string", "description": "Node ID; overrides the URL's node-id" },
                    "personalAccessToken": figma_token
                },
                "required": ["input"]
            }),
        },
        ToolSpec {
            id: FIGMA_GET_FILE_INFO,
            description: "Fetch name, version, thumbnail and page count of a Figma file without the design tree",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "input": { "type": "string", "description": "Figma URL or file key" },
                    "personalAccessToken": figma_token
                },
                "required": ["input"]
            }),
        },
        ToolSpec {
            id: GET_FIGMA_DATA,
            description: "Fetch a whole Figma file, or a single node when nodeId is given",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "fileKey": { "type": "string", "description": "Key from figma.com/(file|design)/<fileKey>/..." },
                    "nodeId": { "type": "string", "description": "Node ID from the node-id URL parameter" },
                    "depth": { "type": "number", "description": "Tree depth; accepted but not applied" }
                },
                "required": ["fileKey"]
            }),
        },
        ToolSpec {
            id: DOWNLOAD_FIGMA_IMAGES,
            description: "Export nodes as SVG and save them into a local directory",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "fileKey": { "type": "string", "description": "Key of the file containing the nodes" },
                    "nodes": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "nodeId": { "type": "string", "description": "Node ID, e.g. 1234:5678" },
                                "fileName": { "type": "string", "description": "Local file name" }
                            },
                            "required": ["nodeId", "fileName"]
                        }
                    },
                    "localPath": { "type": "string", "description": "Directory to save into; created if missing" }
                },
                "required": ["fileKey", "nodes", "localPath"]
            }),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{any, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn toolbox(server: &MockServer, token: Option<&str>) -> Toolbox {
        let client = FigmaClient::with_base_url(token.map(str::to_string), server.uri()).unwrap();
        Toolbox::new(client)
    }

    #[test]
    fn test_specs_are_unique_objects() {
        let specs = specs();
        let mut ids: Vec<_> = specs.iter().map(|s| s.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), specs.len());
        for spec in &specs {
            assert_eq!(spec.input_schema["type"], "object", "{}", spec.id);
            assert!(spec.input_schema["required"].is_array(), "{}", spec.id);
        }
    }

    #[tokio::test]
    async fn test_unknown_tool_and_bad_args() {
        let server = MockServer::start().await;
        let tools = toolbox(&server, None);

        let out = tools.call("draw_owl", json!({})).await;
        assert_eq!(out["error"], "Unknown tool: draw_owl");

        let out = tools.call(ANALYZE_INPUT, json!({ "text": "wrong field" })).await;
        assert!(out["error"].as_str().unwrap().starts_with("Invalid arguments: "));
    }

    #[tokio::test]
    async fn test_pure_tools() {
        let server = MockServer::start().await;
        let tools = toolbox(&server, None);

        let out = tools
            .call(ANALYZE_INPUT, json!({ "input": "https://figma.com/file/K1/Name" }))
            .await;
        assert_eq!(out["types"], json!(["figma_url"]));

        let out = tools
            .call(GENERATE_PAGE_PROMPT, json!({ "analysisResult": "X", "designType": "mixed" }))
            .await;
        let prompt = out["prompt"].as_str().unwrap();
        assert!(prompt.contains("\nX\n"));
        assert!(!prompt.contains("{analysis_result}"));

        let out = tools.call(PROCESS_FIGMA_DATA, json!({ "figmaData": {} })).await;
        assert_eq!(out["success"], true);
        assert_eq!(out["documentInfo"]["name"], "Untitled");

        let out = tools.call(PROCESS_FIGMA_DATA, json!({ "figmaData": null })).await;
        assert_eq!(out["success"], false);
        assert!(out["error"].as_str().unwrap().starts_with("Failed to process Figma data"));
    }

    #[tokio::test]
    async fn test_file_data_without_token() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let out = toolbox(&server, None)
            .call(FIGMA_GET_FILE_DATA, json!({ "input": "https://www.figma.com/file/ABC/Name" }))
            .await;
        assert_eq!(out["success"], false);
        assert_eq!(out["error"]["status"], 401);
    }

    #[tokio::test]
    async fn test_invalid_url_is_rejected_before_fetch() {
        let server = MockServer::start().await;
        let out = toolbox(&server, Some("t"))
            .call(FIGMA_GET_FILE_INFO, json!({ "input": "https://www.figma.com/" }))
            .await;
        assert_eq!(out["success"], false);
        assert_eq!(out["error"], json!({ "message": "Invalid Figma URL" }));
    }

    #[tokio::test]
    async fn test_per_call_token_overrides() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/files/ABC"))
            .and(header("X-Figma-Token", "call-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "name": "Demo" })))
            .expect(1)
            .mount(&server)
            .await;

        let out = toolbox(&server, None)
            .call(
                FIGMA_GET_FILE_DATA,
                json!({ "input": "ABC", "personalAccessToken": "call-token" }),
            )
            .await;
        assert_eq!(out["success"], true);
        assert_eq!(out["fileKey"], "ABC");
        assert_eq!(out["data"]["name"], "Demo");
    }

    #[tokio::test]
    async fn test_node_data_uses_url_node_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/files/ABC/nodes"))
            .and(query_param("ids", "7:8"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "nodes": {} })))
            .expect(1)
            .mount(&server)
            .await;

        let tools = toolbox(&server, Some("t"));
        let out = tools
            .call(
                FIGMA_GET_NODE_DATA,
                json!({ "input": "https://www.figma.com/file/ABC/Name?node-id=7%3A8" }),
            )
            .await;
        assert_eq!(out["success"], true);
        assert_eq!(out["nodeId"], "7:8");

        let out = tools.call(FIGMA_GET_NODE_DATA, json!({ "input": "ABC" })).await;
        assert_eq!(out["success"], false);
        assert!(out["error"]["message"].as_str().unwrap().starts_with("Missing node ID"));
    }

    #[tokio::test]
    async fn test_get_figma_data_error_string() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/files/GONE"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "err": "Not found" })))
            .mount(&server)
            .await;

        let out = toolbox(&server, Some("t"))
            .call(GET_FIGMA_DATA, json!({ "fileKey": "GONE", "depth": 3 }))
            .await;
        let error = out["error"].as_str().unwrap();
        assert!(error.starts_with("Error fetching file: "));
        assert!(error.contains("\"status\":404"));
    }

    #[tokio::test]
    async fn test_download_images_without_token() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let out = toolbox(&server, None)
            .call(
                DOWNLOAD_FIGMA_IMAGES,
                json!({
                    "fileKey": "ABC",
                    "nodes": [{ "nodeId": "1:2", "fileName": "icon.svg" }],
                    "localPath": dir.path().join("icons").display().to_string()
                }),
            )
            .await;
        assert!(out["error"].as_str().unwrap().contains("No Figma access token provided"));
    }
}

use super::client::{ApiError, FigmaClient};
use super::types::ImageResponse;
use futures_util::StreamExt;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Export format used for node image URLs
const EXPORT_FORMAT: &str = "svg";

/// Result of a single download
#[derive(Debug, Serialize)]
pub struct DownloadedImage {
    pub path: String,
}

/// A node to export and the local file name to store it under
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeImageRequest {
    pub node_id: String,
    pub file_name: String,
}

/// Per-node outcome of a batch download
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDownload {
    pub node_id: String,
    pub file_name: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BatchDownload {
    pub message: String,
    pub downloads: Vec<NodeDownload>,
}

impl FigmaClient {
    /// Get export URLs for the given nodes
    pub async fn get_image_urls(
        &self,
        file_key: &str,
        node_ids: &[String],
    ) -> Result<Value, ApiError> {
        self.get_json(
            &format!("/images/{}", file_key),
            &[
                ("ids", node_ids.join(",")),
                ("format", EXPORT_FORMAT.to_string()),
            ],
        )
        .await
    }

    /// Stream an image to a local path
    ///
    /// Export URLs are pre-signed, so no token is required or sent. The file
    /// handle lives for this call only and is closed on success and failure.
    pub async fn download_image(
        &self,
        url: &str,
        path: &Path,
    ) -> Result<DownloadedImage, ApiError> {
        let failed = |e: ApiError| e.with_reason("Failed to download image");

        let response = self
            .http()
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| failed(ApiError::transport(e)))?;

        let mut file = fs::File::create(path)
            .await
            .map_err(|e| failed(ApiError::io(e)))?;

        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| failed(ApiError::transport(e)))?;
            file.write_all(&chunk)
                .await
                .map_err(|e| failed(ApiError::io(e)))?;
        }
        file.flush().await.map_err(|e| failed(ApiError::io(e)))?;

        Ok(DownloadedImage {
            path: path.display().to_string(),
        })
    }

    /// Export and download several nodes into a directory
    ///
    /// Individual download failures are reported per node; only a missing
    /// token, an unusable directory or a failed URL lookup fail the batch.
    pub async fn download_nodes<F>(
        &self,
        file_key: &str,
        nodes: &[NodeImageRequest],
        dir: &Path,
        mut on_progress: F,
    ) -> Result<BatchDownload, ApiError>
    where
        F: FnMut(&NodeDownload),
    {
        if !self.has_token() {
            return Err(ApiError::missing_token());
        }

        fs::create_dir_all(dir).await.map_err(|e| {
            ApiError::new(500, format!("Failed to create directory: {}", e))
        })?;

        let node_ids: Vec<String> = nodes.iter().map(|n| n.node_id.clone()).collect();
        let raw = self.get_image_urls(file_key, &node_ids).await?;
        let images = decode_image_urls(raw)?;

        let mut downloads = Vec::with_capacity(nodes.len());
        for node in nodes {
            let result = match (images.url_for(&node.node_id), local_target(dir, &node.file_name)) {
                (None, _) => Err("No image URL found for this node".to_string()),
                (Some(_), None) => Err("Invalid file name".to_string()),
                (Some(url), Some(target)) => self
                    .download_image(url, &target)
                    .await
                    .map(|d| d.path)
                    .map_err(|e| e.message),
            };
            let outcome = NodeDownload {
                node_id: node.node_id.clone(),
                file_name: node.file_name.clone(),
                success: result.is_ok(),
                path: result.as_ref().ok().cloned(),
                error: result.err(),
            };
            on_progress(&outcome);
            downloads.push(outcome);
        }

        let succeeded = downloads.iter().filter(|d| d.success).count();
        Ok(BatchDownload {
            message: format!("Downloaded {} of {} images", succeeded, nodes.len()),
            downloads,
        })
    }
}

fn decode_image_urls(raw: Value) -> Result<ImageResponse, ApiError> {
    let figma_err = raw.get("err").and_then(Value::as_str).map(str::to_string);
    serde_json::from_value(raw).map_err(|e| {
        let error = ApiError::new(500, format!("Unexpected image URL response: {}", e));
        match figma_err {
            Some(reason) => error.with_reason(reason),
            None => error,
        }
    })
}

/// `file_name` joined under `dir`, or `None` when it could escape it
fn local_target(dir: &Path, file_name: &str) -> Option<PathBuf> {
    let relative = Path::new(file_name);
    let plain = relative
        .components()
        .all(|c| matches!(c, Component::Normal(_)));
    if file_name.is_empty() || !plain {
        return None;
    }
    Some(dir.join(relative))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_image_urls_request_svg() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/images/KEY"))
            .and(query_param("ids", "1:2,3:4"))
            .and(query_param("format", "svg"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "err": null,
                "images": { "1:2": "https://cdn.example.com/a.svg", "3:4": null }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = FigmaClient::with_base_url(Some("t".into()), server.uri()).unwrap();
        let data = client
            .get_image_urls("KEY", &["1:2".to_string(), "3:4".to_string()])
            .await
            .unwrap();
        let images: ImageResponse = serde_json::from_value(data).unwrap();
        assert_eq!(images.url_for("1:2"), Some("https://cdn.example.com/a.svg"));
        assert_eq!(images.url_for("3:4"), None);
    }

    #[tokio::test]
    async fn test_download_writes_body_without_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/render/a.svg"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<svg/>"))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("a.svg");
        let client = FigmaClient::with_base_url(None, server.uri()).unwrap();
        let done = client
            .download_image(&format!("{}/render/a.svg", server.uri()), &target)
            .await
            .unwrap();

        assert_eq!(done.path, target.display().to_string());
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "<svg/>");
    }

    #[tokio::test]
    async fn test_download_failure_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let client = FigmaClient::with_base_url(None, server.uri()).unwrap();
        let err = client
            .download_image(&format!("{}/expired.svg", server.uri()), &dir.path().join("x.svg"))
            .await
            .unwrap_err();

        assert_eq!(err.status, 403);
        assert_eq!(err.reason.as_deref(), Some("Failed to download image"));
    }

    #[tokio::test]
    async fn test_download_nodes_reports_each_node() {
        let server = MockServer::start().await;
        let asset_url = format!("{}/render/logo.svg", server.uri());
        Mock::given(method("GET"))
            .and(path("/images/KEY"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "images": { "1:1": asset_url, "2:2": null }
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/render/logo.svg"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<svg id=\"logo\"/>"))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("assets");
        let client = FigmaClient::with_base_url(Some("t".into()), server.uri()).unwrap();
        let nodes = vec![
            NodeImageRequest { node_id: "1:1".into(), file_name: "logo.svg".into() },
            NodeImageRequest { node_id: "2:2".into(), file_name: "hero.svg".into() },
        ];

        let mut seen = 0;
        let batch = client
            .download_nodes("KEY", &nodes, &out, |_| seen += 1)
            .await
            .unwrap();

        assert_eq!(seen, 2);
        assert_eq!(batch.message, "Downloaded 1 of 2 images");
        assert!(batch.downloads[0].success);
        assert!(out.join("logo.svg").exists());
        assert_eq!(
            batch.downloads[1].error.as_deref(),
            Some("No image URL found for this node")
        );
    }

    #[tokio::test]
    async fn test_download_nodes_keeps_files_under_dir() {
        let server = MockServer::start().await;
        let asset_url = format!("{}/render/logo.svg", server.uri());
        Mock::given(method("GET"))
            .and(path("/images/KEY"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "images": { "1:1": asset_url.clone(), "2:2": asset_url.clone(), "3:3": asset_url }
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/render/logo.svg"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<svg/>"))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("assets");
        let outside = dir.path().join("outside.svg");
        let client = FigmaClient::with_base_url(Some("t".into()), server.uri()).unwrap();
        let nodes = vec![
            NodeImageRequest { node_id: "1:1".into(), file_name: outside.display().to_string() },
            NodeImageRequest { node_id: "2:2".into(), file_name: "../escape.svg".into() },
            NodeImageRequest { node_id: "3:3".into(), file_name: "logo.svg".into() },
        ];

        let batch = client.download_nodes("KEY", &nodes, &out, |_| {}).await.unwrap();

        assert!(!outside.exists());
        assert!(!dir.path().join("escape.svg").exists());
        assert_eq!(batch.downloads[0].error.as_deref(), Some("Invalid file name"));
        assert_eq!(batch.downloads[1].error.as_deref(), Some("Invalid file name"));
        assert!(batch.downloads[0].path.is_none());
        assert!(batch.downloads[2].success);
        assert!(out.join("logo.svg").exists());
        assert_eq!(batch.message, "Downloaded 1 of 3 images");
    }

    #[test]
    fn test_local_target() {
        let dir = Path::new("/srv/assets");
        assert_eq!(local_target(dir, "a.svg"), Some(dir.join("a.svg")));
        assert_eq!(local_target(dir, "icons/a.svg"), Some(dir.join("icons/a.svg")));
        assert_eq!(local_target(dir, "/etc/a.svg"), None);
        assert_eq!(local_target(dir, "../a.svg"), None);
        assert_eq!(local_target(dir, "./a.svg"), None);
        assert_eq!(local_target(dir, ""), None);
    }

    #[tokio::test]
    async fn test_bad_image_payload_fails_batch() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/images/KEY"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "err": "Render timeout",
                "images": "pending"
            })))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let client = FigmaClient::with_base_url(Some("t".into()), server.uri()).unwrap();
        let nodes = vec![NodeImageRequest { node_id: "1:1".into(), file_name: "a.svg".into() }];
        let err = client
            .download_nodes("KEY", &nodes, dir.path(), |_| {})
            .await
            .unwrap_err();

        assert!(err.message.starts_with("Unexpected image URL response"));
        assert_eq!(err.reason.as_deref(), Some("Render timeout"));
    }

    #[tokio::test]
    async fn test_download_nodes_requires_token() {
        let dir = tempfile::tempdir().unwrap();
        let client = FigmaClient::with_base_url(None, "http://127.0.0.1:9").unwrap();
        let err = client
            .download_nodes("KEY", &[], &dir.path().join("never"), |_| {})
            .await
            .unwrap_err();
        assert_eq!(err.status, 401);
        assert!(!dir.path().join("never").exists());
    }
}

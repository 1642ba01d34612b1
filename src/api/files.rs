use super::client::{ApiError, FigmaClient};
use super::types::{DesignFile, FileInfo};
use serde_json::Value;

impl FigmaClient {
    /// Get a file by key as raw JSON
    pub async fn get_file(&self, file_key: &str) -> Result<Value, ApiError> {
        self.get_json(&format!("/files/{}", file_key), &[]).await
    }

    /// Get the JSON scoped to one node of a file
    pub async fn get_node(&self, file_key: &str, node_id: &str) -> Result<Value, ApiError> {
        self.get_json(
            &format!("/files/{}/nodes", file_key),
            &[("ids", node_id.to_string())],
        )
        .await
    }

    /// Get file metadata with the document tree reduced to a page count
    pub async fn get_file_info(&self, file_key: &str) -> Result<FileInfo, ApiError> {
        let raw = self.get_file(file_key).await?;
        let file = DesignFile::from_value(&raw)
            .map_err(|e| ApiError::new(500, format!("Unexpected file payload: {}", e)))?;
        Ok(file.into())
    }
}

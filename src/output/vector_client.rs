//! HTTP client for the vector-store service.

use anyhow::Result;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

/// Client for writing document chunks into a vector-store collection.
///
/// The store is a fire-and-forget sink: callers log failures and move
/// on, and nothing written here is read back within the same run.
pub struct VectorStoreClient {
    client: Client,
    base_url: String,
    collection: String,
}

/// Request payload for writing chunks.
#[derive(Debug, Serialize)]
struct WriteChunksRequest<'a> {
    ids: Vec<String>,
    documents: &'a [String],
    metadatas: &'a [serde_json::Value],
}

/// Response from a chunk write.
#[derive(Debug, Deserialize)]
struct WriteChunksResponse {
    written: usize,
    #[serde(default)]
    errors: Vec<String>,
}

impl VectorStoreClient {
    /// Create a client for the given service and collection.
    pub fn new(base_url: &str, collection: &str) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
            collection: collection.to_string(),
        }
    }

    /// Drop and recreate the target collection.
    pub async fn reset_collection(&self) -> Result<()> {
        let url = format!("{}/collections/{}/reset", self.base_url, self.collection);

        debug!(url = %url, "Resetting vector collection");

        let response = self.client.post(&url).send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!(
                "Vector store returned {} on reset: {}",
                status,
                text
            ));
        }

        Ok(())
    }

    /// Write chunk texts with their metadata into the collection.
    /// Returns the number of chunks the store reports as written.
    pub async fn write_chunks(
        &self,
        chunks: &[String],
        metadatas: &[serde_json::Value],
    ) -> Result<usize> {
        if chunks.is_empty() {
            return Ok(0);
        }

        let request = WriteChunksRequest {
            ids: (0..chunks.len()).map(|i| i.to_string()).collect(),
            documents: chunks,
            metadatas,
        };

        let url = format!("{}/collections/{}/chunks", self.base_url, self.collection);

        let response = self.client.post(&url).json(&request).send().await?;

        if response.status().is_success() {
            let result: WriteChunksResponse = response.json().await?;
            if !result.errors.is_empty() {
                for e in &result.errors {
                    error!(error = e, "Vector store reported a write error");
                }
            }
            info!(
                written = result.written,
                collection = %self.collection,
                "Loaded chunks into vector store"
            );
            Ok(result.written)
        } else {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            Err(anyhow::anyhow!(
                "Vector store returned {}: {}",
                status,
                text
            ))
        }
    }

    /// Check if the vector-store service is reachable.
    pub async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/health", self.base_url);

        match self.client.get(&url).send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(_) => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_normalizes_base_url() {
        let client = VectorStoreClient::new("http://localhost:9000/", "docs");
        assert_eq!(client.base_url, "http://localhost:9000");
        assert_eq!(client.collection, "docs");
    }
}

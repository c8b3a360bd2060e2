use reqwest::Client;

use yuna_core::models::CatalogEntry;

use super::error::CatalogError;
use super::types::SearchResponse;

const BASE_URL: &str = "https://api.jikan.moe/v4";

/// Client for the public anime catalog search endpoint.
///
/// The catalog is read-only and unauthenticated; the client is stateless
/// and cheap to clone.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: Client,
}

impl CatalogClient {
    pub fn new() -> Self {
        Self {
            http: Client::new(),
        }
    }

    async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, CatalogError> {
        if resp.status().is_success() {
            Ok(resp)
        } else {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(status, "catalog API error");
            Err(CatalogError::Api {
                status,
                message: body,
            })
        }
    }

    /// Search the catalog by free text.
    ///
    /// An empty or whitespace-only query yields an empty result without
    /// issuing a network call.
    pub async fn search(&self, query: &str) -> Result<Vec<CatalogEntry>, CatalogError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let resp = self
            .http
            .get(format!("{BASE_URL}/anime"))
            .query(&[("q", query)])
            .send()
            .await?;

        let resp = Self::check_response(resp).await?;
        let body: SearchResponse = resp
            .json()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))?;

        Ok(body
            .data
            .into_iter()
            .map(|item| item.into_catalog_entry())
            .collect())
    }
}

impl Default for CatalogClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_query_short_circuits() {
        let client = CatalogClient::new();
        // No server is reachable in tests; an empty query must not try.
        let results = client.search("").await.unwrap();
        assert!(results.is_empty());

        let results = client.search("   ").await.unwrap();
        assert!(results.is_empty());
    }
}

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use super::{BackendApi, Result};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    #[cfg(test)]
    pub fn with_client(base_url: &str, client: Client) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // The status code is ignored on purpose: error bodies go through the same
    // decoder and fail there if they do not fit.
    async fn read_json(response: reqwest::Response) -> Result<Value> {
        let status = response.status();
        let body = response.text().await?;
        debug!("Response {} ({} bytes)", status, body.len());
        Ok(serde_json::from_str(&body)?)
    }
}

impl Default for HttpBackend {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait]
impl BackendApi for HttpBackend {
    async fn get(&self, path: &str) -> Result<Value> {
        let url = self.url(path);
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        Self::read_json(response).await
    }

    async fn post(&self, path: &str, body: Option<Value>) -> Result<Value> {
        let url = self.url(path);
        debug!("POST {}", url);
        let mut request = self.client.post(&url);
        if let Some(body) = body {
            // sets Content-Type: application/json
            request = request.json(&body);
        }
        let response = request.send().await?;
        Self::read_json(response).await
    }
}

//! HTTP client for the cluster API
//!
//! The lifecycle layer talks to nodes through the [`NodeStore`] trait so it
//! can be exercised against an in-memory store in tests; [`ApiClient`] is
//! the real implementation.

use async_trait::async_trait;
use reqwest::Method;
use thiserror::Error;

use crate::context::{Config, ContextError};
use crate::resources::{Node, NodeUpdate, Pool};

/// Errors from remote store calls
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server error: {0}")]
    Server(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Read and write access to node resources.
#[async_trait]
pub trait NodeStore {
    async fn node(&self, id: &str) -> ApiResult<Node>;
    async fn update_node(&self, update: &NodeUpdate) -> ApiResult<Node>;
    async fn list_nodes(&self) -> ApiResult<Vec<Node>>;
}

/// Read access to pool resources. Pools have no write path.
#[async_trait]
pub trait PoolStore {
    async fn pool(&self, id: &str) -> ApiResult<Pool>;
    async fn list_pools(&self) -> ApiResult<Vec<Pool>>;
}

/// Client for the cluster's HTTP API
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl ApiClient {
    /// Create a new client
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: None,
        }
    }

    /// Set the API key
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Create from the active context
    pub fn from_config(config: &Config) -> Result<Self, ContextError> {
        let url = config.current_url()?;
        let api_key = config.current_api_key();

        let mut client = Self::new(url);
        if let Some(key) = api_key {
            client = client.with_api_key(key);
        }
        Ok(client)
    }

    fn build_request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.client.request(method, &url);
        if let Some(ref key) = self.api_key {
            req = req.header("Authorization", format!("Bearer {}", key));
        }
        req
    }

    async fn fetch_items<T: serde::de::DeserializeOwned>(&self, path: &str) -> ApiResult<Vec<T>> {
        let resp = self.build_request(Method::GET, path).send().await?;

        if !resp.status().is_success() {
            return Err(ApiError::Server(format!(
                "failed to list {}: {}",
                path,
                resp.status()
            )));
        }

        let body: serde_json::Value = resp.json().await?;
        Ok(serde_json::from_value(body["items"].clone())?)
    }
}

#[async_trait]
impl NodeStore for ApiClient {
    async fn node(&self, id: &str) -> ApiResult<Node> {
        let resp = self
            .build_request(Method::GET, &format!("/v1/nodes/{}", id))
            .send()
            .await?;

        if resp.status().as_u16() == 404 {
            return Err(ApiError::NotFound {
                kind: "node",
                id: id.to_string(),
            });
        }
        if !resp.status().is_success() {
            return Err(ApiError::Server(format!(
                "failed to fetch node {}: {}",
                id,
                resp.status()
            )));
        }

        Ok(resp.json().await?)
    }

    async fn update_node(&self, update: &NodeUpdate) -> ApiResult<Node> {
        let resp = self
            .build_request(Method::PUT, &format!("/v1/nodes/{}", update.id))
            .json(update)
            .send()
            .await?;

        if resp.status().as_u16() == 404 {
            return Err(ApiError::NotFound {
                kind: "node",
                id: update.id.clone(),
            });
        }
        if !resp.status().is_success() {
            return Err(ApiError::Server(format!(
                "failed to update node {}: {}",
                update.id,
                resp.status()
            )));
        }

        Ok(resp.json().await?)
    }

    async fn list_nodes(&self) -> ApiResult<Vec<Node>> {
        self.fetch_items("/v1/nodes").await
    }
}

#[async_trait]
impl PoolStore for ApiClient {
    async fn pool(&self, id: &str) -> ApiResult<Pool> {
        let resp = self
            .build_request(Method::GET, &format!("/v1/pools/{}", id))
            .send()
            .await?;

        if resp.status().as_u16() == 404 {
            return Err(ApiError::NotFound {
                kind: "pool",
                id: id.to_string(),
            });
        }
        if !resp.status().is_success() {
            return Err(ApiError::Server(format!(
                "failed to fetch pool {}: {}",
                id,
                resp.status()
            )));
        }

        Ok(resp.json().await?)
    }

    async fn list_pools(&self) -> ApiResult<Vec<Pool>> {
        self.fetch_items("/v1/pools").await
    }
}

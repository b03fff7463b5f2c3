//! Transporte HTTP
//!
//! El gateway habla con el backend a través de este trait; en producción lo
//! implementa `ReqwestTransport`, en tests un transporte en memoria.

use std::time::Duration;

use async_trait::async_trait;
use http::{Method, StatusCode};
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::utils::errors::AppResult;

/// Petición ya resuelta contra un recurso
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

/// Respuesta cruda del backend
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: String,
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> AppResult<HttpResponse>;
}

/// Transporte real basado en reqwest
pub struct ReqwestTransport {
    client: Client,
    base_url: String,
}

impl ReqwestTransport {
    /// Crear nuevo transporte con timeout configurable
    pub fn new(base_url: &str, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> AppResult<HttpResponse> {
        let url = format!("{}{}", self.base_url, request.path);
        debug!("🌐 {} {}", request.method, url);

        let mut builder = self
            .client
            .request(request.method, &url)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json");

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        Ok(HttpResponse { status, body })
    }
}

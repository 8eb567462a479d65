//! Browser transport over `gloo-net`.
//!
//! ERROR HANDLING
//! ==============
//! Only fetch-level failures become `TransportError`; HTTP error statuses are
//! returned as responses so `HttpClient` can run its 401 interceptor.

use async_trait::async_trait;
use gloo_net::http::Request;

use crate::error::TransportError;

use super::transport::{ApiRequest, ApiResponse, Method, Transport};

#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTransport;

#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let mut builder = match request.method {
            Method::Get => Request::get(&request.path),
            Method::Post => Request::post(&request.path),
            Method::Put => Request::put(&request.path),
            Method::Delete => Request::delete(&request.path),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        let prepared = match &request.body {
            Some(body) => builder.json(body),
            None => builder.build(),
        }
        .map_err(|e| TransportError::new(e.to_string()))?;

        let resp = prepared
            .send()
            .await
            .map_err(|e| TransportError::new(e.to_string()))?;
        let status = resp.status();
        let body = resp.text().await.map_err(|e| TransportError::new(e.to_string()))?;
        Ok(ApiResponse::new(status, body))
    }
}

//! Stateless JSON-RPC 2.0 over HTTP.
//!
//! Every call is a single POST: no retries, no caching and no connection
//! reuse between calls. Failures come back as [`RpcError`] and are never
//! retried here.

use crate::{
    error::RpcError,
    types::{Endpoint, JsonRpcRequest, JSONRPC_VERSION},
};
use reqwest::{header, Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, trace};

#[derive(Debug, Clone)]
pub struct JsonRpcClient {
    http: Client,
    timeout: Option<Duration>,
    version: String,
}

impl JsonRpcClient {
    pub fn new() -> Result<Self, RpcError> {
        let http = Client::builder()
            .pool_max_idle_per_host(0)
            .build()
            .map_err(RpcError::from_reqwest)?;

        Ok(Self {
            http,
            timeout: None,
            version: JSONRPC_VERSION.to_string(),
        })
    }

    /// Default timeout for calls made through [`call`](Self::call). `None` waits forever.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn build_request(&self, method: &str, params: Vec<Value>) -> JsonRpcRequest {
        JsonRpcRequest::new(method, params).with_version(self.version.as_str())
    }

    pub async fn call(
        &self,
        endpoint: &Endpoint,
        method: &str,
        params: Vec<Value>,
    ) -> Result<Value, RpcError> {
        let request = self.build_request(method, params);
        self.call_with(endpoint, &request, self.timeout).await
    }

    pub async fn call_with(
        &self,
        endpoint: &Endpoint,
        request: &JsonRpcRequest,
        timeout: Option<Duration>,
    ) -> Result<Value, RpcError> {
        let url = endpoint.url()?;
        debug!(
            endpoint = %endpoint,
            method = %request.method,
            id = %request.id,
            "Sending JSON-RPC request"
        );

        let mut builder = self
            .http
            .post(url)
            .header(header::ACCEPT, "application/json")
            .json(request);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await.map_err(RpcError::from_reqwest)?;
        let status = response.status();
        if status != StatusCode::OK {
            debug!(endpoint = %endpoint, status = %status, "Non-200 response");
            return Err(RpcError::HttpStatus {
                code: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(RpcError::from_reqwest)?;
        trace!(endpoint = %endpoint, bytes = body.len(), "Received response body");

        decode_body(&body)
    }
}

/// Builds a default request (`id` 1, version "2.0") and sends it with a throwaway client.
pub async fn call(
    endpoint: &Endpoint,
    method: &str,
    params: Vec<Value>,
    timeout: Option<Duration>,
) -> Result<Value, RpcError> {
    let client = JsonRpcClient::new()?.with_timeout(timeout);
    client.call(endpoint, method, params).await
}

/// Interprets the body of a 200 response.
pub fn decode_body(body: &[u8]) -> Result<Value, RpcError> {
    let parsed: Value = serde_json::from_slice(body).map_err(|_| RpcError::MalformedResponse {
        raw_body: String::from_utf8_lossy(body).into_owned(),
    })?;

    match parsed {
        Value::Object(mut object) => {
            if let Some(result) = object.remove("result") {
                Ok(result)
            } else if let Some(error) = object.remove("error") {
                Err(RpcError::Remote { error })
            } else {
                Err(RpcError::UnknownShape {
                    response: Value::Object(object),
                })
            }
        }
        other => Err(RpcError::UnknownShape { response: other }),
    }
}

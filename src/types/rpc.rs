use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

pub const JSONRPC_VERSION: &str = "2.0";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    Number(u64),
    String(String),
}

/// Ids go out as strings unless the caller picks a number.
impl Default for RequestId {
    fn default() -> Self {
        RequestId::String("1".to_string())
    }
}

impl From<u64> for RequestId {
    fn from(id: u64) -> Self {
        RequestId::Number(id)
    }
}

impl From<&str> for RequestId {
    fn from(id: &str) -> Self {
        RequestId::String(id.to_string())
    }
}

impl From<String> for RequestId {
    fn from(id: String) -> Self {
        RequestId::String(id)
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestId::Number(id) => write!(f, "{id}"),
            RequestId::String(id) => f.write_str(id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub method: String,
    pub params: Vec<Value>,
    pub id: RequestId,
}

impl JsonRpcRequest {
    pub fn new(method: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.into(),
            params,
            id: RequestId::default(),
        }
    }

    pub fn with_id(mut self, id: impl Into<RequestId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.jsonrpc = version.into();
        self
    }
}

/// Borrowed view over the standard fields of a JSON-RPC error object.
///
/// The server's payload is kept as-is in [`RpcError::Remote`](crate::RpcError::Remote);
/// this only reads `code`, `message` and `data` out of it.
#[derive(Debug, Clone, Copy)]
pub struct RemoteErrorView<'a> {
    raw: &'a Value,
}

impl<'a> RemoteErrorView<'a> {
    pub fn new(raw: &'a Value) -> Self {
        Self { raw }
    }

    pub fn code(&self) -> Option<i64> {
        self.raw.get("code").and_then(Value::as_i64)
    }

    pub fn message(&self) -> Option<&'a str> {
        match self.raw {
            Value::String(message) => Some(message),
            _ => self.raw.get("message").and_then(Value::as_str),
        }
    }

    pub fn data(&self) -> Option<&'a Value> {
        self.raw.get("data")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_defaults_match_wire_convention() {
        let request = JsonRpcRequest::new("net_peerCount", Vec::new());
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"jsonrpc": "2.0", "method": "net_peerCount", "params": [], "id": "1"})
        );
    }

    #[test]
    fn numeric_ids_stay_numeric() {
        let request = JsonRpcRequest::new("eth_blockNumber", Vec::new()).with_id(7u64);
        assert_eq!(serde_json::to_value(&request).unwrap()["id"], json!(7));
        assert_eq!(RequestId::default().to_string(), "1");
    }

    #[test]
    fn id_and_version_are_configurable() {
        let request = JsonRpcRequest::new("eth_getBalance", vec![json!("0xabc"), json!("latest")])
            .with_id("7")
            .with_version("1.0");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "jsonrpc": "1.0",
                "method": "eth_getBalance",
                "params": ["0xabc", "latest"],
                "id": "7"
            })
        );
    }

    #[test]
    fn remote_error_view_reads_standard_fields() {
        let raw = json!({"code": -32601, "message": "Method not found", "data": {"method": "foo"}});
        let view = RemoteErrorView::new(&raw);
        assert_eq!(view.code(), Some(-32601));
        assert_eq!(view.message(), Some("Method not found"));
        assert_eq!(view.data(), Some(&json!({"method": "foo"})));
    }

    #[test]
    fn remote_error_view_tolerates_bare_strings() {
        let raw = json!("rpc method not available");
        let view = RemoteErrorView::new(&raw);
        assert_eq!(view.code(), None);
        assert_eq!(view.message(), Some("rpc method not available"));
    }
}

use crate::types::RemoteErrorView;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Which stage of the HTTP exchange failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportCode {
    Connect,
    Timeout,
    Request,
    Body,
}

impl fmt::Display for TransportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransportCode::Connect => "connect",
            TransportCode::Timeout => "timeout",
            TransportCode::Request => "request",
            TransportCode::Body => "body",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum RpcError {
    #[error("transport error ({code}): {message}")]
    Transport { code: TransportCode, message: String },

    #[error("unexpected HTTP status {code}")]
    HttpStatus { code: u16 },

    #[error("response body is not valid JSON: {raw_body}")]
    MalformedResponse { raw_body: String },

    #[error("remote error: {error}")]
    Remote { error: Value },

    #[error("response has neither `result` nor `error`: {response}")]
    UnknownShape { response: Value },

    #[error(transparent)]
    Endpoint(#[from] EndpointError),
}

impl RpcError {
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        let code = if err.is_timeout() {
            TransportCode::Timeout
        } else if err.is_connect() {
            TransportCode::Connect
        } else if err.is_body() || err.is_decode() {
            TransportCode::Body
        } else {
            TransportCode::Request
        };
        RpcError::Transport {
            code,
            message: err.to_string(),
        }
    }

    pub fn remote_code(&self) -> Option<i64> {
        match self {
            RpcError::Remote { error } => RemoteErrorView::new(error).code(),
            _ => None,
        }
    }

    pub fn remote_message(&self) -> Option<&str> {
        match self {
            RpcError::Remote { error } => RemoteErrorView::new(error).message(),
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum EndpointError {
    #[error("endpoint host is empty")]
    EmptyHost,

    #[error("invalid endpoint host '{0}'")]
    InvalidHost(String),

    #[error("endpoint '{0}' has no port")]
    MissingPort(String),

    #[error("invalid port '{0}'")]
    InvalidPort(String),

    #[error("invalid endpoint url '{raw}': {source}")]
    InvalidUrl {
        raw: String,
        #[source]
        source: url::ParseError,
    },
}

#[derive(Error, Debug)]
pub enum GethError {
    #[error(transparent)]
    Rpc(#[from] RpcError),

    #[error("node has no accounts")]
    NoAccounts,

    #[error("unexpected result for {method}: {source}")]
    Decode {
        method: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("result for {method} has no `{field}` field")]
    MissingField {
        method: &'static str,
        field: &'static str,
    },
}

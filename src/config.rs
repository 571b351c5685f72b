use crate::{
    error::RpcError,
    geth::GethClient,
    rpc::JsonRpcClient,
    types::{Endpoint, DEFAULT_HOST, DEFAULT_PORT, JSONRPC_VERSION},
};
use clap::Args;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings shared by the binaries. Every flag falls back to an
/// environment variable.
#[derive(Debug, Clone, Args)]
pub struct ClientConfig {
    #[arg(long, global = true, env = "GETH_RPC_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    #[arg(long, global = true, env = "GETH_RPC_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Per-call timeout in seconds, 0 waits forever
    #[arg(long, global = true, env = "GETH_RPC_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    #[arg(long, global = true, env = "GETH_RPC_VERSION", default_value = JSONRPC_VERSION)]
    pub jsonrpc_version: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            jsonrpc_version: JSONRPC_VERSION.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }

    pub fn endpoint(&self) -> Result<Endpoint, RpcError> {
        Ok(Endpoint::new(self.host.as_str(), self.port)?)
    }

    pub fn rpc_client(&self) -> Result<JsonRpcClient, RpcError> {
        Ok(JsonRpcClient::new()?
            .with_timeout(self.timeout())
            .with_version(self.jsonrpc_version.as_str()))
    }

    pub fn geth_client(&self) -> Result<GethClient, RpcError> {
        Ok(GethClient::new(self.rpc_client()?, self.endpoint()?))
    }
}

use alloy::primitives::{Address, Bytes, U64};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

pub const DEFAULT_GAS: u64 = 0x200000;
pub const DEFAULT_FILTER_FROM_BLOCK: &str = "0x1";

/// Block parameter accepted by geth for state queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BlockTag {
    Earliest,
    #[default]
    Latest,
    Pending,
}

impl BlockTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockTag::Earliest => "earliest",
            BlockTag::Latest => "latest",
            BlockTag::Pending => "pending",
        }
    }
}

impl fmt::Display for BlockTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "earliest" => Ok(BlockTag::Earliest),
            "latest" => Ok(BlockTag::Latest),
            "pending" => Ok(BlockTag::Pending),
            other => Err(format!(
                "invalid block parameter '{other}', expected one of: earliest, latest, pending"
            )),
        }
    }
}

/// Transaction object for `eth_sendTransaction` and `eth_call`.
///
/// A missing `to` is a contract creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<Address>,
    pub data: Bytes,
    pub gas: U64,
}

impl TransactionRequest {
    pub fn deploy(from: Address, bytecode: Bytes, gas: u64) -> Self {
        Self {
            from: Some(from),
            to: None,
            data: bytecode,
            gas: U64::from(gas),
        }
    }

    pub fn contract_call(from: Option<Address>, to: Address, data: Bytes, gas: u64) -> Self {
        Self {
            from,
            to: Some(to),
            data,
            gas: U64::from(gas),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub from_block: String,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            from_block: DEFAULT_FILTER_FROM_BLOCK.to_string(),
        }
    }
}

/// Replaces the `@host:port` part of an enode URL, keeping the node id and
/// any `?discport=` query.
pub fn enode_with_host(enode: &str, host: &str, port: u16) -> String {
    let node_id = enode.split('@').next().unwrap_or(enode);
    let query = enode
        .split_once('@')
        .and_then(|(_, addr)| addr.split_once('?'))
        .map(|(_, query)| format!("?{query}"))
        .unwrap_or_default();
    format!("{node_id}@{host}:{port}{query}")
}

use crate::{
    config::ClientConfig,
    types::{BlockTag, Endpoint, DEFAULT_FILTER_FROM_BLOCK, DEFAULT_GAS},
};
use alloy::primitives::{Address, Bytes, B256};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub client: ClientConfig,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    PeerCount,
    Accounts,
    Balance {
        /// Defaults to the node's first account
        #[arg(short, long)]
        account: Option<Address>,
        #[arg(short, long, value_enum, default_value_t = BlockTag::Latest)]
        block: BlockTag,
    },
    AddPeer {
        enode: String,
    },
    NodeInfo,
    Enode {
        /// Print the enode as reachable at this host:port instead
        #[arg(long)]
        advertise: Option<Endpoint>,
    },
    BlockNumber,
    Deploy {
        #[arg(long)]
        bytecode: Bytes,
        #[arg(long, value_parser = parse_quantity, default_value_t = DEFAULT_GAS)]
        gas: u64,
        #[arg(long)]
        from: Option<Address>,
    },
    Send {
        #[arg(long)]
        to: Address,
        #[arg(long)]
        data: Bytes,
        #[arg(long, value_parser = parse_quantity, default_value_t = DEFAULT_GAS)]
        gas: u64,
        #[arg(long)]
        from: Option<Address>,
    },
    Call {
        #[arg(long)]
        to: Address,
        #[arg(long)]
        data: Bytes,
        #[arg(long, value_parser = parse_quantity, default_value_t = DEFAULT_GAS)]
        gas: u64,
        #[arg(short, long, value_enum, default_value_t = BlockTag::Latest)]
        block: BlockTag,
    },
    Receipt {
        tx_hash: B256,
    },
    Transaction {
        tx_hash: B256,
    },
    NewFilter {
        #[arg(long, default_value = DEFAULT_FILTER_FROM_BLOCK)]
        from_block: String,
    },
    FilterChanges {
        filter_id: String,
    },
    /// Call any method; params are a JSON array
    Raw {
        method: String,
        #[arg(default_value = "[]")]
        params: String,
    },
}

/// Accepts gas as `0x`-prefixed hex (as geth prints it) or decimal.
pub fn parse_quantity(raw: &str) -> Result<u64, String> {
    let parsed = match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => raw.parse::<u64>(),
    };
    parsed.map_err(|e| format!("invalid quantity '{raw}': {e}"))
}

pub mod cli;
pub mod config;
pub mod error;
pub mod geth;
pub mod rpc;
pub mod types;

pub use config::*;
pub use error::*;
pub use geth::GethClient;
pub use rpc::*;
pub use types::*;

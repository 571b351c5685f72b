pub mod endpoint;
pub mod eth;
pub mod rpc;

pub use endpoint::*;
pub use eth::*;
pub use rpc::*;

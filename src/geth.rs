use crate::{
    error::GethError,
    rpc::JsonRpcClient,
    types::{BlockTag, Endpoint, FilterOptions, TransactionRequest},
};
use alloy::primitives::{Address, Bytes, B256, U256, U64};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::debug;

pub type Result<T> = std::result::Result<T, GethError>;

/// Typed wrappers over the geth `net_*`, `eth_*` and `admin_*` methods.
#[derive(Debug, Clone)]
pub struct GethClient {
    rpc: JsonRpcClient,
    endpoint: Endpoint,
}

impl GethClient {
    pub fn new(rpc: JsonRpcClient, endpoint: Endpoint) -> Self {
        Self { rpc, endpoint }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub async fn raw(&self, method: &str, params: Vec<Value>) -> Result<Value> {
        Ok(self.rpc.call(&self.endpoint, method, params).await?)
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: &'static str,
        params: Vec<Value>,
    ) -> Result<T> {
        let value = self.raw(method, params).await?;
        decode(method, value)
    }

    pub async fn peer_count(&self) -> Result<u64> {
        let count: U64 = self.request("net_peerCount", vec![]).await?;
        Ok(count.to::<u64>())
    }

    pub async fn accounts(&self) -> Result<Vec<Address>> {
        self.request("eth_accounts", vec![]).await
    }

    /// First account managed by the node, used when no sender is given.
    pub async fn default_account(&self) -> Result<Address> {
        let account = self
            .accounts()
            .await?
            .into_iter()
            .next()
            .ok_or(GethError::NoAccounts)?;
        debug!(endpoint = %self.endpoint, %account, "Using node's first account");
        Ok(account)
    }

    async fn sender(&self, from: Option<Address>) -> Result<Address> {
        match from {
            Some(from) => Ok(from),
            None => self.default_account().await,
        }
    }

    pub async fn balance(&self, account: Option<Address>, block: BlockTag) -> Result<U256> {
        let account = self.sender(account).await?;
        self.request("eth_getBalance", vec![json!(account), json!(block)])
            .await
    }

    pub async fn add_peer(&self, enode: &str) -> Result<bool> {
        self.request("admin_addPeer", vec![json!(enode)]).await
    }

    pub async fn node_info(&self) -> Result<Value> {
        self.raw("admin_nodeInfo", vec![]).await
    }

    pub async fn enode(&self) -> Result<String> {
        const METHOD: &str = "admin_nodeInfo";
        let mut info = self.node_info().await?;
        let enode = info
            .get_mut("enode")
            .map(Value::take)
            .ok_or(GethError::MissingField {
                method: METHOD,
                field: "enode",
            })?;
        decode(METHOD, enode)
    }

    pub async fn block_number(&self) -> Result<u64> {
        let number: U64 = self.request("eth_blockNumber", vec![]).await?;
        Ok(number.to::<u64>())
    }

    /// Sends a contract-creation transaction and returns its hash.
    pub async fn deploy_contract(
        &self,
        bytecode: Bytes,
        gas: u64,
        from: Option<Address>,
    ) -> Result<B256> {
        let from = self.sender(from).await?;
        let tx = TransactionRequest::deploy(from, bytecode, gas);
        self.request("eth_sendTransaction", vec![json!(tx)]).await
    }

    /// Sends a state-changing transaction to a deployed contract.
    pub async fn send_to_contract(
        &self,
        to: Address,
        data: Bytes,
        gas: u64,
        from: Option<Address>,
    ) -> Result<B256> {
        let from = self.sender(from).await?;
        let tx = TransactionRequest::contract_call(Some(from), to, data, gas);
        self.request("eth_sendTransaction", vec![json!(tx)]).await
    }

    /// Executes a read-only call without creating a transaction.
    pub async fn call_contract(
        &self,
        to: Address,
        data: Bytes,
        gas: u64,
        block: BlockTag,
    ) -> Result<Bytes> {
        let tx = TransactionRequest::contract_call(None, to, data, gas);
        self.request("eth_call", vec![json!(tx), json!(block)])
            .await
    }

    /// `None` while the transaction is still pending.
    pub async fn transaction_receipt(&self, hash: B256) -> Result<Option<Value>> {
        self.request("eth_getTransactionReceipt", vec![json!(hash)])
            .await
    }

    pub async fn contract_address(&self, hash: B256) -> Result<Option<Address>> {
        let Some(mut receipt) = self.transaction_receipt(hash).await? else {
            return Ok(None);
        };
        match receipt.get_mut("contractAddress").map(Value::take) {
            Some(address) => decode("eth_getTransactionReceipt", address),
            None => Ok(None),
        }
    }

    pub async fn transaction_by_hash(&self, hash: B256) -> Result<Option<Value>> {
        self.request("eth_getTransactionByHash", vec![json!(hash)])
            .await
    }

    pub async fn new_filter(&self, options: &FilterOptions) -> Result<String> {
        self.request("eth_newFilter", vec![json!(options)]).await
    }

    pub async fn filter_changes(&self, filter_id: &str) -> Result<Vec<Value>> {
        self.request("eth_getFilterChanges", vec![json!(filter_id)])
            .await
    }
}

fn decode<T: DeserializeOwned>(method: &'static str, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|source| GethError::Decode { method, source })
}

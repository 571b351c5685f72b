use clap::Parser;
use eyre::{Result, WrapErr};
use geth_rpc::{
    cli::{Cli, Commands},
    types::{enode_with_host, FilterOptions},
    GethClient,
};
use serde_json::Value;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    let client = cli
        .client
        .geth_client()
        .wrap_err("Invalid client configuration")?;

    run(&client, cli.command)
        .await
        .wrap_err_with(|| format!("Request to {} failed", client.endpoint()))
}

async fn run(client: &GethClient, command: Commands) -> Result<()> {
    let endpoint = client.endpoint();

    match command {
        Commands::PeerCount => {
            let peers = client.peer_count().await?;
            info!("Peers connected to {}: {}", endpoint, peers);
        }
        Commands::Accounts => {
            let accounts = client.accounts().await?;
            info!("Accounts on {}: {}", endpoint, accounts.len());
            for account in accounts {
                info!("  {account}");
            }
        }
        Commands::Balance { account, block } => {
            let balance = client.balance(account, block).await?;
            info!(
                "Balance of {} at {}: {} wei",
                account.map_or_else(|| "first account".to_string(), |a| a.to_string()),
                block,
                balance
            );
        }
        Commands::AddPeer { enode } => {
            let added = client.add_peer(&enode).await?;
            info!("admin_addPeer {}: {}", enode, added);
        }
        Commands::NodeInfo => {
            let node_info = client.node_info().await?;
            print_json(&node_info)?;
        }
        Commands::Enode { advertise } => {
            let enode = client.enode().await?;
            match advertise {
                Some(at) => info!("Enode: {}", enode_with_host(&enode, at.host(), at.port())),
                None => info!("Enode: {}", enode),
            }
        }
        Commands::BlockNumber => {
            let number = client.block_number().await?;
            info!("Current block number: {}", number);
        }
        Commands::Deploy {
            bytecode,
            gas,
            from,
        } => {
            let tx_hash = client.deploy_contract(bytecode, gas, from).await?;
            info!("Deployment transaction sent: {:?}", tx_hash);
        }
        Commands::Send {
            to,
            data,
            gas,
            from,
        } => {
            let tx_hash = client.send_to_contract(to, data, gas, from).await?;
            info!("Transaction sent to {}: {:?}", to, tx_hash);
        }
        Commands::Call {
            to,
            data,
            gas,
            block,
        } => {
            let output = client.call_contract(to, data, gas, block).await?;
            info!("Call to {} returned {}", to, output);
        }
        Commands::Receipt { tx_hash } => match client.transaction_receipt(tx_hash).await? {
            Some(receipt) => {
                info!("Receipt found:");
                info!(
                    "  Block Number: {}",
                    receipt.get("blockNumber").unwrap_or(&serde_json::Value::Null)
                );
                info!("  Status: {}", receipt.get("status").unwrap_or(&serde_json::Value::Null));
                info!(
                    "  Contract Address: {}",
                    receipt.get("contractAddress").unwrap_or(&serde_json::Value::Null)
                );
                info!("  Gas Used: {}", receipt.get("gasUsed").unwrap_or(&serde_json::Value::Null));
            }
            None => info!("No receipt found for transaction {:?}", tx_hash),
        },
        Commands::Transaction { tx_hash } => match client.transaction_by_hash(tx_hash).await? {
            Some(tx) => print_json(&tx)?,
            None => info!("Transaction {:?} not found", tx_hash),
        },
        Commands::NewFilter { from_block } => {
            let filter_id = client.new_filter(&FilterOptions { from_block }).await?;
            info!("New filter id: {}", filter_id);
        }
        Commands::FilterChanges { filter_id } => {
            let changes = client.filter_changes(&filter_id).await?;
            info!("Filter {} has {} changes", filter_id, changes.len());
            print_json(&Value::Array(changes))?;
        }
        Commands::Raw { method, params } => {
            let params: Vec<Value> = serde_json::from_str(&params)
                .wrap_err("Params must be a JSON array")?;
            let result = client.raw(&method, params).await?;
            print_json(&result)?;
        }
    }

    Ok(())
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

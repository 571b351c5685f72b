use chrono::{DateTime, Utc};
use clap::Parser;
use eyre::{Result, WrapErr};
use futures_util::future::join_all;
use geth_rpc::{ClientConfig, Endpoint, GethClient};
use std::{collections::HashMap, sync::Arc, time::Duration};
use tokio::{sync::Mutex, time};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Polls block height and peer count on several nodes at once.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Node to poll as host:port, repeatable. Defaults to --host/--port.
    #[arg(short, long = "endpoint")]
    endpoints: Vec<Endpoint>,

    #[arg(short, long, default_value_t = 10)]
    rounds: usize,

    #[arg(short, long, default_value_t = 5)]
    interval_secs: u64,

    #[command(flatten)]
    client: ClientConfig,
}

/// Counts are per call: each round adds two, one per queried method.
#[derive(Debug, Clone)]
struct EndpointStats {
    block_number: Option<u64>,
    peers: Option<u64>,
    successes: u64,
    failures: u64,
    first_seen: DateTime<Utc>,
    last_update: DateTime<Utc>,
}

type EndpointStatsMap = Arc<Mutex<HashMap<Endpoint, EndpointStats>>>;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    let rpc = args
        .client
        .rpc_client()
        .wrap_err("Failed to build RPC client")?;

    let endpoints = if args.endpoints.is_empty() {
        vec![args.client.endpoint()?]
    } else {
        args.endpoints
    };
    let clients: Vec<GethClient> = endpoints
        .into_iter()
        .map(|endpoint| GethClient::new(rpc.clone(), endpoint))
        .collect();

    let stats: EndpointStatsMap = Arc::new(Mutex::new(HashMap::new()));
    let interval = Duration::from_secs(args.interval_secs);

    info!(
        "Monitoring {} endpoint(s) for {} rounds",
        clients.len(),
        args.rounds
    );

    for round in 1..=args.rounds {
        poll_round(&clients, &stats).await;
        display_stats(round, &stats).await;
        if round < args.rounds {
            time::sleep(interval).await;
        }
    }

    Ok(())
}

async fn poll_round(clients: &[GethClient], stats: &EndpointStatsMap) {
    let polls = clients.iter().map(|client| async move {
        let (block_number, peers) = tokio::join!(client.block_number(), client.peer_count());
        (client.endpoint().clone(), block_number, peers)
    });

    for (endpoint, block_number, peers) in join_all(polls).await {
        let now = Utc::now();
        let mut stats = stats.lock().await;
        let entry = stats
            .entry(endpoint.clone())
            .or_insert_with(|| EndpointStats {
                block_number: None,
                peers: None,
                successes: 0,
                failures: 0,
                first_seen: now,
                last_update: now,
            });
        entry.last_update = now;

        match block_number {
            Ok(block_number) => {
                if entry.block_number.is_some_and(|last| block_number > last) {
                    info!("New block on {}: {}", endpoint, block_number);
                }
                entry.block_number = Some(block_number);
                entry.successes += 1;
            }
            Err(e) => {
                entry.failures += 1;
                warn!(endpoint = %endpoint, error = %e, "eth_blockNumber failed");
            }
        }

        match peers {
            Ok(peers) => {
                entry.peers = Some(peers);
                entry.successes += 1;
            }
            Err(e) => {
                entry.failures += 1;
                warn!(endpoint = %endpoint, error = %e, "net_peerCount failed");
            }
        }
    }
}

async fn display_stats(round: usize, stats: &EndpointStatsMap) {
    let stats_lock = stats.lock().await;

    info!("=== Round {} ===", round);

    let mut endpoints: Vec<_> = stats_lock.iter().collect();
    endpoints.sort_by_key(|(endpoint, _)| endpoint.to_string());

    for (endpoint, stats) in endpoints {
        let watched = stats.last_update - stats.first_seen;
        info!(
            "{}: block={} peers={}",
            endpoint,
            stats
                .block_number
                .map_or_else(|| "-".to_string(), |n| n.to_string()),
            stats.peers.map_or_else(|| "-".to_string(), |n| n.to_string())
        );
        info!(
            "  calls ok={} failed={} watched for {}s",
            stats.successes,
            stats.failures,
            watched.num_seconds()
        );
    }
}

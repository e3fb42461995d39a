use anyhow::Result;
use clap::Parser;
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use zfs_dashboard::{
    config::Config,
    coordinator::Coordinator,
    filter::FilterSet,
    source::{InventorySource, ZfsCommands},
    stream, units,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/Default.toml")]
    config: String,

    /// Update interval in seconds (overrides config)
    #[arg(short, long, env = "ZFS_DASHBOARD_INTERVAL")]
    interval: Option<u64>,

    /// Only show this pool
    #[arg(short, long, env = "ZFS_DASHBOARD_POOL")]
    pool: Option<String>,

    /// Regex filter for dataset names
    #[arg(short, long, env = "ZFS_DASHBOARD_DATASET")]
    dataset: Option<String>,

    /// Fetch once, print the filtered graph as JSON and exit
    #[arg(long)]
    oneshot: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut config = Config::load(&args.config)?;
    if let Some(interval) = args.interval {
        config.refresh.interval_seconds = interval;
    }
    if args.pool.is_some() {
        config.filter.pool = args.pool.clone();
    }
    if args.dataset.is_some() {
        config.filter.dataset_pattern = args.dataset.clone();
    }

    if args.oneshot {
        return oneshot(&config).await;
    }

    info!(
        "Starting ZFS dashboard core v{} (refresh every {}s)",
        env!("CARGO_PKG_VERSION"),
        config.refresh.interval_seconds
    );

    let (record_tx, record_rx) = mpsc::channel(config.stream.queue_capacity);
    let (handle, coordinator_task) = Coordinator::new(&config, ZfsCommands).spawn(record_rx);
    handle.refresh().await;

    // A missing `zpool` must not keep the inventory view from working.
    let stream_handle = match stream::spawn(&config.stream, record_tx) {
        Ok(h) => Some(h),
        Err(e) => {
            warn!(error = %e, "counter stream unavailable, showing inventory only");
            None
        }
    };

    // Stand-in for the display collaborator: log a summary per snapshot.
    let mut snapshots = handle.subscribe();
    let summary_task = tokio::spawn(async move {
        while snapshots.changed().await.is_ok() {
            let view = snapshots.borrow_and_update().clone();
            for pool in &view.pools {
                info!(
                    pool = %pool.name,
                    health = %pool.health,
                    cap = %pool.cap,
                    read = %units::humanize_bytes(pool.read_bytes as f64),
                    write = %units::humanize_bytes(pool.write_bytes as f64),
                    vdevs = pool.vdevs.len(),
                    "snapshot"
                );
            }
        }
    });

    tokio::signal::ctrl_c().await?;
    info!("shutting down");

    if let Some(stream_handle) = stream_handle {
        stream_handle.stop().await;
    }
    handle.shutdown().await;
    let _ = coordinator_task.await;
    summary_task.abort();

    Ok(())
}

async fn oneshot(config: &Config) -> Result<()> {
    let raw = ZfsCommands.fetch().await;
    let graph = zfs_dashboard::hierarchy::refresh(&raw);
    let filters = FilterSet::new(
        config.filter.pool.clone(),
        None,
        config.filter.dataset_pattern.as_deref(),
    );
    let view = filters.apply(&graph);
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}

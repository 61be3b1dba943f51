mod adapter;
mod aggregator;
mod config;
mod fetch;
mod model;
mod normalizer;
mod query;

use std::fs;
use std::path::Path;

use adapter::SourceRegistry;
use config::AppConfig;
use fetch::DocumentClient;
use model::Snapshot;
use serde_json::json;
use tokio::time::{sleep, Duration};
use tracing::{error, info, warn};

const CONFIG_PATH: &str = "config.json";

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Load configuration from file, falling back to the built-in sources
    let config = if Path::new(CONFIG_PATH).exists() {
        match config::load_config(CONFIG_PATH) {
            Ok(cfg) => cfg,
            Err(e) => {
                error!("Config load error: {}", e);
                return;
            }
        }
    } else {
        info!("{} not found, using built-in sources", CONFIG_PATH);
        AppConfig::default()
    };

    let AppConfig {
        check_interval_seconds,
        output_path,
        sources,
    } = config;

    // A defective source table is a programming error; refuse to start.
    let registry = match SourceRegistry::from_specs(sources) {
        Ok(r) => r,
        Err(e) => {
            error!("Invalid source configuration: {}", e);
            return;
        }
    };

    let fetcher = match DocumentClient::new() {
        Ok(f) => f,
        Err(e) => {
            error!("Failed to build document client: {:?}", e);
            return;
        }
    };

    // Main processing loop: rebuild the unified collection wholesale each run.
    loop {
        info!("Aggregating {} sources...", registry.adapters().len());
        let snapshot = aggregator::aggregate(&registry, &fetcher).await;

        info!(
            "Run finished: {} listings, {} sources failed",
            snapshot.listings.len(),
            snapshot.failures.len()
        );
        for adapter in registry.adapters() {
            let count = query::filter_by_source(&snapshot.listings, adapter.name()).len();
            info!("{}: {} listings", adapter.name(), count);
        }

        write_snapshot(&snapshot, &output_path);

        info!("Waiting {}s until the next run...", check_interval_seconds);
        sleep(Duration::from_secs(check_interval_seconds)).await;
    }
}

/// Writes the finished snapshot as the JSON document the UI reads: the
/// unified listings plus which sources failed this run.
fn write_snapshot(snapshot: &Snapshot, path: &str) {
    let failed_sources: Vec<_> = snapshot
        .failures
        .iter()
        .map(|f| {
            json!({
                "source": f.source,
                "cause": f.cause.to_string(),
            })
        })
        .collect();

    let payload = json!({
        "generated_at": snapshot.finished_at.to_rfc3339(),
        "products": snapshot.listings,
        "failed_sources": failed_sources,
    });

    match serde_json::to_string_pretty(&payload) {
        Ok(body) => {
            if let Err(e) = fs::write(path, body) {
                warn!("Failed to write {}: {}", path, e);
            } else {
                info!("Saved snapshot: {}", path);
            }
        }
        Err(e) => warn!("Snapshot serialization failed: {}", e),
    }
}

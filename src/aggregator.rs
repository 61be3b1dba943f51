use chrono::Utc;
use futures::future::join_all;
use tracing::{info, warn};

use crate::adapter::SourceRegistry;
use crate::fetch::DocumentFetcher;
use crate::model::{Snapshot, SourceFailure};
use crate::normalizer;

/// One whole-rebuild aggregation run. Documents are fetched concurrently,
/// but results are collected positionally, so each source's block lands in
/// declaration order whatever the completion order. A failed source
/// contributes zero records and one `SourceFailure`; it never blocks the
/// other sources.
pub async fn aggregate(registry: &SourceRegistry, fetcher: &dyn DocumentFetcher) -> Snapshot {
    let fetches = registry
        .adapters()
        .iter()
        .map(|adapter| fetcher.fetch(adapter.document()));
    let documents = join_all(fetches).await;

    let mut listings = Vec::new();
    let mut failures = Vec::new();

    for (adapter, result) in registry.adapters().iter().zip(documents) {
        match result {
            Ok(raws) => {
                let batch = normalizer::normalize_all(adapter, &raws);
                info!(
                    "{}: kept {} of {} records",
                    adapter.name(),
                    batch.len(),
                    raws.len()
                );
                listings.extend(batch);
            }
            Err(cause) => {
                warn!("{}: retrieval failed: {}", adapter.name(), cause);
                failures.push(SourceFailure {
                    source: adapter.name().to_string(),
                    cause,
                });
            }
        }
    }

    Snapshot {
        listings,
        failures,
        finished_at: Utc::now(),
    }
}

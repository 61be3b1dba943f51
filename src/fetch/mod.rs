pub mod fetcher;

pub use fetcher::DocumentClient;

use crate::config::DocumentLocation;
use crate::model::{FetchError, RawRecord};

/// Retrieval seam between the aggregator and the outside world. Implementors
/// yield a source's whole document as a sequence of raw records, or fail with
/// a retrieval error the aggregator records and moves past.
#[async_trait::async_trait]
pub trait DocumentFetcher: Send + Sync {
    async fn fetch(&self, location: &DocumentLocation) -> Result<Vec<RawRecord>, FetchError>;
}

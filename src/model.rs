// Core structs: Listing, Snapshot, SourceFailure
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A raw upstream record: untyped field -> value mapping, shape owned
/// entirely by the source. Only lives for the duration of normalization.
pub type RawRecord = serde_json::Map<String, serde_json::Value>;

/// What kind of entity a source lists. Decides the sentinel title used to
/// detect unusable records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Product,
    Restaurant,
}

impl SourceKind {
    pub fn sentinel_title(&self) -> &'static str {
        match self {
            SourceKind::Product => "Unknown Product",
            SourceKind::Restaurant => "Unknown Restaurant",
        }
    }
}

/// One normalized listing. `None` means the field concept does not exist for
/// this listing's source; an empty string means the source defines the field
/// but the upstream value was blank.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listing {
    pub title: String,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pack_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_url: Option<String>,
}

impl Listing {
    /// Blank listing tagged with its source; the adapter fills in the rest.
    pub fn new(source: &str) -> Self {
        Self {
            title: String::new(),
            source: source.to_string(),
            price: None,
            old_price: None,
            discount: None,
            category: None,
            brand: None,
            pack_size: None,
            weight: None,
            quantity: None,
            in_stock: None,
            rating: None,
            cuisine: None,
            location: None,
            image: None,
            product_url: None,
        }
    }
}

/// One source that could not contribute to an aggregation run.
#[derive(Debug)]
pub struct SourceFailure {
    pub source: String,
    pub cause: FetchError,
}

/// Result of one aggregation run. Rebuilt wholesale each run; consumers only
/// ever see a finished snapshot.
#[derive(Debug)]
pub struct Snapshot {
    pub listings: Vec<Listing>,
    pub failures: Vec<SourceFailure>,
    pub finished_at: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("http request failed: {0}")]
    Http(String),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("request timed out")]
    Timeout,
    #[error("document is not a JSON array of records: {0}")]
    Parse(String),
    #[error("failed to read document: {0}")]
    Io(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("duplicate source name: {0}")]
    DuplicateSource(String),
    #[error("source {0} declares no title candidates")]
    MissingTitleRule(String),
    #[error("failed to read config: {0}")]
    Read(String),
    #[error("failed to parse config: {0}")]
    Parse(String),
}

// Declarative per-source field mapping onto the unified schema.
use std::collections::HashSet;

use serde_json::Value;

use crate::config::{DocumentLocation, SourceSpec, TargetField};
use crate::model::{ConfigError, Listing, RawRecord, SourceKind};

/// Interprets one source's mapping table. Pure: never fails, missing data
/// degrades to the declared fallbacks.
pub struct SourceAdapter {
    spec: SourceSpec,
}

impl SourceAdapter {
    pub fn new(spec: SourceSpec) -> Self {
        Self { spec }
    }

    pub fn name(&self) -> &str {
        &self.spec.name
    }

    pub fn kind(&self) -> SourceKind {
        self.spec.kind
    }

    pub fn document(&self) -> &DocumentLocation {
        &self.spec.document
    }

    /// Maps a raw record into a listing. For each rule the first
    /// present-and-truthy candidate key wins, otherwise the fallback literal.
    /// A missing title falls back to the kind's sentinel so the normalizer
    /// can filter the record out.
    pub fn normalize(&self, raw: &RawRecord) -> Listing {
        let mut listing = Listing::new(&self.spec.name);

        for rule in &self.spec.fields {
            let value = rule
                .keys
                .iter()
                .find_map(|key| raw.get(key).and_then(truthy_string));

            if rule.field == TargetField::Title {
                listing.title =
                    value.unwrap_or_else(|| self.spec.kind.sentinel_title().to_string());
            } else {
                assign(&mut listing, rule.field, value.or_else(|| rule.fallback.clone()));
            }
        }

        listing
    }
}

/// The configured sources, validated, in declaration order.
pub struct SourceRegistry {
    adapters: Vec<SourceAdapter>,
}

impl SourceRegistry {
    /// Fails on configuration defects: duplicate source names, or a source
    /// whose title rule is missing or has no candidate keys. These are
    /// programming errors and must stop aggregation before it starts.
    pub fn from_specs(specs: Vec<SourceSpec>) -> Result<Self, ConfigError> {
        let mut seen = HashSet::new();
        for spec in &specs {
            if !seen.insert(spec.name.clone()) {
                return Err(ConfigError::DuplicateSource(spec.name.clone()));
            }
            let has_title = spec
                .fields
                .iter()
                .any(|r| r.field == TargetField::Title && !r.keys.is_empty());
            if !has_title {
                return Err(ConfigError::MissingTitleRule(spec.name.clone()));
            }
        }

        Ok(Self {
            adapters: specs.into_iter().map(SourceAdapter::new).collect(),
        })
    }

    pub fn adapters(&self) -> &[SourceAdapter] {
        &self.adapters
    }
}

/// Truthiness follows the upstream documents' JS heritage: null, "", 0 and
/// false select the fallback. Numbers and booleans stringify.
fn truthy_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => {
            if n.as_f64().is_some_and(|f| f == 0.0) {
                None
            } else {
                Some(n.to_string())
            }
        }
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

fn assign(listing: &mut Listing, field: TargetField, value: Option<String>) {
    match field {
        TargetField::Title => {}
        TargetField::Category => listing.category = value,
        TargetField::Brand => listing.brand = value,
        TargetField::PackSize => listing.pack_size = value,
        TargetField::Weight => listing.weight = value,
        TargetField::Quantity => listing.quantity = value,
        TargetField::Price => listing.price = value,
        TargetField::OldPrice => listing.old_price = value,
        TargetField::Discount => listing.discount = value,
        TargetField::InStock => listing.in_stock = value,
        TargetField::Rating => listing.rating = value,
        TargetField::Cuisine => listing.cuisine = value,
        TargetField::Location => listing.location = value,
        TargetField::Image => listing.image = value,
        TargetField::ProductUrl => listing.product_url = value,
    }
}

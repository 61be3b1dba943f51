use crate::adapter::SourceAdapter;
use crate::model::{Listing, RawRecord};

/// Runs the adapter and drops unusable records: a title that is blank after
/// trimming, or the sentinel the adapter substitutes when no candidate key
/// held a value. Rejection is silent filtering, not an error.
pub fn apply(adapter: &SourceAdapter, raw: &RawRecord) -> Option<Listing> {
    let listing = adapter.normalize(raw);
    let title = listing.title.trim();
    if title.is_empty() || title == adapter.kind().sentinel_title() {
        return None;
    }
    Some(listing)
}

pub fn normalize_all(adapter: &SourceAdapter, raws: &[RawRecord]) -> Vec<Listing> {
    raws.iter().filter_map(|raw| apply(adapter, raw)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_sources;
    use serde_json::json;

    fn zepto() -> SourceAdapter {
        let spec = default_sources().into_iter().find(|s| s.name == "Zepto").unwrap();
        SourceAdapter::new(spec)
    }

    fn raw(value: serde_json::Value) -> RawRecord {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn record_without_title_is_rejected() {
        assert!(apply(&zepto(), &raw(json!({ "price": "10" }))).is_none());
    }

    #[test]
    fn whitespace_title_is_rejected() {
        assert!(apply(&zepto(), &raw(json!({ "name": "   " }))).is_none());
    }

    #[test]
    fn titled_record_with_nothing_else_is_accepted() {
        let listing = apply(&zepto(), &raw(json!({ "name": "Bread" }))).unwrap();
        assert_eq!(listing.title, "Bread");
        assert_eq!(listing.price.as_deref(), Some("Not Available"));
    }

    #[test]
    fn normalize_all_keeps_document_order() {
        let raws = vec![
            raw(json!({ "name": "Bread", "price": "40" })),
            raw(json!({ "price": "10" })),
            raw(json!({ "name": "Milk", "price": "25" })),
        ];

        let listings = normalize_all(&zepto(), &raws);
        let titles: Vec<&str> = listings.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, ["Bread", "Milk"]);
    }
}

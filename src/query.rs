// Pure queries over a finished snapshot's listings.
use crate::model::Listing;

/// Exact provenance match, collection order preserved. An unknown source
/// yields an empty result, not an error.
pub fn filter_by_source(listings: &[Listing], source: &str) -> Vec<Listing> {
    listings
        .iter()
        .filter(|listing| listing.source == source)
        .cloned()
        .collect()
}

/// Case-insensitive contiguous-substring match on the title. The empty query
/// matches every listing. No ranking; matches keep their original position.
pub fn search_by_title(listings: &[Listing], query: &str) -> Vec<Listing> {
    let needle = query.to_lowercase();
    listings
        .iter()
        .filter(|listing| listing.title.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

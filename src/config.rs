use serde::Deserialize;
use std::fs;

use crate::model::{ConfigError, SourceKind};

/// Unified-schema field a mapping rule can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetField {
    Title,
    Category,
    Brand,
    PackSize,
    Weight,
    Quantity,
    Price,
    OldPrice,
    Discount,
    InStock,
    Rating,
    Cuisine,
    Location,
    Image,
    ProductUrl,
}

/// One extraction rule: candidate upstream keys tried in order, then the
/// fallback literal. `fallback: None` leaves the field absent when no
/// candidate yields a value. The title rule ignores its fallback; the
/// sentinel title of the source's kind is used instead.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldRule {
    pub field: TargetField,
    pub keys: Vec<String>,
    #[serde(default)]
    pub fallback: Option<String>,
}

/// Where a source's document lives.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentLocation {
    Url(String),
    Path(String),
}

/// Static configuration of one upstream source: identity, document location
/// and the full field-mapping table. Adding a source is a data change.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceSpec {
    pub name: String,
    pub kind: SourceKind,
    pub document: DocumentLocation,
    pub fields: Vec<FieldRule>,
}

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_interval")]
    pub check_interval_seconds: u64,
    #[serde(default = "default_output_path")]
    pub output_path: String,
    #[serde(default = "default_sources")]
    pub sources: Vec<SourceSpec>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            check_interval_seconds: default_interval(),
            output_path: default_output_path(),
            sources: default_sources(),
        }
    }
}

fn default_interval() -> u64 {
    86400
}

fn default_output_path() -> String {
    "unified_products.json".to_string()
}

pub fn load_config(path: &str) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::Read(e.to_string()))?;
    let config: AppConfig =
        serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
    Ok(config)
}

fn rule(field: TargetField, keys: &[&str], fallback: Option<&str>) -> FieldRule {
    FieldRule {
        field,
        keys: keys.iter().map(|k| k.to_string()).collect(),
        fallback: fallback.map(|f| f.to_string()),
    }
}

/// The four stock sources, declaration order Zepto, Blinkit, BigBasket,
/// Swiggy. Key lists and fallback literals follow each upstream document's
/// actual shape.
pub fn default_sources() -> Vec<SourceSpec> {
    use TargetField::*;

    vec![
        SourceSpec {
            name: "Zepto".to_string(),
            kind: SourceKind::Product,
            document: DocumentLocation::Path("zepto_products.json".to_string()),
            fields: vec![
                rule(Title, &["name"], None),
                rule(Category, &["category"], Some("N/A")),
                rule(Price, &["price"], Some("Not Available")),
                rule(Quantity, &["quantity"], Some("N/A")),
                rule(OldPrice, &["original_price"], Some("N/A")),
                rule(Discount, &["discount"], Some("No discount")),
                rule(InStock, &["in_stock"], Some("Unknown")),
                rule(Image, &["image_url"], Some("")),
                rule(ProductUrl, &["product_link"], Some("")),
            ],
        },
        SourceSpec {
            name: "Blinkit".to_string(),
            kind: SourceKind::Product,
            document: DocumentLocation::Path("blinkit_products.json".to_string()),
            fields: vec![
                rule(Title, &["name"], None),
                rule(Category, &["category"], Some("N/A")),
                rule(Weight, &["weight"], Some("N/A")),
                rule(Price, &["new_price"], Some("Not Available")),
                rule(OldPrice, &["old_price"], Some("N/A")),
                rule(Discount, &["discount"], Some("No discount")),
                rule(InStock, &["in_stock"], Some("Unknown")),
                rule(Image, &["image_url"], Some("")),
                rule(ProductUrl, &["product_url"], Some("")),
            ],
        },
        SourceSpec {
            name: "BigBasket".to_string(),
            kind: SourceKind::Product,
            document: DocumentLocation::Path("big_products.json".to_string()),
            fields: vec![
                // Some BigBasket dumps capitalize the name key.
                rule(Title, &["name", "Name"], None),
                rule(Category, &["category"], Some("N/A")),
                rule(Brand, &["brand"], Some("Unknown Brand")),
                rule(PackSize, &["pack_size"], Some("N/A")),
                rule(Price, &["new_price", "price"], Some("Not Available")),
                rule(OldPrice, &["old_price"], Some("N/A")),
                rule(Discount, &["discount"], Some("No discount")),
                rule(InStock, &["in_stock"], Some("Unknown")),
                rule(Image, &["image_url"], Some("")),
                rule(ProductUrl, &["product_url"], Some("")),
            ],
        },
        SourceSpec {
            name: "Swiggy".to_string(),
            kind: SourceKind::Restaurant,
            document: DocumentLocation::Path("swiggy_restaurants.json".to_string()),
            fields: vec![
                rule(Title, &["Name", "title"], None),
                rule(Rating, &["Rating"], Some("")),
                rule(Cuisine, &["Cuisine"], Some("")),
                rule(Location, &["Location"], Some("")),
                rule(Image, &["Image URL"], Some("")),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sources_in_declaration_order() {
        let names: Vec<String> = default_sources().into_iter().map(|s| s.name).collect();
        assert_eq!(names, ["Zepto", "Blinkit", "BigBasket", "Swiggy"]);
    }

    #[test]
    fn every_default_source_has_title_candidates() {
        for spec in default_sources() {
            let title = spec
                .fields
                .iter()
                .find(|r| r.field == TargetField::Title)
                .unwrap_or_else(|| panic!("{} has no title rule", spec.name));
            assert!(!title.keys.is_empty(), "{} title rule has no keys", spec.name);
        }
    }

    #[test]
    fn parses_config_json() {
        let raw = r#"{
            "check_interval_seconds": 600,
            "output_path": "out.json",
            "sources": [
                {
                    "name": "Zepto",
                    "kind": "product",
                    "document": { "url": "http://localhost/zepto.json" },
                    "fields": [
                        { "field": "title", "keys": ["name"] },
                        { "field": "price", "keys": ["price"], "fallback": "Not Available" }
                    ]
                }
            ]
        }"#;

        let config: AppConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(config.check_interval_seconds, 600);
        assert_eq!(config.sources.len(), 1);
        let spec = &config.sources[0];
        assert_eq!(spec.kind, SourceKind::Product);
        assert_eq!(
            spec.document,
            DocumentLocation::Url("http://localhost/zepto.json".to_string())
        );
        assert_eq!(spec.fields[0].fallback, None);
        assert_eq!(spec.fields[1].fallback.as_deref(), Some("Not Available"));
    }

    #[test]
    fn omitted_sections_fall_back_to_defaults() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.check_interval_seconds, 86400);
        assert_eq!(config.output_path, "unified_products.json");
        assert_eq!(config.sources.len(), 4);
    }
}

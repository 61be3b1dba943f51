use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tokio::fs;

use crate::config::DocumentLocation;
use crate::fetch::DocumentFetcher;
use crate::model::{FetchError, RawRecord};

/// Default fetcher: HTTP for `url` documents, local disk for `path`
/// documents. Sources publish their catalogs as JSON arrays of records.
pub struct DocumentClient {
    client: Client,
}

impl DocumentClient {
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) PriceRadarBot/0.1")
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| FetchError::Http(e.to_string()))?;

        Ok(Self { client })
    }

    async fn fetch_url(&self, url: &str) -> Result<Vec<RawRecord>, FetchError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::Http(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Http(e.to_string()))?;
        parse_records(&body)
    }

    async fn fetch_path(&self, path: &str) -> Result<Vec<RawRecord>, FetchError> {
        let body = fs::read_to_string(path)
            .await
            .map_err(|e| FetchError::Io(e.to_string()))?;
        parse_records(&body)
    }
}

#[async_trait::async_trait]
impl DocumentFetcher for DocumentClient {
    async fn fetch(&self, location: &DocumentLocation) -> Result<Vec<RawRecord>, FetchError> {
        match location {
            DocumentLocation::Url(url) => self.fetch_url(url).await,
            DocumentLocation::Path(path) => self.fetch_path(path).await,
        }
    }
}

/// A document must be a JSON array. Entries that are not objects carry no
/// usable fields and are skipped rather than failing the whole source.
fn parse_records(body: &str) -> Result<Vec<RawRecord>, FetchError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| FetchError::Parse(e.to_string()))?;

    match value {
        Value::Array(entries) => Ok(entries
            .into_iter()
            .filter_map(|entry| match entry {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .collect()),
        other => Err(FetchError::Parse(format!(
            "expected a JSON array, got {}",
            json_type_name(&other)
        ))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn fetch_url_parses_record_array() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/zepto_products.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"[{"name":"Bread","price":"40"},{"name":"Milk"}]"#,
            ))
            .mount(&server)
            .await;

        let client = DocumentClient::new().unwrap();
        let location = DocumentLocation::Url(format!("{}/zepto_products.json", server.uri()));
        let records = client.fetch(&location).await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("name").unwrap(), "Bread");
    }

    #[tokio::test]
    async fn fetch_url_maps_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing.json"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = DocumentClient::new().unwrap();
        let location = DocumentLocation::Url(format!("{}/missing.json", server.uri()));

        assert!(matches!(
            client.fetch(&location).await,
            Err(FetchError::Status(404))
        ));
    }

    #[tokio::test]
    async fn non_array_document_is_a_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/doc.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"items":[]}"#))
            .mount(&server)
            .await;

        let client = DocumentClient::new().unwrap();
        let location = DocumentLocation::Url(format!("{}/doc.json", server.uri()));

        assert!(matches!(
            client.fetch(&location).await,
            Err(FetchError::Parse(_))
        ));
    }

    #[tokio::test]
    async fn non_object_entries_are_skipped() {
        let records = parse_records(r#"[{"name":"Bread"}, 5, "junk", null]"#).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[tokio::test]
    async fn fetch_path_reads_local_document() {
        let path = std::env::temp_dir().join("price_radar_fetch_path_test.json");
        tokio::fs::write(&path, r#"[{"name":"Bread"}]"#).await.unwrap();

        let client = DocumentClient::new().unwrap();
        let location = DocumentLocation::Path(path.to_string_lossy().into_owned());
        let records = client.fetch(&location).await.unwrap();

        assert_eq!(records.len(), 1);
        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let client = DocumentClient::new().unwrap();
        let location = DocumentLocation::Path("no/such/document.json".to_string());

        assert!(matches!(
            client.fetch(&location).await,
            Err(FetchError::Io(_))
        ));
    }
}

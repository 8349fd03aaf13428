//! Canned response table.
//!
//! The table layout is `{"error_cases": [{id, request, response}]}`. A request
//! matches a case when method, path and the complete query map are equal.

use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use orderbridge_proto::{ApiRequest, ApiResponse};

use crate::error::Error;
use crate::source::ResponseSource;

/// Built-in case table covering every v1/v2 difference the harness checks.
pub const DEFAULT_CASES: &str = include_str!("../fixtures/cases.json");

/// One canned request/response pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureCase {
    /// Stable case identifier.
    pub id: String,
    /// Request the case answers.
    pub request: ApiRequest,
    /// Canned response.
    pub response: ApiResponse,
}

impl FixtureCase {
    /// Whether this case answers `request`.
    pub fn matches(&self, request: &ApiRequest) -> bool {
        self.request.method.eq_ignore_ascii_case(&request.method)
            && self.request.path == request.path
            && self.request.query == request.query
    }
}

#[derive(Debug, Deserialize)]
struct FixtureTable {
    error_cases: Vec<FixtureCase>,
}

/// Response source backed by a canned case table.
#[derive(Debug, Clone, Default)]
pub struct FixtureSource {
    cases: Vec<FixtureCase>,
}

impl FixtureSource {
    /// Create a source from explicit cases.
    pub fn new(cases: Vec<FixtureCase>) -> Self {
        Self { cases }
    }

    /// Load the built-in case table.
    pub fn embedded() -> Result<Self, Error> {
        Self::from_json(DEFAULT_CASES)
    }

    /// Parse a case table.
    pub fn from_json(text: &str) -> Result<Self, Error> {
        let table: FixtureTable =
            serde_json::from_str(text).map_err(|e| Error::Fixture(e.to_string()))?;
        Ok(Self::new(table.error_cases))
    }

    /// Read and parse a case table file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&text)
    }

    /// All cases in table order.
    pub fn cases(&self) -> &[FixtureCase] {
        &self.cases
    }

    /// Look up a case by identifier.
    pub fn case(&self, id: &str) -> Option<&FixtureCase> {
        self.cases.iter().find(|c| c.id == id)
    }

    /// Find the canned response for a request. The first matching case wins.
    pub fn lookup(&self, request: &ApiRequest) -> Option<&ApiResponse> {
        self.cases
            .iter()
            .find(|c| c.matches(request))
            .map(|c| &c.response)
    }
}

#[async_trait]
impl ResponseSource for FixtureSource {
    async fn fetch(&self, request: &ApiRequest) -> Result<ApiResponse, Error> {
        match self.lookup(request) {
            Some(response) => {
                debug!(request = %request, status = response.status, "fixture hit");
                Ok(response.clone())
            }
            None => Err(Error::NoFixture {
                method: request.method.clone(),
                path: request.path.clone(),
                query: request.query.clone(),
            }),
        }
    }

    fn describe(&self) -> String {
        format!("fixtures ({} cases)", self.cases.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orderbridge_proto::vocab::{V1_ORDERS_PATH, V2_ORDERS_PATH};

    #[test]
    fn test_embedded_table_parses() {
        let source = FixtureSource::embedded().unwrap();
        assert_eq!(source.cases().len(), 6);
        assert!(source.case("deprecated_v1_monitored_as_outage").is_some());
        assert_eq!(source.describe(), "fixtures (6 cases)");
    }

    #[test]
    fn test_lookup_requires_full_query_match() {
        let source = FixtureSource::embedded().unwrap();

        let exact = ApiRequest::get(V2_ORDERS_PATH)
            .with_query("userId", "555")
            .with_query("includeItems", "false");
        assert_eq!(source.lookup(&exact).map(|r| r.status), Some(200));

        let partial = ApiRequest::get(V2_ORDERS_PATH).with_query("userId", "555");
        assert!(source.lookup(&partial).is_none());

        let wrong_method = ApiRequest::new("POST", V2_ORDERS_PATH).with_query("userId", "123");
        assert!(source.lookup(&wrong_method).is_none());
    }

    #[test]
    fn test_method_match_ignores_case() {
        let source = FixtureSource::embedded().unwrap();
        let mut request = ApiRequest::get(V1_ORDERS_PATH).with_query("userId", "999");
        request.method = "get".to_string();
        assert_eq!(source.lookup(&request).map(|r| r.status), Some(410));
    }

    #[tokio::test]
    async fn test_fetch_miss_is_an_error() {
        let source = FixtureSource::embedded().unwrap();
        let err = source
            .fetch(&ApiRequest::get("/api/v3/orders"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NoFixture { .. }));
    }

    #[tokio::test]
    async fn test_fetch_returns_owned_copy() {
        let source = FixtureSource::embedded().unwrap();
        let request = ApiRequest::get(V2_ORDERS_PATH).with_query("userId", "invalid");
        let response = source.fetch(&request).await.unwrap();
        assert_eq!(response.status, 400);
        assert_eq!(response.body["errors"][0]["code"], "INVALID_USER_ID");
    }

    #[test]
    fn test_invalid_table() {
        assert!(matches!(
            FixtureSource::from_json(r#"{"cases": []}"#),
            Err(Error::Fixture(_))
        ));
        assert!(matches!(
            FixtureSource::from_path("/nonexistent/cases.json"),
            Err(Error::Io(_))
        ));
    }
}

//! Reporting API boundary
//!
//! `ReportingApi` is the seam between the report logic and the network.
//! `AnalyticsClient` implements it over the Management and Core Reporting
//! v3 HTTP endpoints.

use crate::services::auth::AccessToken;
use crate::types::{PagestatsError, QuerySpec, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

const API_BASE_URL: &str = "https://www.googleapis.com/analytics/v3";

/// HTTP request timeout in seconds
const REQUEST_TIMEOUT_SECS: u64 = 60;

/// One entry of a management listing (account, web property or view)
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ManagementItem {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// A management listing; `items` is absent when the caller can see nothing
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ManagementList {
    #[serde(default)]
    pub items: Option<Vec<ManagementItem>>,
}

impl ManagementList {
    pub fn first_id(&self) -> Option<&str> {
        self.items.as_ref()?.first().map(|item| item.id.as_str())
    }
}

/// One page of report rows, cells as the API returns them (strings)
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReportPage {
    #[serde(default)]
    pub rows: Option<Vec<Vec<String>>>,
    #[serde(default)]
    pub next_link: Option<String>,
    #[serde(default)]
    pub total_results: Option<u64>,
}

impl ReportPage {
    pub fn has_next(&self) -> bool {
        self.next_link.is_some()
    }
}

/// A query plus the window of rows to return
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub query: QuerySpec,
    /// 1-indexed
    pub start_index: u32,
    pub max_results: u32,
}

impl PageRequest {
    /// The first page of `query`
    pub fn first(query: QuerySpec, max_results: u32) -> Self {
        Self {
            query,
            start_index: 1,
            max_results,
        }
    }

    /// The following page: offset advanced by exactly one page size
    pub fn next(&self) -> Self {
        Self {
            start_index: self.start_index + self.max_results,
            ..self.clone()
        }
    }

    /// Query parameters in the Core Reporting API's names
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let q = &self.query;
        let mut params = vec![
            ("ids", q.ids()),
            ("start-date", q.start_date.to_string()),
            ("end-date", q.end_date.to_string()),
            ("dimensions", q.dimension.clone()),
            ("metrics", q.metrics_param()),
        ];
        if let Some(filter) = &q.filter {
            params.push(("filters", filter.clone()));
        }
        if let Some(sort) = &q.sort {
            params.push(("sort", sort.clone()));
        }
        params.push(("start-index", self.start_index.to_string()));
        params.push(("max-results", self.max_results.to_string()));
        params
    }
}

/// Operations the report pipeline needs from the reporting service
pub trait ReportingApi {
    /// Accounts visible to the session
    fn accounts(&self) -> Result<ManagementList>;

    /// Web properties of an account
    fn web_properties(&self, account_id: &str) -> Result<ManagementList>;

    /// Views (profiles) of a web property
    fn profiles(&self, account_id: &str, property_id: &str) -> Result<ManagementList>;

    /// One page of report rows
    fn report_page(&self, request: &PageRequest) -> Result<ReportPage>;
}

/// Bearer-authenticated HTTP client for the v3 APIs
pub struct AnalyticsClient {
    client: reqwest::blocking::Client,
    token: AccessToken,
    base_url: String,
}

impl AnalyticsClient {
    pub fn new(token: AccessToken) -> Result<Self> {
        Self::with_base_url(token, API_BASE_URL)
    }

    /// Client against a custom API root
    pub fn with_base_url(token: AccessToken, base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| PagestatsError::Http(format!("HTTP client error: {}", e)))?;
        let base_url: String = base_url.into();

        Ok(Self {
            client,
            token,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .bearer_auth(self.token.secret())
            .query(query)
            .send()
            .map_err(|e| PagestatsError::Http(format!("GET {} failed: {}", path, e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(PagestatsError::Http(format!(
                "GET {} returned {}: {}",
                path,
                status,
                body.trim()
            )));
        }

        response
            .json()
            .map_err(|e| PagestatsError::Http(format!("GET {}: invalid response: {}", path, e)))
    }
}

impl ReportingApi for AnalyticsClient {
    fn accounts(&self) -> Result<ManagementList> {
        self.get_json("/management/accounts", &[])
    }

    fn web_properties(&self, account_id: &str) -> Result<ManagementList> {
        self.get_json(
            &format!("/management/accounts/{}/webproperties", account_id),
            &[],
        )
    }

    fn profiles(&self, account_id: &str, property_id: &str) -> Result<ManagementList> {
        self.get_json(
            &format!(
                "/management/accounts/{}/webproperties/{}/profiles",
                account_id, property_id
            ),
            &[],
        )
    }

    fn report_page(&self, request: &PageRequest) -> Result<ReportPage> {
        self.get_json("/data/ga", &request.params())
    }
}

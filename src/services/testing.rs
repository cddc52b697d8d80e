//! In-memory `ReportingApi` for tests

use std::cell::RefCell;
use std::collections::HashMap;

use crate::services::analytics::{
    ManagementItem, ManagementList, PageRequest, ReportPage, ReportingApi,
};
use crate::types::{PagestatsError, Result};

fn list(ids: &[&str]) -> ManagementList {
    ManagementList {
        items: Some(
            ids.iter()
                .map(|id| ManagementItem {
                    id: id.to_string(),
                    name: None,
                })
                .collect(),
        ),
    }
}

/// Serves canned management listings and report pages keyed by start date
#[derive(Default)]
pub struct FakeApi {
    pub accounts: ManagementList,
    pub properties: HashMap<String, ManagementList>,
    pub profiles: HashMap<(String, String), ManagementList>,
    /// start-date → pages in request order
    pub pages: HashMap<String, Vec<ReportPage>>,
    pub requests: RefCell<Vec<PageRequest>>,
}

impl FakeApi {
    /// One account → one property → one view
    pub fn with_profile(account: &str, property: &str, profile: &str) -> Self {
        let mut api = Self {
            accounts: list(&[account]),
            ..Self::default()
        };
        api.properties.insert(account.into(), list(&[property]));
        api.profiles
            .insert((account.into(), property.into()), list(&[profile]));
        api
    }

    pub fn set_accounts(&mut self, ids: &[&str]) {
        self.accounts = list(ids);
    }

    pub fn set_properties(&mut self, account: &str, ids: &[&str]) {
        self.properties.insert(account.into(), list(ids));
    }

    pub fn set_profiles(&mut self, account: &str, property: &str, ids: &[&str]) {
        self.profiles
            .insert((account.into(), property.into()), list(ids));
    }

    pub fn add_pages(&mut self, start_date: &str, pages: Vec<ReportPage>) {
        self.pages.insert(start_date.into(), pages);
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

/// A page of `count` rows named `{prefix}{n}`, each with metrics `[1, 1]`
pub fn page_of(prefix: &str, count: usize, has_next: bool) -> ReportPage {
    let rows = (0..count)
        .map(|n| vec![format!("{}{}", prefix, n), "1".into(), "1".into()])
        .collect();
    ReportPage {
        rows: Some(rows),
        next_link: has_next.then(|| "next".to_string()),
        total_results: None,
    }
}

/// A page with explicit rows
pub fn page(rows: &[(&str, u64, u64)], has_next: bool) -> ReportPage {
    ReportPage {
        rows: Some(
            rows.iter()
                .map(|(p, a, b)| vec![p.to_string(), a.to_string(), b.to_string()])
                .collect(),
        ),
        next_link: has_next.then(|| "next".to_string()),
        total_results: None,
    }
}

impl ReportingApi for FakeApi {
    fn accounts(&self) -> Result<ManagementList> {
        Ok(self.accounts.clone())
    }

    fn web_properties(&self, account_id: &str) -> Result<ManagementList> {
        Ok(self.properties.get(account_id).cloned().unwrap_or_default())
    }

    fn profiles(&self, account_id: &str, property_id: &str) -> Result<ManagementList> {
        Ok(self
            .profiles
            .get(&(account_id.to_string(), property_id.to_string()))
            .cloned()
            .unwrap_or_default())
    }

    fn report_page(&self, request: &PageRequest) -> Result<ReportPage> {
        let start = request.query.start_date.to_string();
        let index = self
            .requests
            .borrow()
            .iter()
            .filter(|r| r.query.start_date == request.query.start_date)
            .count();
        self.requests.borrow_mut().push(request.clone());

        self.pages
            .get(&start)
            .and_then(|pages| pages.get(index))
            .cloned()
            .ok_or_else(|| PagestatsError::Http(format!("no page {} for {}", index, start)))
    }
}

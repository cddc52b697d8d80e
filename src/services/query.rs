//! Paginated report fetching

use crate::services::analytics::{PageRequest, ReportingApi};
use crate::types::{QuerySpec, Result, Row};

/// Rows requested per page
pub const PAGE_SIZE: u32 = 1000;

/// Fetch every row of `query`, one page at a time.
///
/// Starts at index 1 and advances by `PAGE_SIZE` per request no matter how
/// many rows a page held; stops at the first page without a next link.
/// Errors from the API or from row conversion are returned as-is.
pub fn fetch_all(api: &dyn ReportingApi, query: &QuerySpec) -> Result<Vec<Row>> {
    let mut rows = Vec::new();
    let mut request = PageRequest::first(query.clone(), PAGE_SIZE);

    loop {
        let page = api.report_page(&request)?;
        let has_next = page.has_next();
        let raw_rows = page.rows.unwrap_or_default();

        tracing::debug!(
            start_index = request.start_index,
            rows = raw_rows.len(),
            has_next,
            "fetched report page"
        );

        rows.reserve(raw_rows.len());
        for cells in raw_rows {
            rows.push(Row::from_raw(cells)?);
        }

        if !has_next {
            break;
        }
        request = request.next();
    }

    tracing::info!(
        start_date = %query.start_date,
        rows = rows.len(),
        "fetched report"
    );
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::analytics::ReportPage;
    use crate::services::testing::{page, page_of, FakeApi};
    use crate::types::{DateSpec, PagestatsError};

    fn query() -> QuerySpec {
        QuerySpec {
            profile_id: "1".into(),
            start_date: DateSpec::DaysAgo(7),
            end_date: DateSpec::Today,
            dimension: "ga:pagePath".into(),
            filter: None,
            metrics: vec!["ga:pageviews".into(), "ga:sessions".into()],
            sort: None,
        }
    }

    #[test]
    fn test_fetch_all_three_full_pages_then_terminal_page() {
        let mut api = FakeApi::default();
        api.add_pages(
            "7daysAgo",
            vec![
                page_of("/p1-", 1000, true),
                page_of("/p2-", 1000, true),
                page_of("/p3-", 1000, true),
                ReportPage::default(),
            ],
        );

        let rows = fetch_all(&api, &query()).unwrap();

        assert_eq!(rows.len(), 3000);
        assert_eq!(rows[0].dimension, "/p1-0");
        assert_eq!(rows[2999].dimension, "/p3-999");
        assert_eq!(api.request_count(), 4);
    }

    #[test]
    fn test_fetch_all_offsets_advance_by_page_size() {
        let mut api = FakeApi::default();
        // Short pages still advance the offset by a full page
        api.add_pages(
            "7daysAgo",
            vec![page_of("/a", 3, true), page_of("/b", 2, true), page_of("/c", 1, false)],
        );

        let rows = fetch_all(&api, &query()).unwrap();

        assert_eq!(rows.len(), 6);
        let starts: Vec<u32> = api.requests.borrow().iter().map(|r| r.start_index).collect();
        assert_eq!(starts, vec![1, 1001, 2001]);
        assert!(api.requests.borrow().iter().all(|r| r.max_results == 1000));
    }

    #[test]
    fn test_fetch_all_single_page() {
        let mut api = FakeApi::default();
        api.add_pages("7daysAgo", vec![page(&[("/a", 3, 1), ("/b", 2, 2)], false)]);

        let rows = fetch_all(&api, &query()).unwrap();

        assert_eq!(rows, vec![Row::new("/a", vec![3, 1]), Row::new("/b", vec![2, 2])]);
        assert_eq!(api.request_count(), 1);
    }

    #[test]
    fn test_fetch_all_no_rows() {
        let mut api = FakeApi::default();
        api.add_pages("7daysAgo", vec![ReportPage::default()]);

        let rows = fetch_all(&api, &query()).unwrap();

        assert!(rows.is_empty());
    }

    #[test]
    fn test_fetch_all_propagates_api_error() {
        let mut api = FakeApi::default();
        // Second page missing → fake returns an error
        api.add_pages("7daysAgo", vec![page_of("/a", 10, true)]);

        let err = fetch_all(&api, &query()).unwrap_err();

        assert!(matches!(err, PagestatsError::Http(_)));
    }

    #[test]
    fn test_fetch_all_propagates_bad_metric() {
        let mut api = FakeApi::default();
        api.add_pages(
            "7daysAgo",
            vec![ReportPage {
                rows: Some(vec![vec!["/a".into(), "n/a".into(), "1".into()]]),
                next_link: None,
                total_results: Some(1),
            }],
        );

        let err = fetch_all(&api, &query()).unwrap_err();

        assert!(matches!(err, PagestatsError::Parse(_)));
    }
}

//! Server-paginated candidate table.

use chrono::NaiveDateTime;

use crate::api::{ApiClient, Transport};
use crate::domain::{Candidate, CandidateFilters, Page};
use crate::error::{AppError, EXIT_LOCAL};

pub const PAGE_SIZES: [u32; 3] = [10, 25, 50];
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Skill chips shown in a table row before collapsing into `+N`.
pub const SKILL_CHIPS: usize = 3;

/// Default file name for a candidate data export.
pub fn export_file_name(id: i64) -> String {
    format!("candidate-{id}-data.json")
}

/// `d/m/yyyy`, the Indonesian short date.
pub fn display_date(ts: &NaiveDateTime) -> String {
    ts.format("%-d/%-m/%Y").to_string()
}

#[derive(Debug, Clone)]
pub struct CandidateTable {
    items: Vec<Candidate>,
    total: u64,
    /// Zero-based.
    page: u32,
    page_size: u32,
    search: String,
}

impl Default for CandidateTable {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
            search: String::new(),
        }
    }
}

impl CandidateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Query for the current page (the API counts pages from 1).
    pub fn filters(&self) -> CandidateFilters {
        let search = self.search.trim();
        CandidateFilters {
            page: Some(self.page + 1),
            page_size: Some(self.page_size),
            search: (!search.is_empty()).then(|| search.to_string()),
            ..CandidateFilters::default()
        }
    }

    pub fn refresh<T: Transport>(&mut self, client: &ApiClient<T>) -> Result<(), AppError> {
        let page = client.list_candidates(&self.filters())?;
        self.load(page);
        Ok(())
    }

    pub fn load(&mut self, page: Page<Candidate>) {
        self.items = page.items;
        self.total = page.total;
    }

    pub fn items(&self) -> &[Candidate] {
        &self.items
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn page_count(&self) -> u32 {
        self.total.div_ceil(u64::from(self.page_size)) as u32
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// New search text starts again from the first page.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 0;
    }

    pub fn set_page(&mut self, page: u32) {
        self.page = page.min(self.page_count().saturating_sub(1));
    }

    pub fn next_page(&mut self) {
        self.set_page(self.page + 1);
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.page.saturating_sub(1));
    }

    /// Only 10, 25 or 50 rows per page. Changing the size starts again from
    /// the first page.
    pub fn set_page_size(&mut self, size: u32) -> Result<(), AppError> {
        if !PAGE_SIZES.contains(&size) {
            return Err(AppError::new(
                EXIT_LOCAL,
                format!("Page size must be one of 10, 25 or 50 (got: {size})."),
            ));
        }
        self.page_size = size;
        self.page = 0;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::*;

    fn page_of(total: u64) -> Page<Candidate> {
        Page {
            items: Vec::new(),
            total,
            page: 1,
            page_size: 10,
            total_pages: 0,
        }
    }

    #[test]
    fn filters_are_one_based() {
        let mut table = CandidateTable::new();
        table.load(page_of(45));
        table.set_page(2);
        let filters = table.filters();
        assert_eq!(filters.page, Some(3));
        assert_eq!(filters.page_size, Some(10));
        assert_eq!(filters.search, None);
    }

    #[test]
    fn search_resets_page() {
        let mut table = CandidateTable::new();
        table.load(page_of(45));
        table.set_page(4);
        assert_eq!(table.page(), 4);
        table.set_search("budi");
        assert_eq!(table.page(), 0);
        assert_eq!(table.filters().search.as_deref(), Some("budi"));
    }

    #[test]
    fn page_navigation_is_clamped() {
        let mut table = CandidateTable::new();
        table.load(page_of(21));
        assert_eq!(table.page_count(), 3);
        table.set_page(10);
        assert_eq!(table.page(), 2);
        table.next_page();
        assert_eq!(table.page(), 2);
        table.set_page(0);
        table.prev_page();
        assert_eq!(table.page(), 0);
    }

    #[test]
    fn only_known_page_sizes() {
        let mut table = CandidateTable::new();
        table.set_page_size(25).unwrap();
        assert_eq!(table.page_size(), 25);
        assert!(table.set_page_size(20).is_err());
        assert_eq!(table.page_size(), 25);
    }

    #[test]
    fn refresh_loads_server_page() {
        let client = authed_client("tok");
        client.transport().push_json(
            200,
            &format!(r#"{{"items": [{CANDIDATE_JSON}], "total": 1, "page": 1, "page_size": 10, "total_pages": 1}}"#),
        );
        let mut table = CandidateTable::new();
        table.refresh(&client).unwrap();
        assert_eq!(table.items()[0].full_name, "Budi Santoso");
        assert_eq!(table.total(), 1);
    }

    #[test]
    fn naming_and_dates() {
        assert_eq!(export_file_name(12), "candidate-12-data.json");
        let ts = chrono::NaiveDate::from_ymd_opt(2025, 3, 7)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        assert_eq!(display_date(&ts), "7/3/2025");
    }
}

use super::config::{QueryConfig, FILTER_ALL};

/// Ephemeral UI query state. Changing the search text, the filter or the page size
/// moves back to page 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    search_text: String,
    status_filter: String,
    current_page: usize,
    items_per_page: usize,
}

impl Default for QueryState {
    fn default() -> Self {
        Self::from_config(&QueryConfig::default())
    }
}

impl QueryState {
    pub fn from_config(config: &QueryConfig) -> Self {
        Self {
            search_text: String::new(),
            status_filter: FILTER_ALL.to_string(),
            current_page: 1,
            items_per_page: config.items_per_page.max(1),
        }
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn status_filter(&self) -> &str {
        &self.status_filter
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
        self.current_page = 1;
    }

    pub fn set_status_filter(&mut self, filter: impl Into<String>) {
        self.status_filter = filter.into();
        self.current_page = 1;
    }

    pub fn set_items_per_page(&mut self, items_per_page: usize) {
        self.items_per_page = items_per_page.max(1);
        self.current_page = 1;
    }

    /// Sets the page without clamping. The engine tolerates out-of-range pages by
    /// returning an empty slice.
    pub fn with_page(mut self, page: usize) -> Self {
        self.current_page = page;
        self
    }

    pub fn go_to(&mut self, page: usize, total_pages: usize) {
        self.current_page = page.clamp(1, total_pages.max(1));
    }

    pub fn next_page(&mut self, total_pages: usize) {
        self.go_to(self.current_page.saturating_add(1), total_pages);
    }

    pub fn previous_page(&mut self) {
        self.current_page = self.current_page.saturating_sub(1).max(1);
    }
}

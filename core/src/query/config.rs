use serde::{Deserialize, Serialize};

/// Filter value that disables the categorical filter.
pub const FILTER_ALL: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

impl FilterOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Every query-engine option in one place. Resolved once per call, never mutated
/// while a query runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Enables free-text search. Default `true`.
    #[serde(default = "default_true")]
    pub searchable: bool,

    /// Fields searched by free text. Empty means every text or numeric field.
    #[serde(default)]
    pub search_keys: Vec<String>,

    /// Enables page slicing. Default `true`.
    #[serde(default = "default_true")]
    pub paginate: bool,

    /// Enables the categorical filter. Default `false`.
    #[serde(default)]
    pub filterable: bool,

    /// Field compared against the active filter value. Default `"status"`.
    #[serde(default = "default_filter_key")]
    pub filter_key: String,

    /// Choices offered for the filter; `all` disables it.
    #[serde(default = "default_filter_options")]
    pub filter_options: Vec<FilterOption>,

    /// Initial page size. Default `10`.
    #[serde(default = "default_items_per_page")]
    pub items_per_page: usize,

    /// Page sizes a caller may switch between. Default `[5, 10, 50, 100]`.
    #[serde(default = "default_page_size_options")]
    pub page_size_options: Vec<usize>,
}

fn default_true() -> bool {
    true
}

fn default_filter_key() -> String {
    "status".to_string()
}

fn default_filter_options() -> Vec<FilterOption> {
    vec![
        FilterOption::new(FILTER_ALL, "All"),
        FilterOption::new("pending", "Pending"),
        FilterOption::new("completed", "Completed"),
    ]
}

fn default_items_per_page() -> usize {
    10
}

fn default_page_size_options() -> Vec<usize> {
    vec![5, 10, 50, 100]
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            searchable: default_true(),
            search_keys: Vec::new(),
            paginate: default_true(),
            filterable: false,
            filter_key: default_filter_key(),
            filter_options: default_filter_options(),
            items_per_page: default_items_per_page(),
            page_size_options: default_page_size_options(),
        }
    }
}

impl QueryConfig {
    pub fn with_search_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_filter(mut self, key: impl Into<String>) -> Self {
        self.filterable = true;
        self.filter_key = key.into();
        self
    }

    pub fn without_pagination(mut self) -> Self {
        self.paginate = false;
        self
    }

    pub fn with_items_per_page(mut self, items_per_page: usize) -> Self {
        self.items_per_page = items_per_page;
        self
    }

    /// True when `value` names one of the configured filter options.
    pub fn is_filter_option(&self, value: &str) -> bool {
        self.filter_options
            .iter()
            .any(|o| o.value.eq_ignore_ascii_case(value))
    }
}

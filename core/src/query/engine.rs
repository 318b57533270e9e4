use super::config::{QueryConfig, FILTER_ALL};
use super::record::Record;
use super::state::QueryState;

/// One visible page plus the metadata a pager needs.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPage<'a, T> {
    pub items: Vec<&'a T>,
    pub current_page: usize,
    /// `ceil(total_count / items_per_page)`, never below 1.
    pub total_pages: usize,
    /// Size of the filtered and searched set, before slicing.
    pub total_count: usize,
    /// 1-based, inclusive. 0 when the page is empty.
    pub range_start: usize,
    pub range_end: usize,
}

impl<T> QueryPage<'_, T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn summary(&self) -> String {
        format!(
            "Showing {} to {} of {} results",
            self.range_start, self.range_end, self.total_count
        )
    }
}

/// Runs filter, then search, then pagination. Pure: the same inputs always give the
/// same page, and nothing in `state` is adjusted here.
pub fn query<'a, T: Record>(
    records: &'a [T],
    config: &QueryConfig,
    state: &QueryState,
) -> QueryPage<'a, T> {
    let filter = active_filter(config, state);
    let needle = active_search(config, state);

    let matched: Vec<&'a T> = records
        .iter()
        .filter(|r| filter.map_or(true, |f| matches_filter(*r, &config.filter_key, f)))
        .filter(|r| {
            needle
                .as_deref()
                .map_or(true, |q| matches_search(*r, &config.search_keys, q))
        })
        .collect();

    let total_count = matched.len();
    tracing::trace!(
        target: "taskdesk.query",
        stage = "query.matched",
        input = records.len(),
        matched = total_count,
        filter = filter.unwrap_or(FILTER_ALL),
        search = needle.as_deref().unwrap_or("")
    );

    if !config.paginate {
        return QueryPage {
            items: matched,
            current_page: 1,
            total_pages: 1,
            total_count,
            range_start: usize::from(total_count > 0),
            range_end: total_count,
        };
    }

    let per_page = state.items_per_page().max(1);
    let current_page = state.current_page().max(1);
    let total_pages = total_count.div_ceil(per_page).max(1);

    let start = (current_page - 1).saturating_mul(per_page);
    let items: Vec<&'a T> = matched.into_iter().skip(start).take(per_page).collect();

    let (range_start, range_end) = if items.is_empty() {
        (0, 0)
    } else {
        (start + 1, start + items.len())
    };

    QueryPage {
        items,
        current_page,
        total_pages,
        total_count,
        range_start,
        range_end,
    }
}

fn active_filter<'s>(config: &QueryConfig, state: &'s QueryState) -> Option<&'s str> {
    let value = state.status_filter().trim();
    if !config.filterable || value.is_empty() || value.eq_ignore_ascii_case(FILTER_ALL) {
        return None;
    }
    Some(value)
}

fn active_search(config: &QueryConfig, state: &QueryState) -> Option<String> {
    let query = state.search_text().trim();
    if !config.searchable || query.is_empty() {
        return None;
    }
    Some(query.to_lowercase())
}

// An absent field never matches; it is not a wildcard.
fn matches_filter<T: Record>(record: &T, key: &str, value: &str) -> bool {
    record
        .field(key)
        .map(|field| field.eq_ignore_case(value))
        .unwrap_or(false)
}

fn matches_search<T: Record>(record: &T, keys: &[String], needle: &str) -> bool {
    if keys.is_empty() {
        return record
            .fields()
            .iter()
            .any(|field| field.contains_lowercase(needle));
    }
    keys.iter().any(|key| {
        record
            .field(key)
            .map(|field| field.contains_lowercase(needle))
            .unwrap_or(false)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Task, TaskStatus};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn task(id: i64, title: &str, status: TaskStatus) -> Task {
        Task {
            user_id: 1,
            id,
            title: title.to_string(),
            body: format!("body of {title}"),
            status,
        }
    }

    fn ids<T: Record>(page: &QueryPage<'_, T>) -> Vec<i64> {
        page.items
            .iter()
            .map(|r| match r.field("id") {
                Some(crate::query::FieldValue::Integer(id)) => id,
                other => panic!("no id: {other:?}"),
            })
            .collect()
    }

    fn numbered(n: i64) -> Vec<Task> {
        (1..=n)
            .map(|i| {
                let status = if i % 3 == 0 {
                    TaskStatus::Completed
                } else {
                    TaskStatus::Pending
                };
                task(i, &format!("task {i}"), status)
            })
            .collect()
    }

    #[test]
    fn test_search_on_stringified_id() {
        let tasks = vec![
            task(1, "a", TaskStatus::Pending),
            task(11, "b", TaskStatus::Pending),
            task(2, "c", TaskStatus::Pending),
        ];
        let cfg = QueryConfig::default().with_search_keys(["id"]);
        let mut state = QueryState::from_config(&cfg);
        state.set_search_text("1");
        let page = query(&tasks, &cfg, &state);
        assert_eq!(ids(&page), vec![1, 11]);
        assert_eq!(page.total_count, 2);
    }

    #[test]
    fn test_blank_search_passes_everything() {
        let tasks = numbered(4);
        let cfg = QueryConfig::default();
        let mut state = QueryState::from_config(&cfg);
        state.set_search_text("   \t");
        assert_eq!(query(&tasks, &cfg, &state).total_count, 4);
    }

    #[test]
    fn test_search_is_trimmed_and_case_insensitive() {
        let tasks = vec![
            task(1, "Buy MILK", TaskStatus::Pending),
            task(2, "walk dog", TaskStatus::Pending),
        ];
        let cfg = QueryConfig::default();
        let mut state = QueryState::from_config(&cfg);
        state.set_search_text("  milk ");
        assert_eq!(ids(&query(&tasks, &cfg, &state)), vec![1]);
    }

    #[test]
    fn test_search_all_fields_includes_numbers_and_status() {
        let tasks = vec![
            task(7, "alpha", TaskStatus::Completed),
            task(8, "beta", TaskStatus::Pending),
        ];
        let cfg = QueryConfig::default();
        let mut state = QueryState::from_config(&cfg);
        state.set_search_text("7");
        assert_eq!(ids(&query(&tasks, &cfg, &state)), vec![7]);
        state.set_search_text("complete");
        assert_eq!(ids(&query(&tasks, &cfg, &state)), vec![7]);
    }

    #[test]
    fn test_search_skips_non_primitive_fields() {
        let rows = vec![
            json!({"id": 1, "title": "plain", "tags": ["needle"]}),
            json!({"id": 2, "title": "needle in title"}),
        ];
        let cfg = QueryConfig::default();
        let mut state = QueryState::from_config(&cfg);
        state.set_search_text("needle");
        assert_eq!(ids(&query(&rows, &cfg, &state)), vec![2]);

        let cfg = cfg.with_search_keys(["tags"]);
        assert!(query(&rows, &cfg, &state).is_empty());
    }

    #[test]
    fn test_filter_case_insensitive_and_all_sentinel() {
        let tasks = numbered(9);
        let cfg = QueryConfig::default().with_filter("status");
        let mut state = QueryState::from_config(&cfg);

        state.set_status_filter("COMPLETED");
        assert_eq!(ids(&query(&tasks, &cfg, &state)), vec![3, 6, 9]);

        state.set_status_filter("All");
        assert_eq!(query(&tasks, &cfg, &state).total_count, 9);
    }

    #[test]
    fn test_filter_ignored_when_not_filterable() {
        let tasks = numbered(9);
        let cfg = QueryConfig::default();
        let mut state = QueryState::from_config(&cfg);
        state.set_status_filter("completed");
        assert_eq!(query(&tasks, &cfg, &state).total_count, 9);
    }

    #[test]
    fn test_filter_excludes_records_without_the_field() {
        let rows = vec![
            json!({"id": 1, "status": "pending"}),
            json!({"id": 2}),
            json!({"id": 3, "status": null}),
        ];
        let cfg = QueryConfig::default().with_filter("status");
        let mut state = QueryState::from_config(&cfg);
        state.set_status_filter("pending");
        assert_eq!(ids(&query(&rows, &cfg, &state)), vec![1]);
    }

    #[test]
    fn test_filter_runs_before_search() {
        let tasks = vec![
            task(1, "report", TaskStatus::Completed),
            task(2, "report", TaskStatus::Pending),
            task(3, "other", TaskStatus::Completed),
        ];
        let cfg = QueryConfig::default()
            .with_filter("status")
            .with_search_keys(["title"]);
        let mut state = QueryState::from_config(&cfg);
        state.set_status_filter("completed");
        state.set_search_text("report");
        assert_eq!(ids(&query(&tasks, &cfg, &state)), vec![1]);
    }

    #[test]
    fn test_pagination_slices_and_ranges() {
        let tasks = numbered(23);
        let cfg = QueryConfig::default();
        let state = QueryState::from_config(&cfg).with_page(3);
        let page = query(&tasks, &cfg, &state);
        assert_eq!(ids(&page), vec![21, 22, 23]);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_count, 23);
        assert_eq!((page.range_start, page.range_end), (21, 23));
        assert!(page.has_previous());
        assert!(!page.has_next());
        assert_eq!(page.summary(), "Showing 21 to 23 of 23 results");
    }

    #[test]
    fn test_pages_cover_filtered_set_exactly_once() {
        let tasks = numbered(37);
        let cfg = QueryConfig::default().with_filter("status");
        for per_page in [1, 3, 5, 10, 50] {
            let mut state = QueryState::from_config(&cfg);
            state.set_status_filter("pending");
            state.set_items_per_page(per_page);
            let first = query(&tasks, &cfg, &state);
            let n = first.total_count;
            assert_eq!(first.total_pages, n.div_ceil(per_page).max(1));

            let mut seen = Vec::new();
            for p in 1..=first.total_pages {
                let page = query(&tasks, &cfg, &state.clone().with_page(p));
                seen.extend(ids(&page));
            }
            let expected: Vec<i64> = tasks
                .iter()
                .filter(|t| t.status == TaskStatus::Pending)
                .map(|t| t.id)
                .collect();
            assert_eq!(seen, expected, "per_page={per_page}");
        }
    }

    #[test]
    fn test_empty_result_has_one_page_and_zero_range() {
        let tasks: Vec<Task> = Vec::new();
        let cfg = QueryConfig::default();
        let page = query(&tasks, &cfg, &QueryState::from_config(&cfg));
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.total_count, 0);
        assert_eq!((page.range_start, page.range_end), (0, 0));
        assert_eq!(page.summary(), "Showing 0 to 0 of 0 results");
    }

    #[test]
    fn test_out_of_range_page_is_empty_not_error() {
        let tasks = numbered(5);
        let cfg = QueryConfig::default();
        let page = query(&tasks, &cfg, &QueryState::from_config(&cfg).with_page(9));
        assert!(page.is_empty());
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.total_count, 5);
        assert_eq!(page.range_start, 0);
    }

    #[test]
    fn test_pagination_disabled_returns_everything() {
        let tasks = numbered(25);
        let cfg = QueryConfig::default().without_pagination();
        let page = query(&tasks, &cfg, &QueryState::from_config(&cfg).with_page(2));
        assert_eq!(page.items.len(), 25);
        assert_eq!(page.total_pages, 1);
        assert_eq!((page.range_start, page.range_end), (1, 25));
    }
}

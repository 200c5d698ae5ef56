//! The table's derivation pipeline: search, column filters, sort, paginate.
//!
//! Everything here is pure. The derived view is a list of indices into the
//! dataset so callers can map a displayed row back to its record.

use std::collections::BTreeMap;

use crate::models::Row;

use super::column::Column;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

/// Active sort. "No sort" is the absence of a `SortState`, so a direction
/// can never exist without its column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    pub column: String,
    pub direction: SortDirection,
}

impl SortState {
    pub fn ascending(column: &str) -> Self {
        Self {
            column: column.to_string(),
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(column: &str) -> Self {
        Self {
            column: column.to_string(),
            direction: SortDirection::Descending,
        }
    }
}

/// Sort after activating `column`'s header: none → asc → desc → none on the
/// same column, asc on a different one.
pub fn next_sort(current: Option<&SortState>, column: &str) -> Option<SortState> {
    match current {
        Some(sort) if sort.column == column => match sort.direction {
            SortDirection::Ascending => Some(SortState::descending(column)),
            SortDirection::Descending => None,
        },
        _ => Some(SortState::ascending(column)),
    }
}

/// Per-instance view state of a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableQuery {
    pub search: String,
    pub column_filters: BTreeMap<String, String>,
    pub sort: Option<SortState>,
    /// 1-based
    pub current_page: usize,
}

impl Default for TableQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            column_filters: BTreeMap::new(),
            sort: None,
            current_page: 1,
        }
    }
}

impl TableQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Filter text for a column, empty when inactive
    pub fn filter(&self, key: &str) -> &str {
        self.column_filters.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn active_filter_count(&self) -> usize {
        self.column_filters.values().filter(|v| !v.is_empty()).count()
    }

    /// Filtered and sorted dataset indices
    pub fn derive_view(&self, rows: &[Row], columns: &[Column]) -> Vec<usize> {
        let mut view = search_rows(rows, columns, &self.search);
        view = filter_rows(rows, view, &self.column_filters);
        if let Some(ref sort) = self.sort {
            sort_rows(rows, &mut view, &sort.column, sort.direction);
        }
        view
    }
}

/// Indices of rows where any column's stringified value contains `query`,
/// ignoring case. An empty query keeps every row.
pub fn search_rows(rows: &[Row], columns: &[Column], query: &str) -> Vec<usize> {
    if query.is_empty() {
        return (0..rows.len()).collect();
    }

    let needle = query.to_lowercase();
    rows.iter()
        .enumerate()
        .filter(|(_, row)| {
            columns
                .iter()
                .any(|column| row.text(&column.key).to_lowercase().contains(&needle))
        })
        .map(|(i, _)| i)
        .collect()
}

/// Keep indices whose row matches every non-empty column filter.
pub fn filter_rows(
    rows: &[Row],
    view: Vec<usize>,
    column_filters: &BTreeMap<String, String>,
) -> Vec<usize> {
    let active: Vec<(&str, String)> = column_filters
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| (key.as_str(), value.to_lowercase()))
        .collect();

    if active.is_empty() {
        return view;
    }

    view.into_iter()
        .filter(|&i| {
            active
                .iter()
                .all(|(key, needle)| rows[i].text(key).to_lowercase().contains(needle.as_str()))
        })
        .collect()
}

/// Stable sort of `view` by the field `key`.
///
/// Descending reverses the comparator rather than the result, so equal
/// values keep their input order in both directions.
pub fn sort_rows(rows: &[Row], view: &mut [usize], key: &str, direction: SortDirection) {
    view.sort_by(|&a, &b| {
        let ordering = rows[a].value(key).compare(rows[b].value(key));
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

pub fn total_pages(item_count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    item_count.div_ceil(page_size)
}

/// Clamp a 1-based page into `1..=max(total_pages, 1)`
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Half-open range of the view covered by a 1-based page
pub fn page_bounds(page: usize, page_size: usize, item_count: usize) -> (usize, usize) {
    let start = page.saturating_sub(1).saturating_mul(page_size).min(item_count);
    let end = start.saturating_add(page_size).min(item_count);
    (start, end)
}

/// Slice of `items` shown on a 1-based page
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let (start, end) = page_bounds(page, page_size, items.len());
    &items[start..end]
}

/// Page buttons to show: the first five pages, plus the last page when
/// there are more than five.
pub fn page_buttons(total_pages: usize) -> (Vec<usize>, Option<usize>) {
    let first: Vec<usize> = (1..=total_pages.min(5)).collect();
    let last = (total_pages > 5).then_some(total_pages);
    (first, last)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Value;

    fn users() -> Vec<Row> {
        vec![
            Row::new().with("name", "John Smith").with("status", "Active").with("totalSpent", 2450.50),
            Row::new().with("name", "Sarah Johnson").with("status", "Active").with("totalSpent", 1820.75),
            Row::new().with("name", "Mike Davis").with("status", "Inactive").with("totalSpent", 3200.25),
            Row::new().with("name", "Emily Wilson").with("status", "Pending").with("totalSpent", 450.00),
            Row::new().with("name", "David Brown").with("status", "Active").with("totalSpent", 4150.80),
        ]
    }

    fn columns() -> Vec<Column> {
        vec![
            Column::new("name", "Customer").sortable(),
            Column::new("status", "Status").sortable(),
            Column::new("totalSpent", "Total Spent").sortable(),
        ]
    }

    #[test]
    fn test_search_is_case_insensitive_substring_over_columns() {
        let rows = users();
        assert_eq!(search_rows(&rows, &columns(), "ACTIVE"), vec![0, 1, 2, 4]);
        assert_eq!(search_rows(&rows, &columns(), "son"), vec![1, 3]);
        assert_eq!(search_rows(&rows, &columns(), "3200"), vec![2]);
        assert_eq!(search_rows(&rows, &columns(), ""), vec![0, 1, 2, 3, 4]);
        assert!(search_rows(&rows, &columns(), "zzz").is_empty());
    }

    #[test]
    fn test_search_only_looks_at_column_fields() {
        let rows = vec![Row::new().with("name", "John").with("secret", "needle")];
        assert!(search_rows(&rows, &columns(), "needle").is_empty());
    }

    #[test]
    fn test_filters_compose_with_and() {
        let rows = users();
        let mut filters = BTreeMap::new();
        filters.insert("status".to_string(), "active".to_string());
        filters.insert("name".to_string(), "".to_string());
        assert_eq!(filter_rows(&rows, vec![0, 1, 2, 3, 4], &filters), vec![0, 1, 2, 4]);

        filters.insert("name".to_string(), "D".to_string());
        assert_eq!(filter_rows(&rows, vec![0, 1, 2, 3, 4], &filters), vec![2, 4]);
    }

    #[test]
    fn test_sort_is_stable_in_both_directions() {
        let rows = users();
        let mut view = vec![0, 1, 2, 3, 4];
        sort_rows(&rows, &mut view, "status", SortDirection::Ascending);
        assert_eq!(view, vec![0, 1, 4, 2, 3]);

        let mut view = vec![0, 1, 2, 3, 4];
        sort_rows(&rows, &mut view, "status", SortDirection::Descending);
        assert_eq!(view, vec![3, 2, 0, 1, 4]);
    }

    #[test]
    fn test_sort_numbers_numerically() {
        let rows = vec![
            Row::new().with("n", 10i64),
            Row::new().with("n", 9i64),
            Row::new().with("n", 100i64),
        ];
        let mut view = vec![0, 1, 2];
        sort_rows(&rows, &mut view, "n", SortDirection::Ascending);
        assert_eq!(view, vec![1, 0, 2]);
    }

    #[test]
    fn test_sort_keeps_input_order_of_signed_zeros() {
        let rows = vec![
            Row::new().with("n", 0.0),
            Row::new().with("n", -0.0),
            Row::new().with("n", -1.0),
        ];
        let mut view = vec![0, 1, 2];
        sort_rows(&rows, &mut view, "n", SortDirection::Ascending);
        assert_eq!(view, vec![2, 0, 1]);

        let mut view = vec![0, 1, 2];
        sort_rows(&rows, &mut view, "n", SortDirection::Descending);
        assert_eq!(view, vec![0, 1, 2]);
    }

    #[test]
    fn test_sort_mixed_types_uses_kind_rank() {
        let rows = vec![
            Row::new().with("v", "text"),
            Row::new().with("v", 5i64),
            Row::new(),
            Row::new().with("v", Value::Bool(true)),
        ];
        let mut view = vec![0, 1, 2, 3];
        sort_rows(&rows, &mut view, "v", SortDirection::Ascending);
        assert_eq!(view, vec![2, 3, 1, 0]);
    }

    #[test]
    fn test_sort_cycle_returns_to_original_order() {
        let rows = users();
        let mut query = TableQuery::new();
        let original = query.derive_view(&rows, &columns());

        for _ in 0..3 {
            query.sort = next_sort(query.sort.as_ref(), "name");
        }
        assert_eq!(query.sort, None);
        assert_eq!(query.derive_view(&rows, &columns()), original);
    }

    #[test]
    fn test_next_sort_transitions() {
        let asc = next_sort(None, "name");
        assert_eq!(asc, Some(SortState::ascending("name")));
        let desc = next_sort(asc.as_ref(), "name");
        assert_eq!(desc, Some(SortState::descending("name")));
        assert_eq!(next_sort(desc.as_ref(), "name"), None);
        assert_eq!(
            next_sort(desc.as_ref(), "status"),
            Some(SortState::ascending("status"))
        );
    }

    #[test]
    fn test_pagination() {
        let items: Vec<usize> = (0..7).collect();
        assert_eq!(total_pages(7, 3), 3);
        assert_eq!(total_pages(6, 3), 2);
        assert_eq!(total_pages(0, 3), 0);
        assert_eq!(paginate(&items, 1, 3), &[0, 1, 2]);
        assert_eq!(paginate(&items, 3, 3), &[6]);
        assert!(paginate(&items, 4, 3).is_empty());
        assert_eq!(page_bounds(2, 3, 7), (3, 6));
    }

    #[test]
    fn test_clamp_page() {
        assert_eq!(clamp_page(5, 3), 3);
        assert_eq!(clamp_page(0, 3), 1);
        assert_eq!(clamp_page(4, 0), 1);
    }

    #[test]
    fn test_page_buttons() {
        assert_eq!(page_buttons(3), (vec![1, 2, 3], None));
        assert_eq!(page_buttons(12), (vec![1, 2, 3, 4, 5], Some(12)));
        assert_eq!(page_buttons(0), (vec![], None));
    }

    #[test]
    fn test_top_spenders_scenario() {
        let rows = users();
        let mut query = TableQuery::new();
        query.sort = Some(SortState::descending("totalSpent"));
        let view = query.derive_view(&rows, &columns());

        assert_eq!(total_pages(view.len(), 2), 3);
        let names = |page: usize| -> Vec<String> {
            paginate(&view, page, 2).iter().map(|&i| rows[i].text("name")).collect()
        };
        assert_eq!(names(1), vec!["David Brown", "Mike Davis"]);
        assert_eq!(names(3), vec!["Emily Wilson"]);
    }
}

//! Client-side catalog search, category filter, and pagination.

use crate::model::CatalogItem;

/// Category value that disables category filtering.
pub const ALL_CATEGORIES: &str = "all";

/// Search and category filter over catalog items.
#[derive(Debug, Clone, Default)]
pub struct CatalogFilter {
    /// Case-insensitive substring matched against code and description.
    pub search: Option<String>,
    /// Exact category; `None` or `"all"` matches everything.
    pub category: Option<String>,
}

impl CatalogFilter {
    pub fn new(search: Option<String>, category: Option<String>) -> Self {
        Self { search, category }
    }

    /// Check whether an item passes the filter.
    pub fn matches(&self, item: &CatalogItem) -> bool {
        self.matches_search(item) && self.matches_category(item)
    }

    fn matches_search(&self, item: &CatalogItem) -> bool {
        let term = match self.search.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => t.to_lowercase(),
            _ => return true,
        };
        item.product_code.to_lowercase().contains(&term)
            || item.description.to_lowercase().contains(&term)
    }

    fn matches_category(&self, item: &CatalogItem) -> bool {
        match self.category.as_deref() {
            None | Some(ALL_CATEGORIES) => true,
            Some(category) => item.category.as_deref() == Some(category),
        }
    }

    /// Filter a slice, preserving catalog order.
    pub fn apply<'a>(&self, items: &'a [CatalogItem]) -> Vec<&'a CatalogItem> {
        items.iter().filter(|item| self.matches(item)).collect()
    }
}

/// One page of a filtered listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number actually shown.
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

/// Slice a listing into a page. Out-of-range pages are clamped.
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page);
    let page = page.clamp(1, total_pages.max(1));

    let start = ((page - 1) * per_page).min(total_items);
    let end = (start + per_page).min(total_items);

    Page {
        items: items[start..end].to_vec(),
        page,
        total_pages,
        total_items,
    }
}

/// Distinct categories in first-seen order.
pub fn categories(items: &[CatalogItem]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for category in items.iter().filter_map(|i| i.category.as_ref()) {
        if !seen.contains(category) {
            seen.push(category.clone());
        }
    }
    seen
}

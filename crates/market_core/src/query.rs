use crate::page::page_size;
use crate::sort::effective_sort;
use crate::{keys, FilterState, PageWindow, SortSpec};

/// Parameters of one `GET /listings` request, derived from a filter map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    pub category_id: Option<String>,
    pub query: Option<String>,
    pub listing_type: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub sort: Option<SortSpec>,
    pub window: PageWindow,
}

impl ListingQuery {
    pub fn from_filters(filters: &FilterState, page_size: u64, fallback: PageWindow) -> Self {
        Self {
            category_id: text(filters, keys::CATEGORY_ID),
            query: text(filters, keys::QUERY),
            listing_type: text(filters, keys::LISTING_TYPE),
            min_price: price(filters, keys::MIN_PRICE),
            max_price: price(filters, keys::MAX_PRICE),
            sort: effective_sort(filters),
            window: PageWindow::resolve(filters, page_size, fallback),
        }
    }

    /// Query parameters in the order the listings endpoint documents them.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(9);
        let optional = [
            (keys::CATEGORY_ID, &self.category_id),
            (keys::QUERY, &self.query),
            (keys::LISTING_TYPE, &self.listing_type),
            (keys::MIN_PRICE, &self.min_price),
            (keys::MAX_PRICE, &self.max_price),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                pairs.push((key.to_string(), value.clone()));
            }
        }
        if let Some(sort) = &self.sort {
            pairs.push((keys::SORT.to_string(), sort.field.clone()));
            pairs.push((keys::ORDER.to_string(), sort.direction.as_str().to_string()));
        }
        pairs.push((keys::START.to_string(), self.window.start.to_string()));
        pairs.push((keys::RANGE.to_string(), self.window.range.to_string()));
        pairs
    }
}

fn text(filters: &FilterState, key: &str) -> Option<String> {
    filters
        .get(key)
        .filter(|value| !value.is_empty())
        .map(ToOwned::to_owned)
}

fn price(filters: &FilterState, key: &str) -> Option<String> {
    let raw = filters.get(key)?.trim();
    let parsed: f64 = raw.parse().ok()?;
    (parsed.is_finite() && parsed >= 0.0).then(|| raw.to_string())
}

/// Listing view bound to a route: how many listings a page holds and where to
/// scroll after paging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseView {
    pub page_size: u64,
    pub fallback: PageWindow,
    pub scroll_anchor: Option<String>,
}

impl BrowseView {
    pub fn for_path(path: &str) -> Self {
        let trimmed = path.trim_end_matches('/');
        let (page_size, anchor) = match trimmed {
            "" | "/home" => {
                return Self {
                    page_size: page_size::HOME_PANEL,
                    fallback: PageWindow::DEFAULT,
                    scroll_anchor: None,
                }
            }
            p if p.starts_with("/seller") => (page_size::SELLER, "seller-listings"),
            p if p.starts_with("/staff") => (page_size::STAFF, "staff-table"),
            _ => (page_size::BROWSE, "listings-top"),
        };
        // Paged views: no paging keys means their first page.
        Self {
            page_size,
            fallback: PageWindow::for_page(1, page_size),
            scroll_anchor: Some(anchor.to_string()),
        }
    }

    pub fn query(&self, filters: &FilterState) -> ListingQuery {
        ListingQuery::from_filters(filters, self.page_size, self.fallback)
    }
}

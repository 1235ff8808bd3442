use crate::{keys, pagination, FilterState};

/// Page sizes used by the listing views.
pub mod page_size {
    pub const HOME_PANEL: u64 = 8;
    pub const SELLER: u64 = 10;
    pub const BROWSE: u64 = 12;
    pub const STAFF: u64 = 20;
}

/// Offset window sent to the listings endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub start: u64,
    pub range: u64,
}

impl PageWindow {
    /// Window used by panels that carry no paging keys at all.
    pub const DEFAULT: PageWindow = PageWindow {
        start: 0,
        range: page_size::HOME_PANEL,
    };

    /// Window for a 1-indexed page; pages below 1 are treated as page 1.
    pub fn for_page(page: u64, page_size: u64) -> Self {
        let page = page.max(1);
        Self {
            start: (page - 1).saturating_mul(page_size),
            range: page_size,
        }
    }

    /// `page` takes priority, then explicit `start`/`range`, then `fallback`.
    /// A `page` that is present but not a positive number reads as page 1.
    pub fn resolve(filters: &FilterState, page_size: u64, fallback: PageWindow) -> Self {
        if filters.contains(keys::PAGE) {
            return Self::for_page(pagination::current_page(filters), page_size);
        }
        if let Some(start) = filters.number::<u64>(keys::START) {
            let range = filters.number::<u64>(keys::RANGE).unwrap_or(page_size);
            return Self { start, range };
        }
        fallback
    }
}

impl Default for PageWindow {
    fn default() -> Self {
        Self::DEFAULT
    }
}

use crate::{keys, FilterState};

/// 1-indexed page carried by `filters`; missing or invalid reads as 1.
pub fn current_page(filters: &FilterState) -> u64 {
    filters
        .number::<u64>(keys::PAGE)
        .filter(|page| *page >= 1)
        .unwrap_or(1)
}

/// Whether the "previous" control is enabled.
pub fn has_previous(filters: &FilterState) -> bool {
    current_page(filters) > 1
}

/// Filters for the following page. There is no upper bound.
pub fn next(current: &FilterState) -> FilterState {
    with_page(current, current_page(current).saturating_add(1))
}

/// Filters for the preceding page, never below page 1.
pub fn previous(current: &FilterState) -> FilterState {
    with_page(current, current_page(current).saturating_sub(1).max(1))
}

fn with_page(current: &FilterState, page: u64) -> FilterState {
    let mut next = current.clone();
    next.set(keys::PAGE, page.to_string());
    next
}

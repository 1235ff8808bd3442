use crate::sort::{sort_option, RELEVANCE};
use crate::{keys, FilterState};

/// Select value meaning "no filter".
pub const ALL: &str = "All";

/// Applies one filter control change and returns the new map.
///
/// `None`, `""` and [`ALL`] remove the key. Choosing a sort option also sets
/// the matching `order`; choosing `relevance` clears both. `nav` is stored as
/// is and only affects sorting when a request is built.
pub fn apply(current: &FilterState, key: &str, value: Option<&str>) -> FilterState {
    let mut next = current.clone();
    let value = value.filter(|value| !value.is_empty() && *value != ALL);

    if key == keys::SORT {
        apply_sort(&mut next, value);
        return next;
    }

    match value {
        Some(value) => next.set(key, value),
        None => {
            next.remove(key);
        }
    }
    next
}

fn apply_sort(filters: &mut FilterState, value: Option<&str>) {
    let Some(value) = value.filter(|value| *value != RELEVANCE) else {
        filters.remove(keys::SORT);
        filters.remove(keys::ORDER);
        return;
    };

    match sort_option(value) {
        Some(spec) => {
            filters.set(keys::SORT, spec.field);
            filters.set(keys::ORDER, spec.direction.as_str());
        }
        None => filters.set(keys::SORT, value),
    }
}

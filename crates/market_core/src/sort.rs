use crate::{keys, FilterState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }
}

/// Field and direction sent to the listings endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }
}

/// Shorthand used by the home and search pages in place of `sort`/`order`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nav {
    New,
    BestSellers,
    Relevance,
}

impl Nav {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "new" => Some(Nav::New),
            "best-sellers" => Some(Nav::BestSellers),
            "relevance" => Some(Nav::Relevance),
            _ => None,
        }
    }

    pub fn sort(self) -> Option<SortSpec> {
        match self {
            Nav::New => Some(SortSpec::new("created_at", SortDirection::Desc)),
            Nav::BestSellers => Some(SortSpec::new("purchases", SortDirection::Desc)),
            Nav::Relevance => None,
        }
    }
}

/// Select value that clears both `sort` and `order`.
pub const RELEVANCE: &str = "relevance";

/// Sort selector values and the `sort`/`order` pair each one stores.
const SORT_OPTIONS: &[(&str, &str, SortDirection)] = &[
    ("created_at_asc", "created_at", SortDirection::Asc),
    ("created_at_desc", "created_at", SortDirection::Desc),
    ("created_at", "created_at", SortDirection::Desc),
    ("price_asc", "price", SortDirection::Asc),
    ("price_desc", "price", SortDirection::Desc),
    ("purchases", "purchases", SortDirection::Desc),
    ("stars", "stars", SortDirection::Desc),
];

/// Looks up a sort selector value.
pub fn sort_option(value: &str) -> Option<SortSpec> {
    SORT_OPTIONS
        .iter()
        .find(|(option, _, _)| *option == value)
        .map(|(_, field, direction)| SortSpec::new(*field, *direction))
}

/// Sort to request for `filters`.
///
/// A `nav` of `new` or `best-sellers` wins over any stored `sort`. Otherwise a
/// stored `sort` applies, descending unless `order` says `asc`.
pub fn effective_sort(filters: &FilterState) -> Option<SortSpec> {
    if let Some(spec) = filters.get(keys::NAV).and_then(Nav::parse).and_then(Nav::sort) {
        return Some(spec);
    }
    let field = filters.get(keys::SORT).filter(|field| !field.is_empty())?;
    let direction = filters
        .get(keys::ORDER)
        .and_then(SortDirection::parse)
        .unwrap_or(SortDirection::Desc);
    Some(SortSpec::new(field, direction))
}

use crate::cart::{CartItem, ListingId};
use crate::{CategoryEntry, Countdown, ListingCard, ListingDetail, StarRating};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub location: String,
    pub filters: Vec<(String, String)>,
    pub page: u64,
    pub has_previous: bool,
    pub loading: bool,
    pub listings: Vec<ListingCard>,
    pub categories: Vec<CategoryEntry>,
    pub open_listing: Option<ListingDetailView>,
    pub cart_items: Vec<CartItem>,
    pub cart_count: u32,
    pub cart_total: f64,
    pub unread_messages: u32,
    /// Inline message for the last user action (validation, bid outcome).
    pub notice: Option<String>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListingDetailView {
    pub listing_id: ListingId,
    pub loading: bool,
    pub detail: Option<ListingDetail>,
    pub rating: Option<StarRating>,
    pub minimum_bid: Option<f64>,
    pub countdown: Option<Countdown>,
}

use crate::cart::{CartItem, ListingId};
use crate::{ListingQuery, RequestId};

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Push a location onto the router; it answers with `Msg::Navigated`.
    Navigate { location: String },
    FetchListings {
        request_id: RequestId,
        query: ListingQuery,
    },
    FetchCategories,
    FetchListing {
        request_id: RequestId,
        listing_id: ListingId,
    },
    PlaceBid { listing_id: ListingId, amount: f64 },
    ChangePassword { password: String },
    PersistCart(Vec<CartItem>),
    /// Cosmetic: bring the named anchor into view after paging.
    ScrollToAnchor { anchor: String },
}

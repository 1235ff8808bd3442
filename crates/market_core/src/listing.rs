use crate::cart::ListingId;
use crate::validate::minimum_bid;
use crate::StarRating;

/// One tile in a listing grid.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingCard {
    pub listing_id: ListingId,
    pub title: String,
    pub price: f64,
    pub image_encoded: Option<String>,
    pub rating: StarRating,
    pub review_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryEntry {
    pub category_id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewLine {
    pub stars: u8,
    pub author: Option<String>,
    pub comment: String,
}

/// Detail page of a single listing with its first page of reviews.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingDetail {
    pub listing_id: ListingId,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub image_encoded: Option<String>,
    pub listing_type: Option<String>,
    pub current_bid: Option<f64>,
    pub starting_price: Option<f64>,
    /// Average over every review of the listing, not only the loaded page.
    pub average_review: f64,
    pub total_reviews: u32,
    /// Auction close as unix seconds.
    pub ends_at: Option<i64>,
    pub reviews: Vec<ReviewLine>,
}

impl ListingDetail {
    pub fn is_auction(&self) -> bool {
        self.ends_at.is_some() || self.listing_type.as_deref() == Some("auction")
    }

    pub fn minimum_bid(&self) -> f64 {
        minimum_bid(self.current_bid, self.starting_price.unwrap_or(self.price))
    }

    pub fn rating(&self) -> StarRating {
        StarRating::from_average(self.average_review)
    }

    pub fn to_card(&self) -> ListingCard {
        ListingCard {
            listing_id: self.listing_id,
            title: self.title.clone(),
            price: self.price,
            image_encoded: self.image_encoded.clone(),
            rating: self.rating(),
            review_count: self.total_reviews,
        }
    }
}

const LISTING_PREFIX: &str = "/listings/";

pub fn listing_path(listing_id: ListingId) -> String {
    format!("{LISTING_PREFIX}{listing_id}")
}

/// Listing id addressed by a detail route such as `/listings/42`.
pub fn parse_listing_path(path: &str) -> Option<ListingId> {
    path.strip_prefix(LISTING_PREFIX)?
        .trim_end_matches('/')
        .parse()
        .ok()
}

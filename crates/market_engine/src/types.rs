use std::fmt;

use serde::{Deserialize, Serialize};

pub type RequestId = u64;
pub type ListingId = u64;

/// Read-only listing projection owned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingSummary {
    pub listing_id: ListingId,
    #[serde(default, alias = "short_title")]
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub image_encoded: Option<String>,
    #[serde(default, alias = "avg_review")]
    pub average_review: f64,
    #[serde(default, alias = "review_count")]
    pub total_reviews: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub category_id: u64,
    pub name: String,
    #[serde(default)]
    pub image_encoded: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingDetail {
    pub listing_id: ListingId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub image_encoded: Option<String>,
    #[serde(default)]
    pub listing_type: Option<String>,
    #[serde(default)]
    pub current_bid: Option<f64>,
    #[serde(default)]
    pub starting_price: Option<f64>,
    #[serde(default, alias = "avg_review")]
    pub average_review: f64,
    #[serde(default, alias = "review_count")]
    pub total_reviews: u32,
    /// RFC 3339 close time for auctions.
    #[serde(default)]
    pub end_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    #[serde(default)]
    pub review_id: Option<u64>,
    pub stars: u8,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub comment: String,
}

/// Detail view payload: the listing plus its best reviews.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingPage {
    pub listing: ListingDetail,
    pub reviews: Vec<Review>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BidRequest {
    pub listing_id: ListingId,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PasswordChange {
    pub password: String,
}

/// `GET /listings` answers either wrapped or as a bare array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum ListingsBody {
    Wrapped { listings: Vec<ListingSummary> },
    Bare(Vec<ListingSummary>),
}

impl ListingsBody {
    pub(crate) fn into_listings(self) -> Vec<ListingSummary> {
        match self {
            ListingsBody::Wrapped { listings } | ListingsBody::Bare(listings) => listings,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CategoriesBody {
    pub(crate) categories: Vec<Category>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ListingBody {
    pub(crate) listing: ListingDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ReviewsBody {
    pub(crate) reviews: Vec<Review>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// Always delivered; failures arrive as an empty list.
    ListingsLoaded {
        request_id: RequestId,
        listings: Vec<ListingSummary>,
    },
    ListingLoaded {
        request_id: RequestId,
        result: Result<ListingPage, FailureKind>,
    },
    CategoriesLoaded(Vec<Category>),
    BidPlaced {
        listing_id: ListingId,
        result: Result<(), FetchError>,
    },
    PasswordChanged {
        result: Result<(), FetchError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for FetchError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    MalformedBody,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::MalformedBody => write!(f, "malformed response body"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

//! Marketfront engine: REST access, background IO and local storage.
mod api;
mod engine;
mod listings;
pub mod live;
mod store;
mod types;

pub use api::{ApiSettings, MarketApi, ReqwestMarketApi, ReviewQuery};
pub use engine::EngineHandle;
pub use listings::ListingFetcher;
pub use store::{LocalStore, StoreError};
pub use types::{
    BidRequest, Category, EngineEvent, FailureKind, FetchError, ListingDetail, ListingId,
    ListingPage, ListingSummary, PasswordChange, RequestId, Review,
};

use std::sync::Arc;

use market_logging::market_warn;

use crate::api::{MarketApi, ReviewQuery};
use crate::{FetchError, ListingId, ListingPage, ListingSummary};

/// Read side of the storefront: every call is idempotent and safe to re-issue.
#[derive(Clone)]
pub struct ListingFetcher {
    api: Arc<dyn MarketApi>,
}

impl ListingFetcher {
    pub fn new(api: Arc<dyn MarketApi>) -> Self {
        Self { api }
    }

    /// One page of listings. Failures are logged and read as an empty page.
    pub async fn fetch(&self, params: &[(String, String)]) -> Vec<ListingSummary> {
        match self.api.listings(params).await {
            Ok(listings) => listings,
            Err(err) => {
                market_warn!("Listings fetch failed params={:?}: {}", params, err);
                Vec::new()
            }
        }
    }

    /// Listing detail with its first page of reviews. Missing reviews do not
    /// fail the page.
    pub async fn fetch_page(&self, listing_id: ListingId) -> Result<ListingPage, FetchError> {
        let (listing, reviews) = tokio::join!(
            self.api.listing(listing_id),
            self.api.reviews(ReviewQuery::first_page(listing_id))
        );
        let listing = listing?;
        let reviews = reviews.unwrap_or_else(|err| {
            market_warn!("Reviews fetch failed listing_id={}: {}", listing_id, err);
            Vec::new()
        });
        Ok(ListingPage { listing, reviews })
    }
}

use std::time::Duration;

use futures_util::StreamExt;
use reqwest::Url;
use serde::de::DeserializeOwned;

use crate::types::{CategoriesBody, ListingBody, ListingsBody, ReviewsBody};
use crate::{
    BidRequest, Category, FailureKind, FetchError, ListingDetail, ListingId, ListingSummary,
    PasswordChange, Review,
};

#[derive(Debug, Clone)]
pub struct ApiSettings {
    /// Root of the REST API; endpoint paths are joined onto it.
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api/".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

/// Best-first page of reviews for one listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewQuery {
    pub listing_id: ListingId,
    pub start: u64,
    pub range: u64,
}

impl ReviewQuery {
    pub fn first_page(listing_id: ListingId) -> Self {
        Self {
            listing_id,
            start: 0,
            range: 5,
        }
    }

    fn to_pairs(self) -> Vec<(String, String)> {
        vec![
            ("listing_id".to_string(), self.listing_id.to_string()),
            ("sort".to_string(), "stars".to_string()),
            ("order".to_string(), "desc".to_string()),
            ("start".to_string(), self.start.to_string()),
            ("range".to_string(), self.range.to_string()),
        ]
    }
}

#[async_trait::async_trait]
pub trait MarketApi: Send + Sync {
    async fn listings(&self, params: &[(String, String)])
        -> Result<Vec<ListingSummary>, FetchError>;

    async fn listing(&self, listing_id: ListingId) -> Result<ListingDetail, FetchError>;

    async fn categories(&self) -> Result<Vec<Category>, FetchError>;

    async fn reviews(&self, query: ReviewQuery) -> Result<Vec<Review>, FetchError>;

    async fn place_bid(&self, bid: &BidRequest) -> Result<(), FetchError>;

    async fn change_password(&self, change: &PasswordChange) -> Result<(), FetchError>;
}

/// REST client. Session auth rides on cookies kept by the client's cookie store.
#[derive(Debug, Clone)]
pub struct ReqwestMarketApi {
    settings: ApiSettings,
    base: Url,
    client: reqwest::Client,
}

impl ReqwestMarketApi {
    pub fn new(settings: ApiSettings) -> Result<Self, FetchError> {
        let mut base = Url::parse(&settings.base_url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .cookie_store(true)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self {
            settings,
            base,
            client,
        })
    }

    fn endpoint(&self, path: &str, params: &[(String, String)]) -> Result<Url, FetchError> {
        let mut url = self
            .base
            .join(path)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if !params.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(params.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let bytes = self.read_body(response).await?;
        serde_json::from_slice(&bytes)
            .map_err(|err| FetchError::new(FailureKind::MalformedBody, err.to_string()))
    }

    /// Checks the status and collects the body, refusing anything over `max_bytes`.
    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, FetchError> {
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl MarketApi for ReqwestMarketApi {
    async fn listings(
        &self,
        params: &[(String, String)],
    ) -> Result<Vec<ListingSummary>, FetchError> {
        let url = self.endpoint("listings", params)?;
        let body: ListingsBody = self.get_json(url).await?;
        Ok(body.into_listings())
    }

    async fn listing(&self, listing_id: ListingId) -> Result<ListingDetail, FetchError> {
        let url = self.endpoint(&format!("listings/{listing_id}"), &[])?;
        let body: ListingBody = self.get_json(url).await?;
        Ok(body.listing)
    }

    async fn categories(&self) -> Result<Vec<Category>, FetchError> {
        let url = self.endpoint("categories", &[])?;
        let body: CategoriesBody = self.get_json(url).await?;
        Ok(body.categories)
    }

    async fn reviews(&self, query: ReviewQuery) -> Result<Vec<Review>, FetchError> {
        let url = self.endpoint("reviews", &query.to_pairs())?;
        let body: ReviewsBody = self.get_json(url).await?;
        Ok(body.reviews)
    }

    async fn place_bid(&self, bid: &BidRequest) -> Result<(), FetchError> {
        let url = self.endpoint("bids", &[])?;
        let response = self
            .client
            .post(url)
            .json(bid)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        self.read_body(response).await.map(|_| ())
    }

    async fn change_password(&self, change: &PasswordChange) -> Result<(), FetchError> {
        let url = self.endpoint("users/password", &[])?;
        let response = self
            .client
            .put(url)
            .json(change)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        self.read_body(response).await.map(|_| ())
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return FetchError::new(FailureKind::MalformedBody, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}

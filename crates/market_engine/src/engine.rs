use std::io;
use std::sync::{mpsc, Arc};
use std::thread;

use market_logging::{market_debug, market_warn};

use crate::api::MarketApi;
use crate::listings::ListingFetcher;
use crate::{BidRequest, EngineEvent, ListingId, PasswordChange, RequestId};

enum EngineCommand {
    FetchListings {
        request_id: RequestId,
        params: Vec<(String, String)>,
    },
    FetchListing {
        request_id: RequestId,
        listing_id: ListingId,
    },
    FetchCategories,
    PlaceBid(BidRequest),
    ChangePassword(PasswordChange),
}

/// Handle to the IO thread. Commands run concurrently on a tokio runtime and
/// their results come back as [`EngineEvent`]s in completion order.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn spawn(api: Arc<dyn MarketApi>) -> io::Result<(Self, mpsc::Receiver<EngineEvent>)> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;
        let fetcher = ListingFetcher::new(api.clone());

        thread::Builder::new()
            .name("market-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let fetcher = fetcher.clone();
                    let api = api.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        if let Some(event) = handle_command(&fetcher, api.as_ref(), command).await
                        {
                            let _ = event_tx.send(event);
                        }
                    });
                }
                market_debug!("Engine command channel closed");
            })?;

        Ok((Self { cmd_tx }, event_rx))
    }

    pub fn fetch_listings(&self, request_id: RequestId, params: Vec<(String, String)>) {
        self.send(EngineCommand::FetchListings { request_id, params });
    }

    pub fn fetch_listing(&self, request_id: RequestId, listing_id: ListingId) {
        self.send(EngineCommand::FetchListing {
            request_id,
            listing_id,
        });
    }

    pub fn fetch_categories(&self) {
        self.send(EngineCommand::FetchCategories);
    }

    pub fn place_bid(&self, listing_id: ListingId, amount: f64) {
        self.send(EngineCommand::PlaceBid(BidRequest { listing_id, amount }));
    }

    pub fn change_password(&self, password: String) {
        self.send(EngineCommand::ChangePassword(PasswordChange { password }));
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            market_warn!("Engine thread is gone; command dropped");
        }
    }
}

async fn handle_command(
    fetcher: &ListingFetcher,
    api: &dyn MarketApi,
    command: EngineCommand,
) -> Option<EngineEvent> {
    match command {
        EngineCommand::FetchListings { request_id, params } => {
            let listings = fetcher.fetch(&params).await;
            Some(EngineEvent::ListingsLoaded {
                request_id,
                listings,
            })
        }
        EngineCommand::FetchListing {
            request_id,
            listing_id,
        } => {
            let result = fetcher.fetch_page(listing_id).await.map_err(|err| {
                market_warn!("Listing fetch failed listing_id={}: {}", listing_id, err);
                err.kind
            });
            Some(EngineEvent::ListingLoaded { request_id, result })
        }
        EngineCommand::FetchCategories => match api.categories().await {
            Ok(categories) => Some(EngineEvent::CategoriesLoaded(categories)),
            Err(err) => {
                market_warn!("Categories fetch failed: {}", err);
                None
            }
        },
        EngineCommand::PlaceBid(bid) => {
            let result = api.place_bid(&bid).await;
            Some(EngineEvent::BidPlaced {
                listing_id: bid.listing_id,
                result,
            })
        }
        EngineCommand::ChangePassword(change) => {
            let result = api.change_password(&change).await;
            Some(EngineEvent::PasswordChanged { result })
        }
    }
}

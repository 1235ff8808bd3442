use std::sync::mpsc;
use std::thread;

use chrono::DateTime;
use market_core::{
    CategoryEntry, Effect, ListingCard, ListingDetail, Msg, ReviewLine, StarRating,
};
use market_engine::{EngineEvent, EngineHandle, ListingPage, ListingSummary, LocalStore};
use market_logging::{market_debug, market_info, market_warn};

use super::persistence;
use super::router::History;
use super::Input;

pub struct EffectRunner {
    engine: EngineHandle,
    store: LocalStore,
    history: History,
    input_tx: mpsc::Sender<Input>,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, store: LocalStore, input_tx: mpsc::Sender<Input>) -> Self {
        Self {
            engine,
            store,
            history: History::new(),
            input_tx,
        }
    }

    pub fn store(&self) -> &LocalStore {
        &self.store
    }

    pub fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Navigate { location } => {
                    market_info!("Navigate location={}", location);
                    self.history.push(location.clone());
                    self.dispatch(Msg::Navigated(location));
                }
                Effect::FetchListings { request_id, query } => {
                    let params = query.to_pairs();
                    market_info!("FetchListings request_id={} params={:?}", request_id, params);
                    self.engine.fetch_listings(request_id, params);
                }
                Effect::FetchCategories => {
                    self.engine.fetch_categories();
                }
                Effect::FetchListing {
                    request_id,
                    listing_id,
                } => {
                    market_info!(
                        "FetchListing request_id={} listing_id={}",
                        request_id,
                        listing_id
                    );
                    self.engine.fetch_listing(request_id, listing_id);
                }
                Effect::PlaceBid { listing_id, amount } => {
                    market_info!("PlaceBid listing_id={} amount={:.2}", listing_id, amount);
                    self.engine.place_bid(listing_id, amount);
                }
                Effect::ChangePassword { password } => {
                    market_info!("ChangePassword");
                    self.engine.change_password(password);
                }
                Effect::PersistCart(items) => {
                    persistence::save_cart(&self.store, &items);
                }
                Effect::ScrollToAnchor { anchor } => {
                    // A terminal re-renders from the top; nothing to scroll.
                    market_debug!("ScrollToAnchor anchor={}", anchor);
                }
            }
        }
    }

    /// Steps back in history, re-entering the previous location.
    pub fn back(&mut self) -> bool {
        match self.history.back() {
            Some(location) => {
                self.dispatch(Msg::Navigated(location));
                true
            }
            None => false,
        }
    }

    fn dispatch(&self, msg: Msg) {
        let _ = self.input_tx.send(Input::Dispatch(msg));
    }

    /// Forwards engine results to the update loop as messages.
    pub fn spawn_event_loop(&self, events: mpsc::Receiver<EngineEvent>) {
        let input_tx = self.input_tx.clone();
        thread::spawn(move || {
            while let Ok(event) = events.recv() {
                if input_tx.send(Input::Dispatch(map_event(event))).is_err() {
                    break;
                }
            }
        });
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::ListingsLoaded {
            request_id,
            listings,
        } => Msg::ListingsLoaded {
            request_id,
            listings: listings.into_iter().map(to_card).collect(),
        },
        EngineEvent::ListingLoaded { request_id, result } => Msg::ListingLoaded {
            request_id,
            detail: result.ok().map(to_detail),
        },
        EngineEvent::CategoriesLoaded(categories) => Msg::CategoriesLoaded(
            categories
                .into_iter()
                .map(|category| CategoryEntry {
                    category_id: category.category_id,
                    name: category.name,
                })
                .collect(),
        ),
        EngineEvent::BidPlaced { listing_id, result } => Msg::BidResolved {
            listing_id,
            result: result.map_err(|err| {
                market_warn!("Bid on listing {} failed: {}", listing_id, err);
                format!("bid failed: {}", err.kind)
            }),
        },
        EngineEvent::PasswordChanged { result } => Msg::PasswordResolved {
            result: result.map_err(|err| {
                market_warn!("Password change failed: {}", err);
                format!("password change failed: {}", err.kind)
            }),
        },
    }
}

fn to_card(summary: ListingSummary) -> ListingCard {
    ListingCard {
        listing_id: summary.listing_id,
        title: summary.title,
        price: summary.price,
        image_encoded: summary.image_encoded,
        rating: StarRating::from_average(summary.average_review),
        review_count: summary.total_reviews,
    }
}

fn to_detail(page: ListingPage) -> ListingDetail {
    let ListingPage { listing, reviews } = page;
    let ends_at = listing.end_time.as_deref().and_then(|raw| {
        DateTime::parse_from_rfc3339(raw)
            .map(|time| time.timestamp())
            .map_err(|err| market_warn!("Bad end_time {:?}: {}", raw, err))
            .ok()
    });
    ListingDetail {
        listing_id: listing.listing_id,
        title: listing.title,
        description: listing.description,
        price: listing.price,
        image_encoded: listing.image_encoded,
        listing_type: listing.listing_type,
        current_bid: listing.current_bid,
        starting_price: listing.starting_price,
        average_review: listing.average_review,
        total_reviews: listing.total_reviews,
        ends_at,
        reviews: reviews
            .into_iter()
            .map(|review| ReviewLine {
                stars: review.stars,
                author: review.username,
                comment: review.comment,
            })
            .collect(),
    }
}

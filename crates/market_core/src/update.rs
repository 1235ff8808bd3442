use crate::cart::CartItem;
use crate::listing::listing_path;
use crate::validate::{parse_bid_amount, validate_bid, validate_password_confirmation};
use crate::{pagination, reducer, AppState, Effect, LiveEvent, Location, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Navigated(raw) => {
            state.set_location(Location::parse(&raw));
            let mut effects = Vec::with_capacity(2);
            if state.claim_categories_request() {
                effects.push(Effect::FetchCategories);
            }
            effects.push(fetch_current(&mut state));
            effects
        }
        Msg::FilterChanged { key, value } => {
            let filters = reducer::apply(state.filters(), &key, value.as_deref());
            vec![navigate_to(&state, filters)]
        }
        Msg::NextPageClicked => {
            let filters = pagination::next(state.filters());
            paged(&state, filters)
        }
        Msg::PreviousPageClicked => {
            // The control is disabled on the first page.
            if !pagination::has_previous(state.filters()) {
                return (state, Vec::new());
            }
            let filters = pagination::previous(state.filters());
            paged(&state, filters)
        }
        Msg::ListingsLoaded {
            request_id,
            listings,
        } => {
            state.apply_listings(request_id, listings);
            Vec::new()
        }
        Msg::CategoriesLoaded(categories) => {
            state.set_categories(categories);
            Vec::new()
        }
        Msg::ListingOpened { listing_id } => vec![Effect::Navigate {
            location: listing_path(listing_id),
        }],
        Msg::ListingClosed => {
            if state.open_listing_id().is_none() {
                return (state, Vec::new());
            }
            vec![Effect::Navigate {
                location: state.browse_location().to_string(),
            }]
        }
        Msg::ListingLoaded { request_id, detail } => {
            state.apply_detail(request_id, detail);
            Vec::new()
        }
        Msg::Live(event) => match event {
            // Reads whatever the store shows now, never a captured copy.
            LiveEvent::NewBid => vec![fetch_current(&mut state)],
            LiveEvent::NewMessage | LiveEvent::NewTicketMessage => {
                state.bump_unread();
                Vec::new()
            }
        },
        Msg::AddToCart { listing_id } => match state.find_card(listing_id) {
            Some(card) => {
                state.cart_mut().add(CartItem {
                    listing_id: card.listing_id,
                    title: card.title,
                    price: card.price,
                    image_encoded: card.image_encoded,
                    quantity: 1,
                });
                state.mark_dirty();
                state.set_notice(None);
                vec![persist_cart(&state)]
            }
            None => {
                state.set_notice(Some(format!("listing {listing_id} is not on this page")));
                Vec::new()
            }
        },
        Msg::RemoveFromCart { listing_id } => {
            if state.cart_mut().remove(listing_id).is_some() {
                state.mark_dirty();
                vec![persist_cart(&state)]
            } else {
                Vec::new()
            }
        }
        Msg::CartQuantityChanged {
            listing_id,
            quantity,
        } => {
            if state.cart_mut().set_quantity(listing_id, quantity) {
                state.mark_dirty();
                vec![persist_cart(&state)]
            } else {
                state.set_notice(Some(format!("listing {listing_id} is not in the cart")));
                Vec::new()
            }
        }
        Msg::RestoreCart(items) => {
            *state.cart_mut() = crate::Cart::from_items(items);
            state.mark_dirty();
            Vec::new()
        }
        Msg::BidSubmitted { amount } => {
            let Some((listing_id, minimum)) = state
                .open_detail()
                .map(|detail| (detail.listing_id, detail.minimum_bid()))
            else {
                state.set_notice(Some("open a listing before bidding".to_string()));
                return (state, Vec::new());
            };
            match parse_bid_amount(&amount).and_then(|amount| {
                validate_bid(amount, minimum)?;
                Ok(amount)
            }) {
                Ok(amount) => {
                    state.set_notice(None);
                    vec![Effect::PlaceBid { listing_id, amount }]
                }
                Err(err) => {
                    state.set_notice(Some(err.to_string()));
                    Vec::new()
                }
            }
        }
        Msg::BidResolved { listing_id, result } => match result {
            Ok(()) => {
                state.set_notice(Some("bid placed".to_string()));
                if state.open_listing_id() == Some(listing_id) {
                    state
                        .begin_detail_request()
                        .map(|(request_id, listing_id)| Effect::FetchListing {
                            request_id,
                            listing_id,
                        })
                        .into_iter()
                        .collect()
                } else {
                    Vec::new()
                }
            }
            Err(message) => {
                state.set_notice(Some(message));
                Vec::new()
            }
        },
        Msg::PasswordSubmitted {
            password,
            confirmation,
        } => match validate_password_confirmation(&password, &confirmation) {
            Ok(()) => {
                state.set_notice(None);
                vec![Effect::ChangePassword { password }]
            }
            Err(err) => {
                state.set_notice(Some(err.to_string()));
                Vec::new()
            }
        },
        Msg::PasswordResolved { result } => {
            let notice = match result {
                Ok(()) => "password updated".to_string(),
                Err(message) => message,
            };
            state.set_notice(Some(notice));
            Vec::new()
        }
        Msg::Tick { now } => {
            state.set_now(now);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// Fetch for whatever the location shows: the open listing, else the grid.
fn fetch_current(state: &mut AppState) -> Effect {
    if let Some((request_id, listing_id)) = state.begin_detail_request() {
        return Effect::FetchListing {
            request_id,
            listing_id,
        };
    }
    let request_id = state.begin_listings_request();
    Effect::FetchListings {
        request_id,
        query: state.listing_query(),
    }
}

fn navigate_to(state: &AppState, filters: crate::FilterState) -> Effect {
    let location = Location::new(state.location().path.clone(), filters);
    Effect::Navigate {
        location: location.to_string(),
    }
}

fn paged(state: &AppState, filters: crate::FilterState) -> Vec<Effect> {
    let mut effects = vec![navigate_to(state, filters)];
    if let Some(anchor) = &state.browse_view().scroll_anchor {
        effects.push(Effect::ScrollToAnchor {
            anchor: anchor.clone(),
        });
    }
    effects
}

fn persist_cart(state: &AppState) -> Effect {
    Effect::PersistCart(state.cart().items().to_vec())
}

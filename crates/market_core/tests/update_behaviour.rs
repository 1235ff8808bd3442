use std::sync::Once;

use market_core::{
    update, AppState, BrowseView, Countdown, Effect, LiveEvent, ListingCard, ListingDetail, Msg,
    PageWindow, ReviewLine, StarRating,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(market_logging::initialize_for_tests);
}

fn navigate(state: AppState, location: &str) -> (AppState, Vec<Effect>) {
    update(state, Msg::Navigated(location.to_string()))
}

fn card(listing_id: u64, title: &str) -> ListingCard {
    ListingCard {
        listing_id,
        title: title.to_string(),
        price: 12.5,
        image_encoded: None,
        rating: StarRating::from_average(4.5),
        review_count: 2,
    }
}

fn auction(listing_id: u64, current_bid: Option<f64>) -> ListingDetail {
    ListingDetail {
        listing_id,
        title: "Brass lamp".to_string(),
        description: "Working condition".to_string(),
        price: 15.0,
        image_encoded: None,
        listing_type: Some("auction".to_string()),
        current_bid,
        starting_price: Some(15.0),
        average_review: 0.0,
        total_reviews: 0,
        ends_at: Some(1_000),
        reviews: Vec::new(),
    }
}

/// Opens listing 7 and loads its detail.
fn open_auction(current_bid: Option<f64>) -> AppState {
    let (state, effects) = navigate(AppState::new(), "/listings/7");
    let request_id = effects
        .iter()
        .find_map(|effect| match effect {
            Effect::FetchListing { request_id, .. } => Some(*request_id),
            _ => None,
        })
        .expect("detail fetch");
    let (state, _) = update(
        state,
        Msg::ListingLoaded {
            request_id,
            detail: Some(auction(7, current_bid)),
        },
    );
    state
}

#[test]
fn navigation_fetches_the_page_window() {
    init_logging();
    let (state, effects) = navigate(AppState::new(), "/search?category_id=1&page=2");

    let query = BrowseView::for_path("/search").query(state.filters());
    assert_eq!(query.window, PageWindow { start: 12, range: 12 });
    assert_eq!(
        effects,
        vec![
            Effect::FetchCategories,
            Effect::FetchListings {
                request_id: 1,
                query,
            },
        ]
    );
    let view = state.view();
    assert_eq!(view.page, 2);
    assert!(view.has_previous);
    assert!(view.loading);
    assert!(view.dirty);
}

#[test]
fn categories_are_requested_once() {
    init_logging();
    let (state, _) = navigate(AppState::new(), "/search");
    let (_, effects) = navigate(state, "/search?query=lamp");

    assert_eq!(effects.len(), 1);
    assert!(matches!(effects[0], Effect::FetchListings { request_id: 2, .. }));
}

#[test]
fn filter_change_only_navigates() {
    init_logging();
    let (state, _) = navigate(AppState::new(), "/search?query=lamp");
    let (state, effects) = update(
        state,
        Msg::FilterChanged {
            key: "sort".to_string(),
            value: Some("purchases".to_string()),
        },
    );

    assert_eq!(
        effects,
        vec![Effect::Navigate {
            location: "/search?query=lamp&sort=purchases&order=desc".to_string(),
        }]
    );
    // The URL stays the source of truth until the router answers.
    assert!(!state.filters().contains("sort"));
}

#[test]
fn previous_on_first_page_is_noop() {
    init_logging();
    let (mut state, _) = navigate(AppState::new(), "/search?page=1");
    assert!(state.consume_dirty());
    let before = state.clone();

    let (mut next, effects) = update(state, Msg::PreviousPageClicked);

    assert!(effects.is_empty());
    assert_eq!(next, before);
    assert!(!next.consume_dirty());
}

#[test]
fn paging_navigates_and_scrolls() {
    init_logging();
    let (state, _) = navigate(AppState::new(), "/search?query=lamp&page=3");

    let (state, effects) = update(state, Msg::NextPageClicked);
    assert_eq!(
        effects,
        vec![
            Effect::Navigate {
                location: "/search?query=lamp&page=4".to_string(),
            },
            Effect::ScrollToAnchor {
                anchor: "listings-top".to_string(),
            },
        ]
    );

    let (_, effects) = update(state, Msg::PreviousPageClicked);
    assert_eq!(
        effects[0],
        Effect::Navigate {
            location: "/search?query=lamp&page=2".to_string(),
        }
    );
}

#[test]
fn home_paging_does_not_scroll() {
    init_logging();
    let (state, _) = navigate(AppState::new(), "/");
    let (_, effects) = update(state, Msg::NextPageClicked);

    assert_eq!(
        effects,
        vec![Effect::Navigate {
            location: "/?page=2".to_string(),
        }]
    );
}

#[test]
fn stale_listing_responses_are_discarded() {
    init_logging();
    let (state, _) = navigate(AppState::new(), "/search?query=a");
    let (state, _) = navigate(state, "/search?query=b");

    let (mut state, _) = update(
        state,
        Msg::ListingsLoaded {
            request_id: 1,
            listings: vec![card(1, "from a")],
        },
    );
    assert!(state.view().listings.is_empty());
    assert!(state.view().loading);
    state.consume_dirty();

    let (state, _) = update(
        state,
        Msg::ListingsLoaded {
            request_id: 2,
            listings: vec![card(2, "from b")],
        },
    );
    assert_eq!(state.view().listings, vec![card(2, "from b")]);
    assert!(!state.view().loading);

    let (state, _) = update(
        state,
        Msg::ListingsLoaded {
            request_id: 1,
            listings: vec![card(1, "from a")],
        },
    );
    assert_eq!(state.view().listings, vec![card(2, "from b")]);
}

#[test]
fn empty_result_clears_the_grid() {
    init_logging();
    let (state, _) = navigate(AppState::new(), "/search?page=50");
    let (state, _) = update(
        state,
        Msg::ListingsLoaded {
            request_id: 1,
            listings: Vec::new(),
        },
    );

    let view = state.view();
    assert!(view.listings.is_empty());
    assert!(!view.loading);
    assert_eq!(view.page, 50);
}

#[test]
fn new_bid_refetches_current_filters() {
    init_logging();
    let (state, _) = navigate(AppState::new(), "/search?query=lamp");
    let (state, effects) = update(state, Msg::Live(LiveEvent::NewBid));

    let query = BrowseView::for_path("/search").query(state.filters());
    assert_eq!(query.query.as_deref(), Some("lamp"));
    assert_eq!(
        effects,
        vec![Effect::FetchListings {
            request_id: 2,
            query,
        }]
    );
}

#[test]
fn new_bid_refetches_open_listing() {
    init_logging();
    let state = open_auction(Some(20.0));
    let (_, effects) = update(state, Msg::Live(LiveEvent::NewBid));

    assert_eq!(
        effects,
        vec![Effect::FetchListing {
            request_id: 2,
            listing_id: 7,
        }]
    );
}

#[test]
fn messages_bump_unread_counter() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::Live(LiveEvent::NewMessage));
    assert!(effects.is_empty());
    let (state, _) = update(state, Msg::Live(LiveEvent::NewTicketMessage));

    assert_eq!(state.view().unread_messages, 2);
}

#[test]
fn opening_a_listing_goes_through_the_router() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::ListingOpened { listing_id: 7 });
    assert_eq!(
        effects,
        vec![Effect::Navigate {
            location: "/listings/7".to_string(),
        }]
    );

    let (state, effects) = navigate(state, "/listings/7");
    assert_eq!(
        effects,
        vec![
            Effect::FetchCategories,
            Effect::FetchListing {
                request_id: 1,
                listing_id: 7,
            },
        ]
    );
    let open = state.view().open_listing.expect("open listing");
    assert!(open.loading);
    assert_eq!(open.detail, None);
}

#[test]
fn closing_a_listing_returns_to_the_grid() {
    init_logging();
    let (state, _) = navigate(AppState::new(), "/search?category_id=3&page=2");
    let (state, _) = navigate(state, "/listings/7");

    let (state, effects) = update(state, Msg::ListingClosed);
    assert_eq!(
        effects,
        vec![Effect::Navigate {
            location: "/search?category_id=3&page=2".to_string(),
        }]
    );

    let (state, _) = navigate(state, "/search?category_id=3&page=2");
    assert_eq!(state.view().open_listing, None);
    let (_, effects) = update(state, Msg::ListingClosed);
    assert!(effects.is_empty());
}

#[test]
fn stale_detail_is_discarded() {
    init_logging();
    let state = open_auction(None);
    let (state, effects) = update(state, Msg::Live(LiveEvent::NewBid));
    assert_eq!(effects.len(), 1);

    let (state, _) = update(
        state,
        Msg::ListingLoaded {
            request_id: 1,
            detail: Some(auction(7, Some(99.0))),
        },
    );
    let open = state.view().open_listing.expect("open listing");
    assert!(open.loading);
    assert_eq!(open.detail.expect("detail").current_bid, None);
}

#[test]
fn failed_detail_load_sets_notice() {
    init_logging();
    let (state, _) = navigate(AppState::new(), "/listings/9");
    let (state, _) = update(
        state,
        Msg::ListingLoaded {
            request_id: 1,
            detail: None,
        },
    );

    let view = state.view();
    assert_eq!(view.notice.as_deref(), Some("listing could not be loaded"));
    assert!(!view.open_listing.expect("open listing").loading);
}

#[test]
fn bid_below_minimum_shows_inline_message() {
    init_logging();
    let state = open_auction(Some(20.0));
    assert_eq!(
        state.view().open_listing.and_then(|open| open.minimum_bid),
        Some(21.0)
    );

    let (state, effects) = update(
        state,
        Msg::BidSubmitted {
            amount: "20.50".to_string(),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(
        state.view().notice.as_deref(),
        Some("bid must be at least 21.00")
    );

    let (state, effects) = update(
        state,
        Msg::BidSubmitted {
            amount: "abc".to_string(),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(
        state.view().notice.as_deref(),
        Some("enter a bid amount as a number")
    );

    let (state, effects) = update(
        state,
        Msg::BidSubmitted {
            amount: "25".to_string(),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::PlaceBid {
            listing_id: 7,
            amount: 25.0,
        }]
    );
    assert_eq!(state.view().notice, None);
}

#[test]
fn bid_without_open_listing_is_rejected() {
    init_logging();
    let (state, effects) = update(
        AppState::new(),
        Msg::BidSubmitted {
            amount: "10".to_string(),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(
        state.view().notice.as_deref(),
        Some("open a listing before bidding")
    );
}

#[test]
fn accepted_bid_refreshes_listing() {
    init_logging();
    let state = open_auction(None);
    let (state, effects) = update(
        state,
        Msg::BidResolved {
            listing_id: 7,
            result: Ok(()),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::FetchListing {
            request_id: 2,
            listing_id: 7,
        }]
    );
    assert_eq!(state.view().notice.as_deref(), Some("bid placed"));

    let (state, effects) = update(
        state,
        Msg::BidResolved {
            listing_id: 7,
            result: Err("bid rejected: auction closed".to_string()),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(
        state.view().notice.as_deref(),
        Some("bid rejected: auction closed")
    );
}

#[test]
fn countdown_follows_ticks() {
    init_logging();
    let state = open_auction(None);
    let (mut state, _) = update(state, Msg::Tick { now: 900 });
    assert!(state.consume_dirty());
    assert_eq!(
        state.view().open_listing.and_then(|open| open.countdown),
        Some(Countdown::Running {
            days: 0,
            hours: 0,
            minutes: 1,
            seconds: 40,
        })
    );

    let (state, _) = update(state, Msg::Tick { now: 1_000 });
    assert_eq!(
        state.view().open_listing.and_then(|open| open.countdown),
        Some(Countdown::Ended)
    );
}

#[test]
fn ticks_without_countdown_stay_clean() {
    init_logging();
    let (mut state, _) = navigate(AppState::new(), "/search");
    state.consume_dirty();
    let (mut state, _) = update(state, Msg::Tick { now: 5 });

    assert!(!state.consume_dirty());
}

#[test]
fn cart_merges_and_persists() {
    init_logging();
    let (state, _) = navigate(AppState::new(), "/search");
    let (state, _) = update(
        state,
        Msg::ListingsLoaded {
            request_id: 1,
            listings: vec![card(3, "Teapot")],
        },
    );

    let (state, _) = update(state, Msg::AddToCart { listing_id: 3 });
    let (state, effects) = update(state, Msg::AddToCart { listing_id: 3 });
    let items = match &effects[..] {
        [Effect::PersistCart(items)] => items.clone(),
        other => panic!("unexpected effects {other:?}"),
    };
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].quantity, 2);
    assert_eq!(items[0].title, "Teapot");

    let view = state.view();
    assert_eq!(view.cart_count, 2);
    assert_eq!(view.cart_total, 25.0);

    let (state, effects) = update(state, Msg::RemoveFromCart { listing_id: 3 });
    assert_eq!(effects, vec![Effect::PersistCart(Vec::new())]);
    assert_eq!(state.view().cart_count, 0);
}

#[test]
fn cart_quantity_edits_persist() {
    init_logging();
    let (state, _) = navigate(AppState::new(), "/search");
    let (state, _) = update(
        state,
        Msg::ListingsLoaded {
            request_id: 1,
            listings: vec![card(3, "Teapot")],
        },
    );
    let (state, _) = update(state, Msg::AddToCart { listing_id: 3 });

    let (state, effects) = update(
        state,
        Msg::CartQuantityChanged {
            listing_id: 3,
            quantity: 4,
        },
    );
    assert!(matches!(&effects[..], [Effect::PersistCart(items)] if items[0].quantity == 4));
    assert_eq!(state.view().cart_count, 4);

    let (state, effects) = update(
        state,
        Msg::CartQuantityChanged {
            listing_id: 9,
            quantity: 1,
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.view().notice.as_deref(), Some("listing 9 is not in the cart"));

    let (state, effects) = update(
        state,
        Msg::CartQuantityChanged {
            listing_id: 3,
            quantity: 0,
        },
    );
    assert_eq!(effects, vec![Effect::PersistCart(Vec::new())]);
    assert_eq!(state.view().cart_count, 0);
}

#[test]
fn removing_an_absent_listing_leaves_the_view_clean() {
    init_logging();
    let mut state = AppState::new();
    state.consume_dirty();

    let (mut state, effects) = update(state, Msg::RemoveFromCart { listing_id: 5 });
    assert!(effects.is_empty());
    assert!(!state.consume_dirty());
}

#[test]
fn password_change_is_checked_before_sending() {
    init_logging();
    let (state, effects) = update(
        AppState::new(),
        Msg::PasswordSubmitted {
            password: "hunter2".to_string(),
            confirmation: "hunter3".to_string(),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.view().notice.as_deref(), Some("passwords do not match"));

    let (state, effects) = update(
        state,
        Msg::PasswordSubmitted {
            password: "hunter2".to_string(),
            confirmation: "hunter2".to_string(),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::ChangePassword {
            password: "hunter2".to_string(),
        }]
    );
    assert_eq!(state.view().notice, None);

    let (state, _) = update(state, Msg::PasswordResolved { result: Ok(()) });
    assert_eq!(state.view().notice.as_deref(), Some("password updated"));
}

#[test]
fn adding_unknown_listing_sets_notice() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::AddToCart { listing_id: 99 });

    assert!(effects.is_empty());
    assert_eq!(
        state.view().notice.as_deref(),
        Some("listing 99 is not on this page")
    );
}

#[test]
fn detail_stars_use_the_listing_average_not_the_best_reviews() {
    let mut detail = auction(7, None);
    detail.average_review = 2.6;
    detail.total_reviews = 31;
    detail.reviews = (0..5)
        .map(|_| ReviewLine {
            stars: 5,
            author: None,
            comment: "great".to_string(),
        })
        .collect();

    assert_eq!(
        detail.rating(),
        StarRating {
            filled: 2,
            half: true,
            base: 5
        }
    );
    assert_eq!(detail.to_card().review_count, 31);
}

#[test]
fn open_listing_can_be_added_to_cart() {
    init_logging();
    let state = open_auction(None);
    let (state, effects) = update(state, Msg::AddToCart { listing_id: 7 });

    assert_eq!(effects.len(), 1);
    assert_eq!(state.cart().items()[0].title, "Brass lamp");
}

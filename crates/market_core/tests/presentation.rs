use market_core::validate::{
    minimum_bid, parse_bid_amount, validate_bid, validate_password_confirmation,
};
use market_core::{Cart, CartItem, Countdown, LiveEvent, StarRating, ValidationError};

#[test]
fn four_and_a_half_renders_four_full_one_half() {
    let rating = StarRating::from_average(4.5);

    assert_eq!(rating.filled, 4);
    assert!(rating.half);
    assert_eq!(rating.base, 5);
}

#[test]
fn ratings_round_down_and_clamp() {
    assert_eq!(
        StarRating::from_average(3.2),
        StarRating {
            filled: 3,
            half: false,
            base: 5
        }
    );
    assert_eq!(StarRating::from_average(5.0).filled, 5);
    assert_eq!(StarRating::from_average(7.0).filled, 5);
    assert_eq!(StarRating::from_average(-1.0).filled, 0);
    assert_eq!(StarRating::from_average(f64::NAN).filled, 0);
    assert!(!StarRating::from_average(f64::NAN).half);
}

#[test]
fn countdown_splits_and_prints() {
    let countdown = Countdown::from_remaining(90_061);
    assert_eq!(
        countdown,
        Countdown::Running {
            days: 1,
            hours: 1,
            minutes: 1,
            seconds: 1,
        }
    );
    assert_eq!(countdown.to_string(), "1d 01:01:01");
    assert_eq!(Countdown::from_remaining(59).to_string(), "00:00:59");
    assert_eq!(Countdown::from_remaining(0), Countdown::Ended);
    assert_eq!(Countdown::until(10, 20).to_string(), "auction ended");
}

#[test]
fn minimum_bid_uses_start_price_until_first_bid() {
    assert_eq!(minimum_bid(None, 15.0), 15.0);
    assert_eq!(minimum_bid(Some(20.0), 15.0), 21.0);
}

#[test]
fn bid_amounts_are_parsed_leniently() {
    assert_eq!(parse_bid_amount(" $1,250.50 "), Ok(1250.5));
    assert_eq!(parse_bid_amount("0"), Err(ValidationError::NotPositive));
    assert_eq!(parse_bid_amount("-3"), Err(ValidationError::NotPositive));
    assert_eq!(parse_bid_amount("ten"), Err(ValidationError::InvalidAmount));
    assert_eq!(parse_bid_amount("inf"), Err(ValidationError::InvalidAmount));
}

#[test]
fn bids_below_minimum_are_rejected() {
    assert_eq!(validate_bid(21.0, 21.0), Ok(()));
    assert_eq!(
        validate_bid(20.0, 21.0),
        Err(ValidationError::BidTooLow {
            minimum: 21.0,
            offered: 20.0,
        })
    );
}

#[test]
fn password_confirmation_must_match() {
    assert_eq!(validate_password_confirmation("s3cret", "s3cret"), Ok(()));
    assert_eq!(
        validate_password_confirmation("s3cret", "secret"),
        Err(ValidationError::PasswordMismatch)
    );
    assert_eq!(
        validate_password_confirmation("", ""),
        Err(ValidationError::EmptyPassword)
    );
}

fn item(listing_id: u64, quantity: u32) -> CartItem {
    CartItem {
        listing_id,
        title: format!("item {listing_id}"),
        price: 4.0,
        image_encoded: None,
        quantity,
    }
}

#[test]
fn cart_restores_and_updates_quantities() {
    let mut cart = Cart::from_items(vec![item(1, 1), item(2, 3), item(1, 2)]);
    assert_eq!(cart.items().len(), 2);
    assert_eq!(cart.item_count(), 6);
    assert_eq!(cart.total(), 24.0);

    assert!(cart.set_quantity(2, 1));
    assert_eq!(cart.item_count(), 4);
    assert!(cart.set_quantity(1, 0));
    assert_eq!(cart.items().len(), 1);
    assert!(!cart.set_quantity(42, 3));

    cart.add(item(5, 0));
    assert_eq!(cart.items().len(), 1);
}

#[test]
fn live_event_names_resolve_both_ways() {
    for event in LiveEvent::ALL {
        assert_eq!(LiveEvent::from_name(event.name()), Some(event));
    }
    assert_eq!(LiveEvent::NewTicketMessage.name(), "new_ticket_message");
    assert_eq!(LiveEvent::from_name("user_joined"), None);
}

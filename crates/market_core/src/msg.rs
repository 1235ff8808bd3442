use crate::cart::{CartItem, ListingId};
use crate::{CategoryEntry, ListingCard, ListingDetail, RequestId};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Router settled on a location (startup, history, or after `Effect::Navigate`).
    Navigated(String),
    /// User changed a filter control; `None` clears it.
    FilterChanged { key: String, value: Option<String> },
    /// User clicked Next.
    NextPageClicked,
    /// User clicked Previous.
    PreviousPageClicked,
    /// Engine answered a listings request.
    ListingsLoaded {
        request_id: RequestId,
        listings: Vec<ListingCard>,
    },
    CategoriesLoaded(Vec<CategoryEntry>),
    /// User picked a listing from the grid.
    ListingOpened { listing_id: ListingId },
    /// User left the detail page.
    ListingClosed,
    /// Engine answered a detail request; `None` when it failed.
    ListingLoaded {
        request_id: RequestId,
        detail: Option<ListingDetail>,
    },
    /// Real-time signal from the event socket.
    Live(LiveEvent),
    AddToCart { listing_id: ListingId },
    RemoveFromCart { listing_id: ListingId },
    /// User edited a cart line; zero removes it.
    CartQuantityChanged { listing_id: ListingId, quantity: u32 },
    /// Restore the cart from local storage.
    RestoreCart(Vec<CartItem>),
    /// User submitted the bid box on the open listing.
    BidSubmitted { amount: String },
    BidResolved {
        listing_id: ListingId,
        result: Result<(), String>,
    },
    /// User submitted the change-password form.
    PasswordSubmitted {
        password: String,
        confirmation: String,
    },
    PasswordResolved { result: Result<(), String> },
    /// Clock tick carrying the current unix time, drives auction countdowns.
    Tick { now: i64 },
    NoOp,
}

/// Payload-less socket events meaning "refetch what you are showing".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiveEvent {
    NewBid,
    NewMessage,
    NewTicketMessage,
}

impl LiveEvent {
    pub const ALL: [LiveEvent; 3] = [
        LiveEvent::NewBid,
        LiveEvent::NewMessage,
        LiveEvent::NewTicketMessage,
    ];

    /// Event name on the wire.
    pub fn name(self) -> &'static str {
        match self {
            LiveEvent::NewBid => "new_bid",
            LiveEvent::NewMessage => "new_message",
            LiveEvent::NewTicketMessage => "new_ticket_message",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|event| event.name() == name)
    }
}

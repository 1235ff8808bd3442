//! Marketfront core: filter/query state, pure state machine and view-model helpers.
mod cart;
mod codec;
mod countdown;
mod effect;
mod filter;
mod listing;
mod msg;
mod page;
pub mod pagination;
mod query;
mod rating;
pub mod reducer;
mod sort;
mod state;
mod update;
pub mod validate;
mod view_model;

pub use cart::{Cart, CartItem, ListingId};
pub use codec::{decode, encode, Location};
pub use countdown::Countdown;
pub use effect::Effect;
pub use filter::{keys, FilterState};
pub use listing::{
    listing_path, parse_listing_path, CategoryEntry, ListingCard, ListingDetail, ReviewLine,
};
pub use msg::{LiveEvent, Msg};
pub use page::{page_size, PageWindow};
pub use query::{BrowseView, ListingQuery};
pub use rating::{StarRating, MAX_STARS};
pub use sort::{effective_sort, sort_option, Nav, SortDirection, SortSpec, RELEVANCE};
pub use state::{AppState, RequestId};
pub use update::update;
pub use validate::ValidationError;
pub use view_model::{AppViewModel, ListingDetailView};

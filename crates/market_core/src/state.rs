use crate::cart::ListingId;
use crate::listing::parse_listing_path;
use crate::view_model::{AppViewModel, ListingDetailView};
use crate::{
    pagination, BrowseView, Cart, CategoryEntry, Countdown, FilterState, ListingCard,
    ListingDetail, ListingQuery, Location,
};

/// Tag carried by fetch effects so late answers can be recognised.
pub type RequestId = u64;

/// Detail page that is open, loaded or still in flight.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct OpenListing {
    pub(crate) listing_id: ListingId,
    pub(crate) detail: Option<ListingDetail>,
    pub(crate) loading: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    location: Location,
    /// Last grid location, where closing a listing returns to.
    browse_location: Location,
    view: BrowseView,
    listings: Vec<ListingCard>,
    listings_loading: bool,
    categories: Vec<CategoryEntry>,
    categories_requested: bool,
    open_listing: Option<OpenListing>,
    cart: Cart,
    unread_messages: u32,
    notice: Option<String>,
    now: i64,
    last_request: RequestId,
    latest_listings_request: Option<RequestId>,
    latest_detail_request: Option<RequestId>,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        let location = Location::parse("/");
        Self {
            view: BrowseView::for_path(&location.path),
            browse_location: location.clone(),
            location,
            listings: Vec::new(),
            listings_loading: false,
            categories: Vec::new(),
            categories_requested: false,
            open_listing: None,
            cart: Cart::new(),
            unread_messages: 0,
            notice: None,
            now: 0,
            last_request: 0,
            latest_listings_request: None,
            latest_detail_request: None,
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            location: self.location.to_string(),
            filters: self
                .location
                .filters
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            page: pagination::current_page(&self.location.filters),
            has_previous: pagination::has_previous(&self.location.filters),
            loading: self.listings_loading,
            listings: self.listings.clone(),
            categories: self.categories.clone(),
            open_listing: self.open_listing.as_ref().map(|open| ListingDetailView {
                listing_id: open.listing_id,
                loading: open.loading,
                minimum_bid: open.detail.as_ref().map(ListingDetail::minimum_bid),
                countdown: open
                    .detail
                    .as_ref()
                    .and_then(|detail| detail.ends_at)
                    .map(|ends_at| Countdown::until(ends_at, self.now)),
                rating: open.detail.as_ref().map(ListingDetail::rating),
                detail: open.detail.clone(),
            }),
            cart_items: self.cart.items().to_vec(),
            cart_count: self.cart.item_count(),
            cart_total: self.cart.total(),
            unread_messages: self.unread_messages,
            notice: self.notice.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn filters(&self) -> &FilterState {
        &self.location.filters
    }

    pub fn browse_view(&self) -> &BrowseView {
        &self.view
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_location(&mut self, location: Location) {
        self.view = BrowseView::for_path(&location.path);
        self.open_listing = parse_listing_path(&location.path).map(|listing_id| OpenListing {
            listing_id,
            detail: None,
            loading: false,
        });
        if self.open_listing.is_none() {
            self.browse_location = location.clone();
        }
        self.location = location;
        self.mark_dirty();
    }

    pub(crate) fn listing_query(&self) -> ListingQuery {
        self.view.query(&self.location.filters)
    }

    fn issue_request(&mut self) -> RequestId {
        self.last_request += 1;
        self.last_request
    }

    pub(crate) fn begin_listings_request(&mut self) -> RequestId {
        let request_id = self.issue_request();
        self.latest_listings_request = Some(request_id);
        self.listings_loading = true;
        self.mark_dirty();
        request_id
    }

    /// Stores listings unless a newer request has been issued since.
    pub(crate) fn apply_listings(
        &mut self,
        request_id: RequestId,
        listings: Vec<ListingCard>,
    ) -> bool {
        if self.latest_listings_request != Some(request_id) {
            return false;
        }
        self.listings = listings;
        self.listings_loading = false;
        self.mark_dirty();
        true
    }

    /// Marks categories as requested; false when they already were.
    pub(crate) fn claim_categories_request(&mut self) -> bool {
        !std::mem::replace(&mut self.categories_requested, true)
    }

    pub(crate) fn set_categories(&mut self, categories: Vec<CategoryEntry>) {
        self.categories = categories;
        self.mark_dirty();
    }

    pub(crate) fn browse_location(&self) -> &Location {
        &self.browse_location
    }

    pub(crate) fn open_listing_id(&self) -> Option<ListingId> {
        self.open_listing.as_ref().map(|open| open.listing_id)
    }

    pub(crate) fn open_detail(&self) -> Option<&ListingDetail> {
        self.open_listing.as_ref()?.detail.as_ref()
    }

    pub(crate) fn begin_detail_request(&mut self) -> Option<(RequestId, ListingId)> {
        let listing_id = self.open_listing_id()?;
        let request_id = self.issue_request();
        self.latest_detail_request = Some(request_id);
        if let Some(open) = self.open_listing.as_mut() {
            open.loading = true;
        }
        self.mark_dirty();
        Some((request_id, listing_id))
    }

    /// Stores a detail answer unless it is stale; `None` marks a failed load.
    pub(crate) fn apply_detail(
        &mut self,
        request_id: RequestId,
        detail: Option<ListingDetail>,
    ) -> bool {
        if self.latest_detail_request != Some(request_id) {
            return false;
        }
        let Some(open) = self.open_listing.as_mut() else {
            return false;
        };
        open.loading = false;
        match detail {
            Some(detail) if detail.listing_id == open.listing_id => open.detail = Some(detail),
            Some(_) => {}
            None => self.notice = Some("listing could not be loaded".to_string()),
        }
        self.mark_dirty();
        true
    }

    /// Card for a listing visible on the current page or detail view.
    pub(crate) fn find_card(&self, listing_id: ListingId) -> Option<ListingCard> {
        self.listings
            .iter()
            .find(|card| card.listing_id == listing_id)
            .cloned()
            .or_else(|| {
                self.open_detail()
                    .filter(|detail| detail.listing_id == listing_id)
                    .map(ListingDetail::to_card)
            })
    }

    /// Callers mark the state dirty once the cart actually changed.
    pub(crate) fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    pub(crate) fn bump_unread(&mut self) {
        self.unread_messages = self.unread_messages.saturating_add(1);
        self.mark_dirty();
    }

    pub(crate) fn set_notice(&mut self, notice: Option<String>) {
        if self.notice != notice {
            self.notice = notice;
            self.mark_dirty();
        }
    }

    /// Advances the clock; only a running countdown makes the view dirty.
    pub(crate) fn set_now(&mut self, now: i64) {
        self.now = now;
        if self.open_detail().and_then(|detail| detail.ends_at).is_some() {
            self.mark_dirty();
        }
    }
}

pub type ListingId = u64;

#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    pub listing_id: ListingId,
    pub title: String,
    pub price: f64,
    pub image_encoded: Option<String>,
    pub quantity: u32,
}

/// Client-side cart. Items are unique per listing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores a cart, folding duplicate listings together.
    pub fn from_items(items: Vec<CartItem>) -> Self {
        let mut cart = Self::new();
        for item in items {
            cart.add(item);
        }
        cart
    }

    /// Adds an item; an existing line for the same listing gains the quantity.
    pub fn add(&mut self, item: CartItem) {
        if item.quantity == 0 {
            return;
        }
        match self
            .items
            .iter_mut()
            .find(|line| line.listing_id == item.listing_id)
        {
            Some(line) => line.quantity = line.quantity.saturating_add(item.quantity),
            None => self.items.push(item),
        }
    }

    pub fn remove(&mut self, listing_id: ListingId) -> Option<CartItem> {
        let index = self
            .items
            .iter()
            .position(|line| line.listing_id == listing_id)?;
        Some(self.items.remove(index))
    }

    /// Sets the quantity of a line; zero removes it. Returns false when absent.
    pub fn set_quantity(&mut self, listing_id: ListingId, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove(listing_id).is_some();
        }
        match self
            .items
            .iter_mut()
            .find(|line| line.listing_id == listing_id)
        {
            Some(line) => {
                line.quantity = quantity;
                true
            }
            None => false,
        }
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|line| line.quantity).sum()
    }

    pub fn total(&self) -> f64 {
        self.items
            .iter()
            .map(|line| line.price * f64::from(line.quantity))
            .sum()
    }
}

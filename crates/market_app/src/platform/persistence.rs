use market_core::CartItem;
use market_engine::LocalStore;
use market_logging::{market_error, market_info, market_warn};
use serde::{Deserialize, Serialize};

/// Local storage key holding the cart.
pub(crate) const CART_KEY: &str = "cart";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedCartItem {
    listing_id: u64,
    #[serde(default)]
    title: String,
    price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image_encoded: Option<String>,
    quantity: u32,
}

pub(crate) fn load_cart(store: &LocalStore) -> Vec<CartItem> {
    let content = match store.read(CART_KEY) {
        Ok(Some(text)) => text,
        Ok(None) => return Vec::new(),
        Err(err) => {
            market_warn!("Failed to read cart from {:?}: {}", store.dir(), err);
            return Vec::new();
        }
    };

    let persisted: Vec<PersistedCartItem> = match serde_json::from_str(&content) {
        Ok(items) => items,
        Err(err) => {
            market_warn!("Failed to parse cart from {:?}: {}", store.dir(), err);
            return Vec::new();
        }
    };

    let items: Vec<CartItem> = persisted
        .into_iter()
        .map(|item| CartItem {
            listing_id: item.listing_id,
            title: item.title,
            price: item.price,
            image_encoded: item.image_encoded,
            quantity: item.quantity,
        })
        .collect();
    market_info!("Loaded {} cart lines from {:?}", items.len(), store.dir());
    items
}

pub(crate) fn save_cart(store: &LocalStore, items: &[CartItem]) {
    let persisted: Vec<PersistedCartItem> = items
        .iter()
        .map(|item| PersistedCartItem {
            listing_id: item.listing_id,
            title: item.title.clone(),
            price: item.price,
            image_encoded: item.image_encoded.clone(),
            quantity: item.quantity,
        })
        .collect();

    let content = match serde_json::to_string(&persisted) {
        Ok(text) => text,
        Err(err) => {
            market_error!("Failed to serialize cart: {}", err);
            return;
        }
    };

    if let Err(err) = store.write(CART_KEY, &content) {
        market_error!("Failed to write cart to {:?}: {}", store.dir(), err);
    }
}

use std::fmt::Write;

use market_core::{AppViewModel, ListingCard, ListingDetailView, StarRating};

/// Full screen for the current view model.
pub fn render(view: &AppViewModel) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "== {} ==", view.location);
    let mut status = format!(
        "cart: {} item(s), ${:.2}",
        view.cart_count, view.cart_total
    );
    if view.unread_messages > 0 {
        let _ = write!(status, " | unread messages: {}", view.unread_messages);
    }
    let _ = writeln!(out, "{status}");
    if let Some(notice) = &view.notice {
        let _ = writeln!(out, "! {notice}");
    }

    match &view.open_listing {
        Some(open) => render_detail(&mut out, open),
        None => render_grid(&mut out, view),
    }
    out
}

/// Cart lines with the running total.
pub fn render_cart(view: &AppViewModel) -> String {
    if view.cart_items.is_empty() {
        return "cart is empty\n".to_string();
    }
    let mut out = String::new();
    for item in &view.cart_items {
        let _ = writeln!(
            out,
            "  #{:<6} {:<40} {} x ${:.2}",
            item.listing_id, item.title, item.quantity, item.price
        );
    }
    let _ = writeln!(out, "  total ${:.2}", view.cart_total);
    out
}

/// Single countdown line, printed on clock ticks instead of a full redraw.
pub fn render_countdown(view: &AppViewModel) -> Option<String> {
    let countdown = view.open_listing.as_ref()?.countdown?;
    Some(format!("time left: {countdown}"))
}

pub fn stars(rating: StarRating) -> String {
    let mut out = "★".repeat(usize::from(rating.filled));
    let mut drawn = rating.filled;
    if rating.half && drawn < rating.base {
        out.push('½');
        drawn += 1;
    }
    out.push_str(&"☆".repeat(usize::from(rating.base.saturating_sub(drawn))));
    out
}

fn render_grid(out: &mut String, view: &AppViewModel) {
    if !view.filters.is_empty() {
        let filters: Vec<String> = view
            .filters
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect();
        let _ = writeln!(out, "filters: {}", filters.join(", "));
    }
    if !view.categories.is_empty() {
        let categories: Vec<String> = view
            .categories
            .iter()
            .map(|category| format!("{} ({})", category.name, category.category_id))
            .collect();
        let _ = writeln!(out, "categories: {}", categories.join(" | "));
    }

    if view.loading {
        let _ = writeln!(out, "loading...");
    } else if view.listings.is_empty() {
        let _ = writeln!(out, "no listings found");
    } else {
        for card in &view.listings {
            let _ = writeln!(out, "{}", card_line(card));
        }
    }

    let _ = writeln!(
        out,
        "page {}{}",
        view.page,
        if view.has_previous {
            "  [prev] [next]"
        } else {
            "  [next]"
        }
    );
}

fn card_line(card: &ListingCard) -> String {
    format!(
        "  #{:<6} {:<40} ${:>9.2}  {} ({})",
        card.listing_id,
        card.title,
        card.price,
        stars(card.rating),
        card.review_count
    )
}

fn render_detail(out: &mut String, open: &ListingDetailView) {
    let Some(detail) = &open.detail else {
        let _ = writeln!(
            out,
            "listing #{}{}",
            open.listing_id,
            if open.loading { ": loading..." } else { "" }
        );
        return;
    };

    let _ = writeln!(out, "#{} {}", detail.listing_id, detail.title);
    let _ = writeln!(out, "price: ${:.2}", detail.price);
    if let Some(rating) = open.rating {
        let _ = writeln!(out, "rating: {}", stars(rating));
    }
    if detail.is_auction() {
        if let Some(current) = detail.current_bid {
            let _ = writeln!(out, "current bid: ${current:.2}");
        }
        if let Some(minimum) = open.minimum_bid {
            let _ = writeln!(out, "minimum bid: ${minimum:.2}");
        }
        if let Some(countdown) = open.countdown {
            let _ = writeln!(out, "time left: {countdown}");
        }
    }
    if !detail.description.is_empty() {
        let _ = writeln!(out, "\n{}", detail.description);
    }
    if !detail.reviews.is_empty() {
        let _ = writeln!(out, "\nreviews:");
        for review in &detail.reviews {
            let _ = writeln!(
                out,
                "  {} {}: {}",
                "★".repeat(usize::from(review.stars)),
                review.author.as_deref().unwrap_or("anonymous"),
                review.comment
            );
        }
    }
    if open.loading {
        let _ = writeln!(out, "refreshing...");
    }
}

//! Terminal rendering of the cart view model.
//!
//! ```text
//! Chaussures de course    100,00 €  x2     200,00 €  [p1]
//! Chaussettes               9,99 €  x1       9,99 €  [p2]
//! ----------------------------------------------------
//! Subtotal                                 209,99 €
//! Discount                                 -31,50 €
//! Total                                    178,49 €
//! active code: CCA15 (you save 31,50 €)
//! ```

use std::fmt::Write;

use panier_store::CartViewModel;

const NAME_WIDTH: usize = 24;
const AMOUNT_WIDTH: usize = 12;

/// Renders the cart as plain text.
pub fn render_cart(view: &CartViewModel) -> String {
    let mut out = String::new();

    if view.is_empty {
        let _ = writeln!(out, "Your cart is empty.");
        summary_line(&mut out, "Total", &view.total_display);
        return out;
    }

    for item in &view.items {
        let _ = writeln!(
            out,
            "{:<w$}{:>a$}  x{:<4}{:>a$}  [{}]",
            truncate(&item.name, NAME_WIDTH - 1),
            item.unit_price_display,
            item.quantity,
            item.line_total_display,
            item.id,
            w = NAME_WIDTH,
            a = AMOUNT_WIDTH,
        );
    }

    let _ = writeln!(out, "{}", "-".repeat(NAME_WIDTH + 2 * AMOUNT_WIDTH + 8));
    summary_line(&mut out, "Subtotal", &view.subtotal_display);
    if view.promo_is_valid {
        summary_line(&mut out, "Discount", &format!("-{}", view.discount_display));
    }
    summary_line(&mut out, "Total", &view.total_display);

    if let Some(message) = &view.promo_message {
        let _ = writeln!(out, "{}", message);
    }

    out
}

fn summary_line(out: &mut String, label: &str, amount: &str) {
    let _ = writeln!(
        out,
        "{:<w$}{:>a$}",
        label,
        amount,
        w = NAME_WIDTH + AMOUNT_WIDTH + 6,
        a = AMOUNT_WIDTH
    );
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut cut: String = s.chars().take(max.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panier_core::{Money, NewProduct};
    use panier_store::{CartController, CartStore, MemoryStore};

    #[test]
    fn test_render_empty() {
        let mut cart = CartController::new(CartStore::new(MemoryStore::new()));
        let text = render_cart(&cart.view_model());
        assert!(text.starts_with("Your cart is empty."));
        assert!(text.contains("0,00 €"));
    }

    #[test]
    fn test_render_with_code() {
        let mut cart = CartController::new(CartStore::new(MemoryStore::new()));
        let shoes = NewProduct::new("p1", "Shoes", Money::from_cents(10000));
        cart.add_item(&shoes).unwrap();
        cart.add_item(&shoes).unwrap();
        cart.apply_promo_code("CCA15").unwrap();

        let text = render_cart(&cart.view_model());
        assert!(text.contains("Shoes"));
        assert!(text.contains("x2"));
        assert!(text.contains("200,00 €"));
        assert!(text.contains("-30,00 €"));
        assert!(text.contains("170,00 €"));
        assert!(text.contains("active code: CCA15"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long product name", 8), "a very …");
    }
}

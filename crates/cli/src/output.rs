//! Terminal rendering.

use std::fmt::Write as _;

use ekart_core::{CatalogItem, LedgerEntry, OrderSummary};
use ekart_storefront::services::cart::CartLedger;
use ekart_storefront::services::notify::Notification;

/// One line per notification, failures marked.
pub fn notification(n: &Notification) -> String {
    if n.is_destructive() {
        format!("✗ {}: {}", n.title, n.description)
    } else {
        format!("✓ {}: {}", n.title, n.description)
    }
}

/// A catalog listing row.
pub fn item_row(item: &CatalogItem) -> String {
    format!(
        "{:>4}  {:>12}  {}  [{}]",
        item.id,
        item.unit_price().display(),
        item.title,
        item.category
    )
}

/// Full product details.
pub fn item_detail(item: &CatalogItem) -> String {
    let mut out = format!(
        "{}\n{}\nCategory: {}\nPrice: {}\n",
        item.title,
        "=".repeat(item.title.chars().count()),
        item.category,
        item.unit_price().display()
    );
    if let Some(rating) = &item.rating {
        let _ = writeln!(out, "Rating: {:.1} ({} reviews)", rating.rate, rating.count);
    }
    out.push('\n');
    out.push_str(&item.description);
    out
}

fn ledger_row(entry: &LedgerEntry) -> String {
    format!(
        "{:>4}  {:>3} x {:>12}  {:>12}  {}",
        entry.item.id,
        entry.quantity,
        entry.item.unit_price().display(),
        entry.line_total().display(),
        entry.item.title
    )
}

/// Subtotal, shipping, tax and total lines.
pub fn order_summary(summary: &OrderSummary) -> String {
    [
        ("Subtotal", summary.subtotal),
        ("Shipping", summary.shipping),
        ("Tax (18%)", summary.tax),
        ("Total", summary.total),
    ]
    .iter()
    .map(|(label, price)| format!("{label:<10} {:>12}", price.display()))
    .collect::<Vec<_>>()
    .join("\n")
}

/// The cart contents and totals.
pub fn cart(ledger: &CartLedger) -> String {
    if ledger.is_empty() {
        return "Your cart is empty".to_string();
    }

    let mut lines: Vec<String> = ledger.entries().iter().map(ledger_row).collect();
    lines.push(String::new());
    lines.push(format!("Items: {}", ledger.item_count()));
    lines.push(order_summary(&ledger.order_summary()));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ekart_core::ProductId;

    fn item() -> CatalogItem {
        CatalogItem {
            id: ProductId::new(3),
            title: "Mens Cotton Jacket".to_string(),
            price: 1.into(),
            category: "men's clothing".to_string(),
            description: "Warm".to_string(),
            image: String::new(),
            rating: None,
        }
    }

    #[test]
    fn test_notification_marks_failures() {
        let ok = Notification::new("Logged out", "bye");
        let failed = Notification::destructive("Login failed", "Invalid email or password");

        assert_eq!(notification(&ok), "✓ Logged out: bye");
        assert_eq!(
            notification(&failed),
            "✗ Login failed: Invalid email or password"
        );
    }

    #[test]
    fn test_item_row_shows_rupees() {
        let row = item_row(&item());
        assert!(row.contains("₹83.00"));
        assert!(row.ends_with("Mens Cotton Jacket  [men's clothing]"));
    }

    #[test]
    fn test_order_summary_lines() {
        let entries = vec![LedgerEntry::new(
            CatalogItem {
                price: 10.into(),
                ..item()
            },
            2,
        )];
        let text = order_summary(&ekart_core::order_summary(&entries));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Subtotal") && lines[0].ends_with("₹1660.00"));
        assert!(lines[1].ends_with("₹0.00"));
        assert!(lines[2].starts_with("Tax (18%)") && lines[2].ends_with("₹298.80"));
        assert!(lines[3].starts_with("Total") && lines[3].ends_with("₹1958.80"));
    }

    #[test]
    fn test_item_detail_without_rating() {
        let detail = item_detail(&item());
        assert!(detail.starts_with("Mens Cotton Jacket\n"));
        assert!(!detail.contains("Rating"));
        assert!(detail.ends_with("Warm"));
    }
}

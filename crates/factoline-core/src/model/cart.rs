// ── Session cart counters ──

use rust_decimal::Decimal;

use super::product::Product;

/// Additive session counters behind the header cart badge.
///
/// Each add counts one unit at the product's per-m³ price. There is no
/// removal and no quantity editing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cart {
    total: Decimal,
    notifications: u32,
}

impl Cart {
    pub fn add_to_cart(&mut self, product: &Product) {
        self.total = self.total.saturating_add(product.price_per_m3);
        self.notifications = self.notifications.saturating_add(1);
    }

    /// Sum of the prices of every added product.
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Number of add-to-cart actions so far.
    pub fn notifications(&self) -> u32 {
        self.notifications
    }
}

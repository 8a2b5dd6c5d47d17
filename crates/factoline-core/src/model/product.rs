// ── Product domain type ──

use std::borrow::Cow;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Stock above this is shown as `"> 50"`.
pub const STOCK_DISPLAY_CAP: u32 = 50;

/// Stock at or below this triggers the low-stock indicator.
pub const LOW_STOCK_THRESHOLD: u32 = 20;

/// A catalog entry. Field names follow the catalog file shape
/// (`pricePerM3`, `type`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub title: String,
    pub image: String,
    /// Wood species, compared verbatim against `essence` filter options.
    pub essence: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Free text; only the first token is a grade (e.g. `QF1a`).
    pub quality: String,
    pub drying: String,
    /// Prefix-comparable, e.g. `27mm` or `27x150mm`.
    pub thickness: String,
    pub lengths: String,
    pub seller: String,
    /// Available volume in m³.
    pub stock: u32,
    pub price_per_m3: Decimal,
    pub currency: String,
}

impl Product {
    /// Every field in its display form, in declaration order.
    ///
    /// This is the complete list the text search scans; adding a field to
    /// `Product` means adding it here too.
    pub fn search_fields(&self) -> [Cow<'_, str>; 13] {
        [
            Cow::Borrowed(self.id.as_str()),
            Cow::Borrowed(self.title.as_str()),
            Cow::Borrowed(self.image.as_str()),
            Cow::Borrowed(self.essence.as_str()),
            Cow::Borrowed(self.kind.as_str()),
            Cow::Borrowed(self.quality.as_str()),
            Cow::Borrowed(self.drying.as_str()),
            Cow::Borrowed(self.thickness.as_str()),
            Cow::Borrowed(self.lengths.as_str()),
            Cow::Borrowed(self.seller.as_str()),
            Cow::Owned(self.stock.to_string()),
            Cow::Owned(self.price_per_m3.to_string()),
            Cow::Borrowed(self.currency.as_str()),
        ]
    }

    /// Stock as displayed on a card: `"> 50"` above the cap, exact otherwise.
    pub fn stock_label(&self) -> String {
        if self.stock > STOCK_DISPLAY_CAP {
            format!("> {STOCK_DISPLAY_CAP}")
        } else {
            self.stock.to_string()
        }
    }

    pub fn is_low_stock(&self) -> bool {
        self.stock <= LOW_STOCK_THRESHOLD
    }

    /// Seller-facing reference, id left-padded to four digits (`SKU-0007`).
    pub fn sku(&self) -> String {
        format!("SKU-{:0>4}", self.id)
    }

    /// Leading grade token of the quality text (`"QF1a Premier choix"` → `"QF1a"`).
    pub fn quality_grade(&self) -> &str {
        self.quality.split(' ').next().unwrap_or_default()
    }

    /// `"{price} {currency}"`, e.g. `"1450 EUR"`.
    pub fn price_label(&self) -> String {
        format!("{} {}", self.price_per_m3, self.currency)
    }
}

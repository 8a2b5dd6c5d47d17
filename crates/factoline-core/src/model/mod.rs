// ── Domain model ──
//
// Catalog entries and filter configuration are immutable for a session;
// `Selection` and `Cart` are the only state that changes.

pub mod cart;
pub mod category;
pub mod product;
pub mod selection;

pub use cart::Cart;
pub use category::{FilterCategory, FilterOption};
pub use product::Product;
pub use selection::Selection;

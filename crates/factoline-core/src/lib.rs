//! Domain core for the factoline product listing.
//!
//! This crate owns the catalog model, the filter/search engine, and the
//! single-owner state container consumed by the terminal UI:
//!
//! - **[`Catalog`]**: Ordered products plus the static filter categories,
//!   either the built-in lumber catalog or a JSON/TOML file loaded with
//!   [`Catalog::from_path`]. Validated on load.
//!
//! - **[`filter_products`]**: Pure, order-preserving search + facet filter.
//!   Text search matches any product field case-insensitively; facets AND
//!   across categories and OR within one.
//!
//! - **[`Selection`]** / **[`Cart`]**: The mutable session state: checked
//!   filter options per category, and the additive cart counters.
//!
//! - **[`Storefront`]**: Owns all of the above, recomputes the visible
//!   products on change, and publishes an immutable [`Listing`] snapshot
//!   through a `watch` channel ([`ListingStream`]).

pub mod catalog;
pub mod error;
pub mod filter;
pub mod model;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use catalog::Catalog;
pub use error::CoreError;
pub use filter::{Facet, filter_products, matches_query, matches_selection};
pub use store::{Listing, ListingStream, Storefront};

// Re-export model types at the crate root for ergonomics.
pub use model::{Cart, FilterCategory, FilterOption, Product, Selection};

pub use rust_decimal::Decimal;

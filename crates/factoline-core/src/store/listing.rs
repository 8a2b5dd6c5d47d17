use std::sync::Arc;

use crate::model::{Cart, FilterCategory, Product, Selection};

/// Immutable snapshot of everything a view needs to render the page.
#[derive(Debug, Clone)]
pub struct Listing {
    /// Bumped on every published change.
    pub version: u64,
    /// Visible products, in catalog order.
    pub products: Arc<Vec<Arc<Product>>>,
    pub categories: Arc<Vec<FilterCategory>>,
    pub query: String,
    pub selection: Selection,
    pub cart: Cart,
    /// Number of products in the whole catalog.
    pub catalog_size: usize,
}

impl Listing {
    /// The "no results" state.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn is_searching(&self) -> bool {
        !self.query.is_empty()
    }
}

impl Default for Listing {
    fn default() -> Self {
        Self {
            version: 0,
            products: Arc::new(Vec::new()),
            categories: Arc::new(Vec::new()),
            query: String::new(),
            selection: Selection::new(),
            cart: Cart::default(),
            catalog_size: 0,
        }
    }
}

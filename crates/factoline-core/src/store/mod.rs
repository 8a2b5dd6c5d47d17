// ── Storefront state ──
//
// Single owner of the session state. Views read published `Listing`
// snapshots and ask for changes through the mutators below; nothing else
// writes the query, the selection, or the cart.

mod listing;
mod stream;

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::error::CoreError;
use crate::filter::filter_products;
use crate::model::{Cart, FilterCategory, Product, Selection};

pub use listing::Listing;
pub use stream::ListingStream;

/// The page root: catalog, search text, filter selection and cart.
///
/// Every effective mutation recomputes what it has to, bumps the version
/// and broadcasts a fresh [`Listing`] to subscribers.
pub struct Storefront {
    products: Arc<Vec<Arc<Product>>>,
    categories: Arc<Vec<FilterCategory>>,
    query: String,
    selection: Selection,
    cart: Cart,
    visible: Arc<Vec<Arc<Product>>>,
    version: u64,
    snapshot: watch::Sender<Arc<Listing>>,
}

impl Storefront {
    /// A storefront with an empty query and no filters checked.
    pub fn new(catalog: Catalog) -> Self {
        Self::with_initial(catalog, String::new(), Selection::new())
    }

    /// A storefront starting from the given query and selection.
    pub fn with_initial(catalog: Catalog, query: impl Into<String>, selection: Selection) -> Self {
        let products: Arc<Vec<Arc<Product>>> =
            Arc::new(catalog.products.into_iter().map(Arc::new).collect());
        let categories = Arc::new(catalog.categories);
        let query = query.into();
        let visible = Arc::new(filter_products(&products, &query, &selection));

        let initial = Arc::new(Listing {
            version: 0,
            products: Arc::clone(&visible),
            categories: Arc::clone(&categories),
            query: query.clone(),
            selection: selection.clone(),
            cart: Cart::default(),
            catalog_size: products.len(),
        });
        let (snapshot, _) = watch::channel(initial);

        info!(
            products = products.len(),
            visible = visible.len(),
            active_filters = selection.active_count(),
            "storefront ready"
        );

        Self {
            products,
            categories,
            query,
            selection,
            cart: Cart::default(),
            visible,
            version: 0,
            snapshot,
        }
    }

    // ── Mutators ─────────────────────────────────────────────────────

    /// Replace the search text. No-op if unchanged.
    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query == self.query {
            return;
        }
        self.query = query;
        self.refilter();
    }

    pub fn clear_query(&mut self) {
        self.set_query(String::new());
    }

    /// Check or uncheck one filter option.
    pub fn set_option(&mut self, category: &str, option: &str, selected: bool) {
        if self.selection.set_option(category, option, selected) {
            debug!(category, option, selected, "filter option changed");
            self.refilter();
        }
    }

    /// Uncheck every filter option.
    pub fn clear_all(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        self.selection.clear_all();
        self.refilter();
    }

    /// Add one unit of a product to the cart counters.
    pub fn add_to_cart(&mut self, product_id: &str) -> Result<Arc<Product>, CoreError> {
        let product = self
            .products
            .iter()
            .find(|p| p.id == product_id)
            .cloned()
            .ok_or_else(|| CoreError::ProductNotFound {
                identifier: product_id.into(),
            })?;

        self.cart.add_to_cart(&product);
        debug!(
            product = %product.id,
            total = %self.cart.total(),
            notifications = self.cart.notifications(),
            "added to cart"
        );
        self.publish();
        Ok(product)
    }

    // ── Readers ──────────────────────────────────────────────────────

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn cart(&self) -> Cart {
        self.cart
    }

    /// Products passing the current query and selection, in catalog order.
    pub fn visible(&self) -> &[Arc<Product>] {
        &self.visible
    }

    /// The most recently published snapshot.
    pub fn listing(&self) -> Arc<Listing> {
        self.snapshot.borrow().clone()
    }

    /// Subscribe to snapshot changes.
    pub fn subscribe(&self) -> ListingStream {
        ListingStream::new(self.snapshot.subscribe())
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn refilter(&mut self) {
        self.visible = Arc::new(filter_products(
            &self.products,
            &self.query,
            &self.selection,
        ));
        debug!(
            query = %self.query,
            active_filters = self.selection.active_count(),
            visible = self.visible.len(),
            "listing recomputed"
        );
        self.publish();
    }

    fn publish(&mut self) {
        self.version += 1;
        let listing = Arc::new(Listing {
            version: self.version,
            products: Arc::clone(&self.visible),
            categories: Arc::clone(&self.categories),
            query: self.query.clone(),
            selection: self.selection.clone(),
            cart: self.cart,
            catalog_size: self.products.len(),
        });
        // `send_replace` updates unconditionally, even with zero receivers.
        self.snapshot.send_replace(listing);
    }
}

pub mod header;
pub mod product_grid;
pub mod sidebar;

pub use header::Header;
pub use product_grid::ProductGrid;
pub use sidebar::Sidebar;

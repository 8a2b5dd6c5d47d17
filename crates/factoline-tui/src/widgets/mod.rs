pub mod heading;
pub mod product_card;

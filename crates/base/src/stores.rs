pub mod favorites_store;
pub mod order_store;

pub use favorites_store::FavoritesStore;
pub use order_store::OrderStore;

use crate::entities::ShopId;
use crate::errors::TrackerError;

/// Shop ids the user picks from when entering a new order.
/// Kept apart from the tracked orders.
pub trait FavoritesStore {
    fn list(&self) -> Vec<ShopId>;

    /// Returns `false` if the shop is already a favorite.
    fn add(&mut self, shop_id: ShopId) -> Result<bool, TrackerError>;

    /// Returns `false` if the shop wasn't a favorite.
    fn remove(&mut self, shop_id: ShopId) -> Result<bool, TrackerError>;
}

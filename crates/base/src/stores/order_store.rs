use crate::entities::OrderCollection;
use crate::errors::TrackerError;

pub trait OrderStore {
    /// Absent or unreadable storage is not fatal and loads as an empty collection.
    fn load(&self) -> OrderCollection;

    /// Overwrites the whole persisted collection. A failed write leaves the
    /// previously persisted collection in place.
    fn save(&mut self, orders: &OrderCollection) -> Result<(), TrackerError>;
}

pub mod order;
pub mod order_collection;

pub use order::{Order, OrderId, OrderKey, OrderStatus, ShopId};
pub use order_collection::OrderCollection;

pub const STATUS_PAGE_URL: &str = "https://www.fotoparadies.de/service/auftragsstatus.html";

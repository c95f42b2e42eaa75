use crate::entities::order::{OrderId, OrderStatus, ShopId};
use crate::errors::FetchError;

/// Looks up the remote status of an order.
pub trait StatusApi {
    /// A successful result is always one of `Pending`, `Ready` or `Delivered`.
    fn try_fetch_status(&self, shop_id: ShopId, order_id: OrderId)
        -> Result<OrderStatus, FetchError>;

    /// Single best-effort attempt: any failure becomes [`OrderStatus::Error`].
    fn fetch_status(&self, shop_id: ShopId, order_id: OrderId) -> OrderStatus {
        match self.try_fetch_status(shop_id, order_id) {
            Ok(status) => status,
            Err(e) => {
                log::warn!(
                    "couldn't fetch the status of shop {} order {}: {}",
                    shop_id,
                    order_id,
                    e
                );

                OrderStatus::Error
            }
        }
    }
}

impl<A: StatusApi + ?Sized> StatusApi for &A {
    fn try_fetch_status(
        &self,
        shop_id: ShopId,
        order_id: OrderId,
    ) -> Result<OrderStatus, FetchError> {
        (**self).try_fetch_status(shop_id, order_id)
    }
}

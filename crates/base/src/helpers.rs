use crate::entities::{OrderKey, STATUS_PAGE_URL};
use crate::errors::TrackerError;
use std::str::FromStr;

/// Parses user input as a positive integer id, e.g. a shop or an order number.
pub fn parse_positive_id<T>(input: &str, field_name: &str) -> Result<T, TrackerError>
where
    T: FromStr + Default + PartialEq,
{
    let input = input.trim();

    let id = input.parse::<T>().map_err(|_| {
        TrackerError::InvalidInput(format!(
            "{} must be a positive integer, got {:?}",
            field_name, input
        ))
    })?;

    if id == T::default() {
        return Err(TrackerError::InvalidInput(format!(
            "{} must be a positive integer, got {:?}",
            field_name, input
        )));
    }

    Ok(id)
}

pub fn parse_order_key(shop_id: &str, order_id: &str) -> Result<OrderKey, TrackerError> {
    OrderKey::new(
        parse_positive_id(shop_id, "shop id")?,
        parse_positive_id(order_id, "order id")?,
    )
}

/// Deep link to the public status page of an order.
pub fn status_page_url(key: OrderKey) -> String {
    format!(
        "{}#/?orderid={}&locationid={}",
        STATUS_PAGE_URL, key.order_id, key.shop_id
    )
}

use crate::errors::TrackerError;
use crate::status_api::StatusApi;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use std::str::FromStr;

pub type ShopId = u32;
pub type OrderId = u64;

#[derive(Default, Serialize, Deserialize, Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Ready,
    Delivered,
    /// The last fetch failed. Not a business state: the next refresh retries.
    Error,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Ready => "READY",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Error => "ERROR",
        }
    }
}

impl FromStr for OrderStatus {
    type Err = anyhow::Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Ok(Self::Pending),
            "READY" => Ok(Self::Ready),
            "DELIVERED" => Ok(Self::Delivered),
            "ERROR" => Ok(Self::Error),
            _ => anyhow::bail!("invalid order status: {}", input),
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Identity of a tracked order. Two orders with the same key are the same order.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct OrderKey {
    pub shop_id: ShopId,
    pub order_id: OrderId,
}

impl OrderKey {
    pub fn new(shop_id: ShopId, order_id: OrderId) -> Result<Self, TrackerError> {
        if shop_id == 0 {
            return Err(TrackerError::InvalidInput(String::from(
                "shop id must be a positive integer",
            )));
        }

        if order_id == 0 {
            return Err(TrackerError::InvalidInput(String::from(
                "order id must be a positive integer",
            )));
        }

        Ok(Self { shop_id, order_id })
    }
}

impl Display for OrderKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Shop {} #{}", self.shop_id, self.order_id)
    }
}

/// A tracked order with its last known status.
///
/// Equality and hashing only look at the [`OrderKey`], so "is this order
/// already tracked" checks ignore the status.
#[derive(Debug, Clone)]
pub struct Order {
    key: OrderKey,
    pub current_status: OrderStatus,
    pub last_checked: Option<DateTime<Utc>>,
}

impl Order {
    pub fn new(key: OrderKey) -> Self {
        Self {
            key,
            current_status: OrderStatus::Pending,
            last_checked: None,
        }
    }

    pub fn with_status(key: OrderKey, status: OrderStatus) -> Self {
        Self {
            current_status: status,
            ..Self::new(key)
        }
    }

    pub fn key(&self) -> OrderKey {
        self.key
    }

    pub fn shop_id(&self) -> ShopId {
        self.key.shop_id
    }

    pub fn order_id(&self) -> OrderId {
        self.key.order_id
    }

    pub fn is_delivered(&self) -> bool {
        self.current_status == OrderStatus::Delivered
    }

    /// Overwrites the status with the latest answer of the status api.
    /// A failed fetch yields [`OrderStatus::Error`]; nothing is returned as an error.
    pub fn refresh<A: StatusApi + ?Sized>(&mut self, status_api: &A) -> OrderStatus {
        let new_status = status_api.fetch_status(self.key.shop_id, self.key.order_id);

        if new_status != self.current_status {
            log::debug!(
                "status of {} changed: {} -> {}",
                self.key,
                self.current_status,
                new_status
            );
        }

        self.current_status = new_status;
        self.last_checked = Some(Utc::now());

        new_status
    }
}

impl PartialEq for Order {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Order {}

impl Hash for Order {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl Display for Order {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key)
    }
}

use crate::stores::{read_if_exists, write_atomically};
use base::entities::{Order, OrderCollection, OrderId, OrderKey, OrderStatus, ShopId};
use base::errors::TrackerError;
use base::stores::OrderStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ORDERS_FILE_NAME: &str = "orders.json";

#[derive(Serialize, Debug, Default)]
struct OrdersFile {
    orders: Vec<OrderRecord>,
}

/// Records stay raw json on load so a single bad one can be skipped.
#[derive(Deserialize, Debug, Default)]
struct StoredOrdersFile {
    #[serde(default)]
    orders: Vec<serde_json::Value>,
}

#[derive(Serialize, Deserialize, Debug)]
struct OrderRecord {
    shop_id: u64,
    order_id: OrderId,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    last_checked: Option<DateTime<Utc>>,
}

impl From<&Order> for OrderRecord {
    fn from(order: &Order) -> Self {
        Self {
            shop_id: u64::from(order.shop_id()),
            order_id: order.order_id(),
            status: Some(order.current_status.to_string()),
            last_checked: order.last_checked,
        }
    }
}

/// Keeps the tracked orders in a pretty-printed json document.
#[derive(Debug, Clone)]
pub struct JsonFileOrderStore {
    path: PathBuf,
}

impl JsonFileOrderStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn order_from_record(&self, record: serde_json::Value) -> Option<Order> {
        let key = serde_json::from_value::<OrderRecord>(record.clone())
            .map_err(anyhow::Error::from)
            .and_then(|record| {
                let shop_id = ShopId::try_from(record.shop_id)?;
                Ok((OrderKey::new(shop_id, record.order_id)?, record))
            });

        let (key, record) = match key {
            Ok(key_and_record) => key_and_record,
            Err(e) => {
                log::warn!(
                    "skipping a stored order in {:?} ({}): {}",
                    self.path,
                    record,
                    e
                );
                return None;
            }
        };

        let status = match record.status.as_deref() {
            None => OrderStatus::Pending,
            Some(status) => status.parse().unwrap_or_else(|e| {
                log::warn!("{} in {:?}, treating {} as pending", e, self.path, key);
                OrderStatus::Pending
            }),
        };

        let mut order = Order::with_status(key, status);
        order.last_checked = record.last_checked;

        Some(order)
    }

    fn try_load(&self) -> anyhow::Result<OrderCollection> {
        let contents = match read_if_exists(&self.path)? {
            Some(contents) => contents,
            None => {
                log::debug!("no orders file at {:?} yet", self.path);
                return Ok(OrderCollection::new());
            }
        };

        let orders_file: StoredOrdersFile = serde_json::from_str(&contents)?;

        let (orders, duplicates) = OrderCollection::deduplicated(
            orders_file
                .orders
                .into_iter()
                .filter_map(|record| self.order_from_record(record)),
        );

        if !duplicates.is_empty() {
            log::warn!(
                "dropped duplicated orders while loading {:?}: {:?}",
                self.path,
                duplicates
            );
        }

        Ok(orders)
    }
}

impl OrderStore for JsonFileOrderStore {
    fn load(&self) -> OrderCollection {
        self.try_load().unwrap_or_else(|e| {
            log::warn!(
                "couldn't read the orders from {:?}, starting with an empty list: {:#}",
                self.path,
                e
            );
            OrderCollection::new()
        })
    }

    fn save(&mut self, orders: &OrderCollection) -> Result<(), TrackerError> {
        let (orders, duplicates) = OrderCollection::deduplicated(orders.iter().cloned());

        if !duplicates.is_empty() {
            log::warn!("not saving duplicated orders: {:?}", duplicates);
        }

        let orders_file = OrdersFile {
            orders: orders.iter().map(OrderRecord::from).collect(),
        };

        let contents =
            serde_json::to_vec_pretty(&orders_file).map_err(|e| TrackerError::PersistenceWrite {
                path: self.path.clone(),
                source: e.into(),
            })?;

        write_atomically(&self.path, &contents).map_err(|e| {
            log::error!("couldn't save the orders: {}", e);
            e
        })?;

        log::debug!("saved {} orders to {:?}", orders.len(), self.path);

        Ok(())
    }
}

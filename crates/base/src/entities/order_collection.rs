use crate::entities::order::{Order, OrderKey};
use crate::errors::TrackerError;
use std::collections::HashSet;

/// Ordered list of tracked orders, at most one per [`OrderKey`].
///
/// Mutations return a new collection instead of editing a shared one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderCollection {
    orders: Vec<Order>,
}

impl OrderCollection {
    pub fn new() -> Self {
        Default::default()
    }

    /// Builds a collection keeping the first occurrence of every key.
    /// Returns the keys of the dropped duplicates as well.
    pub fn deduplicated<I>(orders: I) -> (Self, Vec<OrderKey>)
    where
        I: IntoIterator<Item = Order>,
    {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        let mut unique = Vec::new();

        for order in orders {
            if seen.insert(order.key()) {
                unique.push(order);
            } else {
                duplicates.push(order.key());
            }
        }

        (Self { orders: unique }, duplicates)
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Order> {
        self.orders.iter()
    }

    pub fn as_slice(&self) -> &[Order] {
        &self.orders
    }

    pub fn as_mut_slice(&mut self) -> &mut [Order] {
        &mut self.orders
    }

    pub fn contains(&self, key: &OrderKey) -> bool {
        self.get(key).is_some()
    }

    pub fn get(&self, key: &OrderKey) -> Option<&Order> {
        self.orders.iter().find(|order| order.key() == *key)
    }

    pub fn get_mut(&mut self, key: &OrderKey) -> Option<&mut Order> {
        self.orders.iter_mut().find(|order| order.key() == *key)
    }

    pub fn keys(&self) -> Vec<OrderKey> {
        self.orders.iter().map(Order::key).collect()
    }

    /// Appends the order, rejecting it if its key is already tracked.
    pub fn with_order(&self, order: Order) -> Result<Self, TrackerError> {
        if self.contains(&order.key()) {
            return Err(TrackerError::DuplicateOrder(order.key()));
        }

        let mut orders = self.orders.clone();
        orders.push(order);

        Ok(Self { orders })
    }

    /// Returns the collection without the given key and whether anything was removed.
    pub fn without(&self, key: &OrderKey) -> (Self, bool) {
        let orders: Vec<Order> = self
            .orders
            .iter()
            .filter(|order| order.key() != *key)
            .cloned()
            .collect();
        let removed = orders.len() != self.orders.len();

        (Self { orders }, removed)
    }

    pub fn without_delivered(&self) -> Self {
        Self {
            orders: self
                .orders
                .iter()
                .filter(|order| !order.is_delivered())
                .cloned()
                .collect(),
        }
    }

    /// Takes the status and check time of every order also found in `refreshed`.
    ///
    /// Orders missing from `refreshed` are kept as they are, orders only found in
    /// `refreshed` are not added.
    pub fn with_refreshed(&self, refreshed: &OrderCollection) -> Self {
        Self {
            orders: self
                .orders
                .iter()
                .map(|order| match refreshed.get(&order.key()) {
                    Some(refreshed_order) => {
                        let mut order = order.clone();
                        order.current_status = refreshed_order.current_status;
                        order.last_checked = refreshed_order.last_checked;
                        order
                    }
                    None => order.clone(),
                })
                .collect(),
        }
    }

    pub fn into_vec(self) -> Vec<Order> {
        self.orders
    }
}

impl FromIterator<Order> for OrderCollection {
    fn from_iter<T: IntoIterator<Item = Order>>(iter: T) -> Self {
        Self::deduplicated(iter).0
    }
}

impl IntoIterator for OrderCollection {
    type Item = Order;
    type IntoIter = std::vec::IntoIter<Order>;

    fn into_iter(self) -> Self::IntoIter {
        self.orders.into_iter()
    }
}

impl<'a> IntoIterator for &'a OrderCollection {
    type Item = &'a Order;
    type IntoIter = std::slice::Iter<'a, Order>;

    fn into_iter(self) -> Self::IntoIter {
        self.orders.iter()
    }
}

use crate::refresh::{refresh_orders, DEFAULT_MAX_REFRESH_WORKERS};
use crate::settings::TrackerSettings;
use crate::stores::JsonFileOrderStore;
use base::entities::{Order, OrderCollection, OrderKey, OrderStatus};
use base::errors::TrackerError;
use base::requests::ureq::UreqRequestApi;
use base::status_api::StatusApi;
use base::stores::OrderStore;
use status_apis::PhotoprintitStatusApi;

/// Add, remove, list, refresh and clean up the tracked orders.
///
/// Every mutating operation loads the persisted collection, computes a new one
/// and saves it as a whole. Calls must be serialized by the caller, e.g. by
/// running the service inside a [`crate::TrackerWorker`].
///
/// Refreshes fetch on a snapshot and load the store again right before saving,
/// so orders added or removed by another process while the requests were running
/// are kept or stay removed.
pub struct TrackerService<S, A>
where
    S: OrderStore,
    A: StatusApi + Sync,
{
    store: S,
    status_api: A,
    max_refresh_workers: usize,
}

pub type DefaultTrackerService =
    TrackerService<JsonFileOrderStore, PhotoprintitStatusApi<UreqRequestApi>>;

impl DefaultTrackerService {
    pub fn from_settings(settings: &TrackerSettings) -> Self {
        let status_api = PhotoprintitStatusApi::new(
            settings.api.clone(),
            UreqRequestApi::with_timeout(settings.request_timeout),
        );

        TrackerService::new(JsonFileOrderStore::new(&settings.orders_file), status_api)
            .with_max_refresh_workers(settings.max_refresh_workers)
    }
}

impl<S, A> TrackerService<S, A>
where
    S: OrderStore,
    A: StatusApi + Sync,
{
    pub fn new(store: S, status_api: A) -> Self {
        Self {
            store,
            status_api,
            max_refresh_workers: DEFAULT_MAX_REFRESH_WORKERS,
        }
    }

    pub fn with_max_refresh_workers(mut self, max_refresh_workers: usize) -> Self {
        self.max_refresh_workers = max_refresh_workers.max(1);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Starts tracking an order. The new order is `Pending` until the next refresh;
    /// no request is made here.
    pub fn add_order(&mut self, key: OrderKey) -> Result<Order, TrackerError> {
        let orders = self.store.load();

        let new_order = Order::new(key);
        let orders = orders.with_order(new_order.clone()).map_err(|e| {
            log::info!("{} is already tracked", key);
            e
        })?;

        self.store.save(&orders)?;
        log::info!("started tracking {}", key);

        Ok(new_order)
    }

    /// Removing an order that isn't tracked is a no-op and returns `false`.
    pub fn remove_order(&mut self, key: &OrderKey) -> Result<bool, TrackerError> {
        let (orders, removed) = self.store.load().without(key);

        if removed {
            self.store.save(&orders)?;
            log::info!("stopped tracking {}", key);
        }

        Ok(removed)
    }

    pub fn list_orders(&self) -> OrderCollection {
        self.store.load()
    }

    /// Refreshes a single tracked order. Returns `None` if it isn't tracked.
    pub fn refresh_order(&mut self, key: &OrderKey) -> Result<Option<Order>, TrackerError> {
        let mut refreshed_order = match self.store.load().get(key) {
            Some(order) => order.clone(),
            None => return Ok(None),
        };

        refreshed_order.refresh(&self.status_api);

        let latest = self.store.load();
        if !latest.contains(key) {
            log::info!("{} was removed while it was being refreshed", key);
            return Ok(None);
        }

        let refreshed: OrderCollection = std::iter::once(refreshed_order.clone()).collect();
        self.store.save(&latest.with_refreshed(&refreshed))?;

        Ok(Some(refreshed_order))
    }

    /// Fetches the status of every order and saves them once all fetches resolved.
    pub fn refresh_all(&mut self) -> Result<OrderCollection, TrackerError> {
        let mut refreshed = self.store.load();

        if refreshed.is_empty() {
            return Ok(refreshed);
        }

        refresh_orders(
            refreshed.as_mut_slice(),
            &self.status_api,
            self.max_refresh_workers,
        )?;

        let orders = self.store.load().with_refreshed(&refreshed);
        self.store.save(&orders)?;

        log::info!(
            "refreshed {} orders, {} with errors",
            refreshed.len(),
            refreshed
                .iter()
                .filter(|order| order.current_status == OrderStatus::Error)
                .count()
        );

        Ok(orders)
    }

    /// Drops every delivered order. Returns the remaining orders and how many
    /// were dropped.
    pub fn cleanup(&mut self) -> Result<(OrderCollection, usize), TrackerError> {
        let orders = self.store.load();
        let remaining = orders.without_delivered();
        let removed = orders.len() - remaining.len();

        if removed > 0 {
            self.store.save(&remaining)?;
            log::info!("cleaned up {} delivered orders", removed);
        }

        Ok((remaining, removed))
    }
}

use base::entities::OrderCollection;
use base::errors::TrackerError;
use base::stores::OrderStore;
use std::io;
use std::path::PathBuf;

#[derive(Default, Debug)]
pub struct InMemoryOrderStore {
    orders: OrderCollection,
    fail_writes: bool,
    number_of_saves: usize,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_orders(orders: OrderCollection) -> Self {
        Self {
            orders,
            ..Default::default()
        }
    }

    /// Every following `save` fails and leaves the stored orders untouched.
    pub fn fail_writes(&mut self, fail_writes: bool) {
        self.fail_writes = fail_writes;
    }

    pub fn number_of_saves(&self) -> usize {
        self.number_of_saves
    }
}

impl OrderStore for InMemoryOrderStore {
    fn load(&self) -> OrderCollection {
        self.orders.clone()
    }

    fn save(&mut self, orders: &OrderCollection) -> Result<(), TrackerError> {
        if self.fail_writes {
            return Err(TrackerError::PersistenceWrite {
                path: PathBuf::from("<memory>"),
                source: io::Error::new(io::ErrorKind::Other, "writes are disabled"),
            });
        }

        self.orders = orders.iter().cloned().collect();
        self.number_of_saves += 1;

        Ok(())
    }
}

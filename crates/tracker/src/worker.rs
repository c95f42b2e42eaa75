use crate::service::TrackerService;
use anyhow::{anyhow, Result};
use base::entities::{Order, OrderCollection, OrderKey};
use base::errors::TrackerError;
use base::status_api::StatusApi;
use base::stores::OrderStore;
use crossbeam::channel::{self, Receiver, Sender};
use crossbeam::select;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerCommand {
    AddOrder(OrderKey),
    RemoveOrder(OrderKey),
    ListOrders,
    RefreshOrder(OrderKey),
    RefreshAll,
    Cleanup,
    Shutdown,
}

#[derive(Debug)]
pub enum TrackerEvent {
    OrderAdded(Order),
    OrderRemoved { key: OrderKey, removed: bool },
    OrdersListed(OrderCollection),
    OrderRefreshed { key: OrderKey, order: Option<Order> },
    /// Sent for explicit refreshes and for the periodic ones.
    OrdersRefreshed(OrderCollection),
    CleanedUp {
        remaining: OrderCollection,
        removed: usize,
    },
    Failed {
        command: TrackerCommand,
        error: TrackerError,
    },
    Stopped,
}

/// Runs a [`TrackerService`] on its own thread.
///
/// The thread is the only owner of the service and handles one command at a time,
/// so load-mutate-save cycles never interleave. Results come back as
/// [`TrackerEvent`]s, which keeps network calls off the caller's thread.
pub struct TrackerWorker {
    commands: Sender<TrackerCommand>,
    events: Receiver<TrackerEvent>,
    refresh_interval: Option<Duration>,
    handle: Option<JoinHandle<()>>,
}

fn handle_command<S, A>(service: &mut TrackerService<S, A>, command: TrackerCommand) -> TrackerEvent
where
    S: OrderStore,
    A: StatusApi + Sync,
{
    let res = match command {
        TrackerCommand::AddOrder(key) => service.add_order(key).map(TrackerEvent::OrderAdded),
        TrackerCommand::RemoveOrder(key) => service
            .remove_order(&key)
            .map(|removed| TrackerEvent::OrderRemoved { key, removed }),
        TrackerCommand::ListOrders => Ok(TrackerEvent::OrdersListed(service.list_orders())),
        TrackerCommand::RefreshOrder(key) => service
            .refresh_order(&key)
            .map(|order| TrackerEvent::OrderRefreshed { key, order }),
        TrackerCommand::RefreshAll => service.refresh_all().map(TrackerEvent::OrdersRefreshed),
        TrackerCommand::Cleanup => service
            .cleanup()
            .map(|(remaining, removed)| TrackerEvent::CleanedUp { remaining, removed }),
        TrackerCommand::Shutdown => Ok(TrackerEvent::Stopped),
    };

    res.unwrap_or_else(|error| {
        log::error!("{:?} failed: {}", command, error);
        TrackerEvent::Failed { command, error }
    })
}

impl TrackerWorker {
    /// Moves the service onto a new thread. With a `refresh_interval` every order
    /// is refreshed periodically on top of the explicit commands.
    pub fn spawn<S, A>(service: TrackerService<S, A>, refresh_interval: Option<Duration>) -> Self
    where
        S: OrderStore + Send + 'static,
        A: StatusApi + Send + Sync + 'static,
    {
        let (commands_sender, commands_receiver) = channel::unbounded();
        let (events_sender, events_receiver) = channel::unbounded();

        let handle = thread::spawn(move || {
            Self::run(service, commands_receiver, events_sender, refresh_interval)
        });

        Self {
            commands: commands_sender,
            events: events_receiver,
            refresh_interval,
            handle: Some(handle),
        }
    }

    fn run<S, A>(
        mut service: TrackerService<S, A>,
        commands: Receiver<TrackerCommand>,
        events: Sender<TrackerEvent>,
        refresh_interval: Option<Duration>,
    ) where
        S: OrderStore,
        A: StatusApi + Sync,
    {
        let ticker = match refresh_interval {
            Some(interval) => channel::tick(interval),
            None => channel::never::<Instant>(),
        };

        log::debug!(
            "tracker worker started, periodic refresh: {:?}",
            refresh_interval
        );

        loop {
            let event = select! {
                recv(commands) -> command => match command {
                    Ok(TrackerCommand::Shutdown) | Err(_) => break,
                    Ok(command) => handle_command(&mut service, command),
                },
                recv(ticker) -> _ => {
                    log::debug!("periodic refresh");
                    handle_command(&mut service, TrackerCommand::RefreshAll)
                },
            };

            if events.send(event).is_err() {
                break;
            }
        }

        let _ = events.send(TrackerEvent::Stopped);
        log::debug!("tracker worker stopped");
    }

    pub fn send(&self, command: TrackerCommand) -> Result<()> {
        self.commands
            .send(command)
            .map_err(|_| anyhow!("the tracker worker has stopped"))
    }

    pub fn events(&self) -> &Receiver<TrackerEvent> {
        &self.events
    }

    /// `None` if the worker only refreshes on command.
    pub fn refresh_interval(&self) -> Option<Duration> {
        self.refresh_interval
    }

    /// Stops the worker after the command in progress and waits for it.
    /// A refresh cycle in flight runs to the end, save included, so this can block
    /// for as long as its slowest requests take.
    pub fn shutdown(mut self) -> Result<()> {
        self.stop()
    }

    fn stop(&mut self) -> Result<()> {
        let handle = match self.handle.take() {
            Some(handle) => handle,
            None => return Ok(()),
        };

        let _ = self.commands.send(TrackerCommand::Shutdown);

        handle
            .join()
            .map_err(|_| anyhow!("the tracker worker panicked"))
    }
}

impl Drop for TrackerWorker {
    fn drop(&mut self) {
        if let Err(e) = self.stop() {
            log::error!("{}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::InMemoryOrderStore;
    use base::entities::{OrderId, OrderStatus, ShopId};
    use base::errors::FetchError;

    struct ReadyStatusApi;

    impl StatusApi for ReadyStatusApi {
        fn try_fetch_status(
            &self,
            _shop_id: ShopId,
            _order_id: OrderId,
        ) -> std::result::Result<OrderStatus, FetchError> {
            Ok(OrderStatus::Ready)
        }
    }

    const EVENT_TIMEOUT: Duration = Duration::from_secs(5);

    fn key() -> OrderKey {
        OrderKey::new(1012, 55667788).unwrap()
    }

    #[test]
    #[allow(non_snake_case)]
    fn send__commands__events_in_order() {
        let worker = TrackerWorker::spawn(
            TrackerService::new(InMemoryOrderStore::new(), ReadyStatusApi),
            None,
        );

        worker.send(TrackerCommand::AddOrder(key())).unwrap();
        worker.send(TrackerCommand::AddOrder(key())).unwrap();
        worker.send(TrackerCommand::RefreshAll).unwrap();

        let first = worker.events().recv_timeout(EVENT_TIMEOUT).unwrap();
        assert!(matches!(first, TrackerEvent::OrderAdded(order) if order.key() == key()));

        let second = worker.events().recv_timeout(EVENT_TIMEOUT).unwrap();
        assert!(matches!(
            second,
            TrackerEvent::Failed {
                command: TrackerCommand::AddOrder(_),
                error: TrackerError::DuplicateOrder(_)
            }
        ));

        match worker.events().recv_timeout(EVENT_TIMEOUT).unwrap() {
            TrackerEvent::OrdersRefreshed(orders) => {
                assert_eq!(orders.len(), 1);
                assert_eq!(orders.as_slice()[0].current_status, OrderStatus::Ready);
            }
            other => panic!("unexpected event: {:?}", other),
        }

        worker.shutdown().unwrap();
    }

    #[test]
    #[allow(non_snake_case)]
    fn spawn__refresh_interval__periodic_refresh_events() {
        let store = InMemoryOrderStore::with_orders(
            vec![Order::new(key())].into_iter().collect(),
        );
        let worker = TrackerWorker::spawn(
            TrackerService::new(store, ReadyStatusApi),
            Some(Duration::from_millis(50)),
        );

        for _ in 0..2 {
            match worker.events().recv_timeout(EVENT_TIMEOUT).unwrap() {
                TrackerEvent::OrdersRefreshed(orders) => {
                    assert_eq!(orders.as_slice()[0].current_status, OrderStatus::Ready);
                }
                other => panic!("unexpected event: {:?}", other),
            }
        }

        worker.shutdown().unwrap();
    }

    #[test]
    #[allow(non_snake_case)]
    fn shutdown__idle_worker__stopped_event_and_send_fails_afterwards() {
        let worker = TrackerWorker::spawn(
            TrackerService::new(InMemoryOrderStore::new(), ReadyStatusApi),
            None,
        );
        let events = worker.events().clone();
        let commands = worker.commands.clone();

        worker.shutdown().unwrap();

        assert!(matches!(
            events.recv_timeout(EVENT_TIMEOUT).unwrap(),
            TrackerEvent::Stopped
        ));
        assert!(commands.send(TrackerCommand::ListOrders).is_err());
    }

    #[test]
    #[allow(non_snake_case)]
    fn send__cleanup__removed_count_in_event() {
        let store = InMemoryOrderStore::with_orders(
            vec![Order::with_status(key(), OrderStatus::Delivered)]
                .into_iter()
                .collect(),
        );
        let worker = TrackerWorker::spawn(TrackerService::new(store, ReadyStatusApi), None);

        worker.send(TrackerCommand::Cleanup).unwrap();

        match worker.events().recv_timeout(EVENT_TIMEOUT).unwrap() {
            TrackerEvent::CleanedUp { remaining, removed } => {
                assert!(remaining.is_empty());
                assert_eq!(removed, 1);
            }
            other => panic!("unexpected event: {:?}", other),
        }
        assert_eq!(worker.refresh_interval(), None);

        worker.shutdown().unwrap();
    }
}

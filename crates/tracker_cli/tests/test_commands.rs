use base::entities::{Order, OrderId, OrderKey, OrderStatus, ShopId};
use base::errors::{FetchError, TrackerError};
use base::status_api::StatusApi;
use tempfile::TempDir;
use tracker::stores::{InMemoryOrderStore, JsonFileFavoritesStore};
use tracker::{TrackerService, TrackerWorker};
use tracker_cli::commands::{
    run_favorites_command, run_order_command, watch, Command, FavoritesCommand,
};

struct DeliveredStatusApi;

impl StatusApi for DeliveredStatusApi {
    fn try_fetch_status(
        &self,
        _shop_id: ShopId,
        _order_id: OrderId,
    ) -> Result<OrderStatus, FetchError> {
        Ok(OrderStatus::Delivered)
    }
}

fn add(shop: &str, order: &str) -> Command {
    Command::Add {
        shop: String::from(shop),
        order: String::from(order),
    }
}

fn run(
    command: Command,
    service: &mut TrackerService<InMemoryOrderStore, DeliveredStatusApi>,
) -> anyhow::Result<String> {
    let mut out = Vec::new();
    run_order_command(&command, service, &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

#[test]
#[allow(non_snake_case)]
fn add_refresh_cleanup__one_order__tracked_delivered_and_removed() {
    let mut service = TrackerService::new(InMemoryOrderStore::new(), DeliveredStatusApi);

    let output = run(add("1012", "55667788"), &mut service).unwrap();
    assert_eq!(output, "now tracking Shop 1012 #55667788\n");

    let output = run(Command::List, &mut service).unwrap();
    assert!(output.contains("Shop 1012 #55667788"));
    assert!(output.contains("PENDING"));
    assert!(output.contains("checked: never"));

    let output = run(Command::Refresh, &mut service).unwrap();
    assert!(output.contains("DELIVERED"));

    let output = run(Command::Cleanup, &mut service).unwrap();
    assert!(output.starts_with("removed 1 delivered orders\n"));
    assert!(output.contains("no tracked orders"));
}

#[test]
#[allow(non_snake_case)]
fn add__duplicate__error_and_single_order_kept() {
    let mut service = TrackerService::new(InMemoryOrderStore::new(), DeliveredStatusApi);
    run(add("1012", "55667788"), &mut service).unwrap();

    let res = run(add("1012", "55667788"), &mut service);

    assert!(res.unwrap_err().to_string().contains("already tracked"));
    assert_eq!(service.list_orders().len(), 1);
}

#[test]
#[allow(non_snake_case)]
fn add__non_numeric_input__invalid_input_and_nothing_stored() {
    let mut service = TrackerService::new(InMemoryOrderStore::new(), DeliveredStatusApi);

    let error = run(add("Filiale", "12345678"), &mut service).unwrap_err();

    assert!(matches!(
        error.downcast_ref::<TrackerError>(),
        Some(TrackerError::InvalidInput(_))
    ));
    assert!(service.list_orders().is_empty());
}

#[test]
#[allow(non_snake_case)]
fn remove__untracked_order__reported_without_error() {
    let mut service = TrackerService::new(InMemoryOrderStore::new(), DeliveredStatusApi);

    let output = run(
        Command::Remove {
            shop: String::from("1012"),
            order: String::from("1"),
        },
        &mut service,
    )
    .unwrap();

    assert_eq!(output, format!("{} wasn't tracked\n", OrderKey::new(1012, 1).unwrap()));
}

#[test]
#[allow(non_snake_case)]
fn link__valid_ids__status_page_url() {
    let mut service = TrackerService::new(InMemoryOrderStore::new(), DeliveredStatusApi);

    let output = run(
        Command::Link {
            shop: String::from("1012"),
            order: String::from("55667788"),
        },
        &mut service,
    )
    .unwrap();

    assert_eq!(
        output.trim(),
        "https://www.fotoparadies.de/service/auftragsstatus.html#/?orderid=55667788&locationid=1012"
    );
}

#[test]
#[allow(non_snake_case)]
fn favorites__add_list_remove__persisted_between_stores() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("favorites.json");
    let mut out = Vec::new();

    let mut store = JsonFileFavoritesStore::new(&path);
    run_favorites_command(
        &FavoritesCommand::Add {
            shop: String::from("1012"),
        },
        &mut store,
        &mut out,
    )
    .unwrap();
    run_favorites_command(
        &FavoritesCommand::Add {
            shop: String::from("3344"),
        },
        &mut store,
        &mut out,
    )
    .unwrap();

    let mut reopened = JsonFileFavoritesStore::new(&path);
    run_favorites_command(
        &FavoritesCommand::Remove {
            shop: String::from("1012"),
        },
        &mut reopened,
        &mut out,
    )
    .unwrap();

    let mut listing = Vec::new();
    run_favorites_command(&FavoritesCommand::List, &mut reopened, &mut listing).unwrap();

    assert_eq!(String::from_utf8(listing).unwrap(), "3344\n");
}

#[test]
#[allow(non_snake_case)]
fn favorites_add__zero__invalid_input() {
    let dir = TempDir::new().unwrap();
    let mut store = JsonFileFavoritesStore::new(dir.path().join("favorites.json"));
    let mut out = Vec::new();

    let res = run_favorites_command(
        &FavoritesCommand::Add {
            shop: String::from("0"),
        },
        &mut store,
        &mut out,
    );

    assert!(res.is_err());
}

#[test]
#[allow(non_snake_case)]
fn cleanup__nothing_delivered__zero_removed() {
    let mut service = TrackerService::new(InMemoryOrderStore::new(), DeliveredStatusApi);
    run(add("1012", "55667788"), &mut service).unwrap();

    let output = run(Command::Cleanup, &mut service).unwrap();

    assert!(output.starts_with("removed 0 delivered orders\n"));
    assert!(output.contains("Shop 1012 #55667788"));
}

#[test]
#[allow(non_snake_case)]
fn watch__periodic_refresh_disabled__returns_after_first_refresh() {
    let store = InMemoryOrderStore::with_orders(
        vec![Order::new(OrderKey::new(1012, 55667788).unwrap())]
            .into_iter()
            .collect(),
    );
    let worker = TrackerWorker::spawn(TrackerService::new(store, DeliveredStatusApi), None);
    let mut out = Vec::new();

    watch(&worker, &mut out).unwrap();
    worker.shutdown().unwrap();

    let output = String::from_utf8(out).unwrap();
    assert!(output.starts_with("--- "));
    assert!(output.contains("Shop 1012 #55667788"));
    assert!(output.contains("DELIVERED"));
}

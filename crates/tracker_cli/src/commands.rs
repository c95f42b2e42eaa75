use anyhow::{bail, Result};
use base::entities::{Order, OrderCollection, ShopId};
use base::errors::TrackerError;
use base::helpers::{parse_order_key, parse_positive_id, status_page_url};
use base::status_api::StatusApi;
use base::stores::{FavoritesStore, OrderStore};
use clap::{Parser, Subcommand};
use std::io::Write;
use tracker::{TrackerCommand, TrackerEvent, TrackerService, TrackerWorker};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Parser, Debug)]
#[command(name = "fotoparadies", version, about = "Track the status of fotoparadies photo orders")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Start tracking an order
    Add { shop: String, order: String },
    /// Stop tracking an order
    Remove { shop: String, order: String },
    /// Show the tracked orders with their last known status
    List,
    /// Fetch the current status of every tracked order
    Refresh,
    /// Stop tracking every delivered order
    Cleanup,
    /// Print the link to the public status page of an order
    Link { shop: String, order: String },
    /// Keep refreshing in the background and print every update
    Watch,
    /// Manage the favorite shop numbers
    #[command(subcommand)]
    Favorites(FavoritesCommand),
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum FavoritesCommand {
    List,
    Add { shop: String },
    Remove { shop: String },
}

pub fn format_order(order: &Order) -> String {
    let last_checked = match order.last_checked {
        Some(time) => time.format(TIME_FORMAT).to_string(),
        None => String::from("never"),
    };

    format!(
        "{:<28} {:<10} checked: {}",
        order.to_string(),
        order.current_status.to_string(),
        last_checked
    )
}

fn write_orders<W: Write>(orders: &OrderCollection, out: &mut W) -> Result<()> {
    if orders.is_empty() {
        writeln!(out, "no tracked orders")?;
        return Ok(());
    }

    for order in orders {
        writeln!(out, "{}", format_order(order))?;
    }

    Ok(())
}

/// Runs every command that works on the tracked orders, except `watch`.
pub fn run_order_command<S, A, W>(
    command: &Command,
    service: &mut TrackerService<S, A>,
    out: &mut W,
) -> Result<()>
where
    S: OrderStore,
    A: StatusApi + Sync,
    W: Write,
{
    match command {
        Command::Add { shop, order } => {
            let key = parse_order_key(shop, order)?;

            match service.add_order(key) {
                Ok(order) => writeln!(out, "now tracking {}", order)?,
                Err(TrackerError::DuplicateOrder(key)) => {
                    bail!("{} is already tracked", key)
                }
                Err(e) => return Err(e.into()),
            }
        }
        Command::Remove { shop, order } => {
            let key = parse_order_key(shop, order)?;

            if service.remove_order(&key)? {
                writeln!(out, "stopped tracking {}", key)?;
            } else {
                writeln!(out, "{} wasn't tracked", key)?;
            }
        }
        Command::List => write_orders(&service.list_orders(), out)?,
        Command::Refresh => write_orders(&service.refresh_all()?, out)?,
        Command::Cleanup => {
            let (remaining, removed) = service.cleanup()?;

            writeln!(out, "removed {} delivered orders", removed)?;
            write_orders(&remaining, out)?;
        }
        Command::Link { shop, order } => {
            writeln!(out, "{}", status_page_url(parse_order_key(shop, order)?))?;
        }
        Command::Watch | Command::Favorites(_) => {
            bail!("{:?} isn't an order command", command)
        }
    }

    Ok(())
}

pub fn run_favorites_command<F, W>(command: &FavoritesCommand, store: &mut F, out: &mut W) -> Result<()>
where
    F: FavoritesStore,
    W: Write,
{
    match command {
        FavoritesCommand::List => {
            let favorites = store.list();

            if favorites.is_empty() {
                writeln!(out, "no favorite shops")?;
            }

            for shop_id in favorites {
                writeln!(out, "{}", shop_id)?;
            }
        }
        FavoritesCommand::Add { shop } => {
            let shop_id: ShopId = parse_positive_id(shop, "shop id")?;

            if store.add(shop_id)? {
                writeln!(out, "added shop {} to the favorites", shop_id)?;
            } else {
                writeln!(out, "shop {} is already a favorite", shop_id)?;
            }
        }
        FavoritesCommand::Remove { shop } => {
            let shop_id: ShopId = parse_positive_id(shop, "shop id")?;

            if store.remove(shop_id)? {
                writeln!(out, "removed shop {} from the favorites", shop_id)?;
            } else {
                writeln!(out, "shop {} wasn't a favorite", shop_id)?;
            }
        }
    }

    Ok(())
}

/// Prints the events of the worker until it stops. Refreshes once right away.
///
/// Without a refresh interval nothing else would come, so it returns after
/// that first refresh.
pub fn watch<W: Write>(worker: &TrackerWorker, out: &mut W) -> Result<()> {
    worker.send(TrackerCommand::RefreshAll)?;

    let periodic = worker.refresh_interval().is_some();
    if !periodic {
        log::info!("periodic refresh is disabled, refreshing once");
    }

    for event in worker.events().iter() {
        let refresh_finished = match event {
            TrackerEvent::OrdersRefreshed(orders) => {
                writeln!(out, "--- {}", chrono::Local::now().format(TIME_FORMAT))?;
                write_orders(&orders, out)?;
                true
            }
            TrackerEvent::Failed { command, error } => {
                writeln!(out, "{:?} failed: {}", command, error)?;
                command == TrackerCommand::RefreshAll
            }
            TrackerEvent::Stopped => break,
            other => {
                log::debug!("{:?}", other);
                false
            }
        };

        out.flush()?;

        if refresh_finished && !periodic {
            break;
        }
    }

    Ok(())
}

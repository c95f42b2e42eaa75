use anyhow::Result;
use clap::Parser;
use std::io;
use tracker::service::DefaultTrackerService;
use tracker::stores::JsonFileFavoritesStore;
use tracker::{TrackerSettings, TrackerWorker};
use tracker_cli::commands::{run_favorites_command, run_order_command, watch, Cli, Command};
use tracker_cli::logging::init_logging;

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging()?;

    let settings = TrackerSettings::from_env()?;
    log::debug!("settings: {:?}", settings);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Command::Favorites(command) => {
            let mut favorites = JsonFileFavoritesStore::new(&settings.favorites_file);
            run_favorites_command(command, &mut favorites, &mut out)
        }
        Command::Watch => {
            let worker = TrackerWorker::spawn(
                DefaultTrackerService::from_settings(&settings),
                settings.refresh_interval,
            );

            watch(&worker, &mut out)?;
            worker.shutdown()
        }
        command => {
            let mut service = DefaultTrackerService::from_settings(&settings);
            run_order_command(command, &mut service, &mut out)
        }
    }
}

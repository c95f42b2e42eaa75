pub mod refresh;
pub mod service;
pub mod settings;
pub mod stores;
pub mod worker;

pub use crate::service::TrackerService;
pub use crate::settings::TrackerSettings;
pub use crate::worker::{TrackerCommand, TrackerEvent, TrackerWorker};

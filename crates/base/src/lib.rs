pub mod entities;
pub mod errors;
pub mod helpers;
pub mod requests;
pub mod status_api;
pub mod stores;

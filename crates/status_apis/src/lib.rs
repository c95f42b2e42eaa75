pub mod entities;
pub mod parser;
pub mod photoprintit_status_api;

pub use crate::parser::{StatusParser, SummaryStateParser};
pub use crate::photoprintit_status_api::{ApiSettings, PhotoprintitStatusApi};

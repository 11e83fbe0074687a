pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use app::webhook::{WebhookHandler, WebhookRequest, WebhookResponse};
pub use config::AppConfig;
pub use core::{pipeline::BookingPipeline, sealer::TokenSealer};
pub use utils::error::{BookingError, Result};

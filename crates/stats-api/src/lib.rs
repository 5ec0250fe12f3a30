pub mod assets;
pub mod client;
pub mod config;
pub mod errors;
pub mod model;

pub use client::StatsClient;
pub use config::StatsApiConfig;
pub use errors::{StatsApiError, StatsResult};

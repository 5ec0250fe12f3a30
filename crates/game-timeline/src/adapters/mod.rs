mod events;
mod stats_api;

pub use events::{NoopEventsPort, TracingEventsPort};
pub use stats_api::StatsApiAdapter;

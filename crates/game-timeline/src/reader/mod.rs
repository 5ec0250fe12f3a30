pub mod fetch;
pub mod plan;

pub use fetch::{fetch_snapshots, fetch_snapshots_at};
pub use plan::{build_plan, FetchPlan};

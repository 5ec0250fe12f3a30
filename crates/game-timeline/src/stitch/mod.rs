pub mod context;
pub mod extract;
pub mod filter;

pub use context::{build_context, project_recap};
pub use extract::{extract_event, extract_timeline};
pub use filter::{filter_significant, is_notable_code, is_significant, select_notable_play};

pub mod jsonl;

pub use jsonl::{build_lines, serialize_lines, write_lines};

//! Diamond Digest library
//!
//! Exposes the CLI, configuration and digest orchestration for the binary and
//! for integration tests.

pub mod cli;
pub mod config;
pub mod digest;

pub use config::{AppConfig, LoadedConfig};
pub use digest::{DigestError, DigestOutcome, DigestRequest, DigestRunner};

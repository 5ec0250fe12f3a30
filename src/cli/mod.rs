pub mod app;
pub mod commands;
pub mod config;
pub mod context;
pub mod digest;
pub mod dispatch;
pub mod env;
pub mod highlights;
pub mod locate;
pub mod output;
pub mod runtime;
pub mod timeline;

//! `millbook` command: one JSON calculation request in, one JSON result out.

pub mod config;
pub mod request;

pub use config::CliConfig;
pub use request::{Request, Response, handle};

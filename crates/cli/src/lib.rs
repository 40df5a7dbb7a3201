//! tsm library: configuration, dispatch and report output behind the `tsm` binary

pub mod config;
pub mod dispatch;
pub mod report;
pub mod util;

pub use config::{Config, ConfigError};
pub use dispatch::{Action, Dispatcher, ExpiryMode, ExpiryReport, RunSummary};

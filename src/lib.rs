pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{http::HttpSpaceDataSource, transport::SimulatedTransport};
pub use config::toml_config::TomlConfig;
pub use core::{
    controller::{DataRefreshController, RefreshSettings},
    shell::{ConsoleEffect, Theme, ThemeConsoleShell},
};
pub use utils::error::{AstroError, Result};

pub mod app;
#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

pub use app::AppConfig;
#[cfg(feature = "cli")]
pub use cli::CliConfig;

#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{ConvertArgs, KindArg, RenderArgs};
pub use toml_config::ChartConfig;

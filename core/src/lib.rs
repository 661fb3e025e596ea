pub mod config;
pub mod host;
pub mod html;
pub mod path;
pub mod pipeline;
pub mod plugin;
pub mod rolldown;
pub mod scanner;

pub use config::{InlineConfig, InlineOptions, ScriptTag};
pub use pipeline::{BuildReport, run};
pub use plugin::InlinePlugin;

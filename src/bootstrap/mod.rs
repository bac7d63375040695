//! # Bootstrap / 启动装配
//!
//! Everything that happens before the services are usable: paths, config,
//! tracing and dependency wiring.

pub mod config;
pub mod paths;
pub mod run;
pub mod tracing;
pub mod wiring;

pub use config::{load_config, load_config_or_default};
pub use paths::AppPaths;
pub use wiring::{build_coordinator, build_store};

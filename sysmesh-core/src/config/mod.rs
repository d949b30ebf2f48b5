//! Configuration for the sysmesh monitor
//!
//! The config file is YAML. [`ConfigManager`] loads and validates it;
//! the types in [`settings`] are the converged schema: a polling
//! interval, one optional local monitor section, and a list of remote
//! targets reached over SSH.

mod manager;
pub mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{
    LocalMonitorConfig, MonitorConfig, MonitorTargets, ProcessFilterSpec, RemoteTarget,
};

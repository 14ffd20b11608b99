pub mod client;
pub mod config;
pub mod discovery;
pub mod error;
pub mod protocol;
pub mod types;

pub use client::{ConnectionConfig, Sc010Client, Sc010ClientBuilder};
pub use crate::config::{
    AppConfig, ControllerSettings, LoggingConfig, load_config, load_config_or_default,
};
pub use discovery::{DISCOVERY_PORT, find_controller, find_controller_at};
pub use error::Sc010Error;
pub use protocol::{DEFAULT_PORT, Protocol};
pub use types::{
    ControllerInfo, DeviceEntry, DeviceName, FieldReport, MatrixRoute, SceneEntry, VideoWall,
};

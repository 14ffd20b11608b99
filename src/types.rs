use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::net::Ipv4Addr;

/// Network identity of a controller found during discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerInfo {
    pub ip: Ipv4Addr,
    pub mac: String,
}

impl fmt::Display for ControllerInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.ip, self.mac)
    }
}

/// Free-form key/value report as returned by the controller's info-style
/// queries (controller info, IP settings, per-device info and status).
///
/// A `BTreeMap` keeps iteration order stable so repeated surveys log the
/// same report in the same order.
pub type FieldReport = BTreeMap<String, String>;

/// A device's factory name together with its user-assigned alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceName {
    pub true_name: String,
    pub alias: String,
}

/// One transmitter-to-receiver assignment in the switching matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixRoute {
    pub tx: String,
    pub rx: String,
}

/// A logical video wall: `rows` x `cols` displays driven by one encoder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoWall {
    pub name: String,
    pub rows: u32,
    pub cols: u32,
    pub encoder: String,
}

impl VideoWall {
    /// Number of physical displays making up the wall.
    pub fn display_count(&self) -> u32 {
        self.rows * self.cols
    }
}

/// One entry of the controller's device JSON dump.
///
/// Field names follow the controller's camelCase JSON keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceEntry {
    #[serde(rename = "trueName")]
    pub true_name: String,
    #[serde(rename = "aliasName", default)]
    pub alias: Option<String>,
    #[serde(rename = "deviceType")]
    pub device_type: String,
    pub online: bool,
    pub ip: String,
}

/// One entry of the controller's scene JSON dump. `layout` is absent for
/// scenes saved without a wall layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneEntry {
    pub name: String,
    #[serde(default)]
    pub layout: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_entry_parses_controller_json() {
        let raw = r#"{
            "trueName": "TX-4K-01",
            "aliasName": "LobbyPlayer",
            "deviceType": "Transmitter",
            "online": true,
            "ip": "169.254.5.17"
        }"#;

        let entry: DeviceEntry = serde_json::from_str(raw).unwrap();
        assert_eq!(entry.true_name, "TX-4K-01");
        assert_eq!(entry.alias.as_deref(), Some("LobbyPlayer"));
        assert_eq!(entry.device_type, "Transmitter");
        assert!(entry.online);
        assert_eq!(entry.ip, "169.254.5.17");
    }

    #[test]
    fn device_entry_alias_is_optional() {
        let raw = r#"{"trueName":"RX1","deviceType":"Receiver","online":false,"ip":"169.254.5.40"}"#;
        let entry: DeviceEntry = serde_json::from_str(raw).unwrap();
        assert_eq!(entry.alias, None);
        assert!(!entry.online);
    }

    #[test]
    fn scene_entry_without_layout() {
        let raw = r#"{"name":"evening"}"#;
        let scene: SceneEntry = serde_json::from_str(raw).unwrap();
        assert_eq!(scene.name, "evening");
        assert_eq!(scene.layout, None);
    }

    #[test]
    fn video_wall_display_count() {
        let wall = VideoWall {
            name: "lobby".to_string(),
            rows: 2,
            cols: 3,
            encoder: "TX1".to_string(),
        };
        assert_eq!(wall.display_count(), 6);
    }
}

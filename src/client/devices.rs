use super::Sc010Client;
use crate::error::Sc010Error;
use crate::protocol::Protocol;
use crate::types::{DeviceEntry, DeviceName, FieldReport};
use log::debug;
use serde::Deserialize;

// `config get devicejsonstring` wraps the entries in a top-level object.
#[derive(Deserialize)]
struct DeviceDump {
    devices: Vec<DeviceEntry>,
}

impl Sc010Client {
    /// Get the names of all devices known to the controller.
    ///
    /// Issues `config get devicelist`.
    ///
    /// # Examples
    /// ```no_run
    /// use sc010::Sc010Client;
    ///
    /// let mut client = Sc010Client::new("169.254.1.1", 23)?;
    /// for device in client.get_device_list()? {
    ///     println!("{device}");
    /// }
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn get_device_list(&mut self) -> Result<Vec<String>, Sc010Error> {
        let lines = self.query("config get devicelist")?;
        Ok(Protocol::parse_device_list(&lines))
    }

    /// Get every device's factory name together with its alias.
    ///
    /// Issues `config get name`.
    pub fn get_device_names(&mut self) -> Result<Vec<DeviceName>, Sc010Error> {
        let lines = self.query("config get name")?;
        Protocol::parse_device_names(&lines)
    }

    /// Get the static info report of a single device.
    ///
    /// Issues `config get device info <device>`.
    pub fn get_device_info(&mut self, device: &str) -> Result<FieldReport, Sc010Error> {
        let lines = self.query(&format!("config get device info {device}"))?;
        Protocol::parse_field_report(&lines)
    }

    /// Get the live status report of a single device.
    ///
    /// Issues `config get device status <device>`. Unlike
    /// [`Sc010Client::get_device_info`] the fields here change at runtime
    /// (link state, active stream, temperatures).
    pub fn get_device_status(&mut self, device: &str) -> Result<FieldReport, Sc010Error> {
        let lines = self.query(&format!("config get device status {device}"))?;
        Protocol::parse_field_report(&lines)
    }

    /// Get the controller's full device dump.
    ///
    /// Issues `config get devicejsonstring` and decodes the JSON payload.
    pub fn get_device_json(&mut self) -> Result<Vec<DeviceEntry>, Sc010Error> {
        let lines = self.query("config get devicejsonstring")?;
        let payload = Protocol::json_payload(&lines)?;
        let dump: DeviceDump = serde_json::from_str(payload)?;
        Ok(dump.devices)
    }

    /// Re-run the connect-time info prefetch: fetch the device list and the
    /// info report of every listed device into the cache queried by
    /// [`Sc010Client::cached_device_info`].
    pub fn refresh_device_cache(&mut self) -> Result<(), Sc010Error> {
        let devices = self.get_device_list()?;
        debug!("Prefetching info for {} devices", devices.len());

        self.device_cache.clear();
        for device in devices {
            let info = self.get_device_info(&device)?;
            self.device_cache.insert(device, info);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::Sc010Client;
    use crate::client::testing::{MockController, spawn_mock};
    use crate::error::Sc010Error;

    fn connect(mock: &MockController) -> Sc010Client {
        Sc010Client::builder()
            .address(&mock.addr.ip().to_string())
            .port(mock.addr.port())
            .gather_info(false)
            .build()
            .unwrap()
    }

    #[test]
    fn device_list_and_names() {
        let mock = spawn_mock(&[
            ("config get devicelist", &["TX1 TX2 RX1"]),
            ("config get name", &["TX1 LobbyPlayer", "TX2 SignagePC", "RX1 LobbyWall"]),
        ]);
        let mut client = connect(&mock);

        let devices = client.get_device_list().unwrap();
        assert_eq!(devices, vec!["TX1", "TX2", "RX1"]);

        let names = client.get_device_names().unwrap();
        assert_eq!(names.len(), 3);
        assert_eq!(names[2].true_name, "RX1");
        assert_eq!(names[2].alias, "LobbyWall");
    }

    #[test]
    fn per_device_queries_name_the_device() {
        let mock = spawn_mock(&[
            ("config get device info TX1", &["model: TX-4K", "fw: 1.3.0"]),
            ("config get device status TX1", &["link: up", "stream: active"]),
        ]);
        let mut client = connect(&mock);

        let info = client.get_device_info("TX1").unwrap();
        assert_eq!(info["model"], "TX-4K");

        let status = client.get_device_status("TX1").unwrap();
        assert_eq!(status["link"], "up");

        assert_eq!(
            mock.received(),
            vec!["config get device info TX1", "config get device status TX1"]
        );
    }

    #[test]
    fn device_json_decodes_dump() {
        let mock = spawn_mock(&[(
            "config get devicejsonstring",
            &[r#"{"devices":[{"trueName":"TX1","aliasName":"LobbyPlayer","deviceType":"Transmitter","online":true,"ip":"169.254.5.17"}]}"#],
        )]);
        let mut client = connect(&mock);

        let devices = client.get_device_json().unwrap();
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].true_name, "TX1");
        assert_eq!(devices[0].device_type, "Transmitter");
        assert!(devices[0].online);
    }

    #[test]
    fn device_json_surfaces_bad_payload() {
        let mock = spawn_mock(&[("config get devicejsonstring", &["{\"devices\":"])]);
        let mut client = connect(&mock);

        let result = client.get_device_json();
        assert!(matches!(result, Err(Sc010Error::Json(_))));
    }
}

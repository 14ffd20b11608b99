use super::Sc010Client;
use crate::error::Sc010Error;
use crate::protocol::Protocol;
use crate::types::FieldReport;

impl Sc010Client {
    /// Get the controller's own identity report.
    ///
    /// Issues `config get version`. The report carries model, firmware
    /// version and the controller's network identity as `key: value` fields.
    ///
    /// # Examples
    /// ```no_run
    /// use sc010::Sc010Client;
    ///
    /// let mut client = Sc010Client::new("169.254.1.1", 23)?;
    /// for (key, value) in client.get_controller_info()? {
    ///     println!("{key}: {value}");
    /// }
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn get_controller_info(&mut self) -> Result<FieldReport, Sc010Error> {
        let lines = self.query("config get version")?;
        Protocol::parse_field_report(&lines)
    }

    /// Get the LAN(AV) interface settings.
    ///
    /// Issues `config get ipsetting`; returns address, netmask and gateway
    /// as `key: value` fields.
    pub fn get_ip_settings(&mut self) -> Result<FieldReport, Sc010Error> {
        let lines = self.query("config get ipsetting")?;
        Protocol::parse_field_report(&lines)
    }
}

use super::Sc010Client;
use crate::error::Sc010Error;
use crate::protocol::Protocol;
use crate::types::MatrixRoute;

impl Sc010Client {
    /// Get the current switching matrix.
    ///
    /// Issues `matrix get`; each response line names one transmitter and the
    /// receiver it feeds. Receivers without a source do not appear.
    ///
    /// # Examples
    /// ```no_run
    /// use sc010::Sc010Client;
    ///
    /// let mut client = Sc010Client::new("169.254.1.1", 23)?;
    /// for route in client.get_matrix()? {
    ///     println!("{} -> {}", route.tx, route.rx);
    /// }
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn get_matrix(&mut self) -> Result<Vec<MatrixRoute>, Sc010Error> {
        let lines = self.query("matrix get")?;
        Protocol::parse_matrix_routes(&lines)
    }
}

#[cfg(test)]
mod tests {
    use crate::Sc010Client;
    use crate::client::testing::spawn_mock;

    #[test]
    fn matrix_routes_come_back_typed() {
        let mock = spawn_mock(&[("matrix get", &["TX1 RX1", "TX1 RX2", "TX2 RX3"])]);
        let mut client = Sc010Client::builder()
            .address(&mock.addr.ip().to_string())
            .port(mock.addr.port())
            .gather_info(false)
            .build()
            .unwrap();

        let routes = client.get_matrix().unwrap();
        assert_eq!(routes.len(), 3);
        assert_eq!(routes[0].tx, "TX1");
        assert_eq!(routes[0].rx, "RX1");
        assert_eq!(routes[2].tx, "TX2");
    }
}

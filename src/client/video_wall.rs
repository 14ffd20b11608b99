use super::Sc010Client;
use crate::error::Sc010Error;
use crate::protocol::Protocol;
use crate::types::VideoWall;

impl Sc010Client {
    /// Get the configured video walls.
    ///
    /// Issues `vw get`; each response line describes one wall as
    /// `<name> <rows>x<cols> <encoder>`.
    pub fn get_video_wall(&mut self) -> Result<Vec<VideoWall>, Sc010Error> {
        let lines = self.query("vw get")?;
        Protocol::parse_video_walls(&lines)
    }
}

#[cfg(test)]
mod tests {
    use crate::Sc010Client;
    use crate::client::testing::spawn_mock;

    #[test]
    fn video_walls_come_back_typed() {
        let mock = spawn_mock(&[("vw get", &["lobby 2x2 TX1", "atrium 3x4 TX2"])]);
        let mut client = Sc010Client::builder()
            .address(&mock.addr.ip().to_string())
            .port(mock.addr.port())
            .gather_info(false)
            .build()
            .unwrap();

        let walls = client.get_video_wall().unwrap();
        assert_eq!(walls.len(), 2);
        assert_eq!(walls[0].name, "lobby");
        assert_eq!(walls[0].encoder, "TX1");
        assert_eq!(walls[1].rows, 3);
        assert_eq!(walls[1].cols, 4);
        assert_eq!(walls[1].display_count(), 12);
    }
}

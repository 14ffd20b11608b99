use super::Sc010Client;
use crate::error::Sc010Error;
use crate::protocol::Protocol;
use crate::types::SceneEntry;
use serde::Deserialize;

#[derive(Deserialize)]
struct SceneDump {
    scenes: Vec<SceneEntry>,
}

impl Sc010Client {
    /// Get the saved scenes.
    ///
    /// Issues `config get scenejsonstring` and decodes the JSON payload.
    /// A scene's `layout` is `None` when it was saved without a wall layout.
    pub fn get_scene_json(&mut self) -> Result<Vec<SceneEntry>, Sc010Error> {
        let lines = self.query("config get scenejsonstring")?;
        let payload = Protocol::json_payload(&lines)?;
        let dump: SceneDump = serde_json::from_str(payload)?;
        Ok(dump.scenes)
    }
}

#[cfg(test)]
mod tests {
    use crate::Sc010Client;
    use crate::client::testing::spawn_mock;

    #[test]
    fn scenes_decode_with_optional_layout() {
        let mock = spawn_mock(&[(
            "config get scenejsonstring",
            &[r#"{"scenes":[{"name":"morning","layout":"lobby"},{"name":"evening"}]}"#],
        )]);
        let mut client = Sc010Client::builder()
            .address(&mock.addr.ip().to_string())
            .port(mock.addr.port())
            .gather_info(false)
            .build()
            .unwrap();

        let scenes = client.get_scene_json().unwrap();
        assert_eq!(scenes.len(), 2);
        assert_eq!(scenes[0].name, "morning");
        assert_eq!(scenes[0].layout.as_deref(), Some("lobby"));
        assert_eq!(scenes[1].layout, None);
    }
}

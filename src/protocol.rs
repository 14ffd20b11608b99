use crate::error::Sc010Error;
use crate::types::{DeviceName, FieldReport, MatrixRoute, VideoWall};

// Protocol constants
pub const DEFAULT_PORT: u16 = 23;
pub const LINE_TERMINATOR: &str = "\r\n";
pub const ERROR_PREFIX: &str = "error:";

/// Low-level handling of the controller's line-oriented command protocol.
///
/// Commands are single ASCII lines terminated with CRLF. The controller
/// answers with zero or more lines followed by one empty line; a first line
/// starting with `error:` reports a controller-side failure.
pub struct Protocol;

impl Protocol {
    /// Frame a command as a CRLF-terminated line.
    ///
    /// Rejects empty commands and commands with embedded line breaks, which
    /// would desynchronize the response stream.
    pub fn command_line(command: &str) -> Result<Vec<u8>, Sc010Error> {
        if command.trim().is_empty() {
            return Err(Sc010Error::Protocol("Empty command".to_string()));
        }
        if command.contains('\r') || command.contains('\n') {
            return Err(Sc010Error::Protocol(format!(
                "Command contains line break: {command:?}"
            )));
        }
        Ok(format!("{command}{LINE_TERMINATOR}").into_bytes())
    }

    /// Extract the message of an `error:` reply line, if this is one.
    pub fn error_message(line: &str) -> Option<&str> {
        line.strip_prefix(ERROR_PREFIX).map(str::trim)
    }

    /// Parse `key: value` report lines into a field report.
    pub fn parse_field_report(lines: &[String]) -> Result<FieldReport, Sc010Error> {
        let mut report = FieldReport::new();
        for line in lines.iter().filter(|l| !l.trim().is_empty()) {
            let (key, value) = line.split_once(':').ok_or_else(|| {
                Sc010Error::Protocol(format!("Invalid report line: {line}"))
            })?;
            report.insert(key.trim().to_string(), value.trim().to_string());
        }
        Ok(report)
    }

    /// Parse a device list response: whitespace-separated device names,
    /// possibly spread over several lines.
    pub fn parse_device_list(lines: &[String]) -> Vec<String> {
        lines
            .iter()
            .flat_map(|line| line.split_whitespace())
            .map(str::to_string)
            .collect()
    }

    /// Parse name/alias lines of the form `<true name> <alias>`.
    pub fn parse_device_names(lines: &[String]) -> Result<Vec<DeviceName>, Sc010Error> {
        lines
            .iter()
            .filter(|l| !l.trim().is_empty())
            .map(|line| {
                let mut tokens = line.split_whitespace();
                match (tokens.next(), tokens.next(), tokens.next()) {
                    (Some(true_name), Some(alias), None) => Ok(DeviceName {
                        true_name: true_name.to_string(),
                        alias: alias.to_string(),
                    }),
                    _ => Err(Sc010Error::Protocol(format!(
                        "Invalid device name line: {line}"
                    ))),
                }
            })
            .collect()
    }

    /// Parse matrix lines of the form `<tx> <rx>`.
    pub fn parse_matrix_routes(lines: &[String]) -> Result<Vec<MatrixRoute>, Sc010Error> {
        lines
            .iter()
            .filter(|l| !l.trim().is_empty())
            .map(|line| {
                let mut tokens = line.split_whitespace();
                match (tokens.next(), tokens.next(), tokens.next()) {
                    (Some(tx), Some(rx), None) => Ok(MatrixRoute {
                        tx: tx.to_string(),
                        rx: rx.to_string(),
                    }),
                    _ => Err(Sc010Error::Protocol(format!("Invalid matrix line: {line}"))),
                }
            })
            .collect()
    }

    /// Parse video wall lines of the form `<name> <rows>x<cols> <encoder>`.
    pub fn parse_video_walls(lines: &[String]) -> Result<Vec<VideoWall>, Sc010Error> {
        lines
            .iter()
            .filter(|l| !l.trim().is_empty())
            .map(|line| {
                let mut tokens = line.split_whitespace();
                let (name, dims, encoder) = match (tokens.next(), tokens.next(), tokens.next(), tokens.next()) {
                    (Some(name), Some(dims), Some(encoder), None) => (name, dims, encoder),
                    _ => {
                        return Err(Sc010Error::Protocol(format!(
                            "Invalid video wall line: {line}"
                        )))
                    }
                };
                let (rows, cols) = dims.split_once('x').ok_or_else(|| {
                    Sc010Error::Protocol(format!("Invalid video wall layout: {dims}"))
                })?;
                let rows = rows.parse::<u32>().map_err(|_| {
                    Sc010Error::Protocol(format!("Invalid video wall layout: {dims}"))
                })?;
                let cols = cols.parse::<u32>().map_err(|_| {
                    Sc010Error::Protocol(format!("Invalid video wall layout: {dims}"))
                })?;
                Ok(VideoWall {
                    name: name.to_string(),
                    rows,
                    cols,
                    encoder: encoder.to_string(),
                })
            })
            .collect()
    }

    /// Extract the single-line JSON payload of a `...jsonstring` response.
    pub fn json_payload(lines: &[String]) -> Result<&str, Sc010Error> {
        let mut payload = lines.iter().filter(|l| !l.trim().is_empty());
        match (payload.next(), payload.next()) {
            (Some(line), None) => Ok(line.trim()),
            (None, _) => Err(Sc010Error::Protocol("Empty JSON response".to_string())),
            _ => Err(Sc010Error::Protocol(
                "JSON response spans multiple lines".to_string(),
            )),
        }
    }
}

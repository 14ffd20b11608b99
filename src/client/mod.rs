use crate::error::Sc010Error;
use crate::protocol::{DEFAULT_PORT, Protocol};
use crate::types::FieldReport;
use log::{debug, trace, warn};
use std::collections::HashMap;
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::net::{SocketAddr, TcpStream};
use std::time::Duration;

pub mod devices;
pub mod matrix;
pub mod scenes;
pub mod system;
pub mod video_wall;

/// Connection configuration for the SC010 TCP client.
///
/// The defaults match the values the controller ships with; all of them can
/// be customized for slow or congested AV networks.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use sc010::ConnectionConfig;
///
/// // Use default settings
/// let config = ConnectionConfig::default();
///
/// // Patient settings for a congested network
/// let config = ConnectionConfig {
///     timeout: Duration::from_secs(10),
///     max_retries: 5,
///     retry_delay: Duration::from_secs(2),
///     gather_info: false,
/// };
/// ```
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Timeout applied to connecting and to every socket read/write
    pub timeout: Duration,
    /// Additional connect attempts after the first one fails
    pub max_retries: u32,
    /// Pause between connect attempts
    pub retry_delay: Duration,
    /// Prefetch the device list and per-device info right after connecting
    pub gather_info: bool,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(2),
            max_retries: 3,
            retry_delay: Duration::from_secs(1),
            gather_info: true,
        }
    }
}

/// Builder for constructing [`Sc010Client`] instances with flexible
/// configuration.
///
/// # Examples
///
/// ```no_run
/// use sc010::Sc010Client;
///
/// let client = Sc010Client::builder()
///     .address("169.254.1.1")
///     .debug(true)
///     .build()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Default)]
pub struct Sc010ClientBuilder {
    address: Option<String>,
    port: Option<u16>,
    config: ConnectionConfig,
    debug: bool,
}

impl Sc010ClientBuilder {
    pub fn address(mut self, addr: &str) -> Self {
        self.address = Some(addr.to_string());
        self
    }

    /// Override the controller's command port (default 23)
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Enable or disable debug logging
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Set the full connection configuration
    pub fn config(mut self, config: ConnectionConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the connect and socket timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the number of connect retries
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.config.max_retries = max_retries;
        self
    }

    /// Set the pause between connect attempts
    pub fn retry_delay(mut self, retry_delay: Duration) -> Self {
        self.config.retry_delay = retry_delay;
        self
    }

    /// Enable or disable the device info prefetch on connect
    pub fn gather_info(mut self, gather_info: bool) -> Self {
        self.config.gather_info = gather_info;
        self
    }

    /// Build the Sc010Client
    pub fn build(self) -> Result<Sc010Client, Sc010Error> {
        let address = self
            .address
            .ok_or_else(|| Sc010Error::InvalidAddress("Address must be specified".to_string()))?;
        let port = self.port.unwrap_or(DEFAULT_PORT);

        let socket_addr: SocketAddr = format!("{address}:{port}")
            .parse()
            .map_err(|_| Sc010Error::InvalidAddress(address.clone()))?;

        debug!("Connecting to SC010 at {socket_addr}");

        let mut attempt = 0u32;
        let stream = loop {
            match TcpStream::connect_timeout(&socket_addr, self.config.timeout) {
                Ok(stream) => break stream,
                Err(e) => {
                    attempt += 1;
                    if attempt > self.config.max_retries {
                        warn!("Giving up on {socket_addr} after {attempt} attempts: {e}");
                        return Err(if e.kind() == ErrorKind::TimedOut {
                            Sc010Error::Timeout
                        } else {
                            Sc010Error::Io(e)
                        });
                    }
                    warn!(
                        "Connect attempt {attempt}/{} to {socket_addr} failed: {e}",
                        self.config.max_retries
                    );
                    std::thread::sleep(self.config.retry_delay);
                }
            }
        };

        stream.set_read_timeout(Some(self.config.timeout))?;
        stream.set_write_timeout(Some(self.config.timeout))?;
        let reader = BufReader::new(stream.try_clone()?);

        debug!("Successfully connected to SC010");

        let mut client = Sc010Client {
            stream,
            reader,
            config: self.config,
            debug: self.debug,
            device_cache: HashMap::new(),
        };

        if client.config.gather_info {
            client.refresh_device_cache()?;
        }

        Ok(client)
    }
}

/// High-level client for querying SC010 AV-over-IP matrix controllers.
///
/// `Sc010Client` speaks the controller's line-oriented command protocol over
/// a persistent TCP connection and exposes one typed method per query:
/// controller info, device enumeration, matrix routing, video wall layout,
/// IP settings and the JSON configuration dumps.
///
/// The connection is closed when the client is dropped, whether the survey
/// finished normally or an error unwound past it.
///
/// # Examples
///
/// ```no_run
/// use sc010::Sc010Client;
///
/// let mut client = Sc010Client::new("169.254.1.1", 23)?;
///
/// for route in client.get_matrix()? {
///     println!("{} -> {}", route.tx, route.rx);
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Sc010Client {
    stream: TcpStream,
    reader: BufReader<TcpStream>,
    config: ConnectionConfig,
    debug: bool,
    device_cache: HashMap<String, FieldReport>,
}

impl Sc010Client {
    /// Create a new client with default configuration.
    ///
    /// # Errors
    /// Returns `Sc010Error` if the address is invalid or the controller
    /// cannot be reached within the configured retries.
    pub fn new(addr: &str, port: u16) -> Result<Self, Sc010Error> {
        Self::builder().address(addr).port(port).build()
    }

    /// Create a builder for flexible configuration.
    pub fn builder() -> Sc010ClientBuilder {
        Sc010ClientBuilder::default()
    }

    /// Create a new client with custom configuration.
    pub fn with_config(addr: &str, config: ConnectionConfig) -> Result<Self, Sc010Error> {
        Self::builder().address(addr).config(config).build()
    }

    /// Enable or disable debug logging
    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    /// Get current connection configuration
    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// Address of the controller this client is connected to
    pub fn peer_addr(&self) -> Result<SocketAddr, Sc010Error> {
        Ok(self.stream.peer_addr()?)
    }

    /// Device info gathered at connect time (see
    /// [`ConnectionConfig::gather_info`]), refreshed by
    /// [`Sc010Client::refresh_device_cache`].
    pub fn cached_device_info(&self, device: &str) -> Option<&FieldReport> {
        self.device_cache.get(device)
    }

    /// Send a command and collect the response lines.
    ///
    /// An `error:` reply from the controller becomes
    /// [`Sc010Error::Controller`]; an elapsed socket deadline becomes
    /// [`Sc010Error::Timeout`].
    pub fn query(&mut self, command: &str) -> Result<Vec<String>, Sc010Error> {
        let framed = Protocol::command_line(command)?;

        trace!("Sending command: {command}");
        self.stream.write_all(&framed).map_err(map_socket_err)?;
        self.stream.flush().map_err(map_socket_err)?;

        let lines = self.read_response()?;

        if let Some(first) = lines.first() {
            if let Some(message) = Protocol::error_message(first) {
                return Err(Sc010Error::Controller(message.to_string()));
            }
        }

        if self.debug {
            debug!("Response to {command}: {lines:?}");
        }

        Ok(lines)
    }

    // Response block: CRLF lines up to one empty line.
    fn read_response(&mut self) -> Result<Vec<String>, Sc010Error> {
        let mut lines = Vec::new();

        loop {
            let mut line = String::new();
            let read = self.reader.read_line(&mut line).map_err(map_socket_err)?;
            if read == 0 {
                return Err(Sc010Error::Protocol(
                    "Connection closed mid-response".to_string(),
                ));
            }

            let line = line.trim_end_matches(['\r', '\n']);
            if line.is_empty() {
                break;
            }
            lines.push(line.to_string());
        }

        Ok(lines)
    }
}

fn map_socket_err(e: std::io::Error) -> Sc010Error {
    if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) {
        Sc010Error::Timeout
    } else {
        Sc010Error::Io(e)
    }
}

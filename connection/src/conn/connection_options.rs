use std::time::Duration;

/// Settings used to connect to MySQL as a replication consumer.
///
/// The user needs the `REPLICATION SLAVE` and `REPLICATION CLIENT`
/// privileges.
#[derive(Debug, Clone)]
pub struct ConnectionOptions {
    /// Hostname to connect. Defaults to "127.0.0.1".
    pub hostname: String,

    /// Port number to connect. Defaults to 3306.
    pub port: u16,

    pub username: String,

    pub password: String,

    /// Slave server id announced in COM_BINLOG_DUMP.
    pub server_id: u32,

    /// Idle deadline applied before each event read of the dump loop.
    /// `None` blocks indefinitely, which suits quiet masters.
    pub read_timeout: Option<Duration>,
}

impl Default for ConnectionOptions {
    fn default() -> ConnectionOptions {
        ConnectionOptions {
            hostname: String::from("127.0.0.1"),
            port: 3306,
            username: String::from("root"),
            password: String::new(),
            server_id: 0x20,
            read_timeout: None,
        }
    }
}

impl ConnectionOptions {
    pub fn new(hostname: String, port: u16, username: String, password: String) -> Self {
        ConnectionOptions {
            hostname,
            port,
            username,
            password,
            ..ConnectionOptions::default()
        }
    }

    pub fn update_auth(&mut self, username: String, password: String) {
        self.username = username;
        self.password = password;
    }
}

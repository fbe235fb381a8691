use std::io;
use std::io::{Cursor, Write};

use byteorder::{LittleEndian, WriteBytesExt};

use crate::bytes::{native_password, write_null_term_string};
use crate::conn::connection_options::ConnectionOptions;
use crate::declar::capability_flags;
use crate::packet::handshake_packet::HandshakePacket;

const AUTH_PLUGIN_NAME: &str = "mysql_native_password";

/// Handshake response (client reply).
///
/// see https://dev.mysql.com/doc/internals/en/connection-phase-packets.html#packet-Protocol::HandshakeResponse41
pub struct AuthenticateCommand {
    pub client_capabilities: u32,
    pub max_packet_size: u32,
    pub client_collation: u8,
    pub username: String,
    pub password: String,
    pub scramble: Vec<u8>,
}

impl AuthenticateCommand {
    pub fn new(
        options: &ConnectionOptions,
        handshake: &HandshakePacket,
        client_collation: u8,
    ) -> Self {
        let client_capabilities = capability_flags::CLIENT_PROTOCOL_41
            | capability_flags::CLIENT_SECURE_CONNECTION
            | capability_flags::CLIENT_PLUGIN_AUTH
            | capability_flags::CLIENT_LONG_PASSWORD
            | (handshake.server_capabilities & capability_flags::CLIENT_LONG_FLAG);

        Self {
            client_capabilities,
            max_packet_size: 0,
            client_collation,
            username: options.username.clone(),
            password: options.password.clone(),
            scramble: handshake.scramble.clone(),
        }
    }

    pub fn serialize(&self) -> Result<Vec<u8>, io::Error> {
        let mut vec = Vec::new();
        let mut cursor = Cursor::new(&mut vec);

        cursor.write_u32::<LittleEndian>(self.client_capabilities)?;
        cursor.write_u32::<LittleEndian>(self.max_packet_size)?;
        cursor.write_u8(self.client_collation)?;

        // reserved
        for _ in 0..23 {
            cursor.write_u8(0)?;
        }

        write_null_term_string(&mut cursor, &self.username)?;

        let password_hash = native_password(&self.password, &self.scramble);
        cursor.write_u8(password_hash.len() as u8)?;
        cursor.write_all(&password_hash)?;

        write_null_term_string(&mut cursor, AUTH_PLUGIN_NAME)?;
        Ok(vec)
    }
}

use std::io::{self, Cursor, Write};

use byteorder::{LittleEndian, WriteBytesExt};

use crate::commands::command::CommandType;

/// Blocking dump; the server keeps the connection open and streams new
/// events as they are written.
pub const BINLOG_DUMP_BLOCKING: u16 = 0x0000;

/// COM_BINLOG_DUMP: position, flags, server id, then the binlog file name.
///
/// see https://dev.mysql.com/doc/internals/en/com-binlog-dump.html
pub struct DumpBinlogCommand {
    pub server_id: u32,
    pub binlog_filename: String,
    pub binlog_position: u32,
    pub flags: u16,
}

impl DumpBinlogCommand {
    pub fn new(server_id: u32, binlog_filename: String, binlog_position: u32) -> Self {
        Self {
            server_id,
            binlog_filename,
            binlog_position,
            flags: BINLOG_DUMP_BLOCKING,
        }
    }

    pub fn serialize(&self) -> Result<Vec<u8>, io::Error> {
        let mut vec = Vec::new();
        let mut cursor = Cursor::new(&mut vec);

        cursor.write_u8(CommandType::BinlogDump as u8)?;
        cursor.write_u32::<LittleEndian>(self.binlog_position)?;
        cursor.write_u16::<LittleEndian>(self.flags)?;
        cursor.write_u32::<LittleEndian>(self.server_id)?;
        cursor.write_all(self.binlog_filename.as_bytes())?;

        Ok(vec)
    }
}

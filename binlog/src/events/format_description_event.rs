use std::io::Cursor;

use byteorder::{LittleEndian, ReadBytesExt};
use bytes::Buf;
use serde::Serialize;

use common::err::CResult;

use crate::utils::{extract_string, read_bytes};

const SERVER_VERSION_LEN: usize = 50;

/// Checksum-algorithm descriptor byte plus the CRC32 of the event itself,
/// appended to the FORMAT_DESCRIPTION payload by servers >= 5.6.1.
const CHECKSUM_TAIL_LEN: usize = 1 + 4;

/// Checksum algorithm announced by the FORMAT_DESCRIPTION event.
#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy)]
pub enum ChecksumAlg {
    Off,
    Crc32,
    Undefined,
}

impl ChecksumAlg {
    fn from_code(code: u8) -> ChecksumAlg {
        match code {
            0x00 => ChecksumAlg::Off,
            0x01 => ChecksumAlg::Crc32,
            _ => ChecksumAlg::Undefined,
        }
    }
}

/// FORMAT_DESCRIPTION_EVENT payload. The first event of every stream; it
/// supplies the per-event-type post-header lengths the table-map and row
/// decoders depend on.
///
/// see https://dev.mysql.com/doc/internals/en/format-description-event.html
#[derive(Debug, Serialize, PartialEq, Eq, Clone)]
pub struct FormatDescriptionEvent {
    pub binlog_version: u16,

    pub server_version: String,

    pub create_timestamp: u32,

    /// Common header length of all later events, normally 19.
    pub event_header_length: u8,

    /// One byte per known event type: its post-header length.
    pub event_type_header_lengths: Vec<u8>,

    pub checksum_alg: ChecksumAlg,
}

impl FormatDescriptionEvent {
    pub fn parse(cursor: &mut Cursor<&[u8]>) -> CResult<Self> {
        let binlog_version = cursor.read_u16::<LittleEndian>()?;
        let server_version = extract_string(&read_bytes(cursor, SERVER_VERSION_LEN)?);
        let create_timestamp = cursor.read_u32::<LittleEndian>()?;
        let event_header_length = cursor.read_u8()?;

        let mut event_type_header_lengths = read_bytes(cursor, cursor.remaining())?;

        // Servers from 5.6.1 on append a checksum-algorithm byte and the
        // event's own CRC32 after the length table; strip both so the table
        // holds only per-type lengths.
        let mut checksum_alg = ChecksumAlg::Off;
        if server_supports_checksum(&server_version)
            && event_type_header_lengths.len() > CHECKSUM_TAIL_LEN
        {
            let split = event_type_header_lengths.len() - CHECKSUM_TAIL_LEN;
            checksum_alg = ChecksumAlg::from_code(event_type_header_lengths[split]);
            event_type_header_lengths.truncate(split);
        }

        Ok(FormatDescriptionEvent {
            binlog_version,
            server_version,
            create_timestamp,
            event_header_length,
            event_type_header_lengths,
            checksum_alg,
        })
    }

    pub fn post_header_len(&self, event_type: u8) -> u8 {
        self.event_type_header_lengths
            .get(event_type as usize)
            .copied()
            .unwrap_or(0)
    }

    /// Later events carry a 4-byte CRC32 trailer when the master announced
    /// the CRC32 algorithm here.
    pub fn events_have_checksum(&self) -> bool {
        self.checksum_alg == ChecksumAlg::Crc32
    }
}

/// Binlog checksums appeared in MySQL 5.6.1.
fn server_supports_checksum(server_version: &str) -> bool {
    let mut parts = server_version
        .split(|c: char| !c.is_ascii_digit())
        .take(3)
        .map(|p| p.parse::<u32>().unwrap_or(0));

    let major = parts.next().unwrap_or(0);
    let minor = parts.next().unwrap_or(0);
    let patch = parts.next().unwrap_or(0);

    (major, minor, patch) >= (5, 6, 1)
}

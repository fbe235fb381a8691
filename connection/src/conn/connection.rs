use std::io::Cursor;

use tracing::{debug, info};

use binlog::events::binlog_event::{BinlogEvent, EventData};
use binlog::parser::BinlogParser;
use binlog::utils::read_len_enc_num;
use common::err::decode_error::RelayError;
use common::err::CResult;

use crate::commands::authenticate_command::AuthenticateCommand;
use crate::commands::command::CommandType;
use crate::commands::dump_binlog_command::DumpBinlogCommand;
use crate::commands::query_command::QueryCommand;
use crate::conn::connection_options::ConnectionOptions;
use crate::conn::packet_channel::PacketChannel;
use crate::declar::status_flags::SERVER_MORE_RESULTS_EXISTS;
use crate::packet::check_error_packet;
use crate::packet::end_of_file_packet::EndOfFilePacket;
use crate::packet::handshake_packet::HandshakePacket;
use crate::packet::ok_packet::OkPacket;
use crate::packet::response_type::ResponseType;
use crate::packet::result_set_column_packet::ResultSetColumnPacket;
use crate::packet::result_set_row_packet::ResultSetRowPacket;
use crate::UTF8_GENERAL_CI;

/// Marker byte the server puts in front of every replication event packet.
const BINLOG_PACKET_MARKER: u8 = 0x00;

/// A fully-read text result set.
#[derive(Debug, Default)]
pub struct ResultSet {
    pub columns: Vec<ResultSetColumnPacket>,
    pub rows: Vec<ResultSetRowPacket>,
}

/// Generic response to a command.
#[derive(Debug)]
pub enum ResponsePacket {
    Ok(OkPacket),
    Eof(EndOfFilePacket),
}

/// One client session: handshake, queries, and the replication dump loop.
/// The binlog parser state lives here and spans the whole session.
#[derive(Debug)]
pub struct Connection {
    pub options: ConnectionOptions,

    channel: Option<PacketChannel>,

    /// Capability flags the server advertised in its greeting.
    pub capabilities: u32,

    /// Status flags and warning count from the latest OK/EOF packet.
    pub status_flags: u16,
    pub warnings: u16,

    parser: Option<BinlogParser>,
}

impl Connection {
    pub fn new(options: ConnectionOptions) -> Self {
        Self {
            options,
            channel: None,
            capabilities: 0,
            status_flags: 0,
            warnings: 0,
            parser: None,
        }
    }

    /// Connect and authenticate with mysql_native_password.
    pub fn connect(&mut self) -> CResult<()> {
        let mut channel = PacketChannel::connect(&self.options)?;

        let packet = channel.read_packet()?;
        check_error_packet(&packet, "Initial handshake error.")?;
        let handshake = HandshakePacket::parse(&packet)?;
        self.capabilities = handshake.server_capabilities;
        debug!(
            "server {} (connection id {})",
            handshake.server_version, handshake.connection_id
        );

        let command = AuthenticateCommand::new(&self.options, &handshake, UTF8_GENERAL_CI);
        channel.write_packet(&command.serialize()?)?;

        let packet = channel.read_packet()?;
        check_error_packet(&packet, "Authentication error.")?;
        match packet.first() {
            Some(&ResponseType::OK) => {}
            Some(&ResponseType::END_OF_FILE) => {
                return Err(RelayError::Capability(
                    "server requested an auth plugin switch; only mysql_native_password is supported"
                        .to_string(),
                ));
            }
            _ => {
                return Err(RelayError::Protocol(
                    "unexpected packet in authentication sequence".to_string(),
                ));
            }
        }

        self.channel = Some(channel);
        Ok(())
    }

    fn channel_mut(&mut self) -> CResult<&mut PacketChannel> {
        self.channel
            .as_mut()
            .ok_or_else(|| RelayError::ConnectionError("not connected".to_string()))
    }

    /// Read one generic response packet (OK / EOF / ERR), keeping the
    /// warning count and status flags current.
    pub fn read_result_packet(&mut self) -> CResult<ResponsePacket> {
        let packet = self.channel_mut()?.read_packet()?;
        self.dispatch_result_packet(&packet)
    }

    fn dispatch_result_packet(&mut self, packet: &[u8]) -> CResult<ResponsePacket> {
        check_error_packet(packet, "Command error.")?;

        match packet.first() {
            Some(&ResponseType::OK) => {
                let ok = OkPacket::parse(packet)?;
                self.status_flags = ok.status_flags.bits();
                self.warnings = ok.warnings;
                Ok(ResponsePacket::Ok(ok))
            }
            Some(&ResponseType::END_OF_FILE) if EndOfFilePacket::is_eof(packet) => {
                let eof = EndOfFilePacket::parse(&packet[1..])?;
                self.status_flags = eof.server_status;
                self.warnings = eof.warning_count;
                Ok(ResponsePacket::Eof(eof))
            }
            _ => Err(RelayError::Protocol(format!(
                "unknown response packet marker {:?}",
                packet.first()
            ))),
        }
    }

    /// Run a statement and read its text result set.
    pub fn query(&mut self, sql: &str) -> CResult<ResultSet> {
        debug!("query: {}", sql);
        let command = QueryCommand::new(sql.to_string());
        let channel = self.channel_mut()?;
        channel.reset_sequence();
        channel.write_packet(&command.serialize()?)?;

        let mut result_set = ResultSet::default();
        loop {
            let packet = self.channel_mut()?.read_packet()?;
            check_error_packet(&packet, "Query error.")?;

            // a statement without a result set answers with a bare OK
            if packet.first() == Some(&ResponseType::OK) {
                self.dispatch_result_packet(&packet)?;
                return Ok(result_set);
            }

            let mut cursor = Cursor::new(packet.as_slice());
            let (_, column_count) = read_len_enc_num(&mut cursor)?;

            for _ in 0..column_count {
                let packet = self.channel_mut()?.read_packet()?;
                check_error_packet(&packet, "Query column definition error.")?;
                if EndOfFilePacket::is_eof(&packet) {
                    return Err(RelayError::Protocol(
                        "truncated column definitions in result set".to_string(),
                    ));
                }
                result_set
                    .columns
                    .push(ResultSetColumnPacket::parse(&packet)?);
            }

            let packet = self.channel_mut()?.read_packet()?;
            if !EndOfFilePacket::is_eof(&packet) {
                return Err(RelayError::Protocol(
                    "column definitions not terminated by EOF".to_string(),
                ));
            }
            self.dispatch_result_packet(&packet)?;

            loop {
                let packet = self.channel_mut()?.read_packet()?;
                check_error_packet(&packet, "Query result set error.")?;
                if EndOfFilePacket::is_eof(&packet) {
                    self.dispatch_result_packet(&packet)?;
                    break;
                }
                result_set.rows.push(ResultSetRowPacket::parse(&packet)?);
            }

            // SERVER_MORE_RESULTS_EXISTS chains another result set
            if self.status_flags & SERVER_MORE_RESULTS_EXISTS == 0 {
                return Ok(result_set);
            }
        }
    }

    /// Run a statement that answers with a bare OK (no result set).
    pub fn update_query(&mut self, sql: &str) -> CResult<()> {
        debug!("update query: {}", sql);
        let command = QueryCommand::new(sql.to_string());
        let channel = self.channel_mut()?;
        channel.reset_sequence();
        channel.write_packet(&command.serialize()?)?;
        self.read_result_packet()?;
        Ok(())
    }

    /// COM_QUIT. A server that closes the socket without answering is a
    /// clean goodbye too.
    pub fn quit(&mut self) -> CResult<()> {
        let channel = self.channel_mut()?;
        channel.reset_sequence();
        channel.write_packet(&[CommandType::Quit as u8])?;

        match self.read_result_packet() {
            Ok(_) => Ok(()),
            Err(RelayError::IoError(err))
                if err.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    /// Start the replication dump at `file:position` and deliver every
    /// decoded event to `callback`, in server order, until the stream ends
    /// (`BinlogEOF`) or a fatal error occurs.
    pub fn dump_binlog<F>(&mut self, file: &str, position: u32, mut callback: F) -> CResult<()>
    where
        F: FnMut(&BinlogEvent) -> CResult<()>,
    {
        if self.parser.is_none() {
            self.parser = Some(BinlogParser::new());
        }

        let command = DumpBinlogCommand::new(
            self.options.server_id,
            file.to_string(),
            position,
        );
        let channel = self.channel_mut()?;
        channel.reset_sequence();
        channel.write_packet(&command.serialize()?)?;

        self.read_result_packet()?;

        // the server opens the stream with the format description
        let event = self.next_binlog_event()?;
        match &event.data {
            EventData::FormatDescription(description) => {
                info!(
                    "start reading binlog {} from {} (binlog v{}, server {})",
                    file, position, description.binlog_version, description.server_version
                );
            }
            _ => {
                return Err(RelayError::Decode(format!(
                    "first dump event was {:#04x}, not a format description",
                    event.header.event_type
                )));
            }
        }

        let read_timeout = self.options.read_timeout;
        loop {
            self.channel_mut()?.set_read_timeout(read_timeout)?;

            let event = self.next_binlog_event()?;
            callback(&event)?;
        }
    }

    fn next_binlog_event(&mut self) -> CResult<BinlogEvent> {
        let packet = self.channel_mut()?.read_packet()?;

        check_error_packet(&packet, "Binlog dump error.")?;
        if EndOfFilePacket::is_eof(&packet) {
            return Err(RelayError::BinlogEOF);
        }
        if packet.first() != Some(&BINLOG_PACKET_MARKER) {
            return Err(RelayError::Protocol(format!(
                "unexpected binlog packet marker {:?}",
                packet.first()
            )));
        }

        let parser = self
            .parser
            .as_mut()
            .ok_or_else(|| RelayError::ConnectionError("binlog parser not started".to_string()))?;
        parser.parse(&packet[1..])
    }
}

use std::io::{BufReader, BufWriter, Read, Write};
use std::net::TcpStream;
use std::time::Duration;

use byteorder::{LittleEndian, ReadBytesExt};

use common::err::decode_error::RelayError;
use common::err::CResult;

use crate::conn::connection_options::ConnectionOptions;
use crate::{MAX_IO_RETRIES, PACKET_HEADER_SIZE};

/// Framed packet transport over one TCP connection.
///
/// Owns the sequence counter: it is zeroed at the start of every command
/// exchange and must advance by exactly one per framed packet in either
/// direction. A gap is a protocol error.
#[derive(Debug)]
pub struct PacketChannel {
    stream: TcpStream,
    reader: BufReader<TcpStream>,
    writer: BufWriter<TcpStream>,
    sequence: u8,
}

impl PacketChannel {
    pub fn connect(options: &ConnectionOptions) -> CResult<Self> {
        let address = format!("{}:{}", options.hostname, options.port);
        let stream = TcpStream::connect(address)?;

        let reader = BufReader::new(stream.try_clone()?);
        let writer = BufWriter::new(stream.try_clone()?);

        Ok(Self {
            stream,
            reader,
            writer,
            sequence: 0,
        })
    }

    /// A command exchange starts with sequence id 0.
    pub fn reset_sequence(&mut self) {
        self.sequence = 0;
    }

    pub fn sequence(&self) -> u8 {
        self.sequence
    }

    pub fn set_read_timeout(&self, timeout: Option<Duration>) -> CResult<()> {
        self.stream.set_read_timeout(timeout)?;
        Ok(())
    }

    pub fn read_packet(&mut self) -> CResult<Vec<u8>> {
        let header = self.read_bytes(PACKET_HEADER_SIZE)?;
        let packet_size = (&header[0..3]).read_u24::<LittleEndian>()?;
        let seq_num = header[3];

        if seq_num != self.sequence {
            return Err(RelayError::Protocol(format!(
                "packet sequence out of order: got {}, expected {}",
                seq_num, self.sequence
            )));
        }
        self.sequence = seq_num.wrapping_add(1);

        self.read_bytes(packet_size as usize)
    }

    pub fn write_packet(&mut self, payload: &[u8]) -> CResult<()> {
        let mut packet = Vec::with_capacity(PACKET_HEADER_SIZE + payload.len());
        let size = payload.len() as u32;
        packet.extend_from_slice(&size.to_le_bytes()[..3]);
        packet.push(self.sequence);
        packet.extend_from_slice(payload);

        self.write_bytes(&packet)?;
        self.sequence = self.sequence.wrapping_add(1);
        Ok(())
    }

    fn read_bytes(&mut self, expected_size: usize) -> CResult<Vec<u8>> {
        let mut data = vec![0u8; expected_size];

        let mut read_size = 0;
        let mut try_count = 0;
        while read_size < expected_size {
            try_count += 1;

            let size = self.reader.read(&mut data[read_size..])?;
            if size == 0 {
                return Err(RelayError::IoError(std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    "connection closed mid packet",
                )));
            }
            read_size += size;

            if try_count > MAX_IO_RETRIES {
                return Err(RelayError::Protocol(
                    "packet read retry limit exceeded".to_string(),
                ));
            }
        }

        Ok(data)
    }

    fn write_bytes(&mut self, data: &[u8]) -> CResult<()> {
        let mut written_size = 0;
        let mut try_count = 0;
        while written_size < data.len() {
            try_count += 1;

            written_size += self.writer.write(&data[written_size..])?;

            if try_count > MAX_IO_RETRIES {
                return Err(RelayError::Protocol(
                    "packet write retry limit exceeded".to_string(),
                ));
            }
        }

        self.writer.flush()?;
        Ok(())
    }
}

use std::fmt::Display;
use std::num::ParseIntError;
use std::string::FromUtf8Error;
use std::{fmt, io};

/// Workspace-wide error type.
///
/// The variants mirror the failure classes of a replication session:
/// transport, framing/protocol, server-reported errors, missing
/// capabilities, binlog decoding, filtering, configuration and the sink.
/// `BinlogEOF` is not a failure: it is the sentinel for a clean,
/// server-initiated end of the replication stream.
#[derive(Debug)]
pub enum RelayError {
    //////////////////////
    // Transport
    //////////////////////
    IoError(io::Error),
    ConnectionError(String),

    //////////////////////
    // Wire protocol
    //////////////////////
    /// Malformed packet, unknown response code or sequence gap.
    Protocol(String),
    /// Decoded ERR packet, surfaced verbatim.
    ServerError { code: u16, message: String },
    /// The server lacks a capability the client requires.
    Capability(String),

    //////////////////////
    // Binlog
    //////////////////////
    /// Unrecoverable binlog decode failure.
    Decode(String),
    /// Clean server-initiated end of the replication stream.
    BinlogEOF,

    //////////////////////
    // Application
    //////////////////////
    FilterError(String),
    ConfigError(String),
    SinkError(String),

    FromUtf8Error(FromUtf8Error),
    ParseIntError(ParseIntError),
}

impl Display for RelayError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> fmt::Result {
        match self {
            RelayError::ConnectionError(s)
            | RelayError::Protocol(s)
            | RelayError::Capability(s)
            | RelayError::Decode(s)
            | RelayError::FilterError(s)
            | RelayError::ConfigError(s)
            | RelayError::SinkError(s) => {
                write!(f, "{}", s)
            }
            RelayError::ServerError { code, message } => {
                write!(f, "{} ({})", message, code)
            }
            RelayError::BinlogEOF => {
                write!(f, "end of binlog stream")
            }
            RelayError::IoError(err) => {
                write!(f, "{}", err)
            }
            RelayError::FromUtf8Error(err) => {
                write!(f, "{}", err)
            }
            RelayError::ParseIntError(err) => {
                write!(f, "{}", err)
            }
        }
    }
}

impl std::error::Error for RelayError {}

impl From<io::Error> for RelayError {
    fn from(error: io::Error) -> Self {
        RelayError::IoError(error)
    }
}

impl From<FromUtf8Error> for RelayError {
    fn from(error: FromUtf8Error) -> Self {
        RelayError::FromUtf8Error(error)
    }
}

impl From<ParseIntError> for RelayError {
    fn from(error: ParseIntError) -> Self {
        RelayError::ParseIntError(error)
    }
}

impl RelayError {
    /// True for the clean end-of-stream sentinel, false for real failures.
    pub fn is_eof(&self) -> bool {
        matches!(self, RelayError::BinlogEOF)
    }
}

#[cfg(test)]
mod test {
    use super::RelayError;

    #[test]
    fn test_display() {
        let err = RelayError::ServerError {
            code: 1045,
            message: "Access denied".to_string(),
        };
        assert_eq!(err.to_string(), "Access denied (1045)");
        assert!(RelayError::BinlogEOF.is_eof());
        assert!(!RelayError::Protocol("gap".to_string()).is_eof());
    }
}

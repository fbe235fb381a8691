use serde::Serialize;

/// Binlog event type codes.
///
/// see https://dev.mysql.com/doc/dev/mysql-server/latest/namespacemysql_1_1binlog_1_1event.html
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum LogEventType {
    Unknown = 0,
    /// One statement, present in both statement- and row-based replication.
    Query = 0x02,
    Stop = 0x03,
    /// The stream switched to a new binlog file.
    Rotate = 0x04,
    /// Parsing of every later event depends on this one.
    FormatDescription = 0x0F,
    /// Transaction commit marker.
    Xid = 0x10,
    /// Associates a table id with schema/table names and column types;
    /// emitted before the row events that reference it.
    TableMap = 0x13,

    WriteRowsV1 = 0x17,
    UpdateRowsV1 = 0x18,
    DeleteRowsV1 = 0x19,

    WriteRowsV2 = 0x1E,
    UpdateRowsV2 = 0x1F,
    DeleteRowsV2 = 0x20,
}

impl LogEventType {
    pub fn from_code(code: u8) -> LogEventType {
        match code {
            0x02 => LogEventType::Query,
            0x03 => LogEventType::Stop,
            0x04 => LogEventType::Rotate,
            0x0F => LogEventType::FormatDescription,
            0x10 => LogEventType::Xid,
            0x13 => LogEventType::TableMap,
            0x17 => LogEventType::WriteRowsV1,
            0x18 => LogEventType::UpdateRowsV1,
            0x19 => LogEventType::DeleteRowsV1,
            0x1E => LogEventType::WriteRowsV2,
            0x1F => LogEventType::UpdateRowsV2,
            0x20 => LogEventType::DeleteRowsV2,
            _ => LogEventType::Unknown,
        }
    }

    pub fn is_rows(&self) -> bool {
        matches!(
            self,
            LogEventType::WriteRowsV1
                | LogEventType::UpdateRowsV1
                | LogEventType::DeleteRowsV1
                | LogEventType::WriteRowsV2
                | LogEventType::UpdateRowsV2
                | LogEventType::DeleteRowsV2
        )
    }

    pub fn is_update_rows(&self) -> bool {
        matches!(
            self,
            LogEventType::UpdateRowsV1 | LogEventType::UpdateRowsV2
        )
    }

    /// Version 2 row events carry an extra-data block after the flags.
    pub fn is_rows_v2(&self) -> bool {
        matches!(
            self,
            LogEventType::WriteRowsV2 | LogEventType::UpdateRowsV2 | LogEventType::DeleteRowsV2
        )
    }
}

#[cfg(test)]
mod test {
    use super::LogEventType;

    #[test]
    fn test_from_code() {
        assert_eq!(LogEventType::from_code(0x13), LogEventType::TableMap);
        assert_eq!(LogEventType::from_code(0x1E), LogEventType::WriteRowsV2);
        assert_eq!(LogEventType::from_code(0x21), LogEventType::Unknown);

        assert!(LogEventType::UpdateRowsV1.is_rows());
        assert!(LogEventType::UpdateRowsV1.is_update_rows());
        assert!(!LogEventType::UpdateRowsV1.is_rows_v2());
        assert!(LogEventType::DeleteRowsV2.is_rows_v2());
        assert!(!LogEventType::TableMap.is_rows());
    }
}

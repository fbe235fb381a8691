use serde::Serialize;

use crate::events::event_header::Header;
use crate::events::format_description_event::FormatDescriptionEvent;
use crate::events::query_event::QueryEvent;
use crate::events::rows_event::RowsEvent;
use crate::events::table_map_event::TableMapEvent;

/// One decoded replication event: the common header plus the payload the
/// stream position called for. Event types outside this client's scope
/// pass through as `Unsupported` so the stream keeps flowing.
#[derive(Debug, Serialize, Clone)]
pub struct BinlogEvent {
    pub header: Header,
    pub data: EventData,
}

#[derive(Debug, Serialize, Clone)]
pub enum EventData {
    FormatDescription(FormatDescriptionEvent),
    Query(QueryEvent),
    TableMap(TableMapEvent),
    Rows(RowsEvent),
    Unsupported,
}

impl BinlogEvent {
    /// The rows payload, when this is a row event.
    pub fn rows(&self) -> Option<&RowsEvent> {
        match &self.data {
            EventData::Rows(rows) => Some(rows),
            _ => None,
        }
    }
}

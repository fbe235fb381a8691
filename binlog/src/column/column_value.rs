use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::debug;

use crate::column::column_type::ColumnType;

/// A decoded column value. The variant is chosen by the MySQL type code
/// from the table map; comparisons and rendering dispatch on it.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub enum ColumnValue {
    Int(i64),
    Float(f64),
    /// Canonical `[-]integer.fraction` form of a packed decimal.
    Decimal(String),
    /// UTC instant; DATE at midnight, TIME as an offset from the epoch day.
    Temporal(NaiveDateTime),
    Bytes(Vec<u8>),
    String(String),
    Null,
    Unknown,
}

/// One column of a decoded row image, with the bookkeeping the filter
/// needs: the raw type code, the table-map metadata word, whether the
/// column was included in the event's present bitmap and whether the null
/// bitmap flagged it.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Column {
    pub type_code: u8,
    pub meta: u16,
    pub present: bool,
    pub is_null: bool,
    pub value: ColumnValue,
}

impl Column {
    pub fn new(type_code: u8, meta: u16, value: ColumnValue) -> Self {
        Column {
            type_code,
            meta,
            present: true,
            is_null: false,
            value,
        }
    }

    /// Placeholder for a column the event did not include. It keeps its
    /// position in the row but must never be inspected for a value.
    pub fn absent() -> Self {
        Column {
            type_code: ColumnType::Unknown as u8,
            meta: 0,
            present: false,
            is_null: false,
            value: ColumnValue::Unknown,
        }
    }

    pub fn null(type_code: u8, meta: u16) -> Self {
        Column {
            type_code,
            meta,
            present: true,
            is_null: true,
            value: ColumnValue::Null,
        }
    }

    pub fn column_type(&self) -> ColumnType {
        ColumnType::from_code(self.type_code)
    }

    /// Integer view of the value, used by cross-type comparisons.
    pub fn as_int(&self) -> i64 {
        match &self.value {
            ColumnValue::Int(v) => *v,
            ColumnValue::Float(f) => *f as i64,
            ColumnValue::Decimal(s) => s.parse::<f64>().unwrap_or(0.0) as i64,
            ColumnValue::Temporal(t) => t.and_utc().timestamp(),
            ColumnValue::Bytes(b) => le_uint(b) as i64,
            ColumnValue::String(s) => s.parse().unwrap_or_else(|err| {
                debug!("column string {:?} is not an integer: {}", s, err);
                0
            }),
            ColumnValue::Null => i64::from(self.is_null),
            ColumnValue::Unknown => 0,
        }
    }

    pub fn as_float(&self) -> f64 {
        match &self.value {
            ColumnValue::Int(v) => *v as f64,
            ColumnValue::Float(f) => *f,
            ColumnValue::Decimal(s) => s.parse().unwrap_or(0.0),
            ColumnValue::Temporal(t) => t.and_utc().timestamp() as f64,
            ColumnValue::Bytes(b) => le_uint(b) as f64,
            ColumnValue::String(s) => s.parse().unwrap_or_else(|err| {
                debug!("column string {:?} is not a float: {}", s, err);
                0.0
            }),
            ColumnValue::Null => i64::from(self.is_null) as f64,
            ColumnValue::Unknown => 0.0,
        }
    }

    pub fn as_bytes(&self) -> Vec<u8> {
        match &self.value {
            ColumnValue::Bytes(b) => b.clone(),
            ColumnValue::String(s) => s.as_bytes().to_vec(),
            ColumnValue::Float(f) => f.to_le_bytes().to_vec(),
            ColumnValue::Int(v) => v.to_le_bytes().to_vec(),
            _ => Vec::new(),
        }
    }

    pub fn as_instant(&self) -> Option<NaiveDateTime> {
        match &self.value {
            ColumnValue::Temporal(t) => Some(*t),
            _ => chrono::DateTime::from_timestamp(self.as_int(), 0).map(|dt| dt.naive_utc()),
        }
    }

    /// Canonical textual form: integers as decimal, floats with six
    /// fractional digits, temporals per their type, bytes as UTF-8,
    /// decimals verbatim and NULL as the literal `[NULL]`.
    pub fn render(&self) -> String {
        if self.is_null {
            return String::from("[NULL]");
        }

        match &self.value {
            ColumnValue::Int(v) => v.to_string(),
            ColumnValue::Float(f) => format!("{:.6}", f),
            ColumnValue::Decimal(s) => s.clone(),
            ColumnValue::Temporal(t) => match self.column_type() {
                ColumnType::Date | ColumnType::NewDate => t.format("%Y-%m-%d").to_string(),
                ColumnType::Time | ColumnType::Time2 => t.format("%H:%M:%S").to_string(),
                _ => t.format("%Y-%m-%d %H:%M:%S").to_string(),
            },
            ColumnValue::Bytes(b) => String::from_utf8_lossy(b).to_string(),
            ColumnValue::String(s) => s.clone(),
            ColumnValue::Null => String::from("[NULL]"),
            ColumnValue::Unknown => String::new(),
        }
    }

    /// Equality through this column's native representation.
    pub fn equals(&self, other: &Column) -> bool {
        if self.is_null || other.is_null {
            return self.is_null == other.is_null;
        }

        match &self.value {
            ColumnValue::Int(v) => *v == other.as_int(),
            ColumnValue::Float(f) => *f == other.as_float(),
            ColumnValue::Decimal(_) => self.as_float() == other.as_float(),
            ColumnValue::Temporal(t) => Some(*t) == other.as_instant(),
            ColumnValue::Bytes(b) => *b == other.as_bytes(),
            ColumnValue::String(s) => *s == other.render(),
            ColumnValue::Null => other.is_null,
            ColumnValue::Unknown => false,
        }
    }

    /// Strict ordering through this column's native representation.
    /// Any comparison against NULL is false.
    pub fn greater_than(&self, other: &Column) -> bool {
        if self.is_null || other.is_null {
            return false;
        }

        match &self.value {
            ColumnValue::Int(v) => *v > other.as_int(),
            ColumnValue::Float(f) => *f > other.as_float(),
            ColumnValue::Decimal(_) => self.as_float() > other.as_float(),
            ColumnValue::Temporal(t) => match other.as_instant() {
                Some(o) => *t > o,
                None => false,
            },
            ColumnValue::Bytes(b) => *b > other.as_bytes(),
            ColumnValue::String(s) => *s > other.render(),
            _ => false,
        }
    }

    pub fn greater_equals(&self, other: &Column) -> bool {
        if self.is_null || other.is_null {
            return false;
        }

        match &self.value {
            ColumnValue::Int(v) => *v >= other.as_int(),
            ColumnValue::Float(f) => *f >= other.as_float(),
            ColumnValue::Decimal(_) => self.as_float() >= other.as_float(),
            ColumnValue::Temporal(t) => match other.as_instant() {
                Some(o) => *t >= o,
                None => false,
            },
            ColumnValue::Bytes(b) => *b >= other.as_bytes(),
            ColumnValue::String(s) => *s >= other.render(),
            _ => false,
        }
    }
}

fn le_uint(data: &[u8]) -> u64 {
    let mut value = 0u64;
    for (i, byte) in data.iter().take(8).enumerate() {
        value |= (*byte as u64) << (i * 8);
    }
    value
}

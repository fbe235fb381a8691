use serde::Serialize;

/// MySQL column type codes as they appear in TABLE_MAP events.
///
/// mysql source: include/field_types.h
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Decimal = 0,
    Tiny = 1,
    Short = 2,
    Long = 3,
    Float = 4,
    Double = 5,
    Null = 6,
    Timestamp = 7,
    LongLong = 8,
    Int24 = 9,
    Date = 10,
    Time = 11,
    DateTime = 12,
    Year = 13,
    NewDate = 14,
    VarChar = 15,
    Bit = 16,
    Timestamp2 = 17,
    DateTime2 = 18,
    Time2 = 19,

    /// Not a wire code: marks a column this decoder does not understand.
    Unknown = 0xF0,

    Json = 0xF5,
    NewDecimal = 0xF6,
    Enum = 0xF7,
    Set = 0xF8,
    TinyBlob = 0xF9,
    MediumBlob = 0xFA,
    LongBlob = 0xFB,
    Blob = 0xFC,
    VarString = 0xFD,
    String = 0xFE,
    Geometry = 0xFF,
}

impl ColumnType {
    pub fn from_code(code: u8) -> ColumnType {
        match code {
            0 => ColumnType::Decimal,
            1 => ColumnType::Tiny,
            2 => ColumnType::Short,
            3 => ColumnType::Long,
            4 => ColumnType::Float,
            5 => ColumnType::Double,
            6 => ColumnType::Null,
            7 => ColumnType::Timestamp,
            8 => ColumnType::LongLong,
            9 => ColumnType::Int24,
            10 => ColumnType::Date,
            11 => ColumnType::Time,
            12 => ColumnType::DateTime,
            13 => ColumnType::Year,
            14 => ColumnType::NewDate,
            15 => ColumnType::VarChar,
            16 => ColumnType::Bit,
            17 => ColumnType::Timestamp2,
            18 => ColumnType::DateTime2,
            19 => ColumnType::Time2,
            0xF5 => ColumnType::Json,
            0xF6 => ColumnType::NewDecimal,
            0xF7 => ColumnType::Enum,
            0xF8 => ColumnType::Set,
            0xF9 => ColumnType::TinyBlob,
            0xFA => ColumnType::MediumBlob,
            0xFB => ColumnType::LongBlob,
            0xFC => ColumnType::Blob,
            0xFD => ColumnType::VarString,
            0xFE => ColumnType::String,
            0xFF => ColumnType::Geometry,
            _ => ColumnType::Unknown,
        }
    }
}

use std::io::Cursor;

use byteorder::{BigEndian, LittleEndian, ReadBytesExt};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use tracing::debug;

use common::err::decode_error::RelayError;
use common::err::CResult;

use crate::column::column_type::ColumnType;
use crate::column::column_value::{Column, ColumnValue};
use crate::events::table_map_event::TableMapEvent;
use crate::row::row_data::RowData;
use crate::utils::{
    read_bitmap_little_endian, read_bytes, read_i24_le, read_string, read_uint_be, read_uint_le,
};

/// Leading bytes of a packed-decimal digit group, by leftover digit count.
///
/// mysql source: strings/decimal.c
const DECIMAL_SIZES: [usize; 10] = [0, 1, 1, 2, 2, 3, 3, 4, 4, 4];

/// mysql source: sql-common/my_time.c
const DATETIMEF_INT_OFS: i64 = 0x80_0000_0000;
const TIMEF_OFS: i64 = 0x8000_0000_0000;
const TIMEF_INT_OFS: i64 = 0x80_0000;

/// Decode one row image: the null bitmap over all table-map columns, then
/// one value per present column, dispatched on the mapped type code.
pub fn parse_row(
    cursor: &mut Cursor<&[u8]>,
    table_map: &TableMapEvent,
    present: &[bool],
) -> CResult<RowData> {
    let null_bitmap = read_bitmap_little_endian(cursor, table_map.column_count)?;

    let mut columns = Vec::with_capacity(present.len());
    for index in 0..present.len() {
        if !present[index] {
            columns.push(Column::absent());
            continue;
        }

        let type_code = table_map.column_types[index];
        let meta = table_map.column_metas[index];
        if null_bitmap[index] {
            columns.push(Column::null(type_code, meta));
            continue;
        }

        columns.push(parse_column(cursor, type_code, meta)?);
    }

    Ok(RowData::new(present.to_vec(), null_bitmap, columns))
}

/// mysql source: include/libbinlogevents/src/binary_log_funcs.cpp
fn parse_column(cursor: &mut Cursor<&[u8]>, type_code: u8, meta: u16) -> CResult<Column> {
    let value = match ColumnType::from_code(type_code) {
        ColumnType::Tiny => ColumnValue::Int(cursor.read_i8()? as i64),
        ColumnType::Short => ColumnValue::Int(cursor.read_i16::<LittleEndian>()? as i64),
        ColumnType::Int24 => ColumnValue::Int(read_i24_le(cursor)? as i64),
        ColumnType::Long => ColumnValue::Int(cursor.read_i32::<LittleEndian>()? as i64),
        ColumnType::LongLong => ColumnValue::Int(cursor.read_i64::<LittleEndian>()?),
        ColumnType::Year => ColumnValue::Int(cursor.read_u8()? as i64 + 1900),

        ColumnType::Float | ColumnType::Double => match meta {
            4 => ColumnValue::Float(cursor.read_f32::<LittleEndian>()? as f64),
            8 => ColumnValue::Float(cursor.read_f64::<LittleEndian>()?),
            _ => {
                return Err(RelayError::Decode(format!(
                    "unexpected float storage size: {}",
                    meta
                )))
            }
        },

        ColumnType::Decimal | ColumnType::NewDecimal => {
            ColumnValue::Decimal(parse_decimal(cursor, meta)?)
        }

        ColumnType::VarChar | ColumnType::VarString => {
            let length = if meta < 256 {
                cursor.read_u8()? as usize
            } else {
                cursor.read_u16::<LittleEndian>()? as usize
            };
            ColumnValue::String(read_string(cursor, length)?)
        }

        ColumnType::String | ColumnType::Enum | ColumnType::Set => {
            let real_type = ColumnType::from_code((meta >> 8) as u8);
            if real_type == ColumnType::Enum || real_type == ColumnType::Set {
                let size = (meta & 0xFF) as usize;
                ColumnValue::Int(read_uint_be(cursor, size)? as i64)
            } else {
                // length prefix grows to two bytes past 255 payload bytes
                let prefix = (meta >> 4) & 0x300;
                let length_size = if (prefix ^ 0x300) + 1 >= 0xFF { 2 } else { 1 };
                let length = read_uint_le(cursor, length_size)? as usize;
                ColumnValue::String(read_string(cursor, length)?)
            }
        }

        ColumnType::Bit => {
            let bits = (meta >> 8) * 8 + (meta & 0xFF);
            let size = (bits as usize + 7) / 8;
            ColumnValue::Bytes(read_bytes(cursor, size)?)
        }

        ColumnType::TinyBlob
        | ColumnType::MediumBlob
        | ColumnType::LongBlob
        | ColumnType::Blob
        | ColumnType::Geometry
        | ColumnType::Json => {
            let length = read_uint_le(cursor, meta as usize)? as usize;
            ColumnValue::Bytes(read_bytes(cursor, length)?)
        }

        ColumnType::Date | ColumnType::NewDate => {
            let value = read_uint_le(cursor, 3)?;
            let day = (value & 0x1F) as u32;
            let month = ((value >> 5) & 0x0F) as u32;
            let year = (value >> 9) as i32;
            ColumnValue::Temporal(datetime_from_parts(year, month, day, 0, 0, 0, 0))
        }

        ColumnType::Time => {
            // hhmmss stored as a base-100 packed integer
            let mut value = read_i24_le(cursor)?;
            let negative = value < 0;
            value = value.abs();
            let second = (value % 100) as i64;
            let minute = ((value / 100) % 100) as i64;
            let hour = (value / 10_000) as i64;
            let mut total = hour * 3600 + minute * 60 + second;
            if negative {
                total = -total;
            }
            ColumnValue::Temporal(NaiveDateTime::UNIX_EPOCH + Duration::seconds(total))
        }

        ColumnType::DateTime => {
            // YYYYMMDDhhmmss stored as a base-100 packed integer
            let mut value = cursor.read_u64::<LittleEndian>()?;
            let second = (value % 100) as u32;
            value /= 100;
            let minute = (value % 100) as u32;
            value /= 100;
            let hour = (value % 100) as u32;
            value /= 100;
            let day = (value % 100) as u32;
            value /= 100;
            let month = (value % 100) as u32;
            value /= 100;
            let year = value as i32;
            ColumnValue::Temporal(datetime_from_parts(year, month, day, hour, minute, second, 0))
        }

        ColumnType::Timestamp => {
            let seconds = cursor.read_u32::<LittleEndian>()? as i64;
            ColumnValue::Temporal(NaiveDateTime::UNIX_EPOCH + Duration::seconds(seconds))
        }

        ColumnType::Timestamp2 => {
            let seconds = cursor.read_u32::<BigEndian>()? as i64;
            let micros = parse_fractional(cursor, meta)? as i64;
            ColumnValue::Temporal(
                NaiveDateTime::UNIX_EPOCH
                    + Duration::seconds(seconds)
                    + Duration::microseconds(micros),
            )
        }

        ColumnType::DateTime2 => ColumnValue::Temporal(parse_datetime2(cursor, meta)?),

        ColumnType::Time2 => ColumnValue::Temporal(parse_time2(cursor, meta)?),

        ColumnType::Null => return Ok(Column::null(type_code, meta)),

        _ => {
            debug!("unsupported column type code {}, marking unknown", type_code);
            return Ok(Column::absent());
        }
    };

    Ok(Column::new(type_code, meta, value))
}

/// Packed decimal: sign in the top bit of byte 0 (clear = negative,
/// negative bodies bit-inverted), big-endian digit groups of nine digits
/// per four bytes with shortened head/tail groups.
///
/// mysql source: strings/decimal.c
fn parse_decimal(cursor: &mut Cursor<&[u8]>, meta: u16) -> CResult<String> {
    let precision = (meta >> 8) as usize;
    let scale = (meta & 0xFF) as usize;
    if scale > precision {
        return Err(RelayError::Decode(format!(
            "invalid decimal metadata: precision {} scale {}",
            precision, scale
        )));
    }

    let intg = precision - scale;
    let intg0 = intg / 9;
    let intg0x = intg - intg0 * 9;
    let frac0 = scale / 9;
    let frac0x = scale - frac0 * 9;

    let int_size = intg0 * 4 + DECIMAL_SIZES[intg0x];
    let frac_size = frac0 * 4 + DECIMAL_SIZES[frac0x];

    let mut buf = read_bytes(cursor, int_size + frac_size)?;
    if buf.is_empty() {
        return Err(RelayError::Decode("empty decimal body".to_string()));
    }

    let negative = buf[0] & 0x80 == 0;
    buf[0] ^= 0x80;
    if negative {
        for byte in buf.iter_mut() {
            *byte = !*byte;
        }
    }

    let mut offset = 0;
    let mut ints = String::new();
    if DECIMAL_SIZES[intg0x] > 0 {
        ints.push_str(&be_uint(&buf[offset..offset + DECIMAL_SIZES[intg0x]]).to_string());
        offset += DECIMAL_SIZES[intg0x];
    }
    for _ in 0..intg0 {
        let group = be_uint(&buf[offset..offset + 4]);
        if ints.is_empty() {
            ints.push_str(&group.to_string());
        } else {
            ints.push_str(&format!("{:09}", group));
        }
        offset += 4;
    }
    let ints = ints.trim_start_matches('0');
    let ints = if ints.is_empty() { "0" } else { ints };

    let mut decs = String::new();
    for _ in 0..frac0 {
        decs.push_str(&format!("{:09}", be_uint(&buf[offset..offset + 4])));
        offset += 4;
    }
    if DECIMAL_SIZES[frac0x] > 0 {
        let tail = be_uint(&buf[offset..offset + DECIMAL_SIZES[frac0x]]);
        decs.push_str(&format!("{:0width$}", tail, width = frac0x));
    }
    if decs.is_empty() {
        decs.push('0');
    }

    let sign = if negative { "-" } else { "" };
    Ok(format!("{}{}.{}", sign, ints, decs))
}

fn be_uint(data: &[u8]) -> u64 {
    let mut value = 0u64;
    for byte in data {
        value = (value << 8) | *byte as u64;
    }
    value
}

/// Fractional seconds tail: 0..=3 bytes depending on the declared digits,
/// scaled to microseconds.
fn parse_fractional(cursor: &mut Cursor<&[u8]>, meta: u16) -> CResult<u32> {
    let micros = match meta {
        1 | 2 => cursor.read_u8()? as u32 * 10_000,
        3 | 4 => read_uint_be(cursor, 2)? as u32 * 100,
        5 | 6 => read_uint_be(cursor, 3)? as u32,
        _ => 0,
    };
    Ok(micros)
}

/// mysql source: sql-common/my_time.c
fn parse_datetime2(cursor: &mut Cursor<&[u8]>, meta: u16) -> CResult<NaiveDateTime> {
    let packed = read_uint_be(cursor, 5)? as i64 - DATETIMEF_INT_OFS;
    let micros = parse_fractional(cursor, meta)?;

    let ymdhms = packed as u64;
    let ymd = ymdhms >> 17;
    let hms = ymdhms & 0x1_FFFF;

    let day = (ymd & 0x1F) as u32;
    let ym = ymd >> 5;
    let month = (ym % 13) as u32;
    let year = (ym / 13) as i32;

    let second = (hms & 0x3F) as u32;
    let minute = ((hms >> 6) & 0x3F) as u32;
    let hour = (hms >> 12) as u32;

    Ok(datetime_from_parts(year, month, day, hour, minute, second, micros))
}

/// mysql source: sql-common/my_time.c. Negative values store both the
/// integer part and the fraction in complement form; when the fraction is
/// non-zero the integer is bumped by one and the fraction shifted down.
fn parse_time2(cursor: &mut Cursor<&[u8]>, meta: u16) -> CResult<NaiveDateTime> {
    let (int_part, micros): (i64, i64) = match meta {
        1 | 2 => {
            let mut ltime = read_uint_be(cursor, 3)? as i64 - TIMEF_INT_OFS;
            let mut frac = cursor.read_u8()? as i64;
            if ltime < 0 && frac != 0 {
                ltime += 1;
                frac -= 0x100;
            }
            (ltime, frac * 10_000)
        }
        3 | 4 => {
            let mut ltime = read_uint_be(cursor, 3)? as i64 - TIMEF_INT_OFS;
            let mut frac = read_uint_be(cursor, 2)? as i64;
            if ltime < 0 && frac != 0 {
                ltime += 1;
                frac -= 0x1_0000;
            }
            (ltime, frac * 100)
        }
        5 | 6 => {
            let packed = read_uint_be(cursor, 6)? as i64 - TIMEF_OFS;
            (packed >> 24, packed & 0xFF_FFFF)
        }
        _ => {
            let ltime = read_uint_be(cursor, 3)? as i64 - TIMEF_INT_OFS;
            (ltime, 0)
        }
    };

    // 1 bit sign, 1 bit unused, 10 bits hour, 6 bits minute, 6 bits second
    let negative = int_part < 0;
    let abs = int_part.unsigned_abs();
    let hour = ((abs >> 12) & 0x3FF) as i64;
    let minute = ((abs >> 6) & 0x3F) as i64;
    let second = (abs & 0x3F) as i64;

    let mut total_seconds = hour * 3600 + minute * 60 + second;
    if negative {
        total_seconds = -total_seconds;
    }

    Ok(NaiveDateTime::UNIX_EPOCH
        + Duration::seconds(total_seconds)
        + Duration::microseconds(micros))
}

/// Zero dates ("0000-00-00") have no chrono representation; they collapse
/// to the epoch.
fn datetime_from_parts(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
    micros: u32,
) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_micro_opt(hour, minute, second, micros))
        .unwrap_or(NaiveDateTime::UNIX_EPOCH)
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use chrono::{Datelike, NaiveDate, Timelike};

    use crate::column::column_type::ColumnType;
    use crate::column::column_value::ColumnValue;
    use crate::events::table_map_event::TableMapEvent;

    use super::*;

    fn decode(data: &[u8], type_code: u8, meta: u16) -> Column {
        let mut cursor = Cursor::new(data);
        let column = parse_column(&mut cursor, type_code, meta).unwrap();
        assert_eq!(cursor.position() as usize, data.len(), "trailing bytes");
        column
    }

    #[test]
    fn test_integer_columns() {
        assert_eq!(decode(&[0xFF], 1, 0).value, ColumnValue::Int(-1));
        assert_eq!(
            decode(&[0x00, 0x80], 2, 0).value,
            ColumnValue::Int(-32_768)
        );
        assert_eq!(
            decode(&[0x00, 0x00, 0x80], 9, 0).value,
            ColumnValue::Int(-8_388_608)
        );
        assert_eq!(
            decode(&[0xD2, 0x02, 0x96, 0x49], 3, 0).value,
            ColumnValue::Int(1_234_567_890)
        );
        assert_eq!(
            decode(&[0xFF; 8], 8, 0).value,
            ColumnValue::Int(-1)
        );
        assert_eq!(decode(&[120], 13, 0).value, ColumnValue::Int(2020));
    }

    #[test]
    fn test_float_columns() {
        let mut data = Vec::new();
        data.extend_from_slice(&1.25f32.to_le_bytes());
        assert_eq!(decode(&data, 4, 4).value, ColumnValue::Float(1.25));

        let mut data = Vec::new();
        data.extend_from_slice(&(-2.5f64).to_le_bytes());
        assert_eq!(decode(&data, 5, 8).value, ColumnValue::Float(-2.5));
    }

    #[test]
    fn test_varchar_prefix_width() {
        assert_eq!(
            decode(&[2, b'h', b'i'], 15, 255).value,
            ColumnValue::String("hi".to_string())
        );
        assert_eq!(
            decode(&[2, 0, b'h', b'i'], 15, 256).value,
            ColumnValue::String("hi".to_string())
        );
    }

    #[test]
    fn test_string_and_enum() {
        // CHAR(20): real type in the high meta byte
        let meta = ((ColumnType::String as u16) << 8) | 20;
        assert_eq!(
            decode(&[3, b'a', b'b', b'c'], 0xFE, meta).value,
            ColumnValue::String("abc".to_string())
        );

        let meta = ((ColumnType::Enum as u16) << 8) | 2;
        assert_eq!(decode(&[0x01, 0x02], 0xFE, meta).value, ColumnValue::Int(0x102));
    }

    #[test]
    fn test_blob() {
        // 2-byte length prefix
        assert_eq!(
            decode(&[3, 0, 1, 2, 3], 0xFC, 2).value,
            ColumnValue::Bytes(vec![1, 2, 3])
        );
    }

    #[test]
    fn test_bit() {
        // 12 bits -> 2 bytes
        let meta = (1u16 << 8) | 4;
        assert_eq!(
            decode(&[0xAB, 0x0C], 16, meta).value,
            ColumnValue::Bytes(vec![0xAB, 0x0C])
        );
    }

    #[test]
    fn test_decimal() {
        // DECIMAL(10,2) 1234567.89
        let data = [0x80, 0x12, 0xD6, 0x87, 89];
        let meta = (10u16 << 8) | 2;
        assert_eq!(
            decode(&data, 0xF6, meta).value,
            ColumnValue::Decimal("1234567.89".to_string())
        );

        // DECIMAL(3,2) -3.21: body bit-inverted, sign bit clear
        let data = [!0x03 ^ 0x80, !0x15];
        let meta = (3u16 << 8) | 2;
        assert_eq!(
            decode(&data, 0xF6, meta).value,
            ColumnValue::Decimal("-3.21".to_string())
        );

        // DECIMAL(4,0) 5
        let data = [0x80, 5];
        let meta = 4u16 << 8;
        assert_eq!(
            decode(&data, 0xF6, meta).value,
            ColumnValue::Decimal("5.0".to_string())
        );
    }

    #[test]
    fn test_date() {
        // 2020-03-07: day 7, month 3, year 2020
        let packed: u32 = 7 | (3 << 5) | (2020 << 9);
        let data = packed.to_le_bytes();
        let column = decode(&data[..3], 10, 0);
        match &column.value {
            ColumnValue::Temporal(t) => {
                assert_eq!((t.year(), t.month(), t.day()), (2020, 3, 7));
            }
            other => panic!("expected temporal, got {:?}", other),
        }
        assert_eq!(column.render(), "2020-03-07");
    }

    fn encode_datetime2(
        year: i64,
        month: i64,
        day: i64,
        hour: i64,
        minute: i64,
        second: i64,
        micros: u32,
        meta: u16,
    ) -> Vec<u8> {
        let ymd = (year * 13 + month) << 5 | day;
        let hms = hour << 12 | minute << 6 | second;
        let packed = (ymd << 17 | hms) + DATETIMEF_INT_OFS;

        let mut data = packed.to_be_bytes()[3..].to_vec();
        match meta {
            1 | 2 => data.push((micros / 10_000) as u8),
            3 | 4 => data.extend_from_slice(&((micros / 100) as u16).to_be_bytes()),
            5 | 6 => data.extend_from_slice(&micros.to_be_bytes()[1..]),
            _ => {}
        }
        data
    }

    #[test]
    fn test_datetime2_round_trip() {
        for meta in 0..=6u16 {
            let micros: u32 = match meta {
                0 => 0,
                1 | 2 => 250_000,
                3 | 4 => 123_400,
                _ => 123_456,
            };
            let data = encode_datetime2(2023, 11, 5, 13, 59, 7, micros, meta);
            let mut cursor = Cursor::new(data.as_slice());
            let t = parse_datetime2(&mut cursor, meta).unwrap();
            assert_eq!(cursor.position() as usize, data.len());

            assert_eq!((t.year(), t.month(), t.day()), (2023, 11, 5), "meta {}", meta);
            assert_eq!((t.hour(), t.minute(), t.second()), (13, 59, 7));
            assert_eq!(t.and_utc().timestamp_subsec_micros(), micros);
        }
    }

    #[test]
    fn test_timestamp2() {
        // 2021-01-01 00:00:00.25 UTC
        let mut data = 1_609_459_200u32.to_be_bytes().to_vec();
        data.push(25);
        let column = decode(&data, 17, 2);
        assert_eq!(column.render(), "2021-01-01 00:00:00");
        match column.value {
            ColumnValue::Temporal(t) => {
                assert_eq!(t.and_utc().timestamp_subsec_micros(), 250_000)
            }
            other => panic!("expected temporal, got {:?}", other),
        }
    }

    #[test]
    fn test_time2() {
        // 12:34:56, no fraction
        let int_part: i64 = (12 << 12) | (34 << 6) | 56;
        let data = ((int_part + TIMEF_INT_OFS) as u64).to_be_bytes()[5..].to_vec();
        let column = decode(&data, 19, 0);
        assert_eq!(column.render(), "12:34:56");

        // 00:00:01.50 stored negative: -(1.5s)
        let mut data = ((TIMEF_INT_OFS - 2) as u64).to_be_bytes()[5..].to_vec();
        data.push((0x100u16 - 50) as u8);
        let mut cursor = Cursor::new(data.as_slice());
        let t = parse_time2(&mut cursor, 2).unwrap();
        let delta = t - NaiveDateTime::UNIX_EPOCH;
        assert_eq!(delta.num_milliseconds(), -1_500);
    }

    #[test]
    fn test_row_column_count_matches_table_map() {
        let table_map = TableMapEvent {
            table_id: 1,
            flags: 0,
            schema_name: "d".to_string(),
            table_name: "t".to_string(),
            column_count: 3,
            column_types: vec![0x03, 0x0F, 0x0F],
            column_metas: vec![0, 255, 255],
            nullable_columns: vec![false, true, true],
        };

        // null bitmap: column 2 NULL; then LONG(7), "a"
        let data = [0b0000_0100u8, 7, 0, 0, 0, 1, b'a'];
        let mut cursor = Cursor::new(&data[..]);
        let row = parse_row(&mut cursor, &table_map, &[true, true, true]).unwrap();

        assert_eq!(row.columns.len(), table_map.column_count);
        assert_eq!(row.null_bitmap.len(), table_map.column_count);
        assert_eq!(row.present_bitmap.len(), table_map.column_count);
        assert_eq!(row.columns[0].value, ColumnValue::Int(7));
        assert_eq!(row.columns[1].value, ColumnValue::String("a".to_string()));
        assert!(row.columns[2].is_null);
        assert_eq!(row.columns[2].render(), "[NULL]");
    }

    #[test]
    fn test_absent_columns_keep_positions() {
        let table_map = TableMapEvent {
            table_id: 1,
            flags: 0,
            schema_name: "d".to_string(),
            table_name: "t".to_string(),
            column_count: 2,
            column_types: vec![0x03, 0x03],
            column_metas: vec![0, 0],
            nullable_columns: vec![false, false],
        };

        let data = [0u8, 9, 0, 0, 0];
        let mut cursor = Cursor::new(&data[..]);
        let row = parse_row(&mut cursor, &table_map, &[false, true]).unwrap();

        assert!(!row.columns[0].present);
        assert_eq!(row.columns[1].value, ColumnValue::Int(9));
    }

    #[test]
    fn test_old_datetime() {
        let value: u64 = 2020_03_07_12_34_56;
        let data = value.to_le_bytes();
        let column = decode(&data, 12, 0);
        assert_eq!(column.render(), "2020-03-07 12:34:56");
    }

    #[test]
    fn test_zero_date_collapses_to_epoch() {
        let data = [0u8, 0, 0];
        let column = decode(&data, 10, 0);
        assert_eq!(
            column.value,
            ColumnValue::Temporal(NaiveDateTime::UNIX_EPOCH)
        );
    }

    #[test]
    fn test_decimal_padded_middle_group() {
        // DECIMAL(18,0) 1000000007: groups [1, 7] must render zero-padded
        let meta = 18u16 << 8;
        let mut data = vec![0u8; 8];
        data[3] = 1; // leading group (9 leftover digits -> 4 bytes)
        data[7] = 7; // full group
        data[0] |= 0x80;
        assert_eq!(
            decode(&data, 0xF6, meta).value,
            ColumnValue::Decimal("1000000007.0".to_string())
        );
    }

    #[test]
    fn test_unknown_type_marks_absent() {
        let data: [u8; 0] = [];
        let column = decode(&data, 0xF4, 0);
        assert!(!column.present);
        assert_eq!(column.value, ColumnValue::Unknown);
    }

    #[test]
    fn test_old_time() {
        let value: i32 = 123456; // 12:34:56
        let bytes = value.to_le_bytes();
        let column = decode(&bytes[..3], 11, 0);
        assert_eq!(column.render(), "12:34:56");
    }

    #[test]
    fn test_date_render_matches_chrono() {
        let date = NaiveDate::from_ymd_opt(1999, 12, 31).unwrap();
        let packed: u32 = 31 | (12 << 5) | (1999 << 9);
        let data = packed.to_le_bytes();
        let column = decode(&data[..3], 10, 0);
        assert_eq!(column.render(), date.format("%Y-%m-%d").to_string());
    }
}

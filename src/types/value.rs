//! # Owned SQL Value Representation
//!
//! This module provides `SqlValue`, the owned runtime representation for
//! scalar SQL values flowing through the array codec, and `ValueKind`, its
//! single-byte discriminant tag.
//!
//! ## Value Variants
//!
//! | Variant | Rust Type | Description |
//! |---------|-----------|-------------|
//! | Bool | bool | SQL BOOLEAN |
//! | Int2 | i16 | 16-bit signed integer |
//! | Int4 | i32 | 32-bit signed integer |
//! | Int8 | i64 | 64-bit signed integer |
//! | Float4 | f32 | 32-bit floating point |
//! | Float8 | f64 | 64-bit floating point |
//! | Decimal | {digits: i128, scale: i16} | Fixed-point decimal |
//! | Text | String | UTF-8 string |
//! | Char | char | Single character |
//! | Bytes | Vec<u8> | Binary data |
//! | Uuid | [u8; 16] | UUID bytes |
//! | Date | i32 | Days since 1970-01-01 |
//! | Time | i64 | Microseconds since midnight |
//! | TimeTz | {micros, offset_secs} | Time with UTC offset |
//! | Timestamp | i64 | Microseconds since epoch |
//! | Array | Vec<Option<SqlValue>> | Nested array (elements nullable) |
//!
//! ## Null Handling
//!
//! There is no `Null` variant. Nullability is expressed by wrapping in
//! `Option` at each position where SQL NULL is possible: array elements are
//! `Option<SqlValue>`, and whole array values are `Option<Vec<...>>`. This
//! keeps "absent array", "empty array", and "array containing NULLs" as three
//! structurally different shapes.
//!
//! ## Host vs. Driver Representation
//!
//! The same enum serves as both the host-side value and the driver-level
//! element representation. Codecs whose driver shape differs from the host
//! shape (time-with-offset binding as plain time, text-mapped UUIDs) convert
//! between variants in their outbound/inbound paths and declare the target
//! variant through `ScalarCodec::driver_kind`.

/// Owned scalar SQL value.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Bool(bool),
    Int2(i16),
    Int4(i32),
    Int8(i64),
    Float4(f32),
    Float8(f64),
    Decimal(i128, i16),
    Text(String),
    Char(char),
    Bytes(Vec<u8>),
    Uuid([u8; 16]),
    Date(i32),
    Time(i64),
    TimeTz(i64, i32),
    Timestamp(i64),
    Array(Vec<Option<SqlValue>>),
}

/// Discriminant tag for `SqlValue`.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Bool = 0,
    Int2 = 1,
    Int4 = 2,
    Int8 = 3,
    Float4 = 4,
    Float8 = 5,
    Decimal = 6,
    Text = 7,
    Char = 8,
    Bytes = 9,
    Uuid = 10,
    Date = 11,
    Time = 12,
    TimeTz = 13,
    Timestamp = 14,
    Array = 15,
}

/// Feeds a stable structural hash of a value into the hasher. Floats hash by
/// bit pattern, nested arrays hash length-then-elements with a sentinel for
/// NULL slots.
pub(crate) fn hash_sql_value(value: &SqlValue, state: &mut dyn std::hash::Hasher) {
    state.write_u8(value.kind() as u8);
    match value {
        SqlValue::Bool(v) => state.write_u8(*v as u8),
        SqlValue::Int2(v) => state.write_i16(*v),
        SqlValue::Int4(v) => state.write_i32(*v),
        SqlValue::Int8(v) => state.write_i64(*v),
        SqlValue::Float4(v) => state.write_u32(v.to_bits()),
        SqlValue::Float8(v) => state.write_u64(v.to_bits()),
        SqlValue::Decimal(digits, scale) => {
            state.write_i128(*digits);
            state.write_i16(*scale);
        }
        SqlValue::Text(v) => state.write(v.as_bytes()),
        SqlValue::Char(v) => state.write_u32(*v as u32),
        SqlValue::Bytes(v) => state.write(v),
        SqlValue::Uuid(v) => state.write(v),
        SqlValue::Date(v) => state.write_i32(*v),
        SqlValue::Time(v) => state.write_i64(*v),
        SqlValue::TimeTz(micros, offset) => {
            state.write_i64(*micros);
            state.write_i32(*offset);
        }
        SqlValue::Timestamp(v) => state.write_i64(*v),
        SqlValue::Array(elements) => {
            state.write_usize(elements.len());
            for element in elements {
                match element {
                    None => state.write_u8(0x3f),
                    Some(v) => {
                        state.write_u8(1);
                        hash_sql_value(v, state);
                    }
                }
            }
        }
    }
}

impl SqlValue {
    /// Returns the discriminant tag for this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            SqlValue::Bool(_) => ValueKind::Bool,
            SqlValue::Int2(_) => ValueKind::Int2,
            SqlValue::Int4(_) => ValueKind::Int4,
            SqlValue::Int8(_) => ValueKind::Int8,
            SqlValue::Float4(_) => ValueKind::Float4,
            SqlValue::Float8(_) => ValueKind::Float8,
            SqlValue::Decimal(_, _) => ValueKind::Decimal,
            SqlValue::Text(_) => ValueKind::Text,
            SqlValue::Char(_) => ValueKind::Char,
            SqlValue::Bytes(_) => ValueKind::Bytes,
            SqlValue::Uuid(_) => ValueKind::Uuid,
            SqlValue::Date(_) => ValueKind::Date,
            SqlValue::Time(_) => ValueKind::Time,
            SqlValue::TimeTz(_, _) => ValueKind::TimeTz,
            SqlValue::Timestamp(_) => ValueKind::Timestamp,
            SqlValue::Array(_) => ValueKind::Array,
        }
    }

    /// Returns true if this value is a nested array.
    pub fn is_array(&self) -> bool {
        matches!(self, SqlValue::Array(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        assert_eq!(SqlValue::Int4(7).kind(), ValueKind::Int4);
        assert_eq!(SqlValue::Text("x".to_string()).kind(), ValueKind::Text);
        assert_eq!(SqlValue::Array(vec![]).kind(), ValueKind::Array);
        assert_eq!(SqlValue::TimeTz(0, 3600).kind(), ValueKind::TimeTz);
    }

    #[test]
    fn empty_and_null_element_arrays_differ() {
        let empty = SqlValue::Array(vec![]);
        let one_null = SqlValue::Array(vec![None]);
        assert_ne!(empty, one_null);
    }
}

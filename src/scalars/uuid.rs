//! UUID scalar codecs.
//!
//! Two representations of the same 16 host bytes: `pg-uuid` targets a native
//! uuid column (an opaque vendor type, so its array type name is pinned to
//! `uuid` at construction), while `uuid-char` persists through a varchar
//! column and converts to hyphenated text on the way out.

use eyre::{bail, ensure, Result, WrapErr};

use crate::types::{ScalarCodec, SqlTypeCode, SqlValue, ValueKind};

fn keys(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

pub(crate) fn format_uuid(bytes: &[u8; 16]) -> String {
    let hex: String = bytes.iter().map(|b| format!("{:02x}", b)).collect();
    format!(
        "{}-{}-{}-{}-{}",
        &hex[0..8],
        &hex[8..12],
        &hex[12..16],
        &hex[16..20],
        &hex[20..32]
    )
}

pub(crate) fn parse_uuid(text: &str) -> Result<[u8; 16]> {
    let text = text.trim();
    let hex_only: String = text.chars().filter(|c| *c != '-').collect();
    ensure!(
        hex_only.len() == 32 && hex_only.is_ascii(),
        "invalid UUID format '{}': expected 32 hex chars, got {}",
        text,
        hex_only.len()
    );

    let mut bytes = [0u8; 16];
    for (i, chunk) in hex_only.as_bytes().chunks(2).enumerate() {
        let pair = std::str::from_utf8(chunk).expect("ASCII checked above");
        bytes[i] = u8::from_str_radix(pair, 16)
            .wrap_err_with(|| format!("invalid hex in UUID: '{}'", pair))?;
    }
    Ok(bytes)
}

/// Native uuid columns (vendor-specific opaque type).
#[derive(Debug)]
pub struct PgUuidCodec {
    keys: Vec<String>,
}

impl PgUuidCodec {
    pub fn new() -> Self {
        Self {
            keys: keys(&["pg-uuid", "uuid", "Uuid"]),
        }
    }
}

impl ScalarCodec for PgUuidCodec {
    fn name(&self) -> &str {
        "pg-uuid"
    }

    fn registration_keys(&self) -> &[String] {
        &self.keys
    }

    fn sql_type(&self) -> SqlTypeCode {
        SqlTypeCode::Other
    }

    fn vendor_type_name(&self) -> Option<&str> {
        Some("uuid")
    }

    fn host_kind(&self) -> ValueKind {
        ValueKind::Uuid
    }

    fn quoted_literal(&self) -> bool {
        false
    }

    fn to_text(&self, value: &SqlValue) -> Result<String> {
        match value {
            SqlValue::Uuid(bytes) => Ok(format_uuid(bytes)),
            other => bail!("unknown conversion from {:?} to uuid text", other.kind()),
        }
    }

    fn from_text(&self, text: &str) -> Result<SqlValue> {
        Ok(SqlValue::Uuid(parse_uuid(text)?))
    }
}

/// UUIDs persisted as hyphenated text in varchar columns.
#[derive(Debug)]
pub struct UuidCharCodec {
    keys: Vec<String>,
}

impl UuidCharCodec {
    pub fn new() -> Self {
        Self {
            keys: keys(&["uuid-char"]),
        }
    }
}

impl ScalarCodec for UuidCharCodec {
    fn name(&self) -> &str {
        "uuid-char"
    }

    fn registration_keys(&self) -> &[String] {
        &self.keys
    }

    fn sql_type(&self) -> SqlTypeCode {
        SqlTypeCode::Varchar
    }

    fn host_kind(&self) -> ValueKind {
        ValueKind::Uuid
    }

    fn driver_kind(&self) -> ValueKind {
        ValueKind::Text
    }

    fn quoted_literal(&self) -> bool {
        false
    }

    fn to_text(&self, value: &SqlValue) -> Result<String> {
        match value {
            SqlValue::Uuid(bytes) => Ok(format_uuid(bytes)),
            other => bail!("unknown conversion from {:?} to uuid text", other.kind()),
        }
    }

    fn from_text(&self, text: &str) -> Result<SqlValue> {
        Ok(SqlValue::Uuid(parse_uuid(text)?))
    }

    fn to_driver(&self, value: &SqlValue) -> Result<SqlValue> {
        match value {
            SqlValue::Uuid(bytes) => Ok(SqlValue::Text(format_uuid(bytes))),
            other => bail!("unknown conversion from {:?} to uuid varchar", other.kind()),
        }
    }

    fn from_driver(&self, value: &SqlValue) -> Result<SqlValue> {
        match value {
            SqlValue::Uuid(bytes) => Ok(SqlValue::Uuid(*bytes)),
            SqlValue::Text(text) => Ok(SqlValue::Uuid(parse_uuid(text)?)),
            other => bail!("unknown conversion from {:?} to uuid", other.kind()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: [u8; 16] = [
        0x55, 0x0e, 0x84, 0x00, 0xe2, 0x9b, 0x41, 0xd4, 0xa7, 0x16, 0x44, 0x66, 0x55, 0x44,
        0x00, 0x00,
    ];

    #[test]
    fn uuid_text_round_trip() {
        let codec = PgUuidCodec::new();
        let v = SqlValue::Uuid(SAMPLE);
        let text = codec.to_text(&v).unwrap();
        assert_eq!(text, "550e8400-e29b-41d4-a716-446655440000");
        assert_eq!(codec.from_text(&text).unwrap(), v);
    }

    #[test]
    fn compact_form_accepted() {
        let codec = PgUuidCodec::new();
        assert_eq!(
            codec
                .from_text("550e8400e29b41d4a716446655440000")
                .unwrap(),
            SqlValue::Uuid(SAMPLE)
        );
    }

    #[test]
    fn wrong_length_rejected() {
        let codec = PgUuidCodec::new();
        let err = codec.from_text("550e8400-e29b").unwrap_err();
        assert!(err.to_string().contains("expected 32 hex chars"));
    }

    #[test]
    fn uuid_char_drives_as_text() {
        let codec = UuidCharCodec::new();
        let driven = codec.to_driver(&SqlValue::Uuid(SAMPLE)).unwrap();
        assert_eq!(
            driven,
            SqlValue::Text("550e8400-e29b-41d4-a716-446655440000".to_string())
        );
        assert_eq!(codec.from_driver(&driven).unwrap(), SqlValue::Uuid(SAMPLE));
    }
}

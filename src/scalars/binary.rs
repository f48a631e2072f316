//! Binary data scalar codec.
//!
//! The text form is hex with the PostgreSQL `\x` prefix; the `0x` prefix and
//! bare hex are accepted on input. Because the rendered form always contains
//! a backslash, the array literal layer's forced-quoting rule kicks in even
//! for this numerically-tagged codec.

use eyre::{bail, ensure, Result};

use crate::types::{ScalarCodec, SqlTypeCode, SqlValue, ValueKind};

/// BYTEA/VARBINARY columns, hex text form with the PostgreSQL `\x` prefix.
#[derive(Debug)]
pub struct ByteaCodec {
    keys: Vec<String>,
}

impl ByteaCodec {
    pub fn new() -> Self {
        Self {
            keys: ["binary", "bytea", "Bytes"]
                .iter()
                .map(|n| n.to_string())
                .collect(),
        }
    }
}

impl ScalarCodec for ByteaCodec {
    fn name(&self) -> &str {
        "binary"
    }

    fn registration_keys(&self) -> &[String] {
        &self.keys
    }

    fn sql_type(&self) -> SqlTypeCode {
        SqlTypeCode::VarBinary
    }

    fn host_kind(&self) -> ValueKind {
        ValueKind::Bytes
    }

    fn to_text(&self, value: &SqlValue) -> Result<String> {
        match value {
            SqlValue::Bytes(bytes) => {
                let mut out = String::with_capacity(bytes.len() * 2 + 2);
                out.push_str("\\x");
                for byte in bytes {
                    out.push_str(&format!("{:02x}", byte));
                }
                Ok(out)
            }
            other => bail!("unknown conversion from {:?} to bytea text", other.kind()),
        }
    }

    fn from_text(&self, text: &str) -> Result<SqlValue> {
        let hex = text
            .trim()
            .strip_prefix("\\x")
            .or_else(|| text.trim().strip_prefix("0x"))
            .unwrap_or_else(|| text.trim());
        ensure!(hex.is_ascii(), "invalid hex string: non-ASCII characters");
        ensure!(
            hex.len() % 2 == 0,
            "hex string must have even length, got {}",
            hex.len()
        );
        let mut bytes = Vec::with_capacity(hex.len() / 2);
        for i in (0..hex.len()).step_by(2) {
            let byte = u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| eyre::eyre!("invalid hex byte: '{}'", &hex[i..i + 2]))?;
            bytes.push(byte);
        }
        Ok(SqlValue::Bytes(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytea_hex_round_trip() {
        let codec = ByteaCodec::new();
        let v = SqlValue::Bytes(vec![0x48, 0x45, 0x4c, 0x4c, 0x4f]);
        let text = codec.to_text(&v).unwrap();
        assert_eq!(text, "\\x48454c4c4f");
        assert_eq!(codec.from_text(&text).unwrap(), v);
        // bare hex without prefix also accepted
        assert_eq!(codec.from_text("48454c4c4f").unwrap(), v);
    }

    #[test]
    fn bytea_rejects_odd_length() {
        let codec = ByteaCodec::new();
        assert!(codec.from_text("abc").is_err());
        assert!(codec.from_text("zz").is_err());
    }

    #[test]
    fn empty_bytes_render_as_prefix_only() {
        let codec = ByteaCodec::new();
        let v = SqlValue::Bytes(vec![]);
        assert_eq!(codec.to_text(&v).unwrap(), "\\x");
        assert_eq!(codec.from_text("\\x").unwrap(), v);
    }
}

//! Text and character scalar codecs.
//!
//! Text values are the identity case of the codec interface: the literal
//! text form *is* the value. All quoting and escaping belongs to the array
//! literal layer, so these codecs pass text through untouched.

use eyre::{bail, Result};

use crate::types::{ScalarCodec, SqlTypeCode, SqlValue, ValueKind};

fn keys(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

/// VARCHAR columns.
#[derive(Debug)]
pub struct VarcharCodec {
    keys: Vec<String>,
}

impl VarcharCodec {
    pub fn new() -> Self {
        Self {
            keys: keys(&["string", "varchar", "String"]),
        }
    }
}

impl ScalarCodec for VarcharCodec {
    fn name(&self) -> &str {
        "string"
    }

    fn registration_keys(&self) -> &[String] {
        &self.keys
    }

    fn sql_type(&self) -> SqlTypeCode {
        SqlTypeCode::Varchar
    }

    fn host_kind(&self) -> ValueKind {
        ValueKind::Text
    }

    fn to_text(&self, value: &SqlValue) -> Result<String> {
        match value {
            SqlValue::Text(v) => Ok(v.clone()),
            other => bail!("unknown conversion from {:?} to string text", other.kind()),
        }
    }

    fn from_text(&self, text: &str) -> Result<SqlValue> {
        Ok(SqlValue::Text(text.to_string()))
    }
}

/// TEXT columns (unbounded character data).
#[derive(Debug)]
pub struct TextCodec {
    keys: Vec<String>,
}

impl TextCodec {
    pub fn new() -> Self {
        Self {
            keys: keys(&["text"]),
        }
    }
}

impl ScalarCodec for TextCodec {
    fn name(&self) -> &str {
        "text"
    }

    fn registration_keys(&self) -> &[String] {
        &self.keys
    }

    fn sql_type(&self) -> SqlTypeCode {
        SqlTypeCode::LongVarchar
    }

    fn host_kind(&self) -> ValueKind {
        ValueKind::Text
    }

    fn to_text(&self, value: &SqlValue) -> Result<String> {
        match value {
            SqlValue::Text(v) => Ok(v.clone()),
            other => bail!("unknown conversion from {:?} to text", other.kind()),
        }
    }

    fn from_text(&self, text: &str) -> Result<SqlValue> {
        Ok(SqlValue::Text(text.to_string()))
    }
}

/// Single-character CHAR(1) columns.
#[derive(Debug)]
pub struct CharacterCodec {
    keys: Vec<String>,
}

impl CharacterCodec {
    pub fn new() -> Self {
        Self {
            keys: keys(&["character", "char"]),
        }
    }
}

impl ScalarCodec for CharacterCodec {
    fn name(&self) -> &str {
        "character"
    }

    fn registration_keys(&self) -> &[String] {
        &self.keys
    }

    fn sql_type(&self) -> SqlTypeCode {
        SqlTypeCode::Char
    }

    fn host_kind(&self) -> ValueKind {
        ValueKind::Char
    }

    fn to_text(&self, value: &SqlValue) -> Result<String> {
        match value {
            SqlValue::Char(c) => Ok(c.to_string()),
            other => bail!("unknown conversion from {:?} to character text", other.kind()),
        }
    }

    fn from_text(&self, text: &str) -> Result<SqlValue> {
        let mut chars = text.chars();
        let c = match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => bail!("invalid character: '{}' is not exactly one character", text),
        };
        Ok(SqlValue::Char(c))
    }
}

/// National (UTF-16 on legacy drivers) VARCHAR columns.
#[derive(Debug)]
pub struct NVarcharCodec {
    keys: Vec<String>,
}

impl NVarcharCodec {
    pub fn new() -> Self {
        Self {
            keys: keys(&["nstring"]),
        }
    }
}

impl ScalarCodec for NVarcharCodec {
    fn name(&self) -> &str {
        "nstring"
    }

    fn registration_keys(&self) -> &[String] {
        &self.keys
    }

    fn sql_type(&self) -> SqlTypeCode {
        SqlTypeCode::NVarchar
    }

    fn host_kind(&self) -> ValueKind {
        ValueKind::Text
    }

    fn to_text(&self, value: &SqlValue) -> Result<String> {
        match value {
            SqlValue::Text(v) => Ok(v.clone()),
            other => bail!("unknown conversion from {:?} to nstring text", other.kind()),
        }
    }

    fn from_text(&self, text: &str) -> Result<SqlValue> {
        Ok(SqlValue::Text(text.to_string()))
    }
}

/// National TEXT columns.
#[derive(Debug)]
pub struct NTextCodec {
    keys: Vec<String>,
}

impl NTextCodec {
    pub fn new() -> Self {
        Self {
            keys: keys(&["ntext"]),
        }
    }
}

impl ScalarCodec for NTextCodec {
    fn name(&self) -> &str {
        "ntext"
    }

    fn registration_keys(&self) -> &[String] {
        &self.keys
    }

    fn sql_type(&self) -> SqlTypeCode {
        SqlTypeCode::LongNVarchar
    }

    fn host_kind(&self) -> ValueKind {
        ValueKind::Text
    }

    fn to_text(&self, value: &SqlValue) -> Result<String> {
        match value {
            SqlValue::Text(v) => Ok(v.clone()),
            other => bail!("unknown conversion from {:?} to ntext", other.kind()),
        }
    }

    fn from_text(&self, text: &str) -> Result<SqlValue> {
        Ok(SqlValue::Text(text.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn varchar_is_identity() {
        let codec = VarcharCodec::new();
        assert_eq!(
            codec.from_text("null").unwrap(),
            SqlValue::Text("null".to_string())
        );
        assert_eq!(
            codec
                .to_text(&SqlValue::Text("".to_string()))
                .unwrap(),
            ""
        );
    }

    #[test]
    fn character_requires_one_char() {
        let codec = CharacterCodec::new();
        assert_eq!(codec.from_text("x").unwrap(), SqlValue::Char('x'));
        assert!(codec.from_text("xy").is_err());
        assert!(codec.from_text("").is_err());
    }
}

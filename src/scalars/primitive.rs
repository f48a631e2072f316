//! Boolean and numeric scalar codecs.
//!
//! The boolean family mirrors the classic mapper palette: a plain BOOLEAN
//! column, a 0/1 integer column, and single-character T/F and Y/N columns.
//! All four share the `bool` host representation and differ only in their
//! driver representation and text form.

use eyre::{bail, ensure, Result, WrapErr};

use crate::types::{ScalarCodec, SqlTypeCode, SqlValue, ValueKind};

fn keys(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

/// SQL BOOLEAN columns, `true`/`false` literals.
#[derive(Debug)]
pub struct BooleanCodec {
    keys: Vec<String>,
}

impl BooleanCodec {
    pub fn new() -> Self {
        Self {
            keys: keys(&["boolean", "bool"]),
        }
    }
}

impl ScalarCodec for BooleanCodec {
    fn name(&self) -> &str {
        "boolean"
    }

    fn registration_keys(&self) -> &[String] {
        &self.keys
    }

    fn sql_type(&self) -> SqlTypeCode {
        SqlTypeCode::Boolean
    }

    fn host_kind(&self) -> ValueKind {
        ValueKind::Bool
    }

    fn quoted_literal(&self) -> bool {
        false
    }

    fn to_text(&self, value: &SqlValue) -> Result<String> {
        match value {
            SqlValue::Bool(v) => Ok(if *v { "true" } else { "false" }.to_string()),
            other => bail!("unknown conversion from {:?} to boolean text", other.kind()),
        }
    }

    fn from_text(&self, text: &str) -> Result<SqlValue> {
        let text = text.trim();
        if text.eq_ignore_ascii_case("true") || text.eq_ignore_ascii_case("t") || text == "1" {
            Ok(SqlValue::Bool(true))
        } else if text.eq_ignore_ascii_case("false")
            || text.eq_ignore_ascii_case("f")
            || text == "0"
        {
            Ok(SqlValue::Bool(false))
        } else {
            bail!("invalid boolean: '{}'", text)
        }
    }
}

/// Booleans persisted as 0/1 integers.
#[derive(Debug)]
pub struct NumericBooleanCodec {
    keys: Vec<String>,
}

impl NumericBooleanCodec {
    pub fn new() -> Self {
        Self {
            keys: keys(&["numeric_boolean"]),
        }
    }
}

impl ScalarCodec for NumericBooleanCodec {
    fn name(&self) -> &str {
        "numeric_boolean"
    }

    fn registration_keys(&self) -> &[String] {
        &self.keys
    }

    fn sql_type(&self) -> SqlTypeCode {
        SqlTypeCode::Integer
    }

    fn host_kind(&self) -> ValueKind {
        ValueKind::Bool
    }

    fn driver_kind(&self) -> ValueKind {
        ValueKind::Int4
    }

    fn quoted_literal(&self) -> bool {
        false
    }

    fn to_text(&self, value: &SqlValue) -> Result<String> {
        match value {
            SqlValue::Bool(v) => Ok(if *v { "1" } else { "0" }.to_string()),
            other => bail!(
                "unknown conversion from {:?} to numeric boolean text",
                other.kind()
            ),
        }
    }

    fn from_text(&self, text: &str) -> Result<SqlValue> {
        match text.trim() {
            "1" => Ok(SqlValue::Bool(true)),
            "0" => Ok(SqlValue::Bool(false)),
            other => bail!("invalid numeric boolean: '{}'", other),
        }
    }

    fn to_driver(&self, value: &SqlValue) -> Result<SqlValue> {
        match value {
            SqlValue::Bool(v) => Ok(SqlValue::Int4(*v as i32)),
            other => bail!(
                "unknown conversion from {:?} to numeric boolean",
                other.kind()
            ),
        }
    }

    fn from_driver(&self, value: &SqlValue) -> Result<SqlValue> {
        match value {
            SqlValue::Bool(v) => Ok(SqlValue::Bool(*v)),
            SqlValue::Int4(v) => Ok(SqlValue::Bool(*v != 0)),
            SqlValue::Int8(v) => Ok(SqlValue::Bool(*v != 0)),
            other => bail!(
                "unknown conversion from {:?} to numeric boolean",
                other.kind()
            ),
        }
    }
}

/// Booleans persisted as `T`/`F` characters.
#[derive(Debug)]
pub struct TrueFalseCodec {
    keys: Vec<String>,
}

impl TrueFalseCodec {
    pub fn new() -> Self {
        Self {
            keys: keys(&["true_false"]),
        }
    }
}

impl ScalarCodec for TrueFalseCodec {
    fn name(&self) -> &str {
        "true_false"
    }

    fn registration_keys(&self) -> &[String] {
        &self.keys
    }

    fn sql_type(&self) -> SqlTypeCode {
        SqlTypeCode::Char
    }

    fn host_kind(&self) -> ValueKind {
        ValueKind::Bool
    }

    fn driver_kind(&self) -> ValueKind {
        ValueKind::Char
    }

    fn to_text(&self, value: &SqlValue) -> Result<String> {
        match value {
            SqlValue::Bool(v) => Ok(if *v { "T" } else { "F" }.to_string()),
            other => bail!("unknown conversion from {:?} to T/F text", other.kind()),
        }
    }

    fn from_text(&self, text: &str) -> Result<SqlValue> {
        match text.trim() {
            "T" | "t" => Ok(SqlValue::Bool(true)),
            "F" | "f" => Ok(SqlValue::Bool(false)),
            other => bail!("invalid T/F boolean: '{}'", other),
        }
    }

    fn to_driver(&self, value: &SqlValue) -> Result<SqlValue> {
        match value {
            SqlValue::Bool(v) => Ok(SqlValue::Char(if *v { 'T' } else { 'F' })),
            other => bail!("unknown conversion from {:?} to T/F char", other.kind()),
        }
    }

    fn from_driver(&self, value: &SqlValue) -> Result<SqlValue> {
        match value {
            SqlValue::Bool(v) => Ok(SqlValue::Bool(*v)),
            SqlValue::Char(c) => self.from_text(&c.to_string()),
            SqlValue::Text(s) => self.from_text(s),
            other => bail!("unknown conversion from {:?} to T/F boolean", other.kind()),
        }
    }
}

/// Booleans persisted as `Y`/`N` characters.
#[derive(Debug)]
pub struct YesNoCodec {
    keys: Vec<String>,
}

impl YesNoCodec {
    pub fn new() -> Self {
        Self {
            keys: keys(&["yes_no"]),
        }
    }
}

impl ScalarCodec for YesNoCodec {
    fn name(&self) -> &str {
        "yes_no"
    }

    fn registration_keys(&self) -> &[String] {
        &self.keys
    }

    fn sql_type(&self) -> SqlTypeCode {
        SqlTypeCode::Char
    }

    fn host_kind(&self) -> ValueKind {
        ValueKind::Bool
    }

    fn driver_kind(&self) -> ValueKind {
        ValueKind::Char
    }

    fn to_text(&self, value: &SqlValue) -> Result<String> {
        match value {
            SqlValue::Bool(v) => Ok(if *v { "Y" } else { "N" }.to_string()),
            other => bail!("unknown conversion from {:?} to Y/N text", other.kind()),
        }
    }

    fn from_text(&self, text: &str) -> Result<SqlValue> {
        match text.trim() {
            "Y" | "y" => Ok(SqlValue::Bool(true)),
            "N" | "n" => Ok(SqlValue::Bool(false)),
            other => bail!("invalid Y/N boolean: '{}'", other),
        }
    }

    fn to_driver(&self, value: &SqlValue) -> Result<SqlValue> {
        match value {
            SqlValue::Bool(v) => Ok(SqlValue::Char(if *v { 'Y' } else { 'N' })),
            other => bail!("unknown conversion from {:?} to Y/N char", other.kind()),
        }
    }

    fn from_driver(&self, value: &SqlValue) -> Result<SqlValue> {
        match value {
            SqlValue::Bool(v) => Ok(SqlValue::Bool(*v)),
            SqlValue::Char(c) => self.from_text(&c.to_string()),
            SqlValue::Text(s) => self.from_text(s),
            other => bail!("unknown conversion from {:?} to Y/N boolean", other.kind()),
        }
    }
}

/// SQL SMALLINT columns.
#[derive(Debug)]
pub struct SmallIntCodec {
    keys: Vec<String>,
}

impl SmallIntCodec {
    pub fn new() -> Self {
        Self {
            keys: keys(&["smallint", "int2", "i16"]),
        }
    }
}

impl ScalarCodec for SmallIntCodec {
    fn name(&self) -> &str {
        "smallint"
    }

    fn registration_keys(&self) -> &[String] {
        &self.keys
    }

    fn sql_type(&self) -> SqlTypeCode {
        SqlTypeCode::SmallInt
    }

    fn host_kind(&self) -> ValueKind {
        ValueKind::Int2
    }

    fn quoted_literal(&self) -> bool {
        false
    }

    fn to_text(&self, value: &SqlValue) -> Result<String> {
        match value {
            SqlValue::Int2(v) => Ok(v.to_string()),
            other => bail!("unknown conversion from {:?} to smallint text", other.kind()),
        }
    }

    fn from_text(&self, text: &str) -> Result<SqlValue> {
        let v: i16 = text
            .trim()
            .parse()
            .wrap_err_with(|| format!("invalid smallint: '{}'", text))?;
        Ok(SqlValue::Int2(v))
    }
}

/// SQL INTEGER columns.
#[derive(Debug)]
pub struct IntegerCodec {
    keys: Vec<String>,
}

impl IntegerCodec {
    pub fn new() -> Self {
        Self {
            keys: keys(&["integer", "int4", "i32"]),
        }
    }
}

impl ScalarCodec for IntegerCodec {
    fn name(&self) -> &str {
        "integer"
    }

    fn registration_keys(&self) -> &[String] {
        &self.keys
    }

    fn sql_type(&self) -> SqlTypeCode {
        SqlTypeCode::Integer
    }

    fn host_kind(&self) -> ValueKind {
        ValueKind::Int4
    }

    fn quoted_literal(&self) -> bool {
        false
    }

    fn to_text(&self, value: &SqlValue) -> Result<String> {
        match value {
            SqlValue::Int4(v) => Ok(v.to_string()),
            other => bail!("unknown conversion from {:?} to integer text", other.kind()),
        }
    }

    fn from_text(&self, text: &str) -> Result<SqlValue> {
        let v: i32 = text
            .trim()
            .parse()
            .wrap_err_with(|| format!("invalid integer: '{}'", text))?;
        Ok(SqlValue::Int4(v))
    }
}

/// SQL BIGINT columns.
#[derive(Debug)]
pub struct BigIntCodec {
    keys: Vec<String>,
}

impl BigIntCodec {
    pub fn new() -> Self {
        Self {
            keys: keys(&["bigint", "int8", "i64"]),
        }
    }
}

impl ScalarCodec for BigIntCodec {
    fn name(&self) -> &str {
        "bigint"
    }

    fn registration_keys(&self) -> &[String] {
        &self.keys
    }

    fn sql_type(&self) -> SqlTypeCode {
        SqlTypeCode::BigInt
    }

    fn host_kind(&self) -> ValueKind {
        ValueKind::Int8
    }

    fn quoted_literal(&self) -> bool {
        false
    }

    fn to_text(&self, value: &SqlValue) -> Result<String> {
        match value {
            SqlValue::Int8(v) => Ok(v.to_string()),
            other => bail!("unknown conversion from {:?} to bigint text", other.kind()),
        }
    }

    fn from_text(&self, text: &str) -> Result<SqlValue> {
        let v: i64 = text
            .trim()
            .parse()
            .wrap_err_with(|| format!("invalid bigint: '{}'", text))?;
        Ok(SqlValue::Int8(v))
    }
}

/// TINYINT columns, held in the 16-bit host slot with range enforcement.
#[derive(Debug)]
pub struct TinyIntCodec {
    keys: Vec<String>,
}

impl TinyIntCodec {
    pub fn new() -> Self {
        Self {
            keys: keys(&["byte", "tinyint", "i8"]),
        }
    }
}

impl ScalarCodec for TinyIntCodec {
    fn name(&self) -> &str {
        "byte"
    }

    fn registration_keys(&self) -> &[String] {
        &self.keys
    }

    fn sql_type(&self) -> SqlTypeCode {
        SqlTypeCode::TinyInt
    }

    fn host_kind(&self) -> ValueKind {
        ValueKind::Int2
    }

    fn quoted_literal(&self) -> bool {
        false
    }

    fn to_text(&self, value: &SqlValue) -> Result<String> {
        match value {
            SqlValue::Int2(v) => {
                ensure!(
                    (i8::MIN as i16..=i8::MAX as i16).contains(v),
                    "tinyint out of range: {}",
                    v
                );
                Ok(v.to_string())
            }
            other => bail!("unknown conversion from {:?} to tinyint text", other.kind()),
        }
    }

    fn from_text(&self, text: &str) -> Result<SqlValue> {
        let v: i8 = text
            .trim()
            .parse()
            .wrap_err_with(|| format!("invalid tinyint: '{}'", text))?;
        Ok(SqlValue::Int2(v as i16))
    }
}

/// SQL FLOAT/REAL columns (32-bit).
#[derive(Debug)]
pub struct FloatCodec {
    keys: Vec<String>,
}

impl FloatCodec {
    pub fn new() -> Self {
        Self {
            keys: keys(&["float", "float4", "f32"]),
        }
    }
}

impl ScalarCodec for FloatCodec {
    fn name(&self) -> &str {
        "float"
    }

    fn registration_keys(&self) -> &[String] {
        &self.keys
    }

    fn sql_type(&self) -> SqlTypeCode {
        SqlTypeCode::Float
    }

    fn host_kind(&self) -> ValueKind {
        ValueKind::Float4
    }

    fn quoted_literal(&self) -> bool {
        false
    }

    fn to_text(&self, value: &SqlValue) -> Result<String> {
        match value {
            SqlValue::Float4(v) => Ok(v.to_string()),
            other => bail!("unknown conversion from {:?} to float text", other.kind()),
        }
    }

    fn from_text(&self, text: &str) -> Result<SqlValue> {
        let v: f32 = text
            .trim()
            .parse()
            .wrap_err_with(|| format!("invalid float: '{}'", text))?;
        Ok(SqlValue::Float4(v))
    }

    fn equal(&self, a: &SqlValue, b: &SqlValue) -> bool {
        // bit equality, so NaN equals NaN and a cached NaN stays stable
        match (a, b) {
            (SqlValue::Float4(a), SqlValue::Float4(b)) => a.to_bits() == b.to_bits(),
            _ => false,
        }
    }
}

/// SQL DOUBLE PRECISION columns (64-bit).
#[derive(Debug)]
pub struct DoubleCodec {
    keys: Vec<String>,
}

impl DoubleCodec {
    pub fn new() -> Self {
        Self {
            keys: keys(&["double", "float8", "f64"]),
        }
    }
}

impl ScalarCodec for DoubleCodec {
    fn name(&self) -> &str {
        "double"
    }

    fn registration_keys(&self) -> &[String] {
        &self.keys
    }

    fn sql_type(&self) -> SqlTypeCode {
        SqlTypeCode::Double
    }

    fn host_kind(&self) -> ValueKind {
        ValueKind::Float8
    }

    fn quoted_literal(&self) -> bool {
        false
    }

    fn to_text(&self, value: &SqlValue) -> Result<String> {
        match value {
            SqlValue::Float8(v) => Ok(v.to_string()),
            other => bail!("unknown conversion from {:?} to double text", other.kind()),
        }
    }

    fn from_text(&self, text: &str) -> Result<SqlValue> {
        let v: f64 = text
            .trim()
            .parse()
            .wrap_err_with(|| format!("invalid double: '{}'", text))?;
        Ok(SqlValue::Float8(v))
    }

    fn equal(&self, a: &SqlValue, b: &SqlValue) -> bool {
        match (a, b) {
            (SqlValue::Float8(a), SqlValue::Float8(b)) => a.to_bits() == b.to_bits(),
            _ => false,
        }
    }
}

/// Fixed-point DECIMAL/NUMERIC columns, stored as scaled i128 digits.
#[derive(Debug)]
pub struct DecimalCodec {
    keys: Vec<String>,
}

impl DecimalCodec {
    pub fn new() -> Self {
        Self {
            keys: keys(&["decimal", "numeric", "Decimal"]),
        }
    }
}

impl ScalarCodec for DecimalCodec {
    fn name(&self) -> &str {
        "decimal"
    }

    fn registration_keys(&self) -> &[String] {
        &self.keys
    }

    fn sql_type(&self) -> SqlTypeCode {
        SqlTypeCode::Numeric
    }

    fn host_kind(&self) -> ValueKind {
        ValueKind::Decimal
    }

    fn quoted_literal(&self) -> bool {
        false
    }

    fn to_text(&self, value: &SqlValue) -> Result<String> {
        match value {
            SqlValue::Decimal(digits, scale) => Ok(format_decimal(*digits, *scale)),
            other => bail!("unknown conversion from {:?} to decimal text", other.kind()),
        }
    }

    fn from_text(&self, text: &str) -> Result<SqlValue> {
        parse_decimal(text.trim())
    }
}

fn format_decimal(digits: i128, scale: i16) -> String {
    if scale <= 0 {
        format!("{}", digits)
    } else {
        let divisor = 10i128.pow(scale as u32);
        let int_part = digits / divisor;
        let frac_part = (digits % divisor).abs();
        let sign = if digits < 0 && int_part == 0 { "-" } else { "" };
        format!(
            "{}{}.{:0>width$}",
            sign,
            int_part,
            frac_part,
            width = scale as usize
        )
    }
}

fn parse_decimal(text: &str) -> Result<SqlValue> {
    ensure!(!text.is_empty(), "invalid decimal: empty string");
    let (int_text, frac_text) = match text.split_once('.') {
        Some((i, f)) => (i, f),
        None => (text, ""),
    };
    ensure!(
        frac_text.chars().all(|c| c.is_ascii_digit()),
        "invalid decimal fraction: '{}'",
        text
    );
    // the sign rides along in the concatenation: "-0.5" joins to "-05"
    let joined = format!("{}{}", int_text, frac_text);
    let digits: i128 = joined
        .parse()
        .wrap_err_with(|| format!("invalid decimal: '{}'", text))?;
    Ok(SqlValue::Decimal(digits, frac_text.len() as i16))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_text_round_trip() {
        let codec = IntegerCodec::new();
        let v = SqlValue::Int4(-42);
        assert_eq!(codec.to_text(&v).unwrap(), "-42");
        assert_eq!(codec.from_text("-42").unwrap(), v);
    }

    #[test]
    fn integer_rejects_wrong_variant() {
        let codec = IntegerCodec::new();
        let err = codec.to_text(&SqlValue::Text("x".to_string())).unwrap_err();
        assert!(err.to_string().contains("unknown conversion"));
    }

    #[test]
    fn boolean_text_forms() {
        let codec = BooleanCodec::new();
        assert_eq!(codec.from_text("t").unwrap(), SqlValue::Bool(true));
        assert_eq!(codec.from_text("FALSE").unwrap(), SqlValue::Bool(false));
        assert!(codec.from_text("maybe").is_err());
    }

    #[test]
    fn numeric_boolean_driver_conversion() {
        let codec = NumericBooleanCodec::new();
        assert_eq!(
            codec.to_driver(&SqlValue::Bool(true)).unwrap(),
            SqlValue::Int4(1)
        );
        assert_eq!(
            codec.from_driver(&SqlValue::Int4(0)).unwrap(),
            SqlValue::Bool(false)
        );
    }

    #[test]
    fn yes_no_chars() {
        let codec = YesNoCodec::new();
        assert_eq!(
            codec.to_driver(&SqlValue::Bool(false)).unwrap(),
            SqlValue::Char('N')
        );
        assert_eq!(
            codec.from_driver(&SqlValue::Char('y')).unwrap(),
            SqlValue::Bool(true)
        );
    }

    #[test]
    fn tinyint_range_is_enforced() {
        let codec = TinyIntCodec::new();
        assert_eq!(codec.from_text("-128").unwrap(), SqlValue::Int2(-128));
        assert!(codec.from_text("200").is_err());
        assert!(codec.to_text(&SqlValue::Int2(300)).is_err());
    }

    #[test]
    fn float_nan_equals_itself() {
        let codec = DoubleCodec::new();
        let nan = SqlValue::Float8(f64::NAN);
        assert!(codec.equal(&nan, &nan.clone()));
        assert!(!codec.equal(&nan, &SqlValue::Float8(0.0)));
    }

    #[test]
    fn decimal_round_trip() {
        let codec = DecimalCodec::new();
        let v = SqlValue::Decimal(-12345, 2);
        assert_eq!(codec.to_text(&v).unwrap(), "-123.45");
        assert_eq!(codec.from_text("-123.45").unwrap(), v);
        assert_eq!(codec.from_text("616").unwrap(), SqlValue::Decimal(616, 0));
        assert_eq!(codec.from_text("-0.5").unwrap(), SqlValue::Decimal(-5, 1));
        assert_eq!(
            codec.to_text(&SqlValue::Decimal(-5, 1)).unwrap(),
            "-0.5"
        );
    }
}

//! # Portable SQL Type Codes
//!
//! [`SqlTypeCode`] is the portable numeric SQL type code carried by every
//! [`ScalarCodec`](super::ScalarCodec). The [`SqlTypeCode::code`] accessor
//! yields the underlying numeric value, which follows the JDBC
//! `java.sql.Types` constants the original wire contract uses
//! (`GenericArrayTypeDescriptor.java`, `import java.sql.Types`).
//!
//! Two codes drive type-name resolution specially:
//! [`SqlTypeCode::Other`] keeps the codec's declared name and
//! [`SqlTypeCode::Xml`] always resolves to `"xml"`; every other code asks the
//! dialect by its numeric value. [`SqlTypeCode::Array`] is the code used for
//! the named-bind array fallback.

/// Portable numeric SQL type code, one per base SQL type a codec describes.
///
/// The discriminant values mirror the JDBC `java.sql.Types` constants so the
/// numeric code reported by [`SqlTypeCode::code`] matches the original wire
/// contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SqlTypeCode {
    /// `Types.BOOLEAN`
    Boolean,
    /// `Types.TINYINT`
    TinyInt,
    /// `Types.SMALLINT`
    SmallInt,
    /// `Types.INTEGER`
    Integer,
    /// `Types.BIGINT`
    BigInt,
    /// `Types.FLOAT`
    Float,
    /// `Types.DOUBLE`
    Double,
    /// `Types.NUMERIC`
    Numeric,
    /// `Types.CHAR`
    Char,
    /// `Types.VARCHAR`
    Varchar,
    /// `Types.LONGVARCHAR`
    LongVarchar,
    /// `Types.NVARCHAR`
    NVarchar,
    /// `Types.LONGNVARCHAR`
    LongNVarchar,
    /// `Types.VARBINARY`
    VarBinary,
    /// `Types.DATE`
    Date,
    /// `Types.TIME`
    Time,
    /// `Types.TIMESTAMP`
    Timestamp,
    /// `Types.ARRAY`
    Array,
    /// `Types.OTHER`
    Other,
    /// `Types.SQLXML`
    Xml,
}

impl SqlTypeCode {
    /// The underlying numeric SQL type code (JDBC `java.sql.Types` value).
    pub fn code(&self) -> i32 {
        match self {
            SqlTypeCode::Boolean => 16,
            SqlTypeCode::TinyInt => -6,
            SqlTypeCode::SmallInt => 5,
            SqlTypeCode::Integer => 4,
            SqlTypeCode::BigInt => -5,
            SqlTypeCode::Float => 6,
            SqlTypeCode::Double => 8,
            SqlTypeCode::Numeric => 2,
            SqlTypeCode::Char => 1,
            SqlTypeCode::Varchar => 12,
            SqlTypeCode::LongVarchar => -1,
            SqlTypeCode::NVarchar => -9,
            SqlTypeCode::LongNVarchar => -16,
            SqlTypeCode::VarBinary => -3,
            SqlTypeCode::Date => 91,
            SqlTypeCode::Time => 92,
            SqlTypeCode::Timestamp => 93,
            SqlTypeCode::Array => 2003,
            SqlTypeCode::Other => 1111,
            SqlTypeCode::Xml => 2009,
        }
    }
}

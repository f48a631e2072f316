//! # Built-in Scalar Codecs
//!
//! `ScalarCodec` implementations for the palette the contributor registers.
//! The array layer works against the trait alone; nothing here is required
//! to use a custom element codec.
//!
//! | Codec | Host kind | SQL type |
//! |-------|-----------|----------|
//! | `BooleanCodec` | Bool | BOOLEAN |
//! | `NumericBooleanCodec` | Bool | INTEGER (0/1) |
//! | `TrueFalseCodec` | Bool | CHAR ('T'/'F') |
//! | `YesNoCodec` | Bool | CHAR ('Y'/'N') |
//! | `TinyIntCodec` | Int2 | TINYINT |
//! | `SmallIntCodec` | Int2 | SMALLINT |
//! | `IntegerCodec` | Int4 | INTEGER |
//! | `BigIntCodec` | Int8 | BIGINT |
//! | `FloatCodec` | Float4 | FLOAT |
//! | `DoubleCodec` | Float8 | DOUBLE |
//! | `DecimalCodec` | Decimal | NUMERIC |
//! | `VarcharCodec` | Text | VARCHAR |
//! | `TextCodec` | Text | LONGVARCHAR |
//! | `NVarcharCodec` | Text | NVARCHAR |
//! | `NTextCodec` | Text | LONGNVARCHAR |
//! | `CharacterCodec` | Char | CHAR |
//! | `ByteaCodec` | Bytes | VARBINARY |
//! | `DateCodec` | Date | DATE |
//! | `TimeCodec` | Time | TIME |
//! | `TimeTzCodec` | TimeTz | TIME (binds as `timetz`) |
//! | `TimestampCodec` | Timestamp | TIMESTAMP |
//! | `PgUuidCodec` | Uuid | OTHER (binds as `uuid`) |
//! | `UuidCharCodec` | Uuid | VARCHAR |

mod binary;
mod datetime;
mod primitive;
mod text;
mod uuid;

pub use binary::ByteaCodec;
pub use datetime::{DateCodec, TimeCodec, TimeTzCodec, TimestampCodec};
pub use primitive::{
    BigIntCodec, BooleanCodec, DecimalCodec, DoubleCodec, FloatCodec, IntegerCodec,
    NumericBooleanCodec, SmallIntCodec, TinyIntCodec, TrueFalseCodec, YesNoCodec,
};
pub use text::{CharacterCodec, NTextCodec, NVarcharCodec, TextCodec, VarcharCodec};
pub use uuid::{PgUuidCodec, UuidCharCodec};

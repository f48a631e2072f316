//! # Scalar Element Codec Interface
//!
//! `ScalarCodec` is the capability set the array layer consumes for one base
//! (non-array) SQL type: text conversion, equality, hashing, deep copy,
//! driver-representation conversion, and the type identity used for
//! registration and binding.
//!
//! The array layer never constructs scalar codecs. It receives them, wraps
//! them, and dispatches through them. Implementations live in [`crate::scalars`]
//! or in the embedding mapper.
//!
//! ## Identity
//!
//! Codecs are shared as `Arc<dyn ScalarCodec>` and the array type registry is
//! keyed by *pointer identity* of that `Arc`. Two structurally identical codec
//! instances are two distinct identities on purpose: each scalar type
//! contributed to a host type system keeps its own distinct array counterpart.
//!
//! ## Array Kinds
//!
//! `is_array_kind` is an explicit tag instead of a downcast: an
//! [`crate::array::ArrayType`] answers `true`, every base codec answers
//! `false`. The registry consults the tag when deriving registration keys so
//! that an array-of-array type registers as `basetype ARRAY` and never as
//! `basetype ARRAY ARRAY ARRAY`.

use std::fmt;
use std::hash::Hasher;

use eyre::Result;

use super::sql_type::SqlTypeCode;
use super::value::{SqlValue, ValueKind};

/// Conversion and comparison capability for one scalar SQL type.
pub trait ScalarCodec: fmt::Debug + Send + Sync {
    /// Declared type name, e.g. `"bigint"`, `"pg-uuid"`.
    fn name(&self) -> &str;

    /// Keys under which the host type system looks this type up.
    fn registration_keys(&self) -> &[String];

    /// Numeric SQL type code.
    fn sql_type(&self) -> SqlTypeCode;

    /// Vendor type name overriding dialect lookup, when fixed.
    fn vendor_type_name(&self) -> Option<&str> {
        None
    }

    /// Host-side value variant produced by this codec.
    fn host_kind(&self) -> ValueKind;

    /// Driver-side variant this codec unwraps to. Values already of this
    /// kind bypass outbound conversion.
    fn driver_kind(&self) -> ValueKind {
        self.host_kind()
    }

    /// True when this codec itself describes an array type.
    fn is_array_kind(&self) -> bool {
        false
    }

    /// Whether array literals always double-quote this type's text form.
    /// Numeric and temporal types render bare; text-like types quote.
    fn quoted_literal(&self) -> bool {
        true
    }

    /// Renders a value to its literal text form.
    fn to_text(&self, value: &SqlValue) -> Result<String>;

    /// Parses the literal text form back into a value.
    fn from_text(&self, text: &str) -> Result<SqlValue>;

    /// Value equality under this type's semantics.
    fn equal(&self, a: &SqlValue, b: &SqlValue) -> bool {
        a == b
    }

    /// Feeds a stable hash of the value into the hasher. Must agree with
    /// [`ScalarCodec::equal`]. The structural default suits every scalar
    /// codec; array codecs override to hash through their element codec.
    fn hash_into(&self, value: &SqlValue, state: &mut dyn Hasher) {
        super::value::hash_sql_value(value, state);
    }

    /// Deep copy. Scalar values are plain owned data, so the default clone
    /// suffices; array codecs recurse instead.
    fn deep_copy(&self, value: &SqlValue) -> SqlValue {
        value.clone()
    }

    /// Outbound conversion to the driver representation.
    fn to_driver(&self, value: &SqlValue) -> Result<SqlValue> {
        Ok(value.clone())
    }

    /// Inbound conversion from the driver representation.
    fn from_driver(&self, value: &SqlValue) -> Result<SqlValue> {
        Ok(value.clone())
    }
}

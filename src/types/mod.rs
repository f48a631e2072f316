//! # Type System for the Array Codec
//!
//! This module provides the value representation and the scalar codec
//! interface the array layer is built on.
//!
//! ## Key Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | `SqlValue` | Owned scalar/array value |
//! | `ValueKind` | Single-byte discriminant tag |
//! | `SqlTypeCode` | Portable numeric SQL type code |
//! | `ScalarCodec` | Per-type conversion + comparison capability |

mod scalar;
mod sql_type;
mod value;

pub use scalar::ScalarCodec;
pub use sql_type::SqlTypeCode;
pub use value::{SqlValue, ValueKind};

//! # Driver Abstraction Layer
//!
//! Object-safe seams to the external data-access layer. This crate only
//! consumes these traits; the embedding mapper supplies the implementations
//! over its actual driver/connection objects.
//!
//! | Trait | Capability |
//! |-------|------------|
//! | `Connection` | create a native array handle from converted elements |
//! | `NativeArray` | opaque driver array handle: type name + raw contents |
//! | `Dialect` | resolve a vendor type name from a SQL type code |
//! | `PreparedStatement` | positional parameter binding |
//! | `CallableStatement` | named parameter binding + callable-result reads |
//! | `ResultRow` | column reads from a result row |
//!
//! `BindContext` bundles the connection and dialect borrows a single bind or
//! extract call needs; nothing here is retained across calls.

use eyre::Result;
use std::fmt;

use crate::types::{SqlTypeCode, SqlValue};

/// Opaque driver-level array handle.
///
/// `contents` may perform driver I/O and therefore may fail; a present handle
/// whose extracted contents are absent is also a legal driver answer.
pub trait NativeArray: fmt::Debug + Send {
    /// SQL type name the handle was created with, e.g. `"int8"`.
    fn type_name(&self) -> &str;

    /// Extracts the raw element sequence from the handle.
    fn contents(&self) -> Result<Option<Vec<Option<SqlValue>>>>;
}

/// Connection capability: native array construction.
pub trait Connection {
    /// Creates a native array of the named SQL element type from
    /// driver-representation elements.
    fn create_array(
        &self,
        type_name: &str,
        elements: Vec<Option<SqlValue>>,
    ) -> Result<Box<dyn NativeArray>>;
}

/// Dialect capability: vendor type name lookup by numeric code.
pub trait Dialect {
    /// Resolves the vendor type name for a SQL type code. The returned name
    /// may carry a parenthesized length suffix, e.g. `"varchar(255)"`.
    fn type_name_for(&self, code: SqlTypeCode) -> Result<String>;
}

/// Connection + dialect borrows for one bind/extract call.
pub struct BindContext<'a> {
    pub connection: &'a dyn Connection,
    pub dialect: &'a dyn Dialect,
}

impl<'a> BindContext<'a> {
    pub fn new(connection: &'a dyn Connection, dialect: &'a dyn Dialect) -> Self {
        Self {
            connection,
            dialect,
        }
    }
}

/// Outgoing statement with positional parameters.
pub trait PreparedStatement {
    /// Attaches an array handle at the given ordinal position.
    fn set_array(&mut self, index: usize, array: &dyn NativeArray) -> Result<()>;

    /// Binds SQL NULL of the given type at the given ordinal position.
    fn set_null(&mut self, index: usize, sql_type: SqlTypeCode) -> Result<()>;
}

/// Outgoing statement with named parameters and readable results.
///
/// Not every driver exposes a dedicated named array setter;
/// `supports_named_array_bind` reports whether `set_array_named` is backed by
/// a real implementation. The generic `set_object_named` path must always
/// exist, though it too may fail for array-typed objects on limited drivers.
pub trait CallableStatement {
    /// True when the driver has a dedicated bind-array-by-name operation.
    fn supports_named_array_bind(&self) -> bool;

    /// Attaches an array handle to a named parameter.
    fn set_array_named(&mut self, name: &str, array: &dyn NativeArray) -> Result<()>;

    /// Generic named-parameter bind with an explicit SQL type code.
    fn set_object_named(
        &mut self,
        name: &str,
        value: Option<&dyn NativeArray>,
        sql_type: SqlTypeCode,
    ) -> Result<()>;

    /// Reads an array handle from a callable result by ordinal.
    fn get_array(&self, index: usize) -> Result<Option<Box<dyn NativeArray>>>;

    /// Reads an array handle from a callable result by name.
    fn get_array_named(&self, name: &str) -> Result<Option<Box<dyn NativeArray>>>;
}

/// One row of a query result.
pub trait ResultRow {
    /// Reads an array handle from the named column.
    fn get_array(&self, name: &str) -> Result<Option<Box<dyn NativeArray>>>;
}

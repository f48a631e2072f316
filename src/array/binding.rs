//! # Array Binding Protocol
//!
//! Binds array values into outgoing statements and extracts them from
//! results, abstracting over drivers whose named-parameter surface lacks a
//! dedicated array setter.
//!
//! ## Named-Bind Negotiation
//!
//! Whether a driver supports bind-array-by-name is probed at most once per
//! binder instance and the `NamedArrayBind` outcome is cached in a
//! `OnceCell`, so repeat binds never re-probe and the check-then-act stays
//! atomic if a binder is shared across threads. When the dedicated setter is
//! missing or its invocation fails, the bind falls back to the generic
//! named-object path with the ARRAY type code. Only when that also fails does
//! the call error out, naming the limitation and the remediation; the
//! failure is never silently downgraded to a positional bind.
//!
//! ## Statelessness
//!
//! Apart from the probe cache, every bind and extract call is stateless:
//! no retries, no buffering, failures surface immediately.

use std::sync::Arc;

use eyre::{Result, WrapErr};
use once_cell::sync::OnceCell;
use tracing::{debug, trace};

use super::codec::{ArraySource, ArrayType};
use crate::driver::{BindContext, CallableStatement, PreparedStatement, ResultRow};
use crate::types::{SqlTypeCode, SqlValue};

/// Negotiated named-bind capability of a statement implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedArrayBind {
    Supported,
    Unsupported,
}

/// Binds values of one array type into outgoing statements.
#[derive(Debug)]
pub struct ArrayBinder {
    array_type: Arc<ArrayType>,
    named_capability: OnceCell<NamedArrayBind>,
}

impl ArrayBinder {
    pub fn new(array_type: Arc<ArrayType>) -> Self {
        Self {
            array_type,
            named_capability: OnceCell::new(),
        }
    }

    /// Binds at an ordinal position. Always supported by contract.
    pub fn bind(
        &self,
        statement: &mut dyn PreparedStatement,
        index: usize,
        value: Option<&[Option<SqlValue>]>,
        ctx: &BindContext<'_>,
    ) -> Result<()> {
        match value {
            None => statement.set_null(index, SqlTypeCode::Array),
            Some(elements) => {
                let handle = self.array_type.unwrap_array(elements, ctx)?;
                statement.set_array(index, handle.as_ref())
            }
        }
    }

    /// Binds to a named parameter, negotiating the driver capability on
    /// first use.
    pub fn bind_named(
        &self,
        statement: &mut dyn CallableStatement,
        name: &str,
        value: Option<&[Option<SqlValue>]>,
        ctx: &BindContext<'_>,
    ) -> Result<()> {
        let capability = *self.named_capability.get_or_init(|| {
            let capability = if statement.supports_named_array_bind() {
                NamedArrayBind::Supported
            } else {
                NamedArrayBind::Unsupported
            };
            debug!(array_type = self.array_type.name(), ?capability, "probed named array bind");
            capability
        });

        let handle = match value {
            None => None,
            Some(elements) => Some(self.array_type.unwrap_array(elements, ctx)?),
        };

        let mut direct_failure = None;
        if capability == NamedArrayBind::Supported {
            if let Some(handle) = handle.as_deref() {
                match statement.set_array_named(name, handle) {
                    Ok(()) => return Ok(()),
                    Err(err) => {
                        trace!(parameter = name, "dedicated named array setter failed");
                        direct_failure = Some(err);
                    }
                }
            }
        }

        match statement.set_object_named(name, handle.as_deref(), SqlTypeCode::Array) {
            Ok(()) => Ok(()),
            Err(fallback_failure) => {
                let mut report = fallback_failure.wrap_err(
                    "driver does not support named array parameters; use positional binding",
                );
                if let Some(direct) = direct_failure {
                    report = report.wrap_err(format!(
                        "dedicated named array setter also failed: {}",
                        direct
                    ));
                }
                Err(report)
            }
        }
    }
}

/// Extracts values of one array type from result sources.
#[derive(Debug)]
pub struct ArrayExtractor {
    array_type: Arc<ArrayType>,
}

impl ArrayExtractor {
    pub fn new(array_type: Arc<ArrayType>) -> Self {
        Self { array_type }
    }

    /// Reads the named column from a result row.
    pub fn from_row(
        &self,
        row: &dyn ResultRow,
        name: &str,
    ) -> Result<Option<Vec<Option<SqlValue>>>> {
        let handle = row
            .get_array(name)
            .wrap_err_with(|| format!("failed to read array column '{}'", name))?;
        self.wrap_handle(handle)
    }

    /// Reads an ordinal output from a callable result.
    pub fn from_callable(
        &self,
        statement: &dyn CallableStatement,
        index: usize,
    ) -> Result<Option<Vec<Option<SqlValue>>>> {
        let handle = statement
            .get_array(index)
            .wrap_err_with(|| format!("failed to read array output at position {}", index))?;
        self.wrap_handle(handle)
    }

    /// Reads a named output from a callable result.
    pub fn from_callable_named(
        &self,
        statement: &dyn CallableStatement,
        name: &str,
    ) -> Result<Option<Vec<Option<SqlValue>>>> {
        let handle = statement
            .get_array_named(name)
            .wrap_err_with(|| format!("failed to read array output '{}'", name))?;
        self.wrap_handle(handle)
    }

    fn wrap_handle(
        &self,
        handle: Option<Box<dyn crate::driver::NativeArray>>,
    ) -> Result<Option<Vec<Option<SqlValue>>>> {
        match handle {
            None => Ok(None),
            Some(handle) => self.array_type.wrap(ArraySource::Native(handle.as_ref())),
        }
    }
}

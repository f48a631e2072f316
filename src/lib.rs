//! # sqlarray - SQL Array Column Codec
//!
//! A generic array-column codec for relational mappers: persist and retrieve
//! single-dimensional arrays of an arbitrary scalar type through the
//! PostgreSQL-compatible `{...}` literal format and through a native
//! array-binding channel, with collision-free type identities per element
//! type.
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use sqlarray::array::ArrayTypeRegistry;
//! use sqlarray::scalars::BigIntCodec;
//! use sqlarray::types::{ScalarCodec, SqlValue};
//!
//! let mut registry = ArrayTypeRegistry::new();
//! let bigint: Arc<dyn ScalarCodec> = Arc::new(BigIntCodec::new());
//! let bigint_array = registry.get_or_create(&bigint);
//!
//! let value = vec![Some(SqlValue::Int8(55)), None, Some(SqlValue::Int8(616))];
//! let literal = bigint_array.to_literal(Some(&value))?.unwrap();
//! assert_eq!(literal, "{55,null,616}");
//! assert_eq!(bigint_array.from_literal(Some(&literal))?, Some(value));
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │   contributor (config-driven bootstrap)  │
//! ├─────────────────────────────────────────┤
//! │  array::ArrayTypeRegistry (identity map) │
//! ├─────────────────────────────────────────┤
//! │   array::ArrayType (value codec: text,   │
//! │   equality, deep copy, wrap/unwrap)      │
//! ├──────────────────────┬──────────────────┤
//! │ array::ArrayBinder / │  scalars::*      │
//! │ array::ArrayExtractor│  (element codecs)│
//! ├──────────────────────┴──────────────────┤
//! │  driver (consumed traits: Connection,    │
//! │  Dialect, statements, NativeArray)       │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Module Overview
//!
//! - [`types`]: `SqlValue`, `SqlTypeCode`, and the `ScalarCodec` trait
//! - [`array`]: registry, value codec, literal grammar, binding protocol
//! - [`scalars`]: built-in element codecs
//! - [`driver`]: traits the embedding data-access layer implements
//! - [`config`] / [`contributor`]: flag-driven bulk registration
//!
//! ## Scope
//!
//! Single-dimensional arrays with PostgreSQL-compatible literals. Arrays of
//! arrays work by using an array type as the element codec; genuinely
//! multi-dimensional array columns do not.

pub mod array;
pub mod config;
pub mod contributor;
pub mod driver;
pub mod scalars;
pub mod types;

pub use array::{ArrayBinder, ArrayExtractor, ArrayType, ArrayTypeRegistry};
pub use types::{ScalarCodec, SqlTypeCode, SqlValue, ValueKind};

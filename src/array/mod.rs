//! # Array Column Support
//!
//! The three cooperating pieces of the array codec:
//!
//! - [`ArrayTypeRegistry`]: identity-memoized factory for array types and
//!   their registration keys
//! - [`ArrayType`]: the per-element-type value codec (equality, hashing,
//!   deep copy, literal text, native conversion)
//! - [`ArrayBinder`] / [`ArrayExtractor`]: the statement binding and result
//!   extraction protocol
//!
//! Data flow on write: element sequence → [`ArrayType::unwrap_array`] builds
//! a native handle through the connection → [`ArrayBinder`] attaches it to
//! the statement. On read: [`ArrayExtractor`] pulls the handle from the
//! result → [`ArrayType::wrap`] converts each element back through the
//! scalar codec. The registry sits off the hot path, consulted once per
//! element type at bootstrap.

mod binding;
mod codec;
pub mod literal;
mod registry;

pub use binding::{ArrayBinder, ArrayExtractor, NamedArrayBind};
pub use codec::{resolve_type_name, ArraySource, ArrayType};
pub use registry::{ArrayTypeRegistry, HostTypeCatalog};

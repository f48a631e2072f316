//! # Array Type Registry
//!
//! The registry is the sole creator of [`ArrayType`] instances. It memoizes
//! by *identity* of the element codec: asking twice with the same
//! `Arc<dyn ScalarCodec>` returns the exact same `Arc<ArrayType>`, while two
//! structurally equal but distinct codec instances get two distinct array
//! types. Host type caches key off instance identity, so this distinction is
//! load-bearing, not an optimization.
//!
//! ## Lifecycle
//!
//! The registry is built and populated during a single-threaded bootstrap
//! phase (`&mut self` enforces that at compile time) and shared read-only
//! afterwards, typically behind an `Arc`. Concurrent first-time creation is
//! out of scope by contract; callers synchronize startup externally if they
//! must.
//!
//! ## Registration Keys
//!
//! For every key the element codec carries, the registry derives the keys the
//! array type answers to:
//!
//! | Element key | Derived keys |
//! |-------------|--------------|
//! | primitive kind (`i32`, `bool`, ...) | none |
//! | resolvable host path (`String`) | `Vec<String>` + keyword variants |
//! | database keyword (`integer`) | `integer[]`, `integer ARRAY`, `integer array` |
//! | any key, element already an array | bare key only |
//!
//! Primitive kinds are dropped entirely: a `Vec<i32>` slot has nowhere to put
//! a SQL NULL element, so primitive arrays are not exposed. A host path that
//! fails to resolve silently contributes no descriptor key; that registration
//! path is simply unavailable. Duplicates in the final set are tolerated.

use std::sync::Arc;

use hashbrown::HashMap;
use smallvec::SmallVec;
use tracing::trace;

use super::codec::ArrayType;
use crate::types::ScalarCodec;

/// Host scalar-type kinds whose arrays are not exposed as array-of-T
/// entries.
const PRIMITIVE_KINDS: &[&str] = &["bool", "i8", "i16", "i32", "i64", "f32", "f64", "char"];

/// Lookup table of resolvable host type paths, the counterpart of a runtime
/// class loader. Bootstrap code seeds it with every host type the embedding
/// mapper can field-map; unknown names simply fail to resolve.
#[derive(Debug, Clone, Default)]
pub struct HostTypeCatalog {
    paths: HashMap<String, String>,
}

impl HostTypeCatalog {
    /// Empty catalog; nothing resolves.
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog seeded with the host types of the built-in scalar codecs.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for path in [
            "String",
            "Uuid",
            "Decimal",
            "Date",
            "Time",
            "TimeTz",
            "Timestamp",
            "Bytes",
        ] {
            catalog.insert(path, path);
        }
        catalog
    }

    /// Registers a resolvable host type path under a lookup name.
    pub fn insert(&mut self, name: impl Into<String>, path: impl Into<String>) {
        self.paths.insert(name.into(), path.into());
    }

    /// Resolves a lookup name to its host type path.
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.paths.get(name).map(String::as_str)
    }
}

/// Identity-memoized factory for [`ArrayType`] instances.
#[derive(Debug)]
pub struct ArrayTypeRegistry {
    entries: HashMap<usize, Arc<ArrayType>>,
    host_types: HostTypeCatalog,
}

impl ArrayTypeRegistry {
    /// Registry with the built-in host type catalog.
    pub fn new() -> Self {
        Self::with_host_types(HostTypeCatalog::builtin())
    }

    /// Registry over a caller-supplied host type catalog.
    pub fn with_host_types(host_types: HostTypeCatalog) -> Self {
        Self {
            entries: HashMap::new(),
            host_types,
        }
    }

    /// Returns the array type for the given element codec, creating it on
    /// first request. Lookup is by `Arc` pointer identity.
    pub fn get_or_create(&mut self, element: &Arc<dyn ScalarCodec>) -> Arc<ArrayType> {
        let key = Arc::as_ptr(element).cast::<()>() as usize;
        if let Some(existing) = self.entries.get(&key) {
            return existing.clone();
        }

        let keys = build_registration_keys(element.as_ref(), &self.host_types);
        let array_type = Arc::new(ArrayType::new(element.clone(), keys));
        trace!(name = array_type.name(), "registered array type");
        self.entries.insert(key, array_type.clone());
        array_type
    }

    /// Number of distinct array types created so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ArrayTypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn build_registration_keys(
    element: &dyn ScalarCodec,
    host_types: &HostTypeCatalog,
) -> Vec<String> {
    let mut keys: SmallVec<[String; 8]> = SmallVec::new();
    for key in element.registration_keys() {
        if PRIMITIVE_KINDS.contains(&key.as_str()) {
            // a Vec<primitive> slot cannot hold a SQL NULL element
            continue;
        }
        if let Some(path) = host_types.resolve(key) {
            keys.push(format!("Vec<{}>", path));
        }
        if element.is_array_kind() {
            // a base type already named as an array is never re-suffixed
            keys.push(key.clone());
        } else {
            keys.push(format!("{}[]", key));
            keys.push(format!("{} ARRAY", key));
            keys.push(format!("{} array", key));
        }
    }
    keys.into_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scalars::{IntegerCodec, VarcharCodec};

    #[test]
    fn same_codec_instance_memoizes() {
        let mut registry = ArrayTypeRegistry::new();
        let codec: Arc<dyn ScalarCodec> = Arc::new(IntegerCodec::new());
        let a = registry.get_or_create(&codec);
        let b = registry.get_or_create(&codec);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn distinct_codec_instances_get_distinct_types() {
        let mut registry = ArrayTypeRegistry::new();
        let first: Arc<dyn ScalarCodec> = Arc::new(IntegerCodec::new());
        let second: Arc<dyn ScalarCodec> = Arc::new(IntegerCodec::new());
        let a = registry.get_or_create(&first);
        let b = registry.get_or_create(&second);
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn keyword_keys_get_three_variants() {
        let mut registry = ArrayTypeRegistry::new();
        let codec: Arc<dyn ScalarCodec> = Arc::new(IntegerCodec::new());
        let at = registry.get_or_create(&codec);
        let keys = at.registration_keys();
        assert!(keys.contains(&"integer[]".to_string()));
        assert!(keys.contains(&"integer ARRAY".to_string()));
        assert!(keys.contains(&"integer array".to_string()));
    }

    #[test]
    fn primitive_kind_keys_contribute_nothing() {
        let mut registry = ArrayTypeRegistry::new();
        let codec: Arc<dyn ScalarCodec> = Arc::new(IntegerCodec::new());
        let at = registry.get_or_create(&codec);
        // the codec carries an "i32" key; no derived key mentions it
        assert!(at.registration_keys().iter().all(|k| !k.contains("i32")));
    }

    #[test]
    fn resolvable_host_path_adds_vec_descriptor() {
        let mut registry = ArrayTypeRegistry::new();
        let codec: Arc<dyn ScalarCodec> = Arc::new(VarcharCodec::new());
        let at = registry.get_or_create(&codec);
        assert!(at
            .registration_keys()
            .contains(&"Vec<String>".to_string()));
    }

    #[test]
    fn unresolvable_host_path_is_silently_dropped() {
        let mut registry = ArrayTypeRegistry::with_host_types(HostTypeCatalog::new());
        let codec: Arc<dyn ScalarCodec> = Arc::new(VarcharCodec::new());
        let at = registry.get_or_create(&codec);
        let keys = at.registration_keys();
        assert!(!keys.iter().any(|k| k.starts_with("Vec<")));
        // keyword variants are still derived for the same key
        assert!(keys.contains(&"String[]".to_string()));
    }

    #[test]
    fn array_element_keys_are_not_resuffixed() {
        let mut registry = ArrayTypeRegistry::new();
        let base: Arc<dyn ScalarCodec> = Arc::new(IntegerCodec::new());
        let inner = registry.get_or_create(&base);
        let inner_codec: Arc<dyn ScalarCodec> = inner;
        let outer = registry.get_or_create(&inner_codec);

        let keys = outer.registration_keys();
        assert!(keys.contains(&"integer[]".to_string()));
        assert!(!keys.iter().any(|k| k.ends_with("ARRAY ARRAY")));
        assert!(!keys.iter().any(|k| k.contains("[][]")));
    }
}

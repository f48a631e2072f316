//! # Array Value Codec
//!
//! `ArrayType` is the registrable type descriptor for `T[]`: it wraps one
//! element codec and implements equality, hashing, deep copy, literal text
//! conversion, and native wrap/unwrap for arrays of that element type.
//!
//! ## Nesting
//!
//! `ArrayType` itself implements [`ScalarCodec`] with `is_array_kind() ==
//! true`, so an array type can serve as the element codec of another array
//! type. Deep copy recurses through the element codec, which is what keeps a
//! cached array-of-arrays from aliasing live nested arrays.
//!
//! ## SQL Array Type Name
//!
//! The element's declared name is normalized once at construction: trailing
//! `[]` / ` array` suffixes are stripped (an element that is itself an array
//! type arrives pre-suffixed), then two vendor aliases are pinned early:
//! `pg-uuid` binds as `uuid` and a time-with-offset element binds as
//! `timetz`, both skipping dialect lookup entirely. Every other name is
//! resolved at bind time through [`resolve_type_name`], because the concrete
//! vendor name can depend on the active dialect.
//!
//! ## Mutability
//!
//! Arrays are mutable values. Disassembly (into the second-level cache) and
//! reassembly are both deep copies; there is no shortcut serialization path.

use std::hash::Hasher;
use std::sync::Arc;

use eyre::{bail, Result, WrapErr};
use tracing::trace;

use crate::array::literal::{parse_literal, render_literal};
use crate::driver::{BindContext, Dialect, NativeArray};
use crate::types::{ScalarCodec, SqlTypeCode, SqlValue, ValueKind};

/// Hash fed for NULL elements, so `[null]` and `[]` hash differently.
const NULL_ELEMENT_HASH: u8 = 0x3f;

/// Inbound source shapes accepted by [`ArrayType::wrap`].
pub enum ArraySource<'a> {
    /// A raw host-side element sequence.
    Raw(&'a [Option<SqlValue>]),
    /// A driver-level array handle.
    Native(&'a dyn NativeArray),
}

/// Registrable array type descriptor over one element codec.
#[derive(Debug)]
pub struct ArrayType {
    element: Arc<dyn ScalarCodec>,
    name: String,
    registration_keys: Vec<String>,
    sql_type_name: String,
    skip_type_lookup: bool,
}

impl ArrayType {
    /// Built by [`crate::array::ArrayTypeRegistry`], which owns instance
    /// identity; the registry passes in the derived registration keys.
    pub(crate) fn new(element: Arc<dyn ScalarCodec>, registration_keys: Vec<String>) -> Self {
        let name = format!("{}[]", element.name());

        let mut sql_type_name = element.name().to_string();
        loop {
            if let Some(stripped) = sql_type_name.strip_suffix("[]") {
                sql_type_name = stripped.trim_end().to_string();
            } else if let Some(stripped) = sql_type_name.strip_suffix(" array") {
                sql_type_name = stripped.trim_end().to_string();
            } else {
                break;
            }
        }

        let mut skip_type_lookup = false;
        if sql_type_name == "pg-uuid" {
            sql_type_name = "uuid".to_string();
            skip_type_lookup = true;
        } else if element.host_kind() == ValueKind::TimeTz {
            sql_type_name = "timetz".to_string();
            skip_type_lookup = true;
        }

        trace!(
            name = %name,
            sql_type = element.sql_type().code(),
            sql_type_name = %sql_type_name,
            skip_type_lookup,
            "created array type"
        );

        Self {
            element,
            name,
            registration_keys,
            sql_type_name,
            skip_type_lookup,
        }
    }

    /// Display name, `"<element-name>[]"`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The element codec this array type wraps.
    pub fn element(&self) -> &Arc<dyn ScalarCodec> {
        &self.element
    }

    /// Keys the host type system may look this array type up under.
    pub fn registration_keys(&self) -> &[String] {
        &self.registration_keys
    }

    /// Normalized element type name used for native array construction.
    pub fn sql_array_type_name(&self) -> &str {
        &self.sql_type_name
    }

    /// Element-wise equality. Both-absent arrays are equal; an absent array
    /// never equals a present one; NULL elements only equal NULL elements.
    pub fn equal_arrays(
        &self,
        a: Option<&[Option<SqlValue>]>,
        b: Option<&[Option<SqlValue>]>,
    ) -> bool {
        let (a, b) = match (a, b) {
            (None, None) => return true,
            (Some(a), Some(b)) => (a, b),
            _ => return false,
        };
        if a.len() != b.len() {
            return false;
        }
        a.iter().zip(b.iter()).all(|(x, y)| match (x, y) {
            (None, None) => true,
            (Some(x), Some(y)) => self.element.equal(x, y),
            _ => false,
        })
    }

    /// Order-sensitive sequence hash: length, then per-element hashes with a
    /// fixed sentinel for NULL slots. Agrees with [`ArrayType::equal_arrays`]
    /// for present arrays.
    pub fn hash_array(&self, value: &[Option<SqlValue>], state: &mut dyn Hasher) {
        state.write_usize(value.len());
        for element in value {
            match element {
                None => state.write_u8(NULL_ELEMENT_HASH),
                Some(v) => {
                    state.write_u8(1);
                    self.element.hash_into(v, state);
                }
            }
        }
    }

    /// Deep copy through the element codec's own copy policy. Nested array
    /// elements are copied recursively, never aliased.
    pub fn deep_copy_array(
        &self,
        value: Option<&[Option<SqlValue>]>,
    ) -> Option<Vec<Option<SqlValue>>> {
        value.map(|elements| {
            elements
                .iter()
                .map(|e| e.as_ref().map(|v| self.element.deep_copy(v)))
                .collect()
        })
    }

    /// Copy into the second-level cache. Deep copy; no shortcut
    /// serialization.
    pub fn disassemble(
        &self,
        value: Option<&[Option<SqlValue>]>,
    ) -> Option<Vec<Option<SqlValue>>> {
        self.deep_copy_array(value)
    }

    /// Copy back out of the second-level cache.
    pub fn assemble(&self, cached: Option<&[Option<SqlValue>]>) -> Option<Vec<Option<SqlValue>>> {
        self.deep_copy_array(cached)
    }

    /// Renders the brace literal. An absent array renders to `None`,
    /// distinct from `{}` and from `{null}`.
    pub fn to_literal(&self, value: Option<&[Option<SqlValue>]>) -> Result<Option<String>> {
        let elements = match value {
            None => return Ok(None),
            Some(elements) => elements,
        };
        let mut texts: Vec<Option<String>> = Vec::with_capacity(elements.len());
        for element in elements {
            texts.push(match element {
                None => None,
                Some(v) => Some(self.element.to_text(v)?),
            });
        }
        let refs: Vec<Option<&str>> = texts.iter().map(|t| t.as_deref()).collect();
        Ok(Some(render_literal(&refs, self.element.quoted_literal())))
    }

    /// Parses a brace literal back into an element sequence, converting each
    /// raw element through the element codec.
    pub fn from_literal(&self, text: Option<&str>) -> Result<Option<Vec<Option<SqlValue>>>> {
        let raw = match text {
            None => return Ok(None),
            Some(text) => match parse_literal(text)? {
                None => return Ok(None),
                Some(raw) => raw,
            },
        };
        let mut elements = Vec::with_capacity(raw.len());
        for item in raw {
            elements.push(match item {
                None => None,
                Some(text) => Some(self.element.from_text(&text)?),
            });
        }
        Ok(Some(elements))
    }

    /// Outbound conversion: builds a native array handle for statement
    /// binding. Elements already in the element codec's declared driver
    /// representation pass through unconverted.
    pub fn unwrap_array(
        &self,
        value: &[Option<SqlValue>],
        ctx: &BindContext<'_>,
    ) -> Result<Box<dyn NativeArray>> {
        let type_name = resolve_type_name(
            self.element.sql_type(),
            &self.sql_type_name,
            self.skip_type_lookup,
            ctx.dialect,
        )?;

        let driver_kind = self.element.driver_kind();
        let mut converted = Vec::with_capacity(value.len());
        for element in value {
            converted.push(match element {
                None => None,
                Some(v) if v.kind() == driver_kind => Some(v.clone()),
                Some(v) => Some(self.element.to_driver(v)?),
            });
        }

        ctx.connection
            .create_array(&type_name, converted)
            .wrap_err_with(|| format!("failed to create native array of type '{}'", type_name))
    }

    /// Inbound conversion from a raw sequence or native handle back to the
    /// host element sequence.
    pub fn wrap(&self, source: ArraySource<'_>) -> Result<Option<Vec<Option<SqlValue>>>> {
        match source {
            ArraySource::Raw(raw) => Ok(Some(self.wrap_raw(raw)?)),
            ArraySource::Native(handle) => {
                let raw = handle
                    .contents()
                    .wrap_err("failed to extract native array contents")?;
                match raw {
                    None => Ok(None),
                    Some(raw) => Ok(Some(self.wrap_raw(&raw)?)),
                }
            }
        }
    }

    fn wrap_raw(&self, raw: &[Option<SqlValue>]) -> Result<Vec<Option<SqlValue>>> {
        let host_kind = self.element.host_kind();
        let direct = raw
            .iter()
            .flatten()
            .all(|v| v.kind() == host_kind);
        if direct {
            // element representations coincide, copy with no codec calls
            return Ok(raw.to_vec());
        }
        let mut elements = Vec::with_capacity(raw.len());
        for item in raw {
            elements.push(match item {
                None => None,
                Some(v) => Some(self.element.from_driver(v)?),
            });
        }
        Ok(elements)
    }
}

/// Resolves the SQL element type name used for native array construction.
///
/// Names pinned at construction (`fixed`) are returned as-is. `Other` has no
/// dialect entry, so the declared name stands; `Xml` is always `"xml"`;
/// everything else asks the dialect by numeric code. A parenthesized
/// length/precision suffix in a dialect-resolved name is cut off so database
/// defaults apply.
pub fn resolve_type_name(
    code: SqlTypeCode,
    declared: &str,
    fixed: bool,
    dialect: &dyn Dialect,
) -> Result<String> {
    if fixed {
        return Ok(declared.to_string());
    }
    let mut name = match code {
        SqlTypeCode::Other => declared.to_string(),
        SqlTypeCode::Xml => "xml".to_string(),
        _ => {
            let resolved = dialect
                .type_name_for(code)
                .wrap_err_with(|| format!("no dialect type name for SQL type {}", code.code()))?;
            trace!(code = code.code(), name = %resolved, "dialect type name lookup");
            resolved
        }
    };
    if let Some(cut) = name.find('(') {
        if cut > 0 {
            name.truncate(cut);
        }
    }
    Ok(name)
}

impl ScalarCodec for ArrayType {
    fn name(&self) -> &str {
        &self.name
    }

    fn registration_keys(&self) -> &[String] {
        &self.registration_keys
    }

    fn sql_type(&self) -> SqlTypeCode {
        SqlTypeCode::Array
    }

    fn host_kind(&self) -> ValueKind {
        ValueKind::Array
    }

    fn is_array_kind(&self) -> bool {
        true
    }

    fn to_text(&self, value: &SqlValue) -> Result<String> {
        match value {
            SqlValue::Array(elements) => Ok(self
                .to_literal(Some(elements))?
                .expect("present array renders to text")),
            other => bail!("unknown conversion to array literal from {:?}", other.kind()),
        }
    }

    fn from_text(&self, text: &str) -> Result<SqlValue> {
        match self.from_literal(Some(text))? {
            Some(elements) => Ok(SqlValue::Array(elements)),
            None => bail!("array literal '{}' denotes an absent array, not a value", text),
        }
    }

    fn equal(&self, a: &SqlValue, b: &SqlValue) -> bool {
        match (a, b) {
            (SqlValue::Array(a), SqlValue::Array(b)) => {
                self.equal_arrays(Some(a), Some(b))
            }
            _ => false,
        }
    }

    fn hash_into(&self, value: &SqlValue, state: &mut dyn Hasher) {
        if let SqlValue::Array(elements) = value {
            self.hash_array(elements, state);
        }
    }

    fn deep_copy(&self, value: &SqlValue) -> SqlValue {
        match value {
            SqlValue::Array(elements) => SqlValue::Array(
                self.deep_copy_array(Some(elements))
                    .expect("present array deep-copies to present array"),
            ),
            other => other.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scalars::{BigIntCodec, VarcharCodec};
    use std::collections::hash_map::DefaultHasher;
    use std::hash::Hasher as _;

    fn bigint_array() -> ArrayType {
        let codec: Arc<dyn ScalarCodec> = Arc::new(BigIntCodec::new());
        ArrayType::new(codec, vec![])
    }

    fn varchar_array() -> ArrayType {
        let codec: Arc<dyn ScalarCodec> = Arc::new(VarcharCodec::new());
        ArrayType::new(codec, vec![])
    }

    fn int8(v: i64) -> Option<SqlValue> {
        Some(SqlValue::Int8(v))
    }

    fn text(v: &str) -> Option<SqlValue> {
        Some(SqlValue::Text(v.to_string()))
    }

    #[test]
    fn display_name_appends_brackets() {
        assert_eq!(bigint_array().name(), "bigint[]");
    }

    #[test]
    fn equal_arrays_compares_elementwise() {
        let at = bigint_array();
        let a = vec![int8(1), None, int8(3)];
        let b = vec![int8(1), None, int8(3)];
        let c = vec![int8(1), int8(2), int8(3)];
        assert!(at.equal_arrays(Some(&a), Some(&b)));
        assert!(!at.equal_arrays(Some(&a), Some(&c)));
        assert!(!at.equal_arrays(Some(&a), Some(&a[..2])));
        assert!(at.equal_arrays(None, None));
        assert!(!at.equal_arrays(Some(&a), None));
    }

    #[test]
    fn hash_distinguishes_null_layouts() {
        let at = bigint_array();
        let mut h1 = DefaultHasher::new();
        let mut h2 = DefaultHasher::new();
        at.hash_array(&[None], &mut h1);
        at.hash_array(&[], &mut h2);
        assert_ne!(h1.finish(), h2.finish());

        let mut h3 = DefaultHasher::new();
        let mut h4 = DefaultHasher::new();
        at.hash_array(&[int8(1), int8(2)], &mut h3);
        at.hash_array(&[int8(2), int8(1)], &mut h4);
        assert_ne!(h3.finish(), h4.finish());
    }

    #[test]
    fn literal_round_trip_bigint() {
        let at = bigint_array();
        let value = vec![int8(55), int8(12), None, int8(616)];
        let literal = at.to_literal(Some(&value)).unwrap().unwrap();
        assert_eq!(literal, "{55,12,null,616}");
        assert_eq!(at.from_literal(Some(&literal)).unwrap(), Some(value));
    }

    #[test]
    fn literal_round_trip_varchar() {
        let at = varchar_array();
        let value = vec![text("512"), text(""), None, text("null")];
        let literal = at.to_literal(Some(&value)).unwrap().unwrap();
        assert_eq!(literal, r#"{"512","",null,"null"}"#);
        assert_eq!(at.from_literal(Some(&literal)).unwrap(), Some(value));
    }

    #[test]
    fn absent_array_has_no_literal() {
        let at = bigint_array();
        assert_eq!(at.to_literal(None).unwrap(), None);
        assert_eq!(at.from_literal(None).unwrap(), None);
        assert_eq!(at.from_literal(Some("null")).unwrap(), None);
    }

    #[test]
    fn empty_array_literal_is_braces() {
        let at = bigint_array();
        assert_eq!(at.to_literal(Some(&[])).unwrap().unwrap(), "{}");
        assert_eq!(at.from_literal(Some("{}")).unwrap(), Some(vec![]));
    }

    #[test]
    fn nested_array_literals() {
        let inner: Arc<dyn ScalarCodec> = Arc::new(BigIntCodec::new());
        let inner_array: Arc<dyn ScalarCodec> = Arc::new(ArrayType::new(inner, vec![]));
        let outer = ArrayType::new(inner_array, vec![]);

        let value = vec![
            Some(SqlValue::Array(vec![int8(1), None])),
            None,
            Some(SqlValue::Array(vec![int8(3)])),
        ];
        let literal = outer.to_literal(Some(&value)).unwrap().unwrap();
        assert_eq!(literal, r#"{"{1,null}",null,"{3}"}"#);
        assert_eq!(outer.from_literal(Some(&literal)).unwrap(), Some(value));
    }

    #[test]
    fn deep_copy_detaches_nested_arrays() {
        let inner: Arc<dyn ScalarCodec> = Arc::new(BigIntCodec::new());
        let inner_array: Arc<dyn ScalarCodec> = Arc::new(ArrayType::new(inner, vec![]));
        let outer = ArrayType::new(inner_array, vec![]);

        let original = vec![Some(SqlValue::Array(vec![int8(1), int8(2)]))];
        let mut copy = outer.deep_copy_array(Some(&original)).unwrap();

        if let Some(SqlValue::Array(nested)) = &mut copy[0] {
            nested[0] = int8(99);
        }
        assert_eq!(original[0], Some(SqlValue::Array(vec![int8(1), int8(2)])));
        assert_ne!(copy[0], original[0]);
    }

    #[test]
    fn disassemble_and_assemble_are_deep_copies() {
        let at = bigint_array();
        let value = vec![int8(5), None];
        let cached = at.disassemble(Some(&value)).unwrap();
        assert_eq!(cached, value);
        let restored = at.assemble(Some(&cached)).unwrap();
        assert_eq!(restored, value);
    }

    #[test]
    fn pg_uuid_element_pins_uuid_type_name() {
        let codec: Arc<dyn ScalarCodec> = Arc::new(crate::scalars::PgUuidCodec::new());
        let at = ArrayType::new(codec, vec![]);
        assert_eq!(at.sql_array_type_name(), "uuid");
    }

    #[test]
    fn offset_time_element_pins_timetz_type_name() {
        let codec: Arc<dyn ScalarCodec> = Arc::new(crate::scalars::TimeTzCodec::new());
        let at = ArrayType::new(codec, vec![]);
        assert_eq!(at.sql_array_type_name(), "timetz");
    }

    #[test]
    fn element_name_suffixes_are_stripped() {
        let at = {
            let inner: Arc<dyn ScalarCodec> = Arc::new(BigIntCodec::new());
            let inner_array: Arc<dyn ScalarCodec> = Arc::new(ArrayType::new(inner, vec![]));
            ArrayType::new(inner_array, vec![])
        };
        // element name "bigint[]" normalizes back to "bigint"
        assert_eq!(at.sql_array_type_name(), "bigint");
        assert_eq!(at.name(), "bigint[][]");
    }

    struct FixedDialect;

    impl Dialect for FixedDialect {
        fn type_name_for(&self, code: SqlTypeCode) -> Result<String> {
            match code {
                SqlTypeCode::BigInt => Ok("int8".to_string()),
                SqlTypeCode::Varchar => Ok("varchar(255)".to_string()),
                _ => bail!("no type name for code {}", code.code()),
            }
        }
    }

    #[test]
    fn resolve_type_name_strips_length_suffix() {
        let name =
            resolve_type_name(SqlTypeCode::Varchar, "string", false, &FixedDialect).unwrap();
        assert_eq!(name, "varchar");
    }

    #[test]
    fn resolve_type_name_fixed_bypasses_dialect() {
        let name = resolve_type_name(SqlTypeCode::Other, "uuid", true, &FixedDialect).unwrap();
        assert_eq!(name, "uuid");
    }

    #[test]
    fn resolve_type_name_other_uses_declared() {
        let name = resolve_type_name(SqlTypeCode::Other, "ltree", false, &FixedDialect).unwrap();
        assert_eq!(name, "ltree");
    }

    #[test]
    fn resolve_type_name_xml_is_fixed() {
        let name = resolve_type_name(SqlTypeCode::Xml, "anything", false, &FixedDialect).unwrap();
        assert_eq!(name, "xml");
    }
}

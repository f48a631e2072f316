//! # Bulk Array Type Registration
//!
//! Creates the array counterpart of every built-in scalar codec and hands
//! each one to the host type system through the [`TypeContributions`] seam.
//! Optional variants are gated by [`ArrayOptions`]; the flags are pure
//! inputs, resolved by the embedding layer before this runs.
//!
//! Runs once, single-threaded, during type-system bootstrap; the populated
//! registry is shared read-only afterwards.

use std::sync::Arc;

use tracing::debug;

use crate::array::{ArrayType, ArrayTypeRegistry};
use crate::config::{ArrayOptions, UuidRepresentation};
use crate::scalars::{
    BigIntCodec, BooleanCodec, ByteaCodec, CharacterCodec, DateCodec, DecimalCodec, DoubleCodec,
    FloatCodec, IntegerCodec, NTextCodec, NVarcharCodec, NumericBooleanCodec, PgUuidCodec,
    SmallIntCodec, TextCodec, TimeCodec, TimeTzCodec, TimestampCodec, TinyIntCodec,
    TrueFalseCodec, UuidCharCodec, VarcharCodec, YesNoCodec,
};
use crate::types::ScalarCodec;

/// Host type-system seam receiving each created array type.
pub trait TypeContributions {
    fn contribute(&mut self, array_type: Arc<ArrayType>);
}

/// Registers array types for the built-in scalar palette.
pub fn contribute(
    registry: &mut ArrayTypeRegistry,
    contributions: &mut dyn TypeContributions,
    options: &ArrayOptions,
) {
    debug!(
        byte_arrays = options.byte_arrays,
        char_arrays = options.char_arrays,
        national_string = options.national_string,
        national_text = options.national_text,
        uuid = ?options.uuid,
        "contributing array types"
    );

    let mut add = |codec: Arc<dyn ScalarCodec>| {
        let array_type = registry.get_or_create(&codec);
        contributions.contribute(array_type);
    };

    add(Arc::new(BooleanCodec::new()));
    add(Arc::new(NumericBooleanCodec::new()));
    add(Arc::new(TrueFalseCodec::new()));
    add(Arc::new(YesNoCodec::new()));
    add(Arc::new(SmallIntCodec::new()));
    add(Arc::new(IntegerCodec::new()));
    add(Arc::new(BigIntCodec::new()));
    add(Arc::new(FloatCodec::new()));
    add(Arc::new(DoubleCodec::new()));
    add(Arc::new(DecimalCodec::new()));
    add(Arc::new(VarcharCodec::new()));
    add(Arc::new(TextCodec::new()));
    add(Arc::new(ByteaCodec::new()));
    add(Arc::new(DateCodec::new()));
    add(Arc::new(TimeCodec::new()));
    add(Arc::new(TimeTzCodec::new()));
    add(Arc::new(TimestampCodec::new()));

    match options.uuid {
        UuidRepresentation::Native => add(Arc::new(PgUuidCodec::new())),
        UuidRepresentation::Text => add(Arc::new(UuidCharCodec::new())),
        UuidRepresentation::Both => {
            add(Arc::new(PgUuidCodec::new()));
            add(Arc::new(UuidCharCodec::new()));
        }
    }

    if options.byte_arrays {
        add(Arc::new(TinyIntCodec::new()));
    }
    if options.char_arrays {
        add(Arc::new(CharacterCodec::new()));
    }
    if options.national_string {
        add(Arc::new(NVarcharCodec::new()));
    }
    if options.national_text {
        add(Arc::new(NTextCodec::new()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Collected {
        names: Vec<String>,
    }

    impl TypeContributions for Collected {
        fn contribute(&mut self, array_type: Arc<ArrayType>) {
            self.names.push(array_type.name().to_string());
        }
    }

    #[test]
    fn default_options_register_core_palette() {
        let mut registry = ArrayTypeRegistry::new();
        let mut collected = Collected::default();
        contribute(&mut registry, &mut collected, &ArrayOptions::default());

        for expected in [
            "boolean[]",
            "integer[]",
            "bigint[]",
            "string[]",
            "timestamp[]",
            "pg-uuid[]",
        ] {
            assert!(
                collected.names.iter().any(|n| n == expected),
                "missing {}",
                expected
            );
        }
        assert!(!collected.names.iter().any(|n| n == "byte[]"));
        assert!(!collected.names.iter().any(|n| n == "character[]"));
        assert!(!collected.names.iter().any(|n| n == "uuid-char[]"));
    }

    #[test]
    fn flags_enable_optional_types() {
        let mut registry = ArrayTypeRegistry::new();
        let mut collected = Collected::default();
        let options = ArrayOptions {
            byte_arrays: true,
            char_arrays: true,
            national_string: true,
            national_text: true,
            uuid: UuidRepresentation::Both,
        };
        contribute(&mut registry, &mut collected, &options);

        for expected in [
            "byte[]",
            "character[]",
            "nstring[]",
            "ntext[]",
            "pg-uuid[]",
            "uuid-char[]",
        ] {
            assert!(
                collected.names.iter().any(|n| n == expected),
                "missing {}",
                expected
            );
        }
    }

    #[test]
    fn contributed_types_are_registry_instances() {
        let mut registry = ArrayTypeRegistry::new();
        let mut collected = Collected::default();
        contribute(&mut registry, &mut collected, &ArrayOptions::default());
        assert_eq!(registry.len(), collected.names.len());
    }
}

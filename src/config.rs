//! # Array Registration Options
//!
//! Switches selecting which optional scalar array types get registered.
//! Loading these from an environment or properties file is the embedding
//! layer's business; this crate only consumes the resolved values.

/// Which UUID representation(s) to register array types for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UuidRepresentation {
    /// Native uuid columns only.
    #[default]
    Native,
    /// Varchar-persisted UUIDs only.
    Text,
    /// Both representations.
    Both,
}

/// Feature flags consumed by [`crate::contributor::contribute`].
///
/// Everything defaults to off except the UUID representation, which defaults
/// to the native column type. Byte and character arrays are opt-in because
/// registering them changes how the host maps plain `Vec<u8>`/`Vec<char>`
/// fields.
#[derive(Debug, Clone, Default)]
pub struct ArrayOptions {
    /// Register the tinyint-element array type.
    pub byte_arrays: bool,
    /// Register the single-character-element array type.
    pub char_arrays: bool,
    /// Register the national varchar array type.
    pub national_string: bool,
    /// Register the national text array type.
    pub national_text: bool,
    /// UUID representation selection.
    pub uuid: UuidRepresentation,
}

impl ArrayOptions {
    pub fn new() -> Self {
        Self::default()
    }
}

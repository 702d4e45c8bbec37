/// Controls message validation and serialization behavior.
/// The default is lenient validation with full encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// When true, payload fields not declared by the schema are rejected.
    /// When false they are dropped from the validated instance.
    pub strict_mode: bool,
    /// When true, serialization omits fields whose value equals their default.
    pub compact_encoding: bool,
}

impl ValidatorConfig {
    /// Strict validation with full (non-compact) encoding.
    pub fn strict() -> Self {
        Self {
            strict_mode: true,
            ..Self::default()
        }
    }

    /// Lenient validation with compact encoding.
    pub fn compact() -> Self {
        Self {
            compact_encoding: true,
            ..Self::default()
        }
    }
}

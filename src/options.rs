/// Default nesting depth limit for objects and arrays.
pub const MAX_DEPTH: usize = 256;

/// Tunable decoding behavior shared by every entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// When set, the input must be strict RFC 8259 JSON: no comments,
    /// no trailing commas, no unquoted keys, no single quotes, no hex
    /// or signed numbers, no `NaN`/`Infinity`.
    pub strict: bool,
    /// Maximum permitted object/array nesting depth.
    pub max_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            strict: false,
            max_depth: MAX_DEPTH,
        }
    }
}

impl DecodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

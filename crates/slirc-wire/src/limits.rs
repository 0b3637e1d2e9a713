//! Parameter bounds enforced while decoding.

/// Default cap on the number of parameters in one message.
pub const DEFAULT_MAX_PARAMS: usize = 14;

/// Default cap on the byte length of a single middle parameter.
pub const DEFAULT_MAX_PARAM_LEN: usize = 14;

/// Independent bounds on parameter count and middle-parameter length.
///
/// The two caps are unrelated; tightening one never affects the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecodeLimits {
    /// Maximum number of parameters, trailing included.
    pub max_params: usize,
    /// Maximum byte length of a middle parameter. The trailing parameter is
    /// not length-checked.
    pub max_param_len: usize,
}

impl DecodeLimits {
    /// Limits with explicit values.
    pub const fn new(max_params: usize, max_param_len: usize) -> Self {
        Self {
            max_params,
            max_param_len,
        }
    }
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PARAMS, DEFAULT_MAX_PARAM_LEN)
    }
}

//! Decoder and framing limits configuration.

use serde::Deserialize;
use slirc_wire::{DEFAULT_MAX_PARAM_LEN, DEFAULT_MAX_PARAMS, DecodeLimits, MAX_LINE_LEN};

/// Decoder and framing limits.
///
/// The parameter count and parameter length caps are independent; raising
/// one leaves the other untouched.
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// Maximum parameters per message, trailing included (default: 14).
    #[serde(default = "default_max_params")]
    pub max_params: usize,
    /// Maximum bytes in a single middle parameter (default: 14).
    #[serde(default = "default_max_param_len")]
    pub max_param_len: usize,
    /// Maximum bytes per inbound line, terminator included (default: 512).
    #[serde(default = "default_max_line_len")]
    pub max_line_len: usize,
}

impl LimitsConfig {
    /// Limits handed to the decoder.
    pub fn decode_limits(&self) -> DecodeLimits {
        DecodeLimits::new(self.max_params, self.max_param_len)
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_params: default_max_params(),
            max_param_len: default_max_param_len(),
            max_line_len: default_max_line_len(),
        }
    }
}

fn default_max_params() -> usize {
    DEFAULT_MAX_PARAMS
}

fn default_max_param_len() -> usize {
    DEFAULT_MAX_PARAM_LEN
}

fn default_max_line_len() -> usize {
    MAX_LINE_LEN
}

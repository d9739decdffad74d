//! Sampling parameters sent with every generation request.

use serde::{Deserialize, Serialize};

/// Decoding knobs for a single generation call.
///
/// The sample count is not configurable; drivers always request one choice.
///
/// # Examples
///
/// ```
/// use whodunit_core::SamplingParams;
///
/// let params = SamplingParams::default();
/// assert_eq!(params.max_tokens, 4096);
/// assert_eq!(params.top_p, 0.7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingParams {
    /// Maximum number of tokens to generate
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
    /// Nucleus-sampling threshold
    pub top_p: f32,
    /// Penalty applied to frequently repeated tokens
    pub frequency_penalty: f32,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            max_tokens: 4096,
            temperature: 0.7,
            top_p: 0.7,
            frequency_penalty: 0.5,
        }
    }
}

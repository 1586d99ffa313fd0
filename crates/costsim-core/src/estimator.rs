//! Word-count based token and duration estimation.
//!
//! This is deliberately an approximation layer: a real tokenizer is
//! out of scope. Text is split on whitespace and scaled by a
//! tokens-per-word ratio; generation time is scaled by a
//! tokens-per-second throughput.

use serde::{Deserialize, Serialize};

/// Default tokens produced per English word.
pub const DEFAULT_TOKENS_PER_WORD: f64 = 1.3;
/// Default generation throughput in tokens per second.
pub const DEFAULT_TOKENS_PER_SECOND: f64 = 80.0;

/// Ratios used by the estimator. Both must be positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TokenEstimationConfig {
    /// Estimated tokens per whitespace-separated word
    pub tokens_per_word: f64,

    /// Estimated generation throughput (tokens per second)
    pub tokens_per_second: f64,
}

impl Default for TokenEstimationConfig {
    fn default() -> Self {
        Self {
            tokens_per_word: DEFAULT_TOKENS_PER_WORD,
            tokens_per_second: DEFAULT_TOKENS_PER_SECOND,
        }
    }
}

/// Estimate the token count of `text` by word count.
///
/// Empty or whitespace-only text estimates to 0 tokens.
pub fn estimate_tokens(text: &str, config: &TokenEstimationConfig) -> u64 {
    let words = text.split_whitespace().count();
    (words as f64 * config.tokens_per_word).round() as u64
}

/// Estimate how long `tokens` take to generate, in milliseconds.
pub fn tokens_to_duration_ms(tokens: u64, config: &TokenEstimationConfig) -> f64 {
    tokens as f64 / config.tokens_per_second * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_zero_tokens() {
        let config = TokenEstimationConfig::default();
        assert_eq!(estimate_tokens("", &config), 0);
        assert_eq!(estimate_tokens("   \t\n  ", &config), 0);
    }

    #[test]
    fn word_count_scales_by_ratio() {
        let config = TokenEstimationConfig::default();
        // 10 words * 1.3 = 13 tokens
        let text = "one two three four five six seven eight nine ten";
        assert_eq!(estimate_tokens(text, &config), 13);
    }

    #[test]
    fn rounding_is_nearest() {
        let config = TokenEstimationConfig {
            tokens_per_word: 1.3,
            tokens_per_second: 80.0,
        };
        // 3 words * 1.3 = 3.9 -> 4
        assert_eq!(estimate_tokens("a b c", &config), 4);
        // 1 word * 1.3 = 1.3 -> 1
        assert_eq!(estimate_tokens("hello", &config), 1);
    }

    #[test]
    fn duration_from_throughput() {
        let config = TokenEstimationConfig::default();
        // 80 tokens at 80 tok/s = 1 second
        assert!((tokens_to_duration_ms(80, &config) - 1000.0).abs() < 1e-9);
        assert_eq!(tokens_to_duration_ms(0, &config), 0.0);
    }
}

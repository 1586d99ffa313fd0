//! Shared result records produced by every calculator.
//!
//! All records are plain immutable values: recomputation replaces
//! them wholesale, nothing is mutated in place. Every percentage in
//! the workspace routes through [`savings_percent`] so a zero baseline
//! reports 0 rather than NaN or infinity.

use serde::{Deserialize, Serialize};

use crate::pricing::PricingModel;

/// Token usage and derived cost for one simulated request or rollup.
///
/// `total_cost` is always `input_cost + output_cost`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostResult {
    /// Input (prompt) tokens sent
    pub input_tokens: u64,

    /// Output (completion) tokens generated
    pub output_tokens: u64,

    /// Cost of the input tokens in USD
    pub input_cost: f64,

    /// Cost of the output tokens in USD
    pub output_cost: f64,

    /// Total cost in USD
    pub total_cost: f64,

    /// Estimated wall-clock time in milliseconds, when known
    pub estimated_time_ms: Option<f64>,
}

impl CostResult {
    /// Price token counts at the given rate card.
    pub fn from_tokens(input_tokens: u64, output_tokens: u64, pricing: &PricingModel) -> Self {
        let input_cost = pricing.input_cost(input_tokens);
        let output_cost = pricing.output_cost(output_tokens);
        Self {
            input_tokens,
            output_tokens,
            input_cost,
            output_cost,
            total_cost: input_cost + output_cost,
            estimated_time_ms: None,
        }
    }

    /// Build a result from pre-computed costs (used when input pools
    /// are billed at mixed rates, e.g. cache splits).
    pub fn from_costs(
        input_tokens: u64,
        output_tokens: u64,
        input_cost: f64,
        output_cost: f64,
    ) -> Self {
        Self {
            input_tokens,
            output_tokens,
            input_cost,
            output_cost,
            total_cost: input_cost + output_cost,
            estimated_time_ms: None,
        }
    }

    /// Attach a wall-clock estimate.
    pub fn with_time(mut self, estimated_time_ms: f64) -> Self {
        self.estimated_time_ms = Some(estimated_time_ms);
        self
    }

    /// Total tokens (input + output).
    pub fn total_tokens(&self) -> u64 {
        self.input_tokens + self.output_tokens
    }
}

/// Savings of an optimized result over a baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostComparison {
    /// Input tokens saved (negative if the optimized path sends more)
    pub tokens_saved: i64,

    /// Input-token savings as a percentage of the baseline (0 if baseline is 0)
    pub token_savings_percent: f64,

    /// Cost saved in USD
    pub cost_saved: f64,

    /// Cost savings as a percentage of the baseline (0 if baseline is 0)
    pub cost_savings_percent: f64,

    /// Wall-clock time saved, when both sides carry an estimate
    pub time_saved_ms: Option<f64>,

    /// baseline time / optimized time, when both sides carry an estimate
    pub speedup_factor: Option<f64>,
}

impl CostComparison {
    /// Compare an optimized result against a baseline.
    pub fn between(baseline: &CostResult, optimized: &CostResult) -> Self {
        let tokens_saved = baseline.input_tokens as i64 - optimized.input_tokens as i64;
        let cost_saved = baseline.total_cost - optimized.total_cost;

        let (time_saved_ms, speedup_factor) =
            match (baseline.estimated_time_ms, optimized.estimated_time_ms) {
                (Some(base), Some(opt)) => {
                    let speedup = if opt > 0.0 { Some(base / opt) } else { None };
                    (Some(base - opt), speedup)
                }
                _ => (None, None),
            };

        Self {
            tokens_saved,
            token_savings_percent: savings_percent(
                baseline.input_tokens as f64,
                tokens_saved as f64,
            ),
            cost_saved,
            cost_savings_percent: savings_percent(baseline.total_cost, cost_saved),
            time_saved_ms,
            speedup_factor,
        }
    }
}

/// Percentage of `baseline` that `saved` represents, guarded so a
/// zero (or non-positive) baseline reports exactly 0.
pub fn savings_percent(baseline: f64, saved: f64) -> f64 {
    if baseline > 0.0 {
        saved / baseline * 100.0
    } else {
        0.0
    }
}

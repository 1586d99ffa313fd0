//! Per-million-token pricing model and published presets.
//!
//! Prices are expressed in USD per million tokens, the unit every
//! provider publishes. Presets reflect the Anthropic rate card as of
//! late 2025; unknown tiers should fall back to [`PricingModel::sonnet`].

use serde::{Deserialize, Serialize};

/// Tokens per million, as f64 for cost math.
pub const TOKENS_PER_MILLION: f64 = 1_000_000.0;

/// Input/output pricing for a model, in USD per million tokens.
///
/// Invariant: prices are non-negative. Input is typically cheaper than
/// output, though nothing enforces that.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingModel {
    /// Price per million input tokens (USD)
    pub input_price_per_million: f64,

    /// Price per million output tokens (USD)
    pub output_price_per_million: f64,
}

impl PricingModel {
    /// Create a pricing model from per-million rates.
    pub const fn new(input_price_per_million: f64, output_price_per_million: f64) -> Self {
        Self {
            input_price_per_million,
            output_price_per_million,
        }
    }

    /// Haiku-class pricing ($1/MTok in, $5/MTok out).
    pub const fn haiku() -> Self {
        Self::new(1.0, 5.0)
    }

    /// Sonnet-class pricing ($3/MTok in, $15/MTok out).
    pub const fn sonnet() -> Self {
        Self::new(3.0, 15.0)
    }

    /// Opus-class pricing ($15/MTok in, $75/MTok out).
    pub const fn opus() -> Self {
        Self::new(15.0, 75.0)
    }

    /// Cost of `tokens` input tokens at the full input rate.
    pub fn input_cost(&self, tokens: u64) -> f64 {
        tokens as f64 / TOKENS_PER_MILLION * self.input_price_per_million
    }

    /// Cost of `tokens` output tokens.
    pub fn output_cost(&self, tokens: u64) -> f64 {
        tokens as f64 / TOKENS_PER_MILLION * self.output_price_per_million
    }

    /// Cost of a fractional input-token pool (cache splits produce
    /// fractional pools when the hit rate is not 0 or 1).
    pub fn input_cost_f(&self, tokens: f64) -> f64 {
        tokens / TOKENS_PER_MILLION * self.input_price_per_million
    }
}

impl Default for PricingModel {
    fn default() -> Self {
        Self::sonnet()
    }
}

/// Named pricing tier for CLI and scenario-file selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingTier {
    Haiku,
    Sonnet,
    Opus,
}

impl PricingTier {
    /// Resolve the tier to its rate card.
    pub fn pricing(self) -> PricingModel {
        match self {
            PricingTier::Haiku => PricingModel::haiku(),
            PricingTier::Sonnet => PricingModel::sonnet(),
            PricingTier::Opus => PricingModel::opus(),
        }
    }

    /// Human-readable label for report headers.
    pub fn label(self) -> &'static str {
        match self {
            PricingTier::Haiku => "haiku",
            PricingTier::Sonnet => "sonnet",
            PricingTier::Opus => "opus",
        }
    }
}

impl std::str::FromStr for PricingTier {
    type Err = crate::error::CostSimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "haiku" => Ok(PricingTier::Haiku),
            "sonnet" => Ok(PricingTier::Sonnet),
            "opus" => Ok(PricingTier::Opus),
            other => Err(crate::error::CostSimError::scenario(format!(
                "unknown pricing tier: {other}"
            ))),
        }
    }
}

//! What-if scenario files.
//!
//! A scenario bundles every calculator's configuration into one YAML
//! document so a whole comparison can be versioned and replayed:
//!
//! ```yaml
//! pricing: sonnet
//! turns: 20
//! conversation:
//!   system_prompt_tokens: 500
//!   user_message_tokens: 100
//!   assistant_message_tokens: 200
//! caching:
//!   enabled: true
//!   hit_rate: 0.9
//!   cache_discount: 0.1
//! budget:
//!   requests_per_day: 1000
//!   avg_input_tokens: 500
//!   avg_output_tokens: 200
//!   cache_hit_rate: 0.3
//!   cached_input_price_per_million: 0.1
//! tasks:
//!   - { column: 0, input_tokens: 300, output_tokens: 800, duration_ms: 2000 }
//!   - { column: 1, input_tokens: 400, output_tokens: 1000, duration_ms: 5000 }
//! ```
//!
//! `pricing` is either a tier name (`haiku`/`sonnet`/`opus`) or an
//! explicit rate map. The file stands in for the UI layer, so the two
//! rate fields are clamped into `0..=1` on load; nothing else is
//! validated (the engine tolerates nonsensical numbers by design).

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use costsim_core::{
    CostSimError, PricingModel, PricingTier, Result, TokenEstimationConfig,
};

use crate::budget::BudgetConfig;
use crate::caching::CachingConfig;
use crate::conversation::ConversationConfig;
use crate::strategy::{StrategyConfig, StrategyTask};

/// Pricing selection: a named tier or explicit per-million rates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PricingSpec {
    /// Named tier (`haiku`, `sonnet`, `opus`)
    Tier(PricingTier),

    /// Explicit rate card
    Custom(PricingModel),
}

impl PricingSpec {
    /// Resolve to a concrete rate card.
    pub fn resolve(&self) -> PricingModel {
        match self {
            PricingSpec::Tier(tier) => tier.pricing(),
            PricingSpec::Custom(model) => *model,
        }
    }
}

impl Default for PricingSpec {
    fn default() -> Self {
        PricingSpec::Tier(PricingTier::Sonnet)
    }
}

fn default_turns() -> u32 {
    20
}

/// One complete what-if scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    /// Rate card to price everything with
    pub pricing: PricingSpec,

    /// Conversation shape for the conversation/caching calculators
    pub conversation: ConversationConfig,

    /// Caching knobs
    pub caching: CachingConfig,

    /// Number of turns to simulate
    pub turns: u32,

    /// Estimator ratios for the `estimate` command
    pub estimation: TokenEstimationConfig,

    /// Orchestration knobs for the strategy comparison
    pub strategy: StrategyConfig,

    /// Task list for the strategy comparison (empty = not configured)
    pub tasks: Vec<StrategyTask>,

    /// Budget projection inputs, when requested
    pub budget: Option<BudgetConfig>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            pricing: PricingSpec::default(),
            conversation: ConversationConfig::default(),
            caching: CachingConfig::default(),
            turns: default_turns(),
            estimation: TokenEstimationConfig::default(),
            strategy: StrategyConfig::default(),
            tasks: Vec::new(),
            budget: None,
        }
    }
}

impl Scenario {
    /// Parse a scenario from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let mut scenario: Scenario = serde_yaml::from_str(yaml)?;
        scenario.clamp_rates();
        Ok(scenario)
    }

    /// Load a scenario from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => {
                CostSimError::scenario(format!("scenario file not found: {}", path.display()))
            }
            _ => CostSimError::Io(e),
        })?;
        let scenario = Self::from_yaml_str(&text)?;
        debug!(path = %path.display(), turns = scenario.turns, "scenario loaded");
        Ok(scenario)
    }

    /// Serialize back to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Rate card this scenario prices with.
    pub fn pricing(&self) -> PricingModel {
        self.pricing.resolve()
    }

    // Rates come from a hand-edited file rather than bounded sliders,
    // so clamp them where the UI layer normally would.
    fn clamp_rates(&mut self) {
        self.caching.hit_rate = self.caching.hit_rate.clamp(0.0, 1.0);
        self.caching.cache_discount = self.caching.cache_discount.clamp(0.0, 1.0);
        if let Some(budget) = &mut self.budget {
            budget.cache_hit_rate = budget.cache_hit_rate.clamp(0.0, 1.0);
        }
    }
}

//! Prefix-caching cost model.
//!
//! A provider caches the stable prefix of a prompt (system prompt plus
//! prior turns) and serves exact-match re-sends at a discount. Each
//! turn's payload splits into three pools:
//!
//! - cache hits: `hit_rate` of the prefix, billed at
//!   `input_price * cache_discount`
//! - cache misses: the rest of the prefix, billed at full input price
//!   (TTL expiry, replica routing)
//! - fresh tokens: the latest user message plus the assistant reply
//!   just appended to history, billed at full price (times the write
//!   premium when enabled, since they are written to cache for the
//!   first time)
//!
//! Turn 1 has no prefix: the whole `S + U` payload is fresh. Output
//! pricing is never affected by caching.
//!
//! With caching disabled, or `hit_rate == 0` and no premium, the
//! series reproduces the naive calculator exactly; both models share
//! one code path (the naive model is the degenerate configuration).

use serde::{Deserialize, Serialize};
use tracing::debug;

use costsim_core::{CostComparison, CostResult, PricingModel, savings_percent};

use crate::conversation::{ConversationConfig, conversation_total};

/// Multiplier applied to first-time cache writes when enabled.
pub const CACHE_WRITE_PREMIUM: f64 = 1.25;

/// Caching behavior knobs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CachingConfig {
    /// Whether caching applies at all; false degrades to the naive model
    pub enabled: bool,

    /// Fraction of the eligible prefix served from cache (0..=1)
    pub hit_rate: f64,

    /// Fraction of the input price retained on a cache hit
    /// (0.1 = pay 10%, i.e. a 90% discount)
    pub cache_discount: f64,

    /// Charge the write premium on first-time cache writes
    pub has_write_premium: bool,
}

impl Default for CachingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            hit_rate: 1.0,
            cache_discount: 0.1,
            has_write_premium: false,
        }
    }
}

impl CachingConfig {
    /// Config equivalent to no caching at all.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    fn write_multiplier(&self) -> f64 {
        if self.has_write_premium {
            CACHE_WRITE_PREMIUM
        } else {
            1.0
        }
    }
}

/// Per-turn breakdown under the caching model.
///
/// `billed_input_tokens` is the price-weighted equivalent of the raw
/// payload: hits weighted by the discount, fresh writes by the
/// premium. It is what savings percentages are measured over, since
/// the raw tokens sent are identical to the naive model's.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CachedTurnCost {
    /// 1-indexed turn number
    pub turn: u32,

    /// Raw input tokens sent this turn (same as the naive model)
    pub input_tokens: u64,

    /// Output tokens generated this turn
    pub output_tokens: u64,

    /// Cacheable prefix size this turn
    pub prefix_tokens: u64,

    /// Prefix tokens served from cache at the discounted rate
    pub cache_hit_tokens: f64,

    /// Prefix tokens missed and re-billed at full price
    pub cache_miss_tokens: f64,

    /// Genuinely new tokens, never previously sent
    pub fresh_tokens: u64,

    /// Price-weighted input-token equivalent
    pub billed_input_tokens: f64,

    /// Cost of this turn's input in USD
    pub input_cost: f64,

    /// Cost of this turn's output in USD
    pub output_cost: f64,

    /// Total cost of this turn in USD
    pub total_cost: f64,

    /// Raw input tokens sent across turns 1..=turn
    pub cumulative_input_tokens: u64,

    /// Billed-equivalent input tokens across turns 1..=turn
    pub cumulative_billed_tokens: f64,

    /// Total cost across turns 1..=turn in USD
    pub cumulative_total_cost: f64,
}

/// Compute the per-turn series under the caching model.
///
/// The same path serves the naive model: with `caching.enabled` false
/// the whole payload is treated as a cache miss every turn.
pub fn cached_series(
    conv: &ConversationConfig,
    pricing: &PricingModel,
    caching: &CachingConfig,
    turns: u32,
) -> Vec<CachedTurnCost> {
    let hit_rate = if caching.enabled { caching.hit_rate } else { 0.0 };
    let write_multiplier = if caching.enabled {
        caching.write_multiplier()
    } else {
        1.0
    };

    let mut series = Vec::with_capacity(turns as usize);
    let mut cumulative_input_tokens = 0u64;
    let mut cumulative_billed_tokens = 0.0f64;
    let mut cumulative_total_cost = 0.0f64;

    for k in 1..=turns {
        let input_tokens = conv.turn_input_tokens(k);

        // Everything that was new as of turn k-1 is cache-eligible;
        // turn 1 has nothing cached yet.
        let (prefix_tokens, fresh_tokens) = if k == 1 {
            (0, input_tokens)
        } else {
            let fresh = conv.user_message_tokens + conv.assistant_message_tokens;
            (input_tokens - fresh, fresh)
        };

        let cache_hit_tokens = prefix_tokens as f64 * hit_rate;
        let cache_miss_tokens = prefix_tokens as f64 * (1.0 - hit_rate);
        let billed_input_tokens = cache_hit_tokens * caching.cache_discount
            + cache_miss_tokens
            + fresh_tokens as f64 * write_multiplier;

        let input_cost = pricing.input_cost_f(billed_input_tokens);
        let output_cost = pricing.output_cost(conv.assistant_message_tokens);
        let total_cost = input_cost + output_cost;

        cumulative_input_tokens += input_tokens;
        cumulative_billed_tokens += billed_input_tokens;
        cumulative_total_cost += total_cost;

        series.push(CachedTurnCost {
            turn: k,
            input_tokens,
            output_tokens: conv.assistant_message_tokens,
            prefix_tokens,
            cache_hit_tokens,
            cache_miss_tokens,
            fresh_tokens,
            billed_input_tokens,
            input_cost,
            output_cost,
            total_cost,
            cumulative_input_tokens,
            cumulative_billed_tokens,
            cumulative_total_cost,
        });
    }

    debug!(
        turns,
        hit_rate,
        discount = caching.cache_discount,
        cumulative_total_cost,
        "cached conversation series computed"
    );
    series
}

/// Cumulative cost of a cached conversation over `turns` turns.
///
/// `input_tokens` holds the raw tokens sent; the discounting shows up
/// in `input_cost`.
pub fn cached_total(
    conv: &ConversationConfig,
    pricing: &PricingModel,
    caching: &CachingConfig,
    turns: u32,
) -> CostResult {
    let series = cached_series(conv, pricing, caching, turns);
    let input_tokens = series.last().map_or(0, |t| t.cumulative_input_tokens);
    let input_cost: f64 = series.iter().map(|t| t.input_cost).sum();
    let output_tokens = turns as u64 * conv.assistant_message_tokens;
    CostResult::from_costs(
        input_tokens,
        output_tokens,
        input_cost,
        pricing.output_cost(output_tokens),
    )
}

/// Caching vs naive savings over a whole conversation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CacheSavings {
    /// Cumulative cost with no caching
    pub naive: CostResult,

    /// Cumulative cost under the caching model
    pub cached: CostResult,

    /// Price-weighted input-token equivalent under caching
    pub billed_input_tokens: f64,

    /// Input-token savings measured over billed equivalents
    /// (0 when the naive baseline is 0)
    pub token_savings_percent: f64,

    /// Total cost saved in USD
    pub cost_saved: f64,

    /// Cost savings as a percentage of the naive total
    /// (0 when the naive baseline is 0)
    pub cost_savings_percent: f64,
}

/// Compare the caching model against the naive baseline.
pub fn cache_savings(
    conv: &ConversationConfig,
    pricing: &PricingModel,
    caching: &CachingConfig,
    turns: u32,
) -> CacheSavings {
    let naive = conversation_total(conv, pricing, turns);
    let series = cached_series(conv, pricing, caching, turns);

    let billed_input_tokens: f64 = series.iter().map(|t| t.billed_input_tokens).sum();
    let input_cost: f64 = series.iter().map(|t| t.input_cost).sum();
    let output_tokens = turns as u64 * conv.assistant_message_tokens;
    let cached = CostResult::from_costs(
        naive.input_tokens,
        output_tokens,
        input_cost,
        pricing.output_cost(output_tokens),
    );

    let cost_saved = naive.total_cost - cached.total_cost;
    CacheSavings {
        naive,
        cached,
        billed_input_tokens,
        token_savings_percent: savings_percent(
            naive.input_tokens as f64,
            naive.input_tokens as f64 - billed_input_tokens,
        ),
        cost_saved,
        cost_savings_percent: savings_percent(naive.total_cost, cost_saved),
    }
}

/// Convenience wrapper: CostComparison between naive and cached totals.
pub fn cache_comparison(
    conv: &ConversationConfig,
    pricing: &PricingModel,
    caching: &CachingConfig,
    turns: u32,
) -> CostComparison {
    let savings = cache_savings(conv, pricing, caching, turns);
    CostComparison::between(&savings.naive, &savings.cached)
}

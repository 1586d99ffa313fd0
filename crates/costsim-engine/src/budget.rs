//! Daily/monthly budget projection.
//!
//! Rolls per-request averages up to a monthly bill: one large "turn"
//! per day, split by a blended cache hit rate into a cached pool
//! (billed at a separate, lower per-million rate) and an uncached
//! pool at the full input price. Output tokens are always full price.
//! The discount semantics deliberately mirror the conversation
//! caching model, just at coarser granularity.

use serde::{Deserialize, Serialize};
use tracing::debug;

use costsim_core::{PricingModel, TOKENS_PER_MILLION, savings_percent};

/// Billing months are normalized to 30 days.
pub const DAYS_PER_MONTH: f64 = 30.0;

/// Workload shape for the projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetConfig {
    /// API requests per day
    pub requests_per_day: u64,

    /// Average input tokens per request
    pub avg_input_tokens: u64,

    /// Average output tokens per request
    pub avg_output_tokens: u64,

    /// Blended cache hit rate across all requests (0..=1)
    pub cache_hit_rate: f64,

    /// Rate for cached input tokens, USD per million
    pub cached_input_price_per_million: f64,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            requests_per_day: 1_000,
            avg_input_tokens: 500,
            avg_output_tokens: 200,
            cache_hit_rate: 0.3,
            cached_input_price_per_million: 0.1,
        }
    }
}

/// Projected daily and monthly spend, with and without caching.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetProjection {
    /// Input tokens served from cache per day
    pub cached_tokens_per_day: f64,

    /// Input tokens billed at full price per day
    pub uncached_tokens_per_day: f64,

    /// Daily cost with no caching (USD)
    pub daily_cost_no_caching: f64,

    /// Monthly cost with no caching (USD)
    pub monthly_cost_no_caching: f64,

    /// Daily cost with caching (USD)
    pub daily_cost_with_caching: f64,

    /// Monthly cost with caching (USD)
    pub monthly_cost_with_caching: f64,

    /// Monthly savings from caching (USD)
    pub monthly_savings: f64,

    /// Savings as a percentage of the uncached monthly bill
    /// (0 when that baseline is 0)
    pub savings_percent: f64,
}

/// Project a workload to a monthly bill.
pub fn project_budget(config: &BudgetConfig, pricing: &PricingModel) -> BudgetProjection {
    let input_tokens_per_day = (config.requests_per_day * config.avg_input_tokens) as f64;
    let output_tokens_per_day = (config.requests_per_day * config.avg_output_tokens) as f64;

    let output_cost_per_day =
        output_tokens_per_day / TOKENS_PER_MILLION * pricing.output_price_per_million;

    let daily_cost_no_caching =
        pricing.input_cost_f(input_tokens_per_day) + output_cost_per_day;

    let cached_tokens_per_day = input_tokens_per_day * config.cache_hit_rate;
    let uncached_tokens_per_day = input_tokens_per_day * (1.0 - config.cache_hit_rate);

    let daily_cost_with_caching = cached_tokens_per_day / TOKENS_PER_MILLION
        * config.cached_input_price_per_million
        + pricing.input_cost_f(uncached_tokens_per_day)
        + output_cost_per_day;

    let monthly_cost_no_caching = daily_cost_no_caching * DAYS_PER_MONTH;
    let monthly_cost_with_caching = daily_cost_with_caching * DAYS_PER_MONTH;
    let monthly_savings = monthly_cost_no_caching - monthly_cost_with_caching;

    let projection = BudgetProjection {
        cached_tokens_per_day,
        uncached_tokens_per_day,
        daily_cost_no_caching,
        monthly_cost_no_caching,
        daily_cost_with_caching,
        monthly_cost_with_caching,
        monthly_savings,
        savings_percent: savings_percent(monthly_cost_no_caching, monthly_savings),
    };

    debug!(
        requests_per_day = config.requests_per_day,
        monthly_cost_no_caching,
        monthly_cost_with_caching,
        "budget projected"
    );
    projection
}

//! # costsim-engine
//!
//! The token-cost simulation calculators: pure functions from
//! configuration records to result records, recomputed in full on
//! every input change.
//!
//! This crate provides:
//! - [`conversation`] - Naive resend-everything conversation costs (quadratic growth)
//! - [`caching`] - Prefix-caching costs with hit rate, discount, and write premium
//! - [`strategy`] - Sequential vs parallel execution-strategy comparison
//! - [`budget`] - Daily/monthly budget projection
//! - [`Scenario`] - YAML what-if scenario files bundling all of the above
//!
//! Every calculator is deterministic: identical configuration always
//! produces identical results, so callers may recompute as often as
//! they like. None of them fail; division-by-zero cases report 0.
//!
//! ## Example
//!
//! ```
//! use costsim_core::PricingModel;
//! use costsim_engine::caching::{CachingConfig, cache_savings};
//! use costsim_engine::conversation::ConversationConfig;
//!
//! let conv = ConversationConfig::default();
//! let caching = CachingConfig::default();
//! let savings = cache_savings(&conv, &PricingModel::sonnet(), &caching, 20);
//! assert!(savings.cost_saved > 0.0);
//! ```

pub mod budget;
pub mod caching;
pub mod conversation;
pub mod scenario;
pub mod strategy;

// Re-export main types
pub use budget::{BudgetConfig, BudgetProjection, project_budget};
pub use caching::{
    CacheSavings, CachedTurnCost, CachingConfig, cache_savings, cached_series, cached_total,
};
pub use conversation::{
    ConversationConfig, MAX_SERIES_TURNS, TurnCost, conversation_series, conversation_total,
};
pub use scenario::Scenario;
pub use strategy::{
    StrategyComparison, StrategyConfig, StrategyTask, compare_strategies,
};

//! # costsim-core
//!
//! Shared types, pricing presets, and utilities for the costsim
//! token-cost simulation engine.
//!
//! This crate provides:
//! - [`PricingModel`] - Per-million-token pricing with published presets
//! - [`TokenEstimationConfig`] - Word-count based token/duration estimation
//! - [`CostResult`] / [`CostComparison`] - Result records shared by all calculators
//! - [`CostSimError`] - Error types for the scenario/CLI boundary
//! - [`logging`] - Tracing setup
//!
//! ## Example
//!
//! ```
//! use costsim_core::{CostResult, PricingModel};
//!
//! let pricing = PricingModel::sonnet();
//! let result = CostResult::from_tokens(1_000, 500, &pricing);
//! assert!((result.total_cost - result.input_cost - result.output_cost).abs() < 1e-12);
//! ```

pub mod error;
pub mod estimator;
pub mod logging;
pub mod pricing;
pub mod types;

// Re-export main types for convenience
pub use error::{CostSimError, Result};
pub use estimator::{TokenEstimationConfig, estimate_tokens, tokens_to_duration_ms};
pub use logging::{init_logging, init_test_logging};
pub use pricing::{PricingModel, PricingTier, TOKENS_PER_MILLION};
pub use types::{CostComparison, CostResult, savings_percent};

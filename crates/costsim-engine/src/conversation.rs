//! Naive conversation cost model: every turn resends the entire
//! transcript with no caching.
//!
//! For 1-indexed turn `k` with shape `(S, U, A)` (system prompt, user
//! message, assistant message tokens), the input payload is
//! `S + k*U + (k-1)*A`: the system prompt every turn, all user
//! messages including the current one, and all assistant replies
//! except the one not yet generated. Cumulative input grows
//! quadratically in the turn count, which is the whole point of the
//! visualization this feeds.

use serde::{Deserialize, Serialize};
use tracing::debug;

use costsim_core::{CostResult, PricingModel};

/// Upper bound the graph series ever iterates to.
pub const MAX_SERIES_TURNS: u32 = 40;

/// Static and per-turn token sizes of a simulated chat conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversationConfig {
    /// System prompt tokens, resent every turn
    pub system_prompt_tokens: u64,

    /// Tokens per user message
    pub user_message_tokens: u64,

    /// Tokens per assistant reply
    pub assistant_message_tokens: u64,
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            system_prompt_tokens: 500,
            user_message_tokens: 100,
            assistant_message_tokens: 200,
        }
    }
}

impl ConversationConfig {
    /// Input tokens sent on 1-indexed turn `k`: `S + k*U + (k-1)*A`.
    pub fn turn_input_tokens(&self, k: u32) -> u64 {
        let k = k as u64;
        self.system_prompt_tokens
            + k * self.user_message_tokens
            + k.saturating_sub(1) * self.assistant_message_tokens
    }

    /// Closed-form cumulative input tokens over turns `1..=n`:
    /// `n*S + U*n(n+1)/2 + A*n(n-1)/2`.
    ///
    /// Matches the iterative series sum exactly at integer inputs.
    pub fn cumulative_input_tokens(&self, n: u32) -> u64 {
        let n = n as u64;
        n * self.system_prompt_tokens
            + self.user_message_tokens * n * (n + 1) / 2
            + self.assistant_message_tokens * n * n.saturating_sub(1) / 2
    }
}

/// Per-turn cost breakdown for the turn-by-turn graph series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TurnCost {
    /// 1-indexed turn number
    pub turn: u32,

    /// Input tokens sent this turn
    pub input_tokens: u64,

    /// Output tokens generated this turn
    pub output_tokens: u64,

    /// Cost of this turn's input in USD
    pub input_cost: f64,

    /// Cost of this turn's output in USD
    pub output_cost: f64,

    /// Total cost of this turn in USD
    pub total_cost: f64,

    /// Input tokens sent across turns 1..=turn
    pub cumulative_input_tokens: u64,

    /// Total cost across turns 1..=turn in USD
    pub cumulative_total_cost: f64,
}

/// Compute the naive per-turn series for turns `1..=turns`.
///
/// A bounded iteration with running sums; `turns == 0` yields an
/// empty series.
pub fn conversation_series(
    conv: &ConversationConfig,
    pricing: &PricingModel,
    turns: u32,
) -> Vec<TurnCost> {
    let mut series = Vec::with_capacity(turns as usize);
    let mut cumulative_input_tokens = 0u64;
    let mut cumulative_total_cost = 0.0f64;

    for k in 1..=turns {
        let input_tokens = conv.turn_input_tokens(k);
        let output_tokens = conv.assistant_message_tokens;
        let input_cost = pricing.input_cost(input_tokens);
        let output_cost = pricing.output_cost(output_tokens);
        let total_cost = input_cost + output_cost;

        cumulative_input_tokens += input_tokens;
        cumulative_total_cost += total_cost;

        series.push(TurnCost {
            turn: k,
            input_tokens,
            output_tokens,
            input_cost,
            output_cost,
            total_cost,
            cumulative_input_tokens,
            cumulative_total_cost,
        });
    }

    debug!(turns, cumulative_input_tokens, "naive conversation series computed");
    series
}

/// Cumulative cost of a naive conversation over `turns` turns.
pub fn conversation_total(
    conv: &ConversationConfig,
    pricing: &PricingModel,
    turns: u32,
) -> CostResult {
    let input_tokens = conv.cumulative_input_tokens(turns);
    let output_tokens = turns as u64 * conv.assistant_message_tokens;
    CostResult::from_tokens(input_tokens, output_tokens, pricing)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chat_shape() -> ConversationConfig {
        ConversationConfig {
            system_prompt_tokens: 500,
            user_message_tokens: 100,
            assistant_message_tokens: 200,
        }
    }

    #[test]
    fn turn_one_input_is_system_plus_user() {
        let conv = chat_shape();
        assert_eq!(conv.turn_input_tokens(1), 600);
    }

    #[test]
    fn turn_two_input_includes_first_exchange() {
        let conv = chat_shape();
        // S + 2U + A = 500 + 200 + 200
        assert_eq!(conv.turn_input_tokens(2), 900);
    }

    #[test]
    fn closed_form_matches_iterative_sum() {
        let conv = chat_shape();
        let pricing = PricingModel::sonnet();
        for n in 1..=MAX_SERIES_TURNS {
            let series = conversation_series(&conv, &pricing, n);
            assert_eq!(
                series.last().unwrap().cumulative_input_tokens,
                conv.cumulative_input_tokens(n),
                "mismatch at n={n}"
            );
        }
    }

    #[test]
    fn cumulative_growth_is_quadratic() {
        let conv = chat_shape();
        // N*S + U*N(N+1)/2 + A*N(N-1)/2 at N=10:
        // 5000 + 100*55 + 200*45 = 19500
        assert_eq!(conv.cumulative_input_tokens(10), 19_500);

        // Second difference of a quadratic is constant (U + A).
        let d = |n: u32| conv.cumulative_input_tokens(n + 1) - conv.cumulative_input_tokens(n);
        assert_eq!(d(5) - d(4), 300);
        assert_eq!(d(20) - d(19), 300);
    }

    #[test]
    fn series_costs_accumulate() {
        let conv = chat_shape();
        let pricing = PricingModel::new(1.0, 5.0);
        let series = conversation_series(&conv, &pricing, 3);

        assert_eq!(series.len(), 3);
        let manual: f64 = series.iter().map(|t| t.total_cost).sum();
        assert!((series[2].cumulative_total_cost - manual).abs() < 1e-12);

        let total = conversation_total(&conv, &pricing, 3);
        assert_eq!(total.input_tokens, series[2].cumulative_input_tokens);
        assert_eq!(total.output_tokens, 600);
        assert!((total.total_cost - series[2].cumulative_total_cost).abs() < 1e-9);
    }

    #[test]
    fn zero_turns_is_empty() {
        let conv = chat_shape();
        let pricing = PricingModel::sonnet();
        assert!(conversation_series(&conv, &pricing, 0).is_empty());
        let total = conversation_total(&conv, &pricing, 0);
        assert_eq!(total.input_tokens, 0);
        assert_eq!(total.total_cost, 0.0);
    }

    #[test]
    fn series_is_deterministic() {
        let conv = chat_shape();
        let pricing = PricingModel::sonnet();
        let a = conversation_series(&conv, &pricing, 25);
        let b = conversation_series(&conv, &pricing, 25);
        assert_eq!(a, b);
    }
}

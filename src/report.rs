//! Plain-text report rendering for the CLI.
//!
//! All formatting lives here: the engine returns raw numbers only,
//! and anything printed is derived losslessly from those numbers.

use costsim_core::CostResult;
use costsim_engine::budget::BudgetProjection;
use costsim_engine::caching::{CacheSavings, CachedTurnCost};
use costsim_engine::conversation::TurnCost;
use costsim_engine::strategy::StrategyComparison;

/// Group digits with thousands separators (12345 -> "12,345").
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Whole-cent currency ("$45.00").
pub fn format_currency(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// Sub-cent currency for per-turn and per-request figures.
pub fn format_currency_precise(amount: f64) -> String {
    if amount.abs() < 0.01 {
        format!("${:.6}", amount)
    } else {
        format!("${:.4}", amount)
    }
}

fn format_ms(ms: f64) -> String {
    if ms >= 1_000.0 {
        format!("{:.1}s", ms / 1_000.0)
    } else {
        format!("{:.0}ms", ms)
    }
}

pub fn print_conversation_series(series: &[TurnCost]) {
    println!("{:>5} {:>14} {:>14} {:>12} {:>16} {:>14}",
        "turn", "input tok", "cum input", "turn cost", "cum cost", "output tok");
    println!("{}", "-".repeat(80));
    for turn in series {
        println!(
            "{:>5} {:>14} {:>14} {:>12} {:>16} {:>14}",
            turn.turn,
            format_number(turn.input_tokens),
            format_number(turn.cumulative_input_tokens),
            format_currency_precise(turn.total_cost),
            format_currency_precise(turn.cumulative_total_cost),
            format_number(turn.output_tokens),
        );
    }
}

pub fn print_cached_series(series: &[CachedTurnCost]) {
    println!(
        "{:>5} {:>12} {:>12} {:>12} {:>10} {:>12} {:>16}",
        "turn", "prefix", "hit tok", "miss tok", "fresh", "turn cost", "cum cost"
    );
    println!("{}", "-".repeat(86));
    for turn in series {
        println!(
            "{:>5} {:>12} {:>12.0} {:>12.0} {:>10} {:>12} {:>16}",
            turn.turn,
            format_number(turn.prefix_tokens),
            turn.cache_hit_tokens,
            turn.cache_miss_tokens,
            format_number(turn.fresh_tokens),
            format_currency_precise(turn.total_cost),
            format_currency_precise(turn.cumulative_total_cost),
        );
    }
}

pub fn print_cost_result(label: &str, result: &CostResult) {
    println!("{label}");
    println!("  input tokens:   {:>14}", format_number(result.input_tokens));
    println!("  output tokens:  {:>14}", format_number(result.output_tokens));
    println!("  input cost:     {:>14}", format_currency_precise(result.input_cost));
    println!("  output cost:    {:>14}", format_currency_precise(result.output_cost));
    println!("  total cost:     {:>14}", format_currency_precise(result.total_cost));
    if let Some(ms) = result.estimated_time_ms {
        println!("  est. time:      {:>14}", format_ms(ms));
    }
}

pub fn print_cache_savings(savings: &CacheSavings) {
    print_cost_result("WITHOUT CACHING", &savings.naive);
    println!();
    print_cost_result("WITH CACHING", &savings.cached);
    println!();
    println!("SAVINGS");
    println!("  cost saved:     {:>14}", format_currency_precise(savings.cost_saved));
    println!("  cost savings:   {:>13.1}%", savings.cost_savings_percent);
    println!("  token savings:  {:>13.1}%", savings.token_savings_percent);
}

pub fn print_strategy_comparison(comparison: &StrategyComparison) {
    print_cost_result("SEQUENTIAL (accumulating context)", &comparison.sequential);
    println!();
    print_cost_result("PARALLEL (isolated workers + synthesis)", &comparison.parallel);
    println!();
    println!("COMPARISON");
    println!("  tokens saved:   {:>14}", comparison.comparison.tokens_saved);
    println!("  cost saved:     {:>14}", format_currency_precise(comparison.comparison.cost_saved));
    println!("  cost savings:   {:>13.1}%", comparison.comparison.cost_savings_percent);
    if let Some(speedup) = comparison.comparison.speedup_factor {
        println!("  speedup:        {:>13.2}x", speedup);
    }
}

pub fn print_budget_projection(projection: &BudgetProjection) {
    println!("WITHOUT CACHING");
    println!("  daily cost:     {:>14}", format_currency(projection.daily_cost_no_caching));
    println!("  monthly cost:   {:>14}", format_currency(projection.monthly_cost_no_caching));
    println!();
    println!("WITH CACHING");
    println!("  cached tok/day: {:>14}", format_number(projection.cached_tokens_per_day as u64));
    println!("  uncached/day:   {:>14}", format_number(projection.uncached_tokens_per_day as u64));
    println!("  daily cost:     {:>14}", format_currency(projection.daily_cost_with_caching));
    println!("  monthly cost:   {:>14}", format_currency(projection.monthly_cost_with_caching));
    println!();
    println!("SAVINGS");
    println!("  monthly:        {:>14}", format_currency(projection.monthly_savings));
    println!("  percent:        {:>13.1}%", projection.savings_percent);
}

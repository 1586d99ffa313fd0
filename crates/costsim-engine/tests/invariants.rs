//! Black-box invariant tests over the public calculator API.

use costsim_core::{CostResult, PricingModel};
use costsim_engine::budget::{BudgetConfig, project_budget};
use costsim_engine::caching::{CachingConfig, cache_savings, cached_series, cached_total};
use costsim_engine::conversation::{
    ConversationConfig, conversation_series, conversation_total,
};
use costsim_engine::scenario::Scenario;
use costsim_engine::strategy::{StrategyConfig, StrategyTask, compare_strategies};

fn chat_shape() -> ConversationConfig {
    ConversationConfig {
        system_prompt_tokens: 500,
        user_message_tokens: 100,
        assistant_message_tokens: 200,
    }
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn calculators_are_deterministic() {
    let conv = chat_shape();
    let pricing = PricingModel::sonnet();
    let caching = CachingConfig {
        hit_rate: 0.85,
        cache_discount: 0.1,
        has_write_premium: true,
        enabled: true,
    };

    assert_eq!(
        conversation_series(&conv, &pricing, 40),
        conversation_series(&conv, &pricing, 40)
    );
    assert_eq!(
        cached_series(&conv, &pricing, &caching, 40),
        cached_series(&conv, &pricing, &caching, 40)
    );
    assert_eq!(
        cache_savings(&conv, &pricing, &caching, 40),
        cache_savings(&conv, &pricing, &caching, 40)
    );
}

#[test]
fn zero_denominators_report_zero_not_nan() {
    let pricing = PricingModel::sonnet();
    let empty_conv = ConversationConfig {
        system_prompt_tokens: 0,
        user_message_tokens: 0,
        assistant_message_tokens: 0,
    };

    let savings = cache_savings(&empty_conv, &pricing, &CachingConfig::default(), 10);
    assert_eq!(savings.token_savings_percent, 0.0);
    assert_eq!(savings.cost_savings_percent, 0.0);

    let projection = project_budget(
        &BudgetConfig {
            requests_per_day: 0,
            ..BudgetConfig::default()
        },
        &pricing,
    );
    assert_eq!(projection.savings_percent, 0.0);

    let comparison = compare_strategies(&[], &StrategyConfig::default(), &pricing);
    assert_eq!(comparison.comparison.token_savings_percent, 0.0);
    assert_eq!(comparison.comparison.cost_savings_percent, 0.0);

    for value in [
        savings.token_savings_percent,
        savings.cost_savings_percent,
        projection.savings_percent,
        comparison.comparison.cost_savings_percent,
    ] {
        assert!(value.is_finite());
    }
}

#[test]
fn naive_growth_matches_closed_form() {
    let conv = chat_shape();
    let pricing = PricingModel::sonnet();

    // Turn 1: S + U = 600 in, 200 out. Turn 2 per-turn input: S + 2U + A = 900.
    let series = conversation_series(&conv, &pricing, 2);
    assert_eq!(series[0].input_tokens, 600);
    assert_eq!(series[0].output_tokens, 200);
    assert_eq!(series[1].input_tokens, 900);

    for n in [1u32, 2, 5, 10, 25, 40] {
        let expected = n as u64 * 500
            + 100 * (n as u64 * (n as u64 + 1)) / 2
            + 200 * (n as u64 * (n as u64 - 1)) / 2;
        let total = conversation_total(&conv, &pricing, n);
        assert_eq!(total.input_tokens, expected, "closed form mismatch at n={n}");
        let series = conversation_series(&conv, &pricing, n);
        assert_eq!(series.last().unwrap().cumulative_input_tokens, expected);
    }
}

#[test]
fn unit_discount_degrades_to_naive() {
    let conv = chat_shape();
    let pricing = PricingModel::sonnet();
    for hit_rate in [0.0, 0.25, 0.5, 0.9, 1.0] {
        let caching = CachingConfig {
            enabled: true,
            hit_rate,
            cache_discount: 1.0,
            has_write_premium: false,
        };
        let cached = cached_total(&conv, &pricing, &caching, 20);
        let naive = conversation_total(&conv, &pricing, 20);
        assert!(
            close(cached.total_cost, naive.total_cost),
            "hit_rate={hit_rate}: {} vs {}",
            cached.total_cost,
            naive.total_cost
        );
    }
}

#[test]
fn zero_hit_rate_degrades_to_naive_per_turn() {
    let conv = chat_shape();
    let pricing = PricingModel::sonnet();
    let caching = CachingConfig {
        enabled: true,
        hit_rate: 0.0,
        cache_discount: 0.1,
        has_write_premium: false,
    };

    let cached = cached_series(&conv, &pricing, &caching, 20);
    let naive = conversation_series(&conv, &pricing, 20);
    for (c, n) in cached.iter().zip(&naive) {
        assert_eq!(c.input_cost, n.input_cost, "turn {}", c.turn);
        assert_eq!(c.total_cost, n.total_cost, "turn {}", c.turn);
        assert_eq!(c.cumulative_total_cost, n.cumulative_total_cost);
    }
}

#[test]
fn hit_rate_benefit_is_monotonic() {
    let conv = chat_shape();
    let pricing = PricingModel::sonnet();
    let mut previous = f64::INFINITY;
    for step in 0..=20 {
        let caching = CachingConfig {
            enabled: true,
            hit_rate: step as f64 / 20.0,
            cache_discount: 0.1,
            has_write_premium: false,
        };
        let total = cached_total(&conv, &pricing, &caching, 10).total_cost;
        assert!(total <= previous, "cost rose at step {step}");
        previous = total;
    }
}

#[test]
fn turn_one_charges_full_payload() {
    let conv = chat_shape();
    let pricing = PricingModel::sonnet();

    for has_write_premium in [false, true] {
        let caching = CachingConfig {
            enabled: true,
            hit_rate: 1.0,
            cache_discount: 0.1,
            has_write_premium,
        };
        let series = cached_series(&conv, &pricing, &caching, 1);
        let t1 = &series[0];

        assert_eq!(t1.cache_hit_tokens, 0.0);
        assert_eq!(t1.prefix_tokens, 0);
        let premium = if has_write_premium { 1.25 } else { 1.0 };
        assert!(close(t1.input_cost, pricing.input_cost(600) * premium));
    }
}

#[test]
fn parallel_speedup_is_at_least_one() {
    let tasks = vec![
        StrategyTask { column: 0, input_tokens: 200, output_tokens: 500, duration_ms: 1_000.0 },
        StrategyTask { column: 1, input_tokens: 300, output_tokens: 700, duration_ms: 4_000.0 },
        StrategyTask { column: 1, input_tokens: 300, output_tokens: 700, duration_ms: 2_500.0 },
        StrategyTask { column: 1, input_tokens: 300, output_tokens: 700, duration_ms: 3_000.0 },
        StrategyTask { column: 2, input_tokens: 250, output_tokens: 400, duration_ms: 2_000.0 },
    ];
    let comparison = compare_strategies(&tasks, &StrategyConfig::default(), &PricingModel::sonnet());

    let sequential_ms: f64 = tasks.iter().map(|t| t.duration_ms).sum();
    let parallel_ms = 1_000.0 + 4_000.0 + 2_000.0;
    assert_eq!(comparison.sequential.estimated_time_ms, Some(sequential_ms));
    assert_eq!(comparison.parallel.estimated_time_ms, Some(parallel_ms));

    let speedup = comparison.comparison.speedup_factor.unwrap();
    assert!(speedup >= 1.0);
    assert!(close(speedup, sequential_ms / parallel_ms));
}

#[test]
fn budget_worked_scenario() {
    let config = BudgetConfig {
        requests_per_day: 1_000,
        avg_input_tokens: 500,
        avg_output_tokens: 200,
        cache_hit_rate: 0.3,
        cached_input_price_per_million: 0.1,
    };
    let pricing = PricingModel::new(1.0, 5.0);
    let projection = project_budget(&config, &pricing);

    assert!(close(projection.monthly_cost_no_caching, 45.0));
    assert!(close(projection.cached_tokens_per_day, 150_000.0));
    assert!(close(projection.uncached_tokens_per_day, 350_000.0));

    // (150k @ $0.1/M + 350k @ $1/M + 200k @ $5/M) * 30
    let expected = (0.015 + 0.35 + 1.0) * 30.0;
    assert!(close(projection.monthly_cost_with_caching, expected));
    assert!(projection.monthly_cost_with_caching < 45.0);
    assert!(close(projection.monthly_savings, 45.0 - expected));
}

#[test]
fn scenario_drives_every_calculator() {
    let yaml = r#"
pricing: haiku
turns: 10
caching:
  enabled: true
  hit_rate: 0.9
  cache_discount: 0.1
budget:
  requests_per_day: 1000
  avg_input_tokens: 500
  avg_output_tokens: 200
  cache_hit_rate: 0.3
  cached_input_price_per_million: 0.1
tasks:
  - { column: 0, input_tokens: 300, output_tokens: 800, duration_ms: 2000 }
  - { column: 1, input_tokens: 400, output_tokens: 1000, duration_ms: 5000 }
  - { column: 1, input_tokens: 400, output_tokens: 900, duration_ms: 4000 }
"#;
    let scenario = Scenario::from_yaml_str(yaml).unwrap();
    let pricing = scenario.pricing();

    let naive = conversation_total(&scenario.conversation, &pricing, scenario.turns);
    let savings = cache_savings(&scenario.conversation, &pricing, &scenario.caching, scenario.turns);
    assert!(savings.cached.total_cost < naive.total_cost);

    let comparison = compare_strategies(&scenario.tasks, &scenario.strategy, &pricing);
    assert!(comparison.comparison.speedup_factor.unwrap() > 1.0);

    let projection = project_budget(&scenario.budget.unwrap(), &pricing);
    assert!(projection.monthly_savings > 0.0);
}

#[test]
fn results_serialize_to_plain_json() {
    // The UI contract: result records are flat JSON-serializable numbers.
    let pricing = PricingModel::sonnet();
    let result = CostResult::from_tokens(1_000, 200, &pricing);
    let json = serde_json::to_value(result).unwrap();

    assert_eq!(json["input_tokens"], 1_000);
    assert_eq!(json["output_tokens"], 200);
    assert!(json["total_cost"].is_f64());
    assert!(json["estimated_time_ms"].is_null());
}

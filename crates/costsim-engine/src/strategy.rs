//! Sequential vs parallel execution-strategy cost comparison.
//!
//! Models a multi-step task two ways:
//!
//! - **Sequential**: one context accumulates monotonically; each
//!   step's input carries every prior step's full output.
//! - **Parallel**: each step runs in an isolated context and reports
//!   back a bounded summary; an orchestrator synthesizes the
//!   summaries in one final pass.
//!
//! Tasks carry an opaque `column` (dependency level) and `duration_ms`
//! weight. Sequential wall-clock time is the sum of all durations;
//! parallel time is the critical path: the sum over columns of the
//! longest task in each column. No DAG shape beyond "tasks grouped
//! into ordered columns" is assumed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use costsim_core::{CostComparison, CostResult, PricingModel};

/// One step of a multi-step task, reduced to scheduling weights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrategyTask {
    /// Dependency level; tasks sharing a column may run concurrently
    pub column: u32,

    /// Tokens of task-specific input (instructions, materials)
    pub input_tokens: u64,

    /// Tokens the step produces
    pub output_tokens: u64,

    /// Estimated execution time in milliseconds
    pub duration_ms: f64,
}

/// Knobs for the orchestration model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    /// Tokens of each worker's summary reported to the orchestrator
    pub summary_tokens: u64,

    /// Shared context tokens every participant starts from
    pub orchestrator_context_tokens: u64,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            summary_tokens: 200,
            orchestrator_context_tokens: 500,
        }
    }
}

/// Both strategies priced side by side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrategyComparison {
    /// Accumulating-context execution
    pub sequential: CostResult,

    /// Isolated-context workers plus a synthesis pass
    pub parallel: CostResult,

    /// Savings of parallel over sequential
    pub comparison: CostComparison,
}

/// Price a task list under both strategies.
pub fn compare_strategies(
    tasks: &[StrategyTask],
    config: &StrategyConfig,
    pricing: &PricingModel,
) -> StrategyComparison {
    let sequential = sequential_cost(tasks, config, pricing);
    let parallel = parallel_cost(tasks, config, pricing);
    let comparison = CostComparison::between(&sequential, &parallel);

    debug!(
        tasks = tasks.len(),
        sequential_cost = sequential.total_cost,
        parallel_cost = parallel.total_cost,
        speedup = comparison.speedup_factor,
        "strategies compared"
    );

    StrategyComparison {
        sequential,
        parallel,
        comparison,
    }
}

/// Sequential model: step i resends the shared context, its own
/// input, and every prior step's full output.
fn sequential_cost(
    tasks: &[StrategyTask],
    config: &StrategyConfig,
    pricing: &PricingModel,
) -> CostResult {
    let mut input_tokens = 0u64;
    let mut output_tokens = 0u64;
    let mut carried_outputs = 0u64;
    let mut duration_ms = 0.0f64;

    for task in tasks {
        input_tokens += config.orchestrator_context_tokens + task.input_tokens + carried_outputs;
        output_tokens += task.output_tokens;
        carried_outputs += task.output_tokens;
        duration_ms += task.duration_ms;
    }

    CostResult::from_tokens(input_tokens, output_tokens, pricing).with_time(duration_ms)
}

/// Parallel model: each worker is billed in isolation; one synthesis
/// pass reads a bounded summary per worker.
fn parallel_cost(
    tasks: &[StrategyTask],
    config: &StrategyConfig,
    pricing: &PricingModel,
) -> CostResult {
    let mut input_tokens = 0u64;
    let mut output_tokens = 0u64;

    for task in tasks {
        input_tokens += config.orchestrator_context_tokens + task.input_tokens;
        output_tokens += task.output_tokens;
    }

    if !tasks.is_empty() {
        // Synthesis turn: shared context plus one summary per worker.
        input_tokens +=
            config.orchestrator_context_tokens + tasks.len() as u64 * config.summary_tokens;
    }

    CostResult::from_tokens(input_tokens, output_tokens, pricing)
        .with_time(critical_path_ms(tasks))
}

/// Critical-path time: per column, only the slowest task matters.
fn critical_path_ms(tasks: &[StrategyTask]) -> f64 {
    let mut column_max: BTreeMap<u32, f64> = BTreeMap::new();
    for task in tasks {
        let slot = column_max.entry(task.column).or_insert(0.0);
        if task.duration_ms > *slot {
            *slot = task.duration_ms;
        }
    }
    column_max.values().sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(column: u32, input: u64, output: u64, duration: f64) -> StrategyTask {
        StrategyTask {
            column,
            input_tokens: input,
            output_tokens: output,
            duration_ms: duration,
        }
    }

    fn fan_out() -> Vec<StrategyTask> {
        vec![
            task(0, 300, 800, 2_000.0),
            // Three independent workers in one column
            task(1, 400, 1_000, 5_000.0),
            task(1, 400, 1_200, 4_000.0),
            task(1, 400, 900, 6_000.0),
            task(2, 200, 600, 3_000.0),
        ]
    }

    #[test]
    fn sequential_context_accumulates() {
        let tasks = vec![task(0, 100, 500, 1_000.0), task(1, 100, 500, 1_000.0)];
        let config = StrategyConfig::default();
        let pricing = PricingModel::sonnet();
        let seq = sequential_cost(&tasks, &config, &pricing);

        // Step 1: 500 ctx + 100; step 2: 500 ctx + 100 + 500 carried.
        assert_eq!(seq.input_tokens, 1_700);
        assert_eq!(seq.output_tokens, 1_000);
        assert_eq!(seq.estimated_time_ms, Some(2_000.0));
    }

    #[test]
    fn parallel_context_is_isolated() {
        let tasks = vec![task(0, 100, 500, 1_000.0), task(0, 100, 500, 3_000.0)];
        let config = StrategyConfig::default();
        let pricing = PricingModel::sonnet();
        let par = parallel_cost(&tasks, &config, &pricing);

        // Two workers (600 each) + synthesis (500 + 2*200).
        assert_eq!(par.input_tokens, 2_100);
        // Same column: only the slower task counts.
        assert_eq!(par.estimated_time_ms, Some(3_000.0));
    }

    #[test]
    fn critical_path_sums_column_maxima() {
        let tasks = fan_out();
        // 2000 + max(5000, 4000, 6000) + 3000
        assert!((critical_path_ms(&tasks) - 11_000.0).abs() < 1e-9);
    }

    #[test]
    fn speedup_at_least_one_with_parallel_columns() {
        let comparison = compare_strategies(&fan_out(), &StrategyConfig::default(), &PricingModel::sonnet());
        let speedup = comparison.comparison.speedup_factor.unwrap();
        assert!(speedup >= 1.0);
        // Sequential 20s vs 11s critical path.
        assert!((speedup - 20_000.0 / 11_000.0).abs() < 1e-9);
    }

    #[test]
    fn parallel_saves_tokens_on_wide_fan_out() {
        let comparison = compare_strategies(&fan_out(), &StrategyConfig::default(), &PricingModel::sonnet());
        assert!(comparison.comparison.tokens_saved > 0);
        assert!(comparison.comparison.cost_saved > 0.0);
        assert!(comparison.parallel.total_cost < comparison.sequential.total_cost);
    }

    #[test]
    fn single_task_has_no_speedup() {
        let tasks = vec![task(0, 100, 200, 1_500.0)];
        let comparison = compare_strategies(&tasks, &StrategyConfig::default(), &PricingModel::sonnet());
        assert_eq!(comparison.comparison.speedup_factor, Some(1.0));
        // Parallel still pays the synthesis pass, so it can cost more.
        assert!(comparison.parallel.input_tokens > comparison.sequential.input_tokens);
    }

    #[test]
    fn empty_task_list_is_all_zero() {
        let comparison = compare_strategies(&[], &StrategyConfig::default(), &PricingModel::sonnet());
        assert_eq!(comparison.sequential.total_tokens(), 0);
        assert_eq!(comparison.parallel.total_tokens(), 0);
        assert_eq!(comparison.comparison.cost_savings_percent, 0.0);
        // Zero parallel time: no finite speedup to report.
        assert_eq!(comparison.comparison.speedup_factor, None);
    }

    #[test]
    fn comparison_is_deterministic() {
        let config = StrategyConfig::default();
        let pricing = PricingModel::opus();
        let a = compare_strategies(&fan_out(), &config, &pricing);
        let b = compare_strategies(&fan_out(), &config, &pricing);
        assert_eq!(a, b);
    }
}

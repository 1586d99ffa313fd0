//! costsim - Token-cost simulation CLI
//!
//! Drives the cost calculators from the command line, standing in for
//! the interactive visualizers that normally consume the engine.
//!
//! ## Usage
//!
//! ```bash
//! # Naive conversation growth over 20 turns on sonnet pricing
//! costsim conversation --turns 20 --tier sonnet
//!
//! # Caching economics with a 90% hit rate
//! costsim caching --turns 20 --hit-rate 0.9
//!
//! # Replay a whole scenario file
//! costsim --scenario what-if.yaml caching
//!
//! # Sequential vs parallel orchestration (tasks come from the scenario)
//! costsim --scenario what-if.yaml compare
//!
//! # Monthly bill projection
//! costsim budget --requests-per-day 1000 --cache-hit-rate 0.3
//!
//! # Word-count token estimate
//! costsim estimate "how many tokens is this sentence"
//! ```

mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use costsim_core::{
    PricingModel, PricingTier, estimate_tokens, init_logging, tokens_to_duration_ms,
};
use costsim_engine::budget::project_budget;
use costsim_engine::caching::{cache_savings, cached_series};
use costsim_engine::conversation::{MAX_SERIES_TURNS, conversation_series, conversation_total};
use costsim_engine::scenario::Scenario;
use costsim_engine::strategy::compare_strategies;

/// Token-cost simulation for LLM conversation, caching, orchestration,
/// and budget what-ifs.
#[derive(Parser, Debug)]
#[command(name = "costsim")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Scenario YAML file providing baseline configuration
    #[arg(long, global = true)]
    scenario: Option<PathBuf>,

    /// Emit raw JSON results instead of formatted tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Naive conversation cost growth (full history resent every turn)
    Conversation {
        /// Number of turns to simulate (max 40)
        #[arg(long)]
        turns: Option<u32>,

        /// Pricing tier (haiku, sonnet, opus)
        #[arg(long)]
        tier: Option<PricingTier>,
    },

    /// Prompt-caching economics versus the naive baseline
    Caching {
        /// Number of turns to simulate (max 40)
        #[arg(long)]
        turns: Option<u32>,

        /// Pricing tier (haiku, sonnet, opus)
        #[arg(long)]
        tier: Option<PricingTier>,

        /// Fraction of the prefix served from cache (0-1)
        #[arg(long)]
        hit_rate: Option<f64>,

        /// Fraction of the input price paid on a hit (0-1)
        #[arg(long)]
        discount: Option<f64>,

        /// Charge a 1.25x premium on first-time cache writes
        #[arg(long)]
        write_premium: bool,
    },

    /// Sequential vs parallel execution strategy (tasks from the scenario file)
    Compare {
        /// Pricing tier (haiku, sonnet, opus)
        #[arg(long)]
        tier: Option<PricingTier>,
    },

    /// Daily/monthly budget projection
    Budget {
        /// API requests per day
        #[arg(long)]
        requests_per_day: Option<u64>,

        /// Average input tokens per request
        #[arg(long)]
        avg_input: Option<u64>,

        /// Average output tokens per request
        #[arg(long)]
        avg_output: Option<u64>,

        /// Blended cache hit rate (0-1)
        #[arg(long)]
        cache_hit_rate: Option<f64>,

        /// Pricing tier (haiku, sonnet, opus)
        #[arg(long)]
        tier: Option<PricingTier>,
    },

    /// Estimate tokens and generation time for a piece of text
    Estimate {
        /// Text to estimate
        text: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose > 0);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let scenario = load_scenario(cli.scenario.as_deref())?;
    debug!(?cli.command, "dispatching");

    match cli.command {
        Command::Conversation { turns, tier } => {
            let turns = clamp_turns(turns.unwrap_or(scenario.turns));
            let pricing = resolve_pricing(tier, &scenario);
            let series = conversation_series(&scenario.conversation, &pricing, turns);

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&series)?);
            } else {
                report::print_conversation_series(&series);
                println!();
                let total = conversation_total(&scenario.conversation, &pricing, turns);
                report::print_cost_result("TOTAL (no caching)", &total);
            }
        }

        Command::Caching {
            turns,
            tier,
            hit_rate,
            discount,
            write_premium,
        } => {
            let turns = clamp_turns(turns.unwrap_or(scenario.turns));
            let pricing = resolve_pricing(tier, &scenario);

            let mut caching = scenario.caching;
            caching.enabled = true;
            if let Some(rate) = hit_rate {
                caching.hit_rate = rate.clamp(0.0, 1.0);
            }
            if let Some(d) = discount {
                caching.cache_discount = d.clamp(0.0, 1.0);
            }
            if write_premium {
                caching.has_write_premium = true;
            }

            let savings = cache_savings(&scenario.conversation, &pricing, &caching, turns);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&savings)?);
            } else {
                let series = cached_series(&scenario.conversation, &pricing, &caching, turns);
                report::print_cached_series(&series);
                println!();
                report::print_cache_savings(&savings);
            }
        }

        Command::Compare { tier } => {
            if scenario.tasks.is_empty() {
                bail!("no tasks configured; pass --scenario with a `tasks:` list");
            }
            let pricing = resolve_pricing(tier, &scenario);
            let comparison = compare_strategies(&scenario.tasks, &scenario.strategy, &pricing);

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&comparison)?);
            } else {
                report::print_strategy_comparison(&comparison);
            }
        }

        Command::Budget {
            requests_per_day,
            avg_input,
            avg_output,
            cache_hit_rate,
            tier,
        } => {
            let pricing = resolve_pricing(tier, &scenario);
            let mut config = scenario.budget.unwrap_or_default();
            if let Some(requests) = requests_per_day {
                config.requests_per_day = requests;
            }
            if let Some(input) = avg_input {
                config.avg_input_tokens = input;
            }
            if let Some(output) = avg_output {
                config.avg_output_tokens = output;
            }
            if let Some(rate) = cache_hit_rate {
                config.cache_hit_rate = rate.clamp(0.0, 1.0);
            }

            let projection = project_budget(&config, &pricing);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&projection)?);
            } else {
                report::print_budget_projection(&projection);
            }
        }

        Command::Estimate { text } => {
            let tokens = estimate_tokens(&text, &scenario.estimation);
            let duration_ms = tokens_to_duration_ms(tokens, &scenario.estimation);

            if cli.json {
                println!(
                    "{}",
                    serde_json::json!({
                        "tokens": tokens,
                        "estimated_duration_ms": duration_ms,
                    })
                );
            } else {
                println!("estimated tokens:      {}", report::format_number(tokens));
                println!("estimated generation:  {:.0}ms", duration_ms);
            }
        }
    }

    Ok(())
}

/// Load the scenario file when given, otherwise use defaults.
fn load_scenario(path: Option<&std::path::Path>) -> anyhow::Result<Scenario> {
    match path {
        Some(path) => {
            let scenario = Scenario::from_yaml_file(path)
                .with_context(|| format!("loading scenario {}", path.display()))?;
            info!(path = %path.display(), "scenario loaded");
            Ok(scenario)
        }
        None => Ok(Scenario::default()),
    }
}

/// CLI tier flag wins over the scenario's pricing block.
fn resolve_pricing(tier: Option<PricingTier>, scenario: &Scenario) -> PricingModel {
    tier.map(PricingTier::pricing).unwrap_or_else(|| scenario.pricing())
}

/// Keep graph series within the bound the visualizers use.
fn clamp_turns(turns: u32) -> u32 {
    turns.min(MAX_SERIES_TURNS)
}

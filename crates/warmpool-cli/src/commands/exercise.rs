//! `warmpool exercise` command.
//!
//! Builds one pool over the engine simulator and randomly checks members
//! out and gives them back, then prints the resulting counters.

use anyhow::Context;
use clap::Args;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use warmpool_config::WarmpoolConfig;
use warmpool_runtime::{
    PoolRegistry, PooledInstance, RegistryConfig, RuntimeError, SimFactory, SimHandle,
};
use warmpool_types::{PoolDefinition, PoolKey};

use crate::output;

/// Randomly check out and return members of a simulated pool.
#[derive(Debug, Args)]
pub struct ExerciseArgs {
    /// Pool key.
    #[arg(long, default_value = "Pool1")]
    pub pool: String,
    /// Members created up front.
    #[arg(long, default_value = "2")]
    pub initial: usize,
    /// Comma-separated template names.
    #[arg(long, value_delimiter = ',', default_value = "Actor")]
    pub templates: Vec<String>,
    /// Allow the pool to grow past its initial size.
    #[arg(long)]
    pub expandable: bool,
    /// Growth ceiling (defaults to registry.default_max_size).
    #[arg(long)]
    pub max_size: Option<usize>,
    /// Number of random checkout/return steps.
    #[arg(long, default_value = "20")]
    pub steps: usize,
    /// Seed for both template selection and step choices.
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Tally of one exercise run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub checked_out: usize,
    pub refused: usize,
    pub returned: usize,
    pub still_held: usize,
}

/// Executes the exercise command.
pub fn execute(args: &ExerciseArgs, config: &WarmpoolConfig) -> anyhow::Result<()> {
    let (registry, tally) = run(args, config)?;

    output::print_success(&format!(
        "{} steps: {} checked out, {} returned, {} refused, {} still held",
        args.steps, tally.checked_out, tally.returned, tally.refused, tally.still_held
    ));
    if tally.refused > 0 {
        output::print_warning("some checkouts were refused; the pool ran dry");
    }
    println!();
    for stats in registry.stats() {
        output::print_pool_stats(&stats);
    }
    println!();
    output::print_metrics(&registry.metrics().snapshot());
    Ok(())
}

/// Builds the registry and performs the random walk.
pub fn run(
    args: &ExerciseArgs,
    config: &WarmpoolConfig,
) -> anyhow::Result<(PoolRegistry<SimFactory>, Tally)> {
    let key = PoolKey::new(args.pool.as_str())?;
    let mut definition =
        PoolDefinition::new(key, args.templates.clone()).with_initial_size(args.initial);
    definition.expandable = args.expandable;
    definition.max_size = args
        .max_size
        .unwrap_or(config.registry.default_max_size);
    if !args.expandable {
        // The ceiling only matters for growth; a fixed pool is its prewarm.
        definition.max_size = definition.max_size.max(args.initial);
    }

    let seed = args.seed.or(config.registry.rng_seed);
    let mut registry = PoolRegistry::new(SimFactory::new(), RegistryConfig { rng_seed: seed });
    registry
        .initialize([definition])
        .into_result()
        .context("failed to build pool")?;

    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s.wrapping_add(1)),
        None => StdRng::from_entropy(),
    };
    let mut held: Vec<PooledInstance<SimHandle>> = Vec::new();
    let mut tally = Tally::default();

    for step in 0..args.steps {
        if held.is_empty() || rng.gen_bool(0.5) {
            match registry.checkout(&args.pool) {
                Ok(instance) => {
                    info!(step, member = %instance.name(), "checked out");
                    tally.checked_out += 1;
                    held.push(instance);
                }
                Err(RuntimeError::PoolExhausted { .. }) => tally.refused += 1,
                Err(e) => return Err(e.into()),
            }
        } else {
            let instance = held.swap_remove(rng.gen_range(0..held.len()));
            info!(step, member = %instance.name(), "giving back");
            registry.give_back(instance);
            tally.returned += 1;
        }
    }

    tally.still_held = held.len();
    Ok((registry, tally))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(initial: usize, expandable: bool, max_size: Option<usize>) -> ExerciseArgs {
        ExerciseArgs {
            pool: "Pool1".into(),
            initial,
            templates: vec!["Grunt".into(), "Brute".into()],
            expandable,
            max_size,
            steps: 50,
            seed: Some(17),
        }
    }

    #[test]
    fn fixed_pool_never_grows() {
        let (registry, tally) =
            run(&args(2, false, None), &WarmpoolConfig::default()).expect("run");
        let stats = registry.stats();
        assert_eq!(stats[0].total_created, 2);
        assert_eq!(stats[0].outstanding, tally.still_held);
        assert_eq!(tally.checked_out, tally.returned + tally.still_held);
    }

    #[test]
    fn expandable_pool_respects_max_size() {
        let (registry, _) =
            run(&args(0, true, Some(3)), &WarmpoolConfig::default()).expect("run");
        assert!(registry.stats()[0].total_created <= 3);
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let config = WarmpoolConfig::default();
        let (_, a) = run(&args(1, true, Some(4)), &config).expect("run");
        let (_, b) = run(&args(1, true, Some(4)), &config).expect("run");
        assert_eq!(a, b);
    }

    #[test]
    fn blank_pool_key_is_rejected() {
        let mut bad = args(1, false, None);
        bad.pool = " ".into();
        assert!(run(&bad, &WarmpoolConfig::default()).is_err());
    }
}

//! Gillespie simulation of a random catalytic reaction network
//!
//! Every reaction has the form `R + C -> P + C` with mass-action rate `k * x_R * x_C`. Firing a
//! reaction changes the counts of `R` and `P`, so only the reactions that involve either species
//! need new rates. Those are precomputed into a dependency list per species.
//!
//! Shrinking `num_species` while keeping `num_reactions` fixed makes the simulation slower: the
//! dependency graph gets denser and each step has to update more weights.

use std::{error::Error, fs, path::PathBuf};

use discrete_distribution::distribution::CategoricalSampler;
use log::info;
use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_distr::{Distribution, Exp, LogNormal, Poisson};

/// Configuration for the random network simulation
#[derive(Debug, Clone)]
struct RandomNetworkConfig {
    num_species: usize,
    num_reactions: usize,
    /// Upper bound on the number of simulated reactions
    max_steps: usize,
    /// A trajectory row is written every `record_every` steps
    record_every: usize,
    seed: u64,
    /// Where the trajectory CSV is written
    output: PathBuf,
}

impl Default for RandomNetworkConfig {
    fn default() -> Self {
        Self {
            num_species: 1_000_000,
            num_reactions: 1_000_000,
            max_steps: 1_000_000,
            record_every: 10_000,
            seed: 0,
            output: PathBuf::from("local/random_network.csv"),
        }
    }
}

/// A catalytic transformation `R + C -> P + C`
struct Reaction {
    reactant: usize,
    catalyst: usize,
    product: usize,
    base_rate: f64,
}

impl Reaction {
    fn rate(&self, species: &[u64]) -> f64 {
        self.base_rate * (species[self.reactant] * species[self.catalyst]) as f64
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = RandomNetworkConfig::default();
    info!("{:?}", config);

    let mut rng = StdRng::seed_from_u64(config.seed);

    let count = Poisson::new(1.0)?;
    let mut species = (0..config.num_species)
        .map(|_| 1 + count.sample(&mut rng) as u64)
        .collect::<Vec<_>>();

    let base_rate = LogNormal::new(0.0, 1.0)?;
    let mut reactions = Vec::with_capacity(config.num_reactions);
    while reactions.len() < config.num_reactions {
        let reaction = Reaction {
            reactant: rng.gen_range(0..config.num_species),
            catalyst: rng.gen_range(0..config.num_species),
            product: rng.gen_range(0..config.num_species),
            base_rate: base_rate.sample(&mut rng),
        };
        // self-catalysis would need a different rate law
        if reaction.reactant == reaction.catalyst {
            continue;
        }
        reactions.push(reaction);
    }

    // Reactions whose rate depends on each species
    let mut dependencies = vec![Vec::new(); config.num_species];
    for (ix, reaction) in reactions.iter().enumerate() {
        dependencies[reaction.reactant].push(ix);
        dependencies[reaction.catalyst].push(ix);
    }

    let mut sampler = reactions
        .iter()
        .map(|reaction| reaction.rate(&species))
        .collect::<CategoricalSampler>();
    info!(
        "initialized {} reactions, total rate {}",
        sampler.len(),
        sampler.sum()
    );

    if let Some(dir) = config.output.parent() {
        fs::create_dir_all(dir)?;
    }
    let mut wtr = csv::Writer::from_path(&config.output)?;
    wtr.write_record(["step", "time", "total_rate"])?;

    let mut time = 0.0_f64;
    let mut step = 0;
    while step < config.max_steps {
        if sampler.sum() == 0.0 {
            info!("every reaction is exhausted");
            break;
        }

        time += Exp::new(sampler.sum())?.sample(&mut rng);

        let fired = &reactions[sampler.draw(&mut rng)];
        species[fired.reactant] -= 1;
        species[fired.product] += 1;

        // The most expensive part in a dense network
        for &dep in dependencies[fired.reactant]
            .iter()
            .chain(&dependencies[fired.product])
        {
            sampler.update(dep, reactions[dep].rate(&species));
        }

        step += 1;
        if step % config.record_every == 0 {
            wtr.write_record(&[step.to_string(), time.to_string(), sampler.sum().to_string()])?;
        }
    }

    wtr.flush()?;

    info!("Stopped after {step} reactions");
    info!("Simulated time: {time}");
    info!("Trajectory written to {}", config.output.display());

    Ok(())
}

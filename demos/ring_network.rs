//! Gillespie simulation of a circular reaction network
//!
//! ```text
//!       k      k      k        k        k      k
//!  ... ---> 0 ---> 1 ---> ... ---> N-1 ---> 0 ---> ...
//! ```
//!
//! Reaction `i` turns one molecule of species `i` into species `i + 1` at rate `k * x_i`.
//! With 100k species and 100k steps this finishes in well under a second because each step
//! only costs a few `O(log N)` sampler operations.

use std::error::Error;

use discrete_distribution::distribution::CategoricalSampler;
use log::info;
use rand::{rngs::StdRng, SeedableRng};
use rand_distr::{Distribution, Exp};

/// Configuration for the ring simulation
#[derive(Debug, Clone)]
struct RingNetworkConfig {
    /// Number of species, and therefore reactions
    num_species: usize,
    /// Rate constant `k` shared by every reaction
    base_rate: f64,
    /// Molecules of species 0 at time zero
    initial_count: i64,
    /// Number of reactions to simulate
    steps: usize,
    seed: u64,
}

impl Default for RingNetworkConfig {
    fn default() -> Self {
        Self {
            num_species: 100_000,
            base_rate: 0.1,
            initial_count: 5,
            steps: 100_000,
            seed: 0,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = RingNetworkConfig::default();
    info!("{:?}", config);

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut species = vec![0i64; config.num_species];
    let mut reactions = CategoricalSampler::new(&vec![0.0; config.num_species]);

    species[0] = config.initial_count;
    reactions.update(0, config.base_rate * species[0] as f64);

    let rate = |count: i64| config.base_rate * count as f64;

    let mut time = 0.0_f64;
    for step in 1..=config.steps {
        // The total rate is the sampler's weight sum, available in O(1)
        time += Exp::new(reactions.sum())?.sample(&mut rng);

        let reactant = reactions.draw(&mut rng);
        let product = (reactant + 1) % config.num_species;
        species[reactant] -= 1;
        species[product] += 1;

        reactions.update(reactant, rate(species[reactant]));
        reactions.update(product, rate(species[product]));

        if step % 10_000 == 0 {
            info!("step {step}: t = {time:.3}, total rate = {}", reactions.sum());
        }
    }

    let population: i64 = species.iter().sum();
    assert_eq!(population, config.initial_count, "population is conserved");

    println!("{}\t{}", time, species[0]);

    Ok(())
}

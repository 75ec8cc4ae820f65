use discrete_distribution::{distribution::CategoricalSampler, weights::WeightBag};
use rand::{rngs::StdRng, SeedableRng};
use rand_distr::{Distribution, Exp};
use statrs::distribution::{ChiSquared, ContinuousCDF};

fn log_init_test() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn construct_and_query() {
    log_init_test();
    let bag = WeightBag::from([1.0, 2.0, 3.0]);

    assert_eq!(bag.len(), 3);
    assert_eq!(bag.sum(), 6.0);
    assert_eq!(bag.as_slice(), [1.0, 2.0, 3.0]);

    for (probe, ix) in [
        (0.0, 0),
        (0.999, 0),
        (1.0, 1),
        (2.999, 1),
        (3.0, 2),
        (5.999, 2),
    ] {
        assert_eq!(bag.find(probe), ix, "probe {probe}");
    }
}

#[test]
fn zero_weight_skipping() {
    log_init_test();
    let mut bag = WeightBag::from([1.0, 0.0, 2.0, 3.0]);
    assert_eq!(bag.find(1.0), 2, "zero-weight index 1 is skipped");

    bag.update(1, 2.0);
    assert_eq!(bag.find(1.0), 1);
    assert_eq!(bag.find(2.5), 1);
    assert_eq!(bag.find(4.0), 2);

    bag.update(2, 0.0);
    assert_eq!(bag.find(4.0), 3);
    assert_eq!(bag.find(2.5), 1);
}

#[test]
fn overshoot_and_undershoot() {
    log_init_test();
    let bag = WeightBag::from([1.0, 2.0, 3.0]);

    assert_eq!(bag.find(-0.1), 0);
    assert_eq!(bag.find(-0.0), 0);
    assert_eq!(bag.find(6.0), 2);
    assert_eq!(bag.find(6.1), 2);
}

#[test]
fn dynamic_switch() {
    log_init_test();
    let mut rng = StdRng::seed_from_u64(0);
    let mut sampler = CategoricalSampler::new(&[1.0, 0.0]);

    let draws = (0..3).map(|_| sampler.draw(&mut rng)).collect::<Vec<_>>();
    assert_eq!(draws, [0, 0, 0]);

    sampler.update(0, 0.0);
    sampler.update(1, 1.0);
    let draws = (0..3).map(|_| sampler.draw(&mut rng)).collect::<Vec<_>>();
    assert_eq!(draws, [1, 1, 1]);
}

#[test]
fn round_trip_serialization() {
    log_init_test();
    let origin = WeightBag::from([1.2, 3.4, 5.6]);
    let roundtrip: WeightBag = origin.to_string().parse().unwrap();

    assert_eq!(roundtrip.len(), 3);
    for (a, b) in origin.iter().zip(&roundtrip) {
        assert!((a - b).abs() <= f64::EPSILON * a.abs(), "{a} vs {b}");
    }
    assert!((roundtrip.sum() - 10.2).abs() < 1e-12);
}

#[test]
fn empirical_distribution_converges() {
    log_init_test();
    let weights = [1.0, 0.0, 2.0, 3.0, 4.0];
    let weight_sum: f64 = weights.iter().sum();

    let sample_count = 10_000;
    let sampler = CategoricalSampler::new(&weights);
    let mut rng = StdRng::seed_from_u64(19_937);

    let mut histogram = vec![0usize; sampler.max() + 1];
    for _ in 0..sample_count {
        histogram[sampler.draw(&mut rng)] += 1;
    }

    assert_eq!(histogram[1], 0, "zero-weight index is never drawn");

    let sample_weight = weight_sum / sample_count as f64;
    for i in sampler.min()..=sampler.max() {
        let estimate = histogram[i] as f64 * sample_weight;
        assert!(
            (estimate - weights[i]).abs() <= 0.1 * weights[i],
            "index {i}: estimated weight {estimate}, expected {}",
            weights[i]
        );
    }

    // Pearson goodness of fit over the non-zero categories
    let statistic: f64 = weights
        .iter()
        .zip(&histogram)
        .filter(|&(&w, _)| w > 0.0)
        .map(|(&w, &observed)| {
            let expected = sample_count as f64 * w / weight_sum;
            (observed as f64 - expected).powi(2) / expected
        })
        .sum();
    let p_value = 1.0 - ChiSquared::new(3.0).unwrap().cdf(statistic);
    assert!(p_value > 1e-3, "chi-squared {statistic}, p = {p_value}");
}

#[test]
fn gillespie_ring_network() {
    log_init_test();
    let num_species = 100_000;
    let base_rate = 0.1;
    let initial_count = 5;
    let steps = 100_000;

    let mut rng = StdRng::seed_from_u64(1);
    let mut species = vec![0i64; num_species];
    let mut reactions = CategoricalSampler::new(&vec![0.0; num_species]);

    species[0] = initial_count;
    reactions.update(0, base_rate * species[0] as f64);

    let mut time = 0.0_f64;
    for _ in 0..steps {
        time += Exp::new(reactions.sum()).unwrap().sample(&mut rng);

        let reactant = reactions.draw(&mut rng);
        let product = (reactant + 1) % num_species;
        assert!(species[reactant] > 0, "drew a reaction with no reactant");

        species[reactant] -= 1;
        species[product] += 1;
        reactions.update(reactant, base_rate * species[reactant] as f64);
        reactions.update(product, base_rate * species[product] as f64);
    }

    assert!(time.is_finite() && time > 0.0, "simulated time {time}");
    assert_eq!(species.iter().sum::<i64>(), initial_count, "population conserved");
    assert!(
        (reactions.sum() - base_rate * initial_count as f64).abs() < 1e-9,
        "total rate stays at k * population"
    );
}

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::test_logger;

/// Runs the given test function `iterations` times with a seeded random
/// number generator. The seed is printed so that failures can be reproduced by
/// setting `AUTOMIN_SEED=<seed>`.
pub fn random_test<F>(iterations: usize, test_function: F)
where
    F: FnMut(&mut StdRng),
{
    if let Ok(seed_str) = std::env::var("AUTOMIN_SEED") {
        let seed = seed_str.parse::<u64>().expect("AUTOMIN_SEED must be a valid u64");
        println!("seed: {seed} (fixed by AUTOMIN_SEED)");
        random_test_seeded(seed, iterations, test_function);
        return;
    }

    let seed: u64 = rand::random();
    println!("random seed: {seed} (use AUTOMIN_SEED=<seed> to set fixed seed)");
    random_test_seeded(seed, iterations, test_function);
}

/// Runs a random test with a specific seed.
pub fn random_test_seeded<F>(seed: u64, iterations: usize, mut test_function: F)
where
    F: FnMut(&mut StdRng),
{
    test_logger();

    let mut rng = StdRng::seed_from_u64(seed);
    for _ in 0..iterations {
        test_function(&mut rng);
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;

    #[test]
    fn test_random_test_seeded_is_reproducible() {
        let mut first = Vec::new();
        random_test_seeded(42, 5, |rng| first.push(rng.random_range(0..1000u32)));

        let mut second = Vec::new();
        random_test_seeded(42, 5, |rng| second.push(rng.random_range(0..1000u32)));

        assert_eq!(first, second);
    }
}

//! Chi-squared uniformity of the bounded integer draws.

extern crate ergm;
use ergm::seed_rng;
use rand::Rng;

/// Upper 5% chi-squared quantiles for k - 1 degrees of freedom,
/// Wilson-Hilferty approximation evaluated offline.
fn critical_value(bins: usize) -> f64 {
    match bins {
        1_000 => 1073.64,
        10_000 => 10233.75,
        1_000_000 => 1_002_330.0,
        10_000_000 => 10_007_364.0,
        _ => panic!("no tabulated critical value for {} bins", bins),
    }
}

fn chi_squared(bins: usize, draws: u64, seed: u64) -> f64 {
    let mut rng = seed_rng(Some(seed), 0);
    let mut counts = vec![0u64; bins];
    for _ in 0..draws {
        counts[rng.gen_range(0, bins)] += 1;
    }
    let expected = draws as f64 / bins as f64;
    counts
        .iter()
        .map(|&observed| {
            let deviation = observed as f64 - expected;
            deviation * deviation / expected
        })
        .sum()
}

#[test]
fn test_uniformity_small_ranges() {
    for &bins in [1_000usize, 10_000].iter() {
        let statistic = chi_squared(bins, 10_000_000, 0xD1CE);
        assert!(
            statistic < critical_value(bins),
            "chi-squared {} over {} bins exceeds the 5% critical value",
            statistic,
            bins
        );
    }
}

/// The full-size uniformity run over all four ranges; slow, so opt in
/// with --ignored.
#[test]
#[ignore]
fn test_uniformity_full() {
    for &bins in [1_000usize, 10_000, 1_000_000, 10_000_000].iter() {
        let statistic = chi_squared(bins, 100_000_000, 0xD1CE);
        assert!(
            statistic < critical_value(bins),
            "chi-squared {} over {} bins exceeds the 5% critical value",
            statistic,
            bins
        );
    }
}

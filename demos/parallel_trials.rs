use imbalance::{GraphReader, GreedyMove, IteratedGreedy, NeighborhoodIndex, SignedGraph};
use rand::prelude::*;
use tracing_subscriber::EnvFilter;

/// Planted partition: `k` groups of `size`, positive inside and negative across,
/// with a fraction of signs flipped.
fn planted(k: usize, size: usize, noise: f64, seed: u64) -> Result<SignedGraph, imbalance::Error> {
    let mut rng = StdRng::seed_from_u64(seed);
    let n = k * size;
    let mut text = String::new();
    let mut lines = Vec::new();
    for u in 0..n {
        for v in (u + 1)..n {
            if !rng.random_bool(0.3) {
                continue;
            }
            let mut positive = u / size == v / size;
            if rng.random_bool(noise) {
                positive = !positive;
            }
            lines.push(format!("{u} {v} {}", if positive { 1 } else { -1 }));
        }
    }
    text.push_str(&format!("{n} {}\n", lines.len()));
    text.push_str(&lines.join("\n"));
    GraphReader::new().parse(&text)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Independent seeded trials share one neighborhood index and run on rayon's
    // pool. Requires `--features parallel`.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let graph = planted(4, 25, 0.05, 7)?;
    let nbr = NeighborhoodIndex::build(&graph);
    let seeds: Vec<u64> = (0..8).collect();

    let outcome = IteratedGreedy::new()
        .with_max_iter(100)
        .run_trials(&nbr, &GreedyMove::new(), &seeds)?;

    println!(
        "best of {} trials: frustration {} with {} communities",
        seeds.len(),
        outcome.value(),
        outcome.partition().len()
    );
    Ok(())
}

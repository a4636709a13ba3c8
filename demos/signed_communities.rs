use imbalance::{
    CompositeMonitor, GraphReader, IteratedGreedy, LogMonitor, NeighborhoodIndex,
    ReconstructionPolicy, SignedLabelPropagation, TimeLimitMonitor,
};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Small end-to-end run: `.g` text -> neighborhood index -> iterated greedy.
    //
    // Pass a graph path as the first argument to run on your own data; otherwise
    // a toy graph with three factions is used. Set RUST_LOG=debug for more output.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let reader = GraphReader::new();
    let graph = match std::env::args().nth(1) {
        Some(path) => reader.load(path)?,
        None => reader.parse(
            "9 13\n\
             0 1 1\n1 2 1\n0 2 1\n\
             3 4 1\n4 5 1\n3 5 1\n\
             6 7 1\n7 8 1\n6 8 1\n\
             2 3 -1\n5 6 -1\n8 0 -1\n\
             1 7 1\n",
        )?,
    };
    println!(
        "graph: {} vertices, {} edges",
        graph.node_count(),
        graph.edge_count()
    );

    let nbr = NeighborhoodIndex::build(&graph);
    let mut monitor = CompositeMonitor::new()
        .with_monitor(LogMonitor::new(Duration::from_millis(250)))
        .with_monitor(TimeLimitMonitor::new(Duration::from_secs(10)));

    let outcome = IteratedGreedy::new()
        .with_seed(42)
        .with_max_iter(200)
        .with_policy(ReconstructionPolicy::Neighbor)
        .run(&nbr, &SignedLabelPropagation::new(), &mut monitor)?;

    println!("{outcome}");
    for (c, members) in outcome.partition().renumbered().iter() {
        println!("  community {c}: {members:?}");
    }
    Ok(())
}

use garden_grammar::prelude::*;
use garden_grammar_examples::{init_tracing, render_layout_to_png, RenderConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();

    // Seed from the first argument so layouts can be reproduced.
    let seed = match std::env::args().nth(1) {
        Some(arg) => arg.parse::<u64>()?,
        None => 42,
    };

    let plot = Plot::from_meters(60.0, 50.0);
    let params = GardenParams::default()
        .with_divisions(4)
        .with_paths_intensity(3)
        .with_flowers_bias(0.6)
        .with_trees_bias(0.4);

    let mut engine = GrammarEngine::for_plot(&plot, params, StdRng::seed_from_u64(seed))?;
    let outcome = engine.run(DEFAULT_MAX_STEPS);
    if !outcome.complete {
        anyhow::bail!("derivation did not complete within {DEFAULT_MAX_STEPS} steps");
    }

    for symbol in Symbol::ALL.into_iter().filter(|s| !s.is_nonterminal()) {
        info!("{:>12}: {}", symbol, engine.graph().count(symbol));
    }

    let config = RenderConfig::for_plot(&plot, 2.0);
    render_layout_to_png(engine.graph(), &config, "garden-basic.png")?;
    Ok(())
}

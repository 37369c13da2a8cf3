use garden_grammar::prelude::*;
use garden_grammar_examples::{init_tracing, render_layout_to_png, RenderConfig};
use tracing::info;

const SEED: u64 = 7;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let plot = Plot::from_meters(50.0, 40.0);
    let config = RenderConfig::for_plot(&plot, 1.5);

    // Same seed for every variant, so only the parameters differ.
    for divisions in [1, 3, 5] {
        for (flowers, trees) in [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)] {
            let params = GardenParams::new(divisions, 3, flowers, trees);
            let (graph, outcome) = run_garden(&plot, params, SEED)?;
            info!(
                "divisions {} flowers {} trees {}: {} steps, {} nodes.",
                divisions, flowers, trees, outcome.steps, outcome.nodes
            );
            let path = format!("garden-sweep-d{divisions}-f{flowers:.0}-t{trees:.0}.png");
            render_layout_to_png(&graph, &config, path)?;
        }
    }

    for intensity in 1..=5 {
        let params = GardenParams::default().with_paths_intensity(intensity);
        let (graph, _) = run_garden(&plot, params, SEED)?;
        let water = graph.count(Symbol::WaterCircle);
        info!("paths intensity {}: {} water circles.", intensity, water);
        render_layout_to_png(&graph, &config, format!("garden-sweep-paths{intensity}.png"))?;
    }

    Ok(())
}

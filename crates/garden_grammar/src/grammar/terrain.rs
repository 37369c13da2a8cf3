//! Weighted choice of the terrain an AREA leaf turns into.
use rand::RngCore;

use crate::config::GardenParams;
use crate::sampling::rand01;

/// Terrain an AREA leaf can become.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerrainKind {
    Grass,
    Flowers,
    Trees,
    Water,
}

/// Unnormalized selection weights for each [`TerrainKind`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerrainWeights {
    pub grass: f32,
    pub flowers: f32,
    pub trees: f32,
    pub water: f32,
}

impl TerrainWeights {
    /// Weights for the given parameters.
    ///
    /// Grass is constant, flowers and trees grow with their bias, and water
    /// shrinks as the path intensity rises. Every weight keeps a floor so no
    /// terrain becomes unreachable.
    pub fn from_params(params: &GardenParams) -> Self {
        Self {
            grass: 0.55,
            flowers: 0.08 + 0.55 * params.flowers_bias,
            trees: 0.10 + 0.55 * params.trees_bias,
            water: 0.06 + 0.12 * (1.0 - (params.paths_intensity as f32 - 2.0) / 5.0),
        }
    }

    pub fn total(&self) -> f32 {
        self.grass + self.flowers + self.trees + self.water
    }

    /// Weights in roulette order.
    pub fn entries(&self) -> [(TerrainKind, f32); 4] {
        [
            (TerrainKind::Grass, self.grass),
            (TerrainKind::Flowers, self.flowers),
            (TerrainKind::Trees, self.trees),
            (TerrainKind::Water, self.water),
        ]
    }

    /// Probability of `kind` after normalization.
    pub fn probability(&self, kind: TerrainKind) -> f32 {
        let total = self.total();
        self.entries()
            .iter()
            .find(|(k, _)| *k == kind)
            .map_or(0.0, |(_, w)| w / total)
    }
}

/// Draws a terrain proportionally to `weights`.
pub fn pick_terrain(weights: &TerrainWeights, rng: &mut dyn RngCore) -> TerrainKind {
    let mut roll = rand01(rng) * weights.total();
    for (kind, weight) in weights.entries() {
        roll -= weight;
        if roll <= 0.0 {
            return kind;
        }
    }
    TerrainKind::Water
}

//! The site backdrop: every layer generated once, then shared read-only.

use std::sync::LazyLock;

use crate::entity::{Nebula, Particle, ShootingStar, Star};
use crate::layer::{
    generate_layer, ConstellationField, Layer, NebulaField, ParticleField, ShootingStarField,
    StarField,
};

/// Entity counts per layer. Seeds are the layers' defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackdropSpec {
    pub stars: usize,
    pub constellation: usize,
    pub shooting_stars: usize,
    pub nebulae: usize,
    pub particles: usize,
}

impl Default for BackdropSpec {
    fn default() -> Self {
        Self {
            stars: 100,
            constellation: 15,
            shooting_stars: 3,
            nebulae: 3,
            particles: 30,
        }
    }
}

/// All generated layers.
#[derive(Debug, Clone, PartialEq)]
pub struct Backdrop {
    pub stars: Vec<Star>,
    pub constellation: Vec<Particle>,
    pub shooting_stars: Vec<ShootingStar>,
    pub nebulae: Vec<Nebula>,
    pub particles: Vec<Particle>,
}

impl Backdrop {
    pub fn generate(spec: &BackdropSpec) -> Self {
        Self {
            stars: generate_layer(&StarField, spec.stars, StarField::DEFAULT_SEED),
            constellation: generate_layer(
                &ConstellationField,
                spec.constellation,
                ConstellationField::DEFAULT_SEED,
            ),
            shooting_stars: generate_layer(
                &ShootingStarField,
                spec.shooting_stars,
                ShootingStarField::DEFAULT_SEED,
            ),
            nebulae: generate_layer(&NebulaField, spec.nebulae, NebulaField::DEFAULT_SEED),
            particles: generate_layer(&ParticleField, spec.particles, ParticleField::DEFAULT_SEED),
        }
    }
}

static BACKDROP: LazyLock<Backdrop> = LazyLock::new(|| Backdrop::generate(&BackdropSpec::default()));

/// Process-wide backdrop, generated on first access.
pub fn backdrop() -> &'static Backdrop {
    &BACKDROP
}

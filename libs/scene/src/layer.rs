//! Layer generators.
//!
//! Each layer owns a fixed draw order per entity. The order is part of the
//! output contract: reordering two draws changes every entity after the
//! first, so treat the bodies of `draw` as frozen.

use crate::entity::{Nebula, Particle, Point, Rgb, ShootingStar, Star, StarClass, Twinkle};
use crate::lcg::Lcg;

/// A generator for one visual layer.
pub trait Layer {
    /// Entity produced per draw.
    type Entity;

    /// Layer name, also the id prefix of its entities.
    const KIND: &'static str;

    /// Seed used by the site backdrop.
    const DEFAULT_SEED: i64;

    /// Derive entity `index` from the stream.
    fn draw(&self, index: usize, rng: &mut Lcg) -> Self::Entity;
}

/// Generate `count` entities of `layer` from a fresh stream seeded with `seed`.
pub fn generate_layer<L: Layer>(layer: &L, count: usize, seed: i64) -> Vec<L::Entity> {
    let mut rng = Lcg::new(seed);
    (0..count).map(|i| layer.draw(i, &mut rng)).collect()
}

fn entity_id(kind: &str, index: usize) -> String {
    format!("{kind}-{index}")
}

/// Drifting hero particles.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParticleField;

impl Layer for ParticleField {
    type Entity = Particle;
    const KIND: &'static str = "particle";
    const DEFAULT_SEED: i64 = 12345;

    fn draw(&self, index: usize, rng: &mut Lcg) -> Particle {
        let origin = Point::new(rng.range(0.0, 100.0), rng.range(0.0, 100.0));
        let size = rng.range(2.0, 5.0);
        let duration_secs = rng.range(15.0, 15.0);
        let r = rng.floor_range(100, 100);
        let g = rng.floor_range(150, 50);
        let b = rng.floor_range(200, 100);

        // All x samples are drawn before any y sample.
        let xs = [
            rng.range(0.0, 100.0),
            rng.range(0.0, 100.0),
            rng.range(0.0, 100.0),
        ];
        let ys = [
            rng.range(0.0, 100.0),
            rng.range(0.0, 100.0),
            rng.range(0.0, 100.0),
        ];
        let path = xs.iter().zip(ys).map(|(&x, y)| Point::new(x, y)).collect();

        Particle {
            id: entity_id(Self::KIND, index),
            origin,
            path,
            size,
            color: Rgb::saturating(r, g, b),
            duration_secs,
            twinkle: None,
        }
    }
}

/// Draws above this value select [`StarClass::Special`].
pub const SPECIAL_STAR_THRESHOLD: f64 = 0.7;

/// Seconds for one horizontal drift cycle of a field star.
pub const STAR_DRIFT_SECS: f64 = 120.0;

const SPECIAL_INTENSITY: [f64; 5] = [0.1, 1.0, 0.3, 0.8, 0.2];
const REGULAR_INTENSITY: [f64; 3] = [0.4, 0.7, 0.5];
const CONSTELLATION_INTENSITY: [f64; 5] = [0.5, 1.0, 0.6, 0.9, 0.7];

/// Twinkling background stars.
#[derive(Debug, Clone, Copy, Default)]
pub struct StarField;

impl Layer for StarField {
    type Entity = Star;
    const KIND: &'static str = "star";
    const DEFAULT_SEED: i64 = 654_321;

    fn draw(&self, index: usize, rng: &mut Lcg) -> Star {
        let class = if rng.next_f64() > SPECIAL_STAR_THRESHOLD {
            StarClass::Special
        } else {
            StarClass::Regular
        };
        let size = match class {
            StarClass::Special => rng.range(1.0, 3.0),
            StarClass::Regular => rng.range(0.5, 2.0),
        };
        let origin = Point::new(rng.range(0.0, 100.0), rng.range(0.0, 100.0));
        let period_secs = rng.range(1.0, 3.0);
        let delay_secs = rng.range(0.0, 2.0);

        let color = match class {
            StarClass::Special => {
                let r = rng.floor_range(220, 35);
                let g = rng.floor_range(220, 35);
                Rgb::saturating(r, g, 255)
            }
            StarClass::Regular => {
                let r = rng.floor_range(180, 50);
                let g = rng.floor_range(180, 50);
                let b = rng.floor_range(200, 55);
                Rgb::saturating(r, g, b)
            }
        };

        let drift = Point::new(rng.range(-2.5, 5.0), rng.range(-2.5, 5.0));
        let intensity = match class {
            StarClass::Special => SPECIAL_INTENSITY.to_vec(),
            StarClass::Regular => REGULAR_INTENSITY.to_vec(),
        };

        Star {
            particle: Particle {
                id: entity_id(&format!("{}-{}", Self::KIND, class.id_segment()), index),
                origin,
                path: vec![drift, drift.mirrored(), drift],
                size,
                color,
                duration_secs: STAR_DRIFT_SECS,
                twinkle: Some(Twinkle {
                    intensity,
                    period_secs,
                    delay_secs,
                }),
            },
            class,
        }
    }
}

/// Brighter, slower stars that hold their position.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstellationField;

impl Layer for ConstellationField {
    type Entity = Particle;
    const KIND: &'static str = "constellation";
    const DEFAULT_SEED: i64 = 987_654;

    fn draw(&self, index: usize, rng: &mut Lcg) -> Particle {
        let origin = Point::new(rng.range(0.0, 100.0), rng.range(0.0, 100.0));
        let size = rng.range(2.0, 4.0);
        let period_secs = rng.range(3.0, 2.0);
        let delay_secs = rng.range(0.0, 3.0);
        let r = rng.floor_range(240, 15);
        let g = rng.floor_range(240, 15);
        let drift = Point::new(rng.range(-1.5, 3.0), rng.range(-1.5, 3.0));

        Particle {
            id: entity_id(Self::KIND, index),
            origin,
            path: vec![drift, drift.mirrored(), drift],
            size,
            color: Rgb::saturating(r, g, 255),
            duration_secs: period_secs,
            twinkle: Some(Twinkle {
                intensity: CONSTELLATION_INTENSITY.to_vec(),
                period_secs,
                delay_secs,
            }),
        }
    }
}

/// Seconds between consecutive shooting stars.
pub const SHOOTING_STAR_STAGGER_SECS: f64 = 10.0;

/// Occasional shooting stars.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShootingStarField;

impl Layer for ShootingStarField {
    type Entity = ShootingStar;
    const KIND: &'static str = "shooting-star";
    const DEFAULT_SEED: i64 = 246_810;

    fn draw(&self, index: usize, rng: &mut Lcg) -> ShootingStar {
        ShootingStar {
            id: entity_id(Self::KIND, index),
            top: rng.range(0.0, 50.0),
            left: rng.range(0.0, 80.0),
            rotate_deg: rng.range(30.0, 40.0),
            delay_secs: index as f64 * SHOOTING_STAR_STAGGER_SECS,
        }
    }
}

/// Nebula clouds. Fully derived from the index; the stream is not consumed.
#[derive(Debug, Clone, Copy, Default)]
pub struct NebulaField;

impl Layer for NebulaField {
    type Entity = Nebula;
    const KIND: &'static str = "nebula";
    const DEFAULT_SEED: i64 = 135_790;

    fn draw(&self, index: usize, _rng: &mut Lcg) -> Nebula {
        let i = index as f64;
        let channel = |base: f64, step: f64| (base + i * step).min(255.0) as u16;
        let sway_x = 20.0 + i * 5.0;
        let sway_y = 15.0 + i * 5.0;

        Nebula {
            id: entity_id(Self::KIND, index),
            width: 300.0 + i * 100.0,
            height: 300.0 + i * 100.0,
            left: 10.0 + i * 30.0,
            top: 20.0 + i * 15.0,
            color: Rgb::saturating(
                channel(120.0, 20.0),
                channel(100.0, 30.0),
                channel(180.0, 20.0),
            ),
            drift_x: [-sway_x, sway_x, -sway_x],
            drift_y: [-sway_y, sway_y, -sway_y],
            duration_secs: 80.0 + i * 30.0,
        }
    }
}

/// Hero particle field for `count` particles from `seed`.
pub fn generate(count: usize, seed: i64) -> Vec<Particle> {
    generate_layer(&ParticleField, count, seed)
}

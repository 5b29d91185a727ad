//! Deterministic backdrop generation.
//!
//! The portfolio backdrop (field stars, constellation stars, shooting stars,
//! nebulae and hero particles) is derived entirely from fixed seeds through a
//! linear congruential generator, so a server-rendered pass and a later
//! interactive pass see identical layouts.
//!
//! # Invariants
//!
//! - `generate(n, seed)` is a pure function of `n` and `seed`
//! - Each layer draws from its own stream; layer counts never interact
//! - Generated entities are immutable values

pub mod animation;
pub mod backdrop;
pub mod entity;
pub mod layer;
pub mod lcg;

pub use animation::{Animate, Element, Scene, SceneLayer, SceneMode, Track};
pub use backdrop::{backdrop, Backdrop, BackdropSpec};
pub use entity::{Nebula, Particle, Point, Rgb, ShootingStar, Star, StarClass, Twinkle};
pub use layer::{
    generate, generate_layer, ConstellationField, Layer, NebulaField, ParticleField,
    ShootingStarField, StarField,
};
pub use lcg::Lcg;

//! Keyframe tracks and layer composition.
//!
//! A [`Scene`] is a stack of [`SceneLayer`]s, each a list of positioned
//! [`Element`]s carrying independent animation [`Track`]s. Renderers only
//! read scenes; nothing here holds mutable state.

use serde::Serialize;

use crate::backdrop::Backdrop;
use crate::entity::{Nebula, Particle, Rgb, ShootingStar, Star};

/// Animated property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Property {
    Opacity,
    Scale,
    ScaleX,
    X,
    Y,
}

/// How a track repeats after its first pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Repeat {
    /// Restart from the first keyframe.
    Loop,
    /// Play backwards, then forwards again.
    Reverse,
}

/// Easing label passed through to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Easing {
    Linear,
    EaseInOut,
    EaseOut,
}

/// One animated property of one element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub property: Property,
    pub keyframes: Vec<f64>,
    pub duration_secs: f64,
    pub delay_secs: f64,
    pub repeat: Repeat,
    pub repeat_delay_secs: f64,
    pub easing: Easing,
}

impl Track {
    pub fn new(property: Property, keyframes: Vec<f64>, duration_secs: f64) -> Self {
        Self {
            property,
            keyframes,
            duration_secs,
            delay_secs: 0.0,
            repeat: Repeat::Loop,
            repeat_delay_secs: 0.0,
            easing: Easing::Linear,
        }
    }

    pub fn delay(mut self, secs: f64) -> Self {
        self.delay_secs = secs;
        self
    }

    pub fn reverse(mut self) -> Self {
        self.repeat = Repeat::Reverse;
        self
    }

    pub fn repeat_delay(mut self, secs: f64) -> Self {
        self.repeat_delay_secs = secs;
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}

/// Entities that know how to animate themselves.
pub trait Animate {
    fn tracks(&self) -> Vec<Track>;
}

const STAR_SCALE: [f64; 5] = [1.0, 1.1, 0.9, 1.2, 1.0];
const CONSTELLATION_SCALE: [f64; 5] = [1.0, 1.2, 0.95, 1.3, 1.0];
const PARTICLE_SCALE: [f64; 3] = [1.0, 1.5, 1.0];
const NEBULA_OPACITY: [f64; 3] = [0.05, 0.08, 0.05];

/// Seconds for one vertical drift cycle of a field star.
pub const STAR_VERTICAL_DRIFT_SECS: f64 = 100.0;

/// Seconds a shooting star is visible per pass.
pub const SHOOTING_STAR_FLIGHT_SECS: f64 = 1.5;

/// Base pause between passes of a shooting star.
pub const SHOOTING_STAR_REST_SECS: f64 = 15.0;

fn twinkle_tracks(particle: &Particle, scale: &[f64], scale_factor: f64) -> Vec<Track> {
    let Some(twinkle) = &particle.twinkle else {
        return Vec::new();
    };
    vec![
        Track::new(Property::Opacity, twinkle.intensity.clone(), twinkle.period_secs)
            .delay(twinkle.delay_secs)
            .reverse()
            .easing(Easing::EaseInOut),
        Track::new(
            Property::Scale,
            scale.to_vec(),
            twinkle.period_secs * scale_factor,
        )
        .delay(twinkle.delay_secs)
        .reverse()
        .easing(Easing::EaseInOut),
    ]
}

impl Animate for Star {
    fn tracks(&self) -> Vec<Track> {
        let p = &self.particle;
        let mut tracks = twinkle_tracks(p, &STAR_SCALE, 1.5);
        tracks.push(
            Track::new(
                Property::X,
                p.path.iter().map(|pt| pt.x).collect(),
                p.duration_secs,
            )
            .reverse(),
        );
        tracks.push(
            Track::new(
                Property::Y,
                p.path.iter().map(|pt| pt.y).collect(),
                STAR_VERTICAL_DRIFT_SECS,
            )
            .reverse(),
        );
        tracks
    }
}

/// Constellation stars twinkle in place.
pub struct ConstellationStar<'a>(pub &'a Particle);

impl Animate for ConstellationStar<'_> {
    fn tracks(&self) -> Vec<Track> {
        twinkle_tracks(self.0, &CONSTELLATION_SCALE, 2.0)
    }
}

/// Hero particles travel their sampled path on a loop.
pub struct HeroParticle<'a>(pub &'a Particle);

impl Animate for HeroParticle<'_> {
    fn tracks(&self) -> Vec<Track> {
        let p = self.0;
        vec![
            Track::new(
                Property::X,
                p.path.iter().map(|pt| pt.x).collect(),
                p.duration_secs,
            ),
            Track::new(
                Property::Y,
                p.path.iter().map(|pt| pt.y).collect(),
                p.duration_secs,
            ),
            Track::new(Property::Scale, PARTICLE_SCALE.to_vec(), p.duration_secs),
        ]
    }
}

impl Animate for ShootingStar {
    fn tracks(&self) -> Vec<Track> {
        let pass = |property, keyframes: Vec<f64>| {
            Track::new(property, keyframes, SHOOTING_STAR_FLIGHT_SECS)
                .delay(self.delay_secs)
                .repeat_delay(SHOOTING_STAR_REST_SECS + self.delay_secs)
                .easing(Easing::EaseOut)
        };
        vec![
            pass(Property::Opacity, vec![0.0, 1.0, 0.0]),
            pass(Property::ScaleX, vec![0.0, 30.0, 0.0]),
            pass(Property::X, vec![0.0, 10.0, 20.0]),
        ]
    }
}

impl Animate for Nebula {
    fn tracks(&self) -> Vec<Track> {
        vec![
            Track::new(Property::X, self.drift_x.to_vec(), self.duration_secs).reverse(),
            Track::new(Property::Y, self.drift_y.to_vec(), self.duration_secs).reverse(),
            Track::new(Property::Opacity, NEBULA_OPACITY.to_vec(), self.duration_secs).reverse(),
        ]
    }
}

/// Static placement of an element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    /// Percent.
    pub left: f64,
    /// Percent.
    pub top: f64,
    /// Pixels.
    pub width: f64,
    /// Pixels.
    pub height: f64,
    pub color: Rgb,
    pub opacity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotate_deg: Option<f64>,
}

/// A positioned, animated element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    pub id: String,
    pub style: Style,
    pub tracks: Vec<Track>,
}

impl Element {
    fn dot(particle: &Particle, opacity: f64, tracks: Vec<Track>) -> Self {
        Self {
            id: particle.id.clone(),
            style: Style {
                left: particle.origin.x,
                top: particle.origin.y,
                width: particle.size,
                height: particle.size,
                color: particle.color,
                opacity,
                rotate_deg: None,
            },
            tracks,
        }
    }

    fn star(star: &Star) -> Self {
        Self::dot(&star.particle, 1.0, star.tracks())
    }

    fn constellation(particle: &Particle) -> Self {
        Self::dot(particle, 1.0, ConstellationStar(particle).tracks())
    }

    fn hero(particle: &Particle) -> Self {
        Self::dot(particle, 0.6, HeroParticle(particle).tracks())
    }

    fn shooting_star(shot: &ShootingStar) -> Self {
        Self {
            id: shot.id.clone(),
            style: Style {
                left: shot.left,
                top: shot.top,
                width: 2.0,
                height: 1.0,
                color: Rgb::new(255, 255, 255),
                opacity: 0.0,
                rotate_deg: Some(shot.rotate_deg),
            },
            tracks: shot.tracks(),
        }
    }

    fn nebula(nebula: &Nebula) -> Self {
        Self {
            id: nebula.id.clone(),
            style: Style {
                left: nebula.left,
                top: nebula.top,
                width: nebula.width,
                height: nebula.height,
                color: nebula.color,
                opacity: NEBULA_OPACITY[0],
                rotate_deg: None,
            },
            tracks: nebula.tracks(),
        }
    }

    fn still(id: String, left: f64, top: f64, size: f64, color: Rgb, opacity: f64) -> Self {
        Self {
            id,
            style: Style {
                left,
                top,
                width: size,
                height: size,
                color,
                opacity,
                rotate_deg: None,
            },
            tracks: Vec::new(),
        }
    }
}

/// A named stack level.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneLayer {
    pub name: &'static str,
    pub z_index: i32,
    pub elements: Vec<Element>,
}

/// Whether a scene carries animation tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneMode {
    Animated,
    Still,
}

/// Layers ordered bottom to top.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub mode: SceneMode,
    pub layers: Vec<SceneLayer>,
}

// (left %, top %, size px, color)
const STILL_STARS: [(f64, f64, f64, Rgb); 8] = [
    (20.0, 15.0, 6.0, Rgb::new(191, 219, 254)),
    (70.0, 30.0, 8.0, Rgb::new(255, 255, 255)),
    (30.0, 70.0, 4.0, Rgb::new(199, 210, 254)),
    (85.0, 50.0, 6.0, Rgb::new(233, 213, 255)),
    (15.0, 85.0, 4.0, Rgb::new(219, 234, 254)),
    (45.0, 40.0, 8.0, Rgb::new(224, 231, 255)),
    (60.0, 20.0, 4.0, Rgb::new(255, 255, 255)),
    (10.0, 60.0, 6.0, Rgb::new(191, 219, 254)),
];

// (left %, top %, size px, color)
const STILL_NEBULAE: [(f64, f64, f64, Rgb); 3] = [
    (10.0, 20.0, 300.0, Rgb::new(120, 100, 180)),
    (40.0, 35.0, 400.0, Rgb::new(140, 130, 200)),
    (70.0, 50.0, 500.0, Rgb::new(160, 120, 220)),
];

impl Scene {
    /// The full animated backdrop.
    pub fn animated(backdrop: &Backdrop) -> Self {
        let layers = vec![
            SceneLayer {
                name: "nebulae",
                z_index: 0,
                elements: backdrop.nebulae.iter().map(Element::nebula).collect(),
            },
            SceneLayer {
                name: "stars",
                z_index: 1,
                elements: backdrop.stars.iter().map(Element::star).collect(),
            },
            SceneLayer {
                name: "constellation",
                z_index: 2,
                elements: backdrop
                    .constellation
                    .iter()
                    .map(Element::constellation)
                    .collect(),
            },
            SceneLayer {
                name: "shooting_stars",
                z_index: 3,
                elements: backdrop
                    .shooting_stars
                    .iter()
                    .map(Element::shooting_star)
                    .collect(),
            },
        ];
        Self {
            mode: SceneMode::Animated,
            layers,
        }
    }

    /// The hero section's particle layer.
    pub fn hero(particles: &[Particle]) -> Self {
        Self {
            mode: SceneMode::Animated,
            layers: vec![SceneLayer {
                name: "particles",
                z_index: 0,
                elements: particles.iter().map(Element::hero).collect(),
            }],
        }
    }

    /// Fixed backdrop without tracks, for sections that do not animate.
    pub fn still() -> Self {
        let nebulae = STILL_NEBULAE
            .iter()
            .enumerate()
            .map(|(i, &(left, top, size, color))| {
                Element::still(format!("still-nebula-{i}"), left, top, size, color, 0.05)
            })
            .collect();
        let stars = STILL_STARS
            .iter()
            .enumerate()
            .map(|(i, &(left, top, size, color))| {
                Element::still(format!("still-star-{i}"), left, top, size, color, 1.0)
            })
            .collect();
        Self {
            mode: SceneMode::Still,
            layers: vec![
                SceneLayer {
                    name: "nebulae",
                    z_index: 0,
                    elements: nebulae,
                },
                SceneLayer {
                    name: "stars",
                    z_index: 1,
                    elements: stars,
                },
            ],
        }
    }

    /// Total elements across all layers.
    pub fn element_count(&self) -> usize {
        self.layers.iter().map(|l| l.elements.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backdrop::{Backdrop, BackdropSpec};
    use crate::layer::{generate_layer, Layer, ShootingStarField, StarField};

    #[test]
    fn test_star_tracks() {
        let star = generate_layer(&StarField, 1, StarField::DEFAULT_SEED).remove(0);
        let tracks = star.tracks();
        let props: Vec<_> = tracks.iter().map(|t| t.property).collect();
        assert_eq!(
            props,
            vec![Property::Opacity, Property::Scale, Property::X, Property::Y]
        );

        let twinkle = star.particle.twinkle.as_ref().unwrap();
        assert_eq!(tracks[0].keyframes, twinkle.intensity);
        assert_eq!(tracks[1].duration_secs, twinkle.period_secs * 1.5);
        assert_eq!(tracks[2].duration_secs, 120.0);
        assert_eq!(tracks[3].duration_secs, STAR_VERTICAL_DRIFT_SECS);
        assert!(tracks.iter().all(|t| t.repeat == Repeat::Reverse));
    }

    #[test]
    fn test_shooting_star_repeat_delay() {
        let shots = generate_layer(&ShootingStarField, 2, ShootingStarField::DEFAULT_SEED);
        let tracks = shots[1].tracks();
        assert_eq!(tracks.len(), 3);
        for t in &tracks {
            assert_eq!(t.delay_secs, 10.0);
            assert_eq!(t.repeat_delay_secs, 25.0);
            assert_eq!(t.duration_secs, SHOOTING_STAR_FLIGHT_SECS);
        }
    }

    #[test]
    fn test_animated_layer_order() {
        let backdrop = Backdrop::generate(&BackdropSpec::default());
        let scene = Scene::animated(&backdrop);
        let names: Vec<_> = scene.layers.iter().map(|l| l.name).collect();
        assert_eq!(
            names,
            vec!["nebulae", "stars", "constellation", "shooting_stars"]
        );
        let z: Vec<_> = scene.layers.iter().map(|l| l.z_index).collect();
        assert!(z.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(scene.element_count(), 100 + 15 + 3 + 3);
    }

    #[test]
    fn test_still_scene_has_no_tracks() {
        let scene = Scene::still();
        assert_eq!(scene.mode, SceneMode::Still);
        assert_eq!(scene.element_count(), 11);
        assert!(scene
            .layers
            .iter()
            .flat_map(|l| &l.elements)
            .all(|e| e.tracks.is_empty()));
    }

    #[test]
    fn test_hero_scene_serializes() {
        let backdrop = Backdrop::generate(&BackdropSpec::default());
        let json = serde_json::to_value(Scene::hero(&backdrop.particles)).unwrap();
        assert_eq!(json["mode"], "animated");
        let first = &json["layers"][0]["elements"][0];
        assert_eq!(first["id"], "particle-0");
        assert_eq!(first["tracks"][0]["property"], "x");
        assert_eq!(first["style"]["opacity"], 0.6);
    }
}

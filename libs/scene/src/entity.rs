//! Plain value records produced by the layer generators.
//!
//! Entities carry no identity beyond their `id` string and are never mutated
//! once generated.

use serde::Serialize;

/// Position in percent of the containing layer box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point mirrored through the origin.
    pub fn mirrored(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

/// An RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from generator channel values, saturating at 255.
    pub fn saturating(r: u16, g: u16, b: u16) -> Self {
        let clamp = |c: u16| c.min(u16::from(u8::MAX)) as u8;
        Self::new(clamp(r), clamp(g), clamp(b))
    }

    /// CSS `rgba(...)` string at the given alpha.
    pub fn rgba(&self, alpha: f64) -> String {
        format!("rgba({}, {}, {}, {alpha})", self.r, self.g, self.b)
    }
}

/// Opacity oscillation applied to a star.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Twinkle {
    /// Opacity keyframes, cycled back and forth.
    pub intensity: Vec<f64>,
    pub period_secs: f64,
    pub delay_secs: f64,
}

/// A drifting point of light: hero particles, field stars and constellation stars.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Particle {
    pub id: String,
    /// Resting position.
    pub origin: Point,
    /// Offsets (or absolute positions, for hero particles) sampled over one cycle.
    pub path: Vec<Point>,
    /// Diameter in pixels.
    pub size: f64,
    pub color: Rgb,
    pub duration_secs: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twinkle: Option<Twinkle>,
}

/// Brightness category of a field star.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StarClass {
    /// Larger, whiter star with a pronounced twinkle.
    Special,
    Regular,
}

impl StarClass {
    /// Id segment naming the class, as in `star-twinkle-4`.
    pub fn id_segment(self) -> &'static str {
        match self {
            StarClass::Special => "twinkle",
            StarClass::Regular => "regular",
        }
    }
}

/// A background field star.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Star {
    #[serde(flatten)]
    pub particle: Particle,
    pub class: StarClass,
}

/// A streak crossing the sky on a long repeat cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShootingStar {
    pub id: String,
    /// Percent from the top edge.
    pub top: f64,
    /// Percent from the left edge.
    pub left: f64,
    pub rotate_deg: f64,
    pub delay_secs: f64,
}

/// A large, blurred color cloud.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Nebula {
    pub id: String,
    /// Pixels.
    pub width: f64,
    /// Pixels.
    pub height: f64,
    /// Percent.
    pub left: f64,
    /// Percent.
    pub top: f64,
    pub color: Rgb,
    /// Pixel offsets over one cycle.
    pub drift_x: [f64; 3],
    pub drift_y: [f64; 3],
    pub duration_secs: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_saturates() {
        assert_eq!(Rgb::saturating(100, 255, 299), Rgb::new(100, 255, 255));
    }

    #[test]
    fn test_rgba_format() {
        assert_eq!(Rgb::new(1, 2, 3).rgba(0.6), "rgba(1, 2, 3, 0.6)");
    }

    #[test]
    fn test_star_serializes_flat() {
        let star = Star {
            particle: Particle {
                id: "star-twinkle-0".to_string(),
                origin: Point::new(1.0, 2.0),
                path: vec![],
                size: 1.5,
                color: Rgb::new(220, 230, 255),
                duration_secs: 120.0,
                twinkle: None,
            },
            class: StarClass::Special,
        };
        let json = serde_json::to_value(&star).unwrap();
        assert_eq!(json["id"], "star-twinkle-0");
        assert_eq!(json["class"], "special");
        assert_eq!(json["durationSecs"], 120.0);
        assert!(json.get("twinkle").is_none());
    }
}

//! Linear congruential generator.
//!
//! Every visual layer draws from its own `Lcg`, so a layer's output depends
//! only on its seed and its own draw count. The constants are fixed: any
//! change alters every generated backdrop.

/// Multiplier of the recurrence.
pub const MULTIPLIER: i64 = 9301;

/// Increment of the recurrence.
pub const INCREMENT: i64 = 49297;

/// Modulus of the recurrence; also the divisor that maps state into `[0, 1)`.
pub const MODULUS: i64 = 233_280;

/// Deterministic pseudo-random stream: `state = (state * 9301 + 49297) mod 233280`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lcg {
    state: i64,
}

impl Lcg {
    /// Create a generator from an arbitrary seed.
    ///
    /// The seed is reduced modulo [`MODULUS`] up front. For non-negative seeds
    /// this produces the same sequence as running the recurrence on the raw
    /// seed, and it keeps the multiplication inside `i64` for any input.
    pub fn new(seed: i64) -> Self {
        Self {
            state: seed.rem_euclid(MODULUS),
        }
    }

    /// Current state (the last value produced, or the reduced seed).
    pub fn state(&self) -> i64 {
        self.state
    }

    /// Advance the stream and return the new state.
    pub fn step(&mut self) -> i64 {
        self.state = (self.state * MULTIPLIER + INCREMENT).rem_euclid(MODULUS);
        self.state
    }

    /// Advance the stream and return a value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.step() as f64 / MODULUS as f64
    }

    /// One draw scaled into `[lo, lo + span)`.
    pub fn range(&mut self, lo: f64, span: f64) -> f64 {
        lo + self.next_f64() * span
    }

    /// One draw scaled by `span`, floored, then offset by `lo`.
    pub fn floor_range(&mut self, lo: u16, span: u16) -> u16 {
        (self.next_f64() * f64::from(span)).floor() as u16 + lo
    }
}

//! Vector and random-number types used in spawn calculations.

/// Two-component vector.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector2 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
}

impl Vector2 {
    /// Creates a vector.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Vector2 { x, y }
    }
}

/// Three-component vector.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector3 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    pub z: f32,
}

impl Vector3 {
    /// Creates a vector.
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Vector3 { x, y, z }
    }
}

/// The host's linear congruential generator, passed by reference so that
/// every draw advances the caller's seed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Randomizer {
    /// Current seed
    pub seed: u64,
}

impl Randomizer {
    const MULTIPLIER: u64 = 6_364_136_223_846_793_005;

    /// Creates a generator from a seed.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Randomizer { seed }
    }

    /// Returns a value in `0..range` and advances the seed.
    pub fn int32(&mut self, range: u32) -> u32 {
        self.seed = self.seed.wrapping_mul(Self::MULTIPLIER).wrapping_add(1);
        if range == 0 {
            return 0;
        }
        ((self.seed >> 32) % u64::from(range)) as u32
    }
}

//! Planar vector math and facing direction.
//!
//! `Vec2` uses `f32` throughout — positions, ranges, and sensor distances in
//! this system are game-world units where single precision is ample, and the
//! per-actor state stays half the size of an `f64` layout.

/// A 2-D point or displacement in world units.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: Vec2) -> f32 {
        (self - other).length()
    }

    /// Squared distance — cheaper when only comparing against a threshold.
    #[inline]
    pub fn distance_sq(self, other: Vec2) -> f32 {
        let d = self - other;
        d.x * d.x + d.y * d.y
    }

    #[inline]
    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Scale both components by `s`.
    #[inline]
    pub fn scale(self, s: f32) -> Vec2 {
        Vec2::new(self.x * s, self.y * s)
    }

    /// Dot product.
    #[inline]
    pub fn dot(self, other: Vec2) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Mirror the x component when the owner faces left.
    ///
    /// Sensor offsets are authored for a right-facing actor; this flips them
    /// to the actor's actual facing.
    #[inline]
    pub fn mirrored(self, facing: Facing) -> Vec2 {
        Vec2::new(self.x * facing.sign(), self.y)
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::fmt::Display for Vec2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

// ── Facing ────────────────────────────────────────────────────────────────────

/// Horizontal facing of an actor.
///
/// Sight rays point along the facing; hearing offsets are mirrored by it.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    /// `+1.0` for right, `-1.0` for left.
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left  => -1.0,
        }
    }

    /// Unit vector along the facing direction.
    #[inline]
    pub fn dir(self) -> Vec2 {
        Vec2::new(self.sign(), 0.0)
    }

    #[inline]
    pub fn flipped(self) -> Facing {
        match self {
            Facing::Right => Facing::Left,
            Facing::Left  => Facing::Right,
        }
    }
}

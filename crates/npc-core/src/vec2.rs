//! Planar coordinate type and spatial utilities.
//!
//! `Vec2` uses `f32` components.  World units are abstract (one unit is one
//! tile in the demos); single precision is more than sufficient for a
//! screen-scale world while halving memory consumption vs. `f64`.

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

// ── Vec2 ──────────────────────────────────────────────────────────────────────

/// A 2D position or displacement stored as single-precision floats.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
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

    /// Euclidean length.
    #[inline]
    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Squared length — cheaper than [`length`](Self::length) for comparisons.
    #[inline]
    pub fn length_sq(self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: Vec2) -> f32 {
        (other - self).length()
    }

    /// Unit vector in the same direction, or `ZERO` for a zero vector.
    ///
    /// The zero-safe fallback matters: avoidance and retreat destinations are
    /// derived from `self - threat`, which collapses to zero when the two
    /// positions coincide exactly.
    pub fn normalized(self) -> Vec2 {
        let len = self.length();
        if len <= f32::EPSILON {
            Vec2::ZERO
        } else {
            Vec2::new(self.x / len, self.y / len)
        }
    }

    /// Component-wise scale.
    #[inline]
    pub fn scaled(self, factor: f32) -> Vec2 {
        Vec2::new(self.x * factor, self.y * factor)
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vec2 {
    #[inline]
    fn sub_assign(&mut self, rhs: Vec2) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: f32) -> Vec2 {
        self.scaled(rhs)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    #[inline]
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

// ── Rect ──────────────────────────────────────────────────────────────────────

/// An axis-aligned rectangle given by its min/max corners.
///
/// Used for wander sampling ranges, world bounds, and obstacle footprints.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    #[inline]
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Rectangle of size `extent` centered on `center`.
    pub fn centered(center: Vec2, extent: Vec2) -> Self {
        let half = extent.scaled(0.5);
        Self { min: center - half, max: center + half }
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        (self.min + self.max).scaled(0.5)
    }

    /// `true` if `p` lies inside or on the boundary.
    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// `p` clamped component-wise into the rectangle.
    #[inline]
    pub fn clamp(self, p: Vec2) -> Vec2 {
        Vec2::new(
            p.x.clamp(self.min.x, self.max.x),
            p.y.clamp(self.min.y, self.max.y),
        )
    }
}

// ── Compass discretization ────────────────────────────────────────────────────

/// 8-way discretization of a movement delta by angle.
///
/// Sector boundaries sit at odd multiples of 22.5°, so each direction owns a
/// 45° wedge.  Used for directional animation events of thrown/fired
/// sub-entities.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Compass8 {
    East,
    NorthEast,
    North,
    NorthWest,
    West,
    SouthWest,
    South,
    SouthEast,
}

impl Compass8 {
    /// Classify a displacement.  A zero delta maps to `East` (the caller is
    /// expected to filter zero movement before asking for a heading).
    pub fn from_delta(delta: Vec2) -> Compass8 {
        let angle = delta.y.atan2(delta.x); // [-π, π], 0 = east, CCW positive
        let sector = (angle / std::f32::consts::FRAC_PI_4).round() as i32;
        match sector.rem_euclid(8) {
            0 => Compass8::East,
            1 => Compass8::NorthEast,
            2 => Compass8::North,
            3 => Compass8::NorthWest,
            4 => Compass8::West,
            5 => Compass8::SouthWest,
            6 => Compass8::South,
            _ => Compass8::SouthEast,
        }
    }

    /// `true` for the three westward wedges.
    pub fn is_westward(self) -> bool {
        matches!(self, Compass8::West | Compass8::NorthWest | Compass8::SouthWest)
    }
}

/// 5-way fold of [`Compass8`]: dominant axis plus `Still` for zero movement.
///
/// Sprites with only four facing animations use this; diagonals fold onto the
/// horizontal axis (side-facing art reads better than vertical for diagonal
/// movement).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Compass5 {
    Left,
    Right,
    Up,
    Down,
    Still,
}

impl Compass5 {
    pub fn from_delta(delta: Vec2) -> Compass5 {
        if delta.length_sq() <= f32::EPSILON {
            return Compass5::Still;
        }
        match Compass8::from_delta(delta) {
            Compass8::North => Compass5::Up,
            Compass8::South => Compass5::Down,
            c if c.is_westward() => Compass5::Left,
            _ => Compass5::Right,
        }
    }
}

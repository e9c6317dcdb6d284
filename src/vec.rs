//! 2D vectors with complex-number semantics.
//!
//! A [`Vec2`] is read as the complex number `x + iy`. Addition and scaling
//! are the usual vector operations; `Vec2 * Vec2` is complex multiplication,
//! so multiplying by [`Vec2::i`] rotates by 90 degrees counter-clockwise.

use crate::float::Float;
use core::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Distance substituted for an exact-zero length when dividing by it.
pub const DISTANCE_EPSILON: f64 = 1e-10;

/// 2D vector, equivalently the complex number `x + iy`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vec2<F: Float> {
    pub x: F,
    pub y: F,
}

impl<F: Float> Vec2<F> {
    /// Create a new 2D vector.
    pub fn new(x: F, y: F) -> Self { Vec2 { x, y } }

    /// The zero vector.
    pub fn zero() -> Self { Vec2 { x: F::zero(), y: F::zero() } }

    /// The imaginary unit `i`, i.e. `(0, 1)`.
    pub fn i() -> Self { Vec2 { x: F::zero(), y: F::one() } }

    /// The real unit `1`, i.e. `(1, 0)`.
    pub fn one() -> Self { Vec2 { x: F::one(), y: F::zero() } }

    pub fn scale(self, s: F) -> Self { Vec2 { x: self.x * s, y: self.y * s } }

    pub fn dot(self, other: Self) -> F { self.x * other.x + self.y * other.y }

    /// 2D cross product (returns scalar): self.x * other.y - self.y * other.x
    pub fn cross(self, other: Self) -> F {
        self.x * other.y - self.y * other.x
    }

    pub fn length_sq(self) -> F { self.dot(self) }

    /// Magnitude, computed with `hypot`.
    pub fn length(self) -> F { self.x.hypot(self.y) }

    pub fn distance(self, other: Self) -> F { (self - other).length() }

    /// Magnitude, with an exact zero replaced by [`DISTANCE_EPSILON`].
    ///
    /// Coincident points then yield a huge but finite reciprocal instead of
    /// a division by zero. This is an approximation, not exact physics.
    pub fn guarded_length(self) -> F {
        let len = self.length();
        if len == F::zero() { F::from_f64(DISTANCE_EPSILON) } else { len }
    }

    /// `self / |self|`, using [`guarded_length`](Self::guarded_length).
    ///
    /// The zero vector maps to the zero vector.
    pub fn unit(self) -> Self {
        self / self.guarded_length()
    }

    /// Unit vector pointing from `self` towards `other`.
    pub fn direction_to(self, other: Self) -> Self {
        (other - self).unit()
    }

    /// Rotate by 90 degrees counter-clockwise (multiplication by `i`).
    pub fn rotate_90(self) -> Self {
        Vec2 { x: -self.y, y: self.x }
    }

    /// Complex conjugate (mirror across the x axis).
    pub fn conj(self) -> Self {
        Vec2 { x: self.x, y: -self.y }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl<F: Float> Add for Vec2<F> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self { Vec2 { x: self.x + rhs.x, y: self.y + rhs.y } }
}

impl<F: Float> Sub for Vec2<F> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self { Vec2 { x: self.x - rhs.x, y: self.y - rhs.y } }
}

impl<F: Float> Neg for Vec2<F> {
    type Output = Self;
    fn neg(self) -> Self { Vec2 { x: -self.x, y: -self.y } }
}

impl<F: Float> AddAssign for Vec2<F> {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl<F: Float> SubAssign for Vec2<F> {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

/// Scalar multiplication.
impl<F: Float> Mul<F> for Vec2<F> {
    type Output = Self;
    fn mul(self, rhs: F) -> Self { self.scale(rhs) }
}

/// Complex multiplication: `(a + ib)(c + id) = (ac - bd) + i(ad + bc)`.
impl<F: Float> Mul for Vec2<F> {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Vec2 {
            x: self.x * rhs.x - self.y * rhs.y,
            y: self.x * rhs.y + self.y * rhs.x,
        }
    }
}

impl<F: Float> Div<F> for Vec2<F> {
    type Output = Self;
    fn div(self, rhs: F) -> Self { Vec2 { x: self.x / rhs, y: self.y / rhs } }
}

impl<F: Float> From<(F, F)> for Vec2<F> {
    fn from((x, y): (F, F)) -> Self { Vec2 { x, y } }
}

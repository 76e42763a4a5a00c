//! Cubic Bezier lane curves and parametric ranges along them.
//!
//! Lanes are described by four control points. Positions along a lane are
//! parametric (`t` in `[0, 1]`), while every length the pricing engine
//! reasons about is a Euclidean distance between points on the curve.

use bevy::prelude::*;

/// Number of straight segments used to approximate arc length.
pub const CURVE_LENGTH_SAMPLES: usize = 16;

/// A cubic Bezier curve defined by four control points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bezier {
    pub a: Vec3,
    pub b: Vec3,
    pub c: Vec3,
    pub d: Vec3,
}

impl Bezier {
    pub fn new(a: Vec3, b: Vec3, c: Vec3, d: Vec3) -> Self {
        Self { a, b, c, d }
    }

    /// A straight curve from `start` to `end` with evenly spaced control points.
    pub fn line(start: Vec3, end: Vec3) -> Self {
        Self {
            a: start,
            b: start.lerp(end, 1.0 / 3.0),
            c: start.lerp(end, 2.0 / 3.0),
            d: end,
        }
    }

    /// Point on the curve at parameter `t`.
    pub fn position(&self, t: f32) -> Vec3 {
        let u = 1.0 - t;
        self.a * (u * u * u)
            + self.b * (3.0 * u * u * t)
            + self.c * (3.0 * u * t * t)
            + self.d * (t * t * t)
    }

    /// Sampled arc length of the whole curve.
    pub fn length(&self) -> f32 {
        let mut total = 0.0;
        let mut prev = self.a;
        for i in 1..=CURVE_LENGTH_SAMPLES {
            let next = self.position(i as f32 / CURVE_LENGTH_SAMPLES as f32);
            total += prev.distance(next);
            prev = next;
        }
        total
    }

    /// False when any control point is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.a.is_finite() && self.b.is_finite() && self.c.is_finite() && self.d.is_finite()
    }
}

/// A parametric sub-range `[min, max]` of a curve.
///
/// A range with `max < min` is empty. `CurveRange::EMPTY` is the identity for
/// [`CurveRange::union`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveRange {
    pub min: f32,
    pub max: f32,
}

impl CurveRange {
    pub const EMPTY: Self = Self {
        min: 2.0,
        max: -1.0,
    };

    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Range from byte-quantized endpoints (`0..=255` mapped onto `0..=1`).
    pub fn from_quantized(start: u8, end: u8) -> Self {
        Self {
            min: f32::from(start) * QUANTIZED_POSITION_SCALE,
            max: f32::from(end) * QUANTIZED_POSITION_SCALE,
        }
    }

    pub fn is_empty(&self) -> bool {
        // NaN endpoints also land here.
        !(self.max >= self.min)
    }

    pub fn center(&self) -> f32 {
        (self.min + self.max) * 0.5
    }

    /// Smallest range covering both inputs. Empty inputs are ignored.
    pub fn union(self, other: Self) -> Self {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return self;
        }
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}

impl Default for CurveRange {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Scale applied to byte-quantized curve positions (1/255).
pub const QUANTIZED_POSITION_SCALE: f32 = 1.0 / 255.0;

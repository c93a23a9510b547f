//! Piecewise cubic Hermite curves in 3D
//!
//! Each control point carries a time, a value and a derivative with respect
//! to true time. Within a segment the curve is evaluated in a unit parameter
//! `u = (t - t0) / (t1 - t0)`, so derivatives are scaled by the segment span
//! going in and divided by it coming out.

use glam::Vec3;
use std::cmp::Ordering;

use crate::error::{Result, SplineError};

/// A control point: value `p` and derivative `dp` at time `t`
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct SplinePoint3 {
    pub t: f32,
    pub p: Vec3,
    pub dp: Vec3,
}

impl SplinePoint3 {
    pub fn new(t: f32, p: Vec3, dp: Vec3) -> Self {
        Self { t, p, dp }
    }
}

/// A cubic Hermite spline through at least two control points
///
/// Control point times strictly increase; both conditions are checked when
/// the spline is built, so evaluation cannot fail.
#[derive(Debug, Clone, PartialEq)]
pub struct Spline3 {
    points: Vec<SplinePoint3>,
}

impl Spline3 {
    pub fn new(points: Vec<SplinePoint3>) -> Result<Self> {
        if points.len() < 2 {
            return Err(SplineError::TooFewPoints {
                count: points.len(),
            });
        }
        if let Some(index) = (1..points.len()).find(|&i| !follows(&points[i - 1], &points[i])) {
            return Err(SplineError::NonMonotonic { index });
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[SplinePoint3] {
        &self.points
    }

    /// Append a control point after the current last one
    pub fn push(&mut self, point: SplinePoint3) -> Result<()> {
        if !follows(&self.points[self.points.len() - 1], &point) {
            return Err(SplineError::NonMonotonic {
                index: self.points.len(),
            });
        }
        self.points.push(point);
        Ok(())
    }

    pub fn min_time(&self) -> f32 {
        self.points[0].t
    }

    pub fn max_time(&self) -> f32 {
        self.points[self.points.len() - 1].t
    }

    pub fn segment_count(&self) -> usize {
        self.points.len() - 1
    }

    /// Clamp `t` into `[min_time, max_time]` and return the index `i` of the
    /// segment with `points[i].t <= t <= points[i + 1].t`
    ///
    /// NaN clamps to `min_time`. A `t` that lands exactly on an interior
    /// control point belongs to the segment that ends there.
    pub fn find_segment(&self, t: &mut f32) -> usize {
        *t = if t.is_nan() {
            self.min_time()
        } else {
            t.clamp(self.min_time(), self.max_time())
        };

        let last = self.segment_count() - 1;
        (0..last)
            .find(|&i| self.points[i].t <= *t && *t <= self.points[i + 1].t)
            .unwrap_or(last)
    }

    /// Curve value at time `t`, clamped to the spline's time range
    pub fn value(&self, mut t: f32) -> Vec3 {
        let segment = self.find_segment(&mut t);
        let (p0, p1, span, u) = self.local(segment, t);

        let u2 = u * u;
        let u3 = u2 * u;
        (2.0 * u3 - 3.0 * u2 + 1.0) * p0.p
            + (u3 - 2.0 * u2 + u) * (p0.dp * span)
            + (-2.0 * u3 + 3.0 * u2) * p1.p
            + (u3 - u2) * (p1.dp * span)
    }

    /// Time derivative at `t`, clamped to the spline's time range
    ///
    /// This is the exact derivative of [`value`](Self::value). The span factor
    /// on the tangent terms cancels, so the derivative at a control point is
    /// that point's `dp`.
    pub fn derivative(&self, mut t: f32) -> Vec3 {
        let segment = self.find_segment(&mut t);
        let (p0, p1, span, u) = self.local(segment, t);

        let u2 = u * u;
        (6.0 * u2 - 6.0 * u) * (p0.p - p1.p) / span
            + (3.0 * u2 - 4.0 * u + 1.0) * p0.dp
            + (3.0 * u2 - 2.0 * u) * p1.dp
    }

    /// `steps + 1` evenly spaced `(t, value, derivative)` samples over the
    /// whole time range
    pub fn sample(&self, steps: usize) -> Vec<(f32, Vec3, Vec3)> {
        let steps = steps.max(1);
        let (start, end) = (self.min_time(), self.max_time());
        (0..=steps)
            .map(|i| {
                let t = if i == steps {
                    end
                } else {
                    start + (end - start) * (i as f32 / steps as f32)
                };
                (t, self.value(t), self.derivative(t))
            })
            .collect()
    }

    fn local(&self, segment: usize, t: f32) -> (&SplinePoint3, &SplinePoint3, f32, f32) {
        let p0 = &self.points[segment];
        let p1 = &self.points[segment + 1];
        let span = p1.t - p0.t;
        (p0, p1, span, (t - p0.t) / span)
    }
}

/// Strictly later in time; NaN times never follow anything
fn follows(previous: &SplinePoint3, next: &SplinePoint3) -> bool {
    next.t.partial_cmp(&previous.t) == Some(Ordering::Greater)
}

impl TryFrom<Vec<SplinePoint3>> for Spline3 {
    type Error = SplineError;

    fn try_from(points: Vec<SplinePoint3>) -> Result<Self> {
        Self::new(points)
    }
}

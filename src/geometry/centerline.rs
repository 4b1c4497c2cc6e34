//! Vessel centerlines as centripetal Catmull-Rom splines.
//!
//! The curve passes through every control point. `t` is distributed
//! uniformly over the segments between control points (not by arc length),
//! so `t = i / (n - 1)` lands exactly on control point `i`.
//!
//! End segments use mirrored phantom points:
//! p₋₁ = 2·p₀ − p₁ and pₙ = 2·pₙ₋₁ − pₙ₋₂
//!
//! Reference: Yuksel C, Schaefer S, Keyser J. "Parameterization and
//! applications of Catmull-Rom curves." Computer-Aided Design, 2011.

use glam::Vec3;

/// Minimum number of control points for a well-defined centerline
pub const MIN_CONTROL_POINTS: usize = 4;

/// Knot spacing exponent (0.5 on distance, i.e. 0.25 on squared distance)
const CENTRIPETAL_POWER: f32 = 0.25;

/// Knot intervals shorter than this are treated as coincident points
const MIN_KNOT_INTERVAL: f32 = 1e-4;

/// Smooth 3D curve through a fixed sequence of control points
#[derive(Debug, Clone, PartialEq)]
pub struct Centerline {
    points: Vec<Vec3>,
}

impl Centerline {
    /// Create a centerline through the given control points
    ///
    /// Callers supply at least [`MIN_CONTROL_POINTS`] points. Fewer points
    /// are tolerated: a single point yields a constant curve and an empty
    /// list yields the origin.
    pub fn new(points: Vec<Vec3>) -> Self {
        if points.len() < MIN_CONTROL_POINTS {
            log::warn!(
                "Centerline built from {} control points (expected at least {})",
                points.len(),
                MIN_CONTROL_POINTS
            );
        }
        Self { points }
    }

    pub fn control_points(&self) -> &[Vec3] {
        &self.points
    }

    /// Point on the curve at parameter `t` (clamped to [0, 1])
    pub fn point_at(&self, t: f32) -> Vec3 {
        let n = self.points.len();
        match n {
            0 => return Vec3::ZERO,
            1 => return self.points[0],
            _ => {}
        }

        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let p = (n - 1) as f32 * t;
        let mut segment = p.floor() as usize;
        let mut weight = p - segment as f32;
        if segment >= n - 1 {
            segment = n - 2;
            weight = 1.0;
        }

        let p1 = self.points[segment];
        let p2 = self.points[segment + 1];
        let p0 = if segment > 0 {
            self.points[segment - 1]
        } else {
            p1 * 2.0 - p2
        };
        let p3 = if segment + 2 < n {
            self.points[segment + 2]
        } else {
            p2 * 2.0 - p1
        };

        centripetal_segment(p0, p1, p2, p3, weight)
    }

    /// Point on the curve, or `None` when the evaluation is not finite
    pub fn try_point_at(&self, t: f32) -> Option<Vec3> {
        let point = self.point_at(t);
        point.is_finite().then_some(point)
    }

    /// `divisions + 1` evenly spaced points from t = 0 to t = 1
    pub fn sample(&self, divisions: usize) -> Vec<Vec3> {
        let divisions = divisions.max(1);
        (0..=divisions)
            .map(|i| self.point_at(i as f32 / divisions as f32))
            .collect()
    }

    /// Polyline length through `divisions` samples
    pub fn approximate_length(&self, divisions: usize) -> f32 {
        self.sample(divisions)
            .windows(2)
            .map(|w| w[0].distance(w[1]))
            .sum()
    }
}

/// Evaluate one non-uniform Catmull-Rom segment between `p1` and `p2`
fn centripetal_segment(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, weight: f32) -> Vec3 {
    let mut dt0 = p0.distance_squared(p1).powf(CENTRIPETAL_POWER);
    let mut dt1 = p1.distance_squared(p2).powf(CENTRIPETAL_POWER);
    let mut dt2 = p2.distance_squared(p3).powf(CENTRIPETAL_POWER);

    if dt1 < MIN_KNOT_INTERVAL {
        dt1 = 1.0;
    }
    if dt0 < MIN_KNOT_INTERVAL {
        dt0 = dt1;
    }
    if dt2 < MIN_KNOT_INTERVAL {
        dt2 = dt1;
    }

    // Tangents at p1 and p2, rescaled to the [0, 1] segment parameter
    let m1 = ((p1 - p0) / dt0 - (p2 - p0) / (dt0 + dt1) + (p2 - p1) / dt1) * dt1;
    let m2 = ((p2 - p1) / dt1 - (p3 - p1) / (dt1 + dt2) + (p3 - p2) / dt2) * dt1;

    // Cubic Hermite polynomial
    let c0 = p1;
    let c1 = m1;
    let c2 = -3.0 * p1 + 3.0 * p2 - 2.0 * m1 - m2;
    let c3 = 2.0 * p1 - 2.0 * p2 + m1 + m2;

    let w2 = weight * weight;
    let w3 = w2 * weight;
    c0 + c1 * weight + c2 * w2 + c3 * w3
}

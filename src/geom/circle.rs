// circle.rs - Circles and the two-circle metaball connector
//
// The connector is the classic tangent construction: pick two points on
// each rim, blend their angles between the direct tangent and the fully
// merged position, then join them with two bezier curves whose handles
// shrink with distance. Far pairs get thin strings, near pairs fat necks.

use std::f64::consts::{FRAC_PI_2, PI};

use super::{Path, Point, Segment};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

impl Circle {
    pub const fn new(center: Point, radius: f64) -> Self {
        Self { center, radius }
    }

    pub fn outline(&self) -> Path {
        Path::circle(self.center, self.radius)
    }
}

/// Shape parameters for [`metaball`].
#[derive(Debug, Clone, Copy)]
pub struct Connector {
    /// 0 = tangent points sit where the rims touch, 1 = fully merged angle.
    pub v: f64,
    pub handle_len_rate: f64,
    pub max_distance: f64,
}

impl Default for Connector {
    fn default() -> Self {
        Self { v: 0.5, handle_len_rate: 2.4, max_distance: 300.0 }
    }
}

/// Connector outline between `a` and `b`, or `None` when the pair has no
/// drawable neck: a zero radius, centers beyond `max_distance`, or one
/// circle swallowing the other.
pub fn metaball(a: &Circle, b: &Circle, k: &Connector) -> Option<Path> {
    let (c1, c2) = (a.center, b.center);
    let (r1, r2) = (a.radius, b.radius);
    if r1 == 0.0 || r2 == 0.0 {
        return None;
    }

    let d = c1.distance(c2);
    if d > k.max_distance || d <= (r1 - r2).abs() {
        return None;
    }

    // Overlapping circles: offset the tangent points past the intersection.
    let (u1, u2) = if d < r1 + r2 {
        (
            acos_clamped((r1 * r1 + d * d - r2 * r2) / (2.0 * r1 * d)),
            acos_clamped((r2 * r2 + d * d - r1 * r1) / (2.0 * r2 * d)),
        )
    } else {
        (0.0, 0.0)
    };

    let angle1 = (c2 - c1).angle();
    let angle2 = acos_clamped((r1 - r2) / d);
    let v = k.v;
    let angle1a = angle1 + u1 + (angle2 - u1) * v;
    let angle1b = angle1 - u1 - (angle2 - u1) * v;
    let angle2a = angle1 + PI - u2 - (PI - u2 - angle2) * v;
    let angle2b = angle1 - PI + u2 + (PI - u2 - angle2) * v;

    let p1a = c1 + Point::from_angle(angle1a, r1);
    let p1b = c1 + Point::from_angle(angle1b, r1);
    let p2a = c2 + Point::from_angle(angle2a, r2);
    let p2b = c2 + Point::from_angle(angle2b, r2);

    // Handle length follows the span between the two rims.
    let total = r1 + r2;
    let mut d2 = (v * k.handle_len_rate).min((p1a - p2a).length() / total);
    d2 *= (d * 2.0 / total).min(1.0);
    let (h1, h2) = (r1 * d2, r2 * d2);

    Some(Path::new(vec![
        Segment::new(p1a, Point::ZERO, Point::from_angle(angle1a - FRAC_PI_2, h1)),
        Segment::new(p2a, Point::from_angle(angle2a + FRAC_PI_2, h2), Point::ZERO),
        Segment::new(p2b, Point::ZERO, Point::from_angle(angle2b - FRAC_PI_2, h2)),
        Segment::new(p1b, Point::from_angle(angle1b + FRAC_PI_2, h1), Point::ZERO),
    ]))
}

#[inline]
fn acos_clamped(x: f64) -> f64 {
    x.clamp(-1.0, 1.0).acos()
}

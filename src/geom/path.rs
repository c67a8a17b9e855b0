// path.rs - Closed cubic bezier paths
//
// A path is a ring of segments. Each segment is an anchor point with an
// incoming and outgoing handle stored relative to the anchor, so the curve
// between segment i and i+1 is
//   (p[i], p[i] + out[i], p[i+1] + in[i+1], p[i+1]).
// Zero handles give straight edges.

use super::Point;

// Bezier circle approximation constant for four quarter arcs.
const KAPPA: f64 = 0.552_284_749_831;

// Flattening resolution for curved edges.
const CURVE_STEPS: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Segment {
    pub point: Point,
    pub handle_in: Point,
    pub handle_out: Point,
}

impl Segment {
    pub fn new(point: Point, handle_in: Point, handle_out: Point) -> Self {
        Self { point, handle_in, handle_out }
    }

    pub fn corner(point: Point) -> Self {
        Self { point, ..Self::default() }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    pub segments: Vec<Segment>,
}

impl Path {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// Polygon through `points` with straight edges.
    pub fn from_points(points: &[Point]) -> Self {
        Self { segments: points.iter().copied().map(Segment::corner).collect() }
    }

    pub fn circle(center: Point, radius: f64) -> Self {
        let k = radius * KAPPA;
        let seg = |dx: f64, dy: f64, hx: f64, hy: f64| {
            Segment::new(
                center + Point::new(dx, dy),
                Point::new(-hx, -hy),
                Point::new(hx, hy),
            )
        };
        Self::new(vec![
            seg(radius, 0.0, 0.0, k),
            seg(0.0, radius, -k, 0.0),
            seg(-radius, 0.0, 0.0, -k),
            seg(0.0, -radius, k, 0.0),
        ])
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.segments.iter().map(|s| s.point)
    }

    /// Control polygon of the curve leaving segment `i`.
    pub fn curve(&self, i: usize) -> [Point; 4] {
        let n = self.segments.len();
        let a = &self.segments[i % n];
        let b = &self.segments[(i + 1) % n];
        [a.point, a.point + a.handle_out, b.point + b.handle_in, b.point]
    }

    /// Sample the outline into a polygon. Straight edges contribute only
    /// their start point.
    pub fn flatten(&self) -> Vec<Point> {
        let n = self.segments.len();
        let mut out = Vec::with_capacity(n * CURVE_STEPS);
        for i in 0..n {
            let c = self.curve(i);
            if is_straight(&c) {
                out.push(c[0]);
                continue;
            }
            for s in 0..CURVE_STEPS {
                out.push(cubic(&c, s as f64 / CURVE_STEPS as f64));
            }
        }
        out
    }

    /// Approximate outline length.
    pub fn length(&self) -> f64 {
        let n = self.segments.len();
        if n < 2 {
            return 0.0;
        }
        let mut total = 0.0;
        for i in 0..n {
            let c = self.curve(i);
            if is_straight(&c) {
                total += c[0].distance(c[3]);
                continue;
            }
            let mut prev = c[0];
            for s in 1..=CURVE_STEPS {
                let p = cubic(&c, s as f64 / CURVE_STEPS as f64);
                total += prev.distance(p);
                prev = p;
            }
        }
        total
    }

    /// Area centroid of the anchor polygon, falling back to the anchor mean
    /// when the polygon has no area.
    pub fn centroid(&self) -> Point {
        polygon_centroid(&self.points().collect::<Vec<_>>())
    }

    /// Scale anchors and handles about `center`.
    pub fn scale_about(&mut self, factor: f64, center: Point) {
        for s in &mut self.segments {
            s.point = center + (s.point - center) * factor;
            s.handle_in = s.handle_in * factor;
            s.handle_out = s.handle_out * factor;
        }
    }

    pub fn scale(&mut self, factor: f64) {
        let c = self.centroid();
        self.scale_about(factor, c);
    }

    /// Drop segments whose anchor sits closer than `min` to where the next
    /// curve starts bending in. Never reduces the ring below a triangle.
    pub fn remove_small_bits(&mut self, min: f64) {
        for i in (0..self.segments.len()).rev() {
            let n = self.segments.len();
            if n <= 3 {
                return;
            }
            let next = &self.segments[(i + 1) % n];
            let target = next.point + next.handle_in;
            if self.segments[i].point.distance(target) < min {
                self.segments.remove(i);
            }
        }
    }
}

/// Closed curve through `points` with Catmull-Rom tangents, so consecutive
/// curves share a tangent direction at every anchor.
pub fn smooth_closed_path(points: &[Point]) -> Path {
    let n = points.len();
    let segments = (0..n)
        .map(|i| {
            let prev = points[(i + n - 1) % n];
            let next = points[(i + 1) % n];
            let tangent = (next - prev) / 6.0;
            Segment::new(points[i], -tangent, tangent)
        })
        .collect();
    Path::new(segments)
}

pub fn polygon_centroid(points: &[Point]) -> Point {
    let n = points.len();
    if n == 0 {
        return Point::ZERO;
    }
    let mut area2 = 0.0;
    let mut acc = Point::ZERO;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        let cross = a.x * b.y - b.x * a.y;
        area2 += cross;
        acc += (a + b) * cross;
    }
    if area2.abs() < 1e-9 {
        let sum = points.iter().fold(Point::ZERO, |s, &p| s + p);
        return sum / n as f64;
    }
    acc / (3.0 * area2)
}

#[inline]
fn is_straight(c: &[Point; 4]) -> bool {
    c[1] == c[0] && c[2] == c[3]
}

#[inline]
pub fn cubic(c: &[Point; 4], t: f64) -> Point {
    let u = 1.0 - t;
    c[0] * (u * u * u) + c[1] * (3.0 * u * u * t) + c[2] * (3.0 * u * t * t) + c[3] * (t * t * t)
}

// clip.rs - Convex polygon clipping against a half-plane
//
// Sutherland-Hodgman against a single plane. The kept side is
//   (p - origin) . normal <= 0

use crate::geom::Point;

// Vertices closer than this are merged after clipping.
const WELD: f64 = 1e-9;

/// Clip `poly` into `out`. Returns true when anything was cut away.
pub fn clip(poly: &[Point], origin: Point, normal: Point, out: &mut Vec<Point>) -> bool {
    out.clear();
    let n = poly.len();
    if n == 0 {
        return false;
    }

    let side = |p: Point| (p - origin).dot(normal);
    let mut cut = false;

    for i in 0..n {
        let a = poly[i];
        let b = poly[(i + 1) % n];
        let (da, db) = (side(a), side(b));

        if da <= 0.0 {
            push_welded(out, a);
        } else {
            cut = true;
        }
        // Edge crosses the plane
        if (da < 0.0 && db > 0.0) || (da > 0.0 && db < 0.0) {
            let t = da / (da - db);
            push_welded(out, a.lerp(b, t));
        }
    }

    if out.len() > 1 && out[0].distance_sq(out[out.len() - 1]) < WELD * WELD {
        out.pop();
    }
    cut
}

#[inline]
fn push_welded(out: &mut Vec<Point>, p: Point) {
    if let Some(&last) = out.last() {
        if last.distance_sq(p) < WELD * WELD {
            return;
        }
    }
    out.push(p);
}

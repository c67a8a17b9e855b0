// diagram/ - Voronoi tessellation
//
// Sites + bounding box -> one convex polygon per site.
//
// Each cell starts as the bounding box and is clipped by the perpendicular
// bisector towards every other site, nearest first. Once the next site is
// further than twice the cell's current radius no bisector can cut it, so
// the scan stops early. Output vertex order follows the box winding
// (clockwise on screen).

mod clip;

use crate::geom::Point;

pub use clip::clip;

/// Tessellation bounds, named after the left/right/top/bottom edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub xl: f64,
    pub xr: f64,
    pub yt: f64,
    pub yb: f64,
}

impl BoundingBox {
    pub fn new(xl: f64, xr: f64, yt: f64, yb: f64) -> Self {
        Self { xl, xr, yt, yb }
    }

    /// `width x height` viewport shrunk by `margin` on every side.
    pub fn inset(width: f64, height: f64, margin: f64) -> Self {
        Self { xl: margin, xr: width - margin, yt: margin, yb: height - margin }
    }

    pub fn is_valid(&self) -> bool {
        [self.xl, self.xr, self.yt, self.yb].iter().all(|v| v.is_finite())
            && self.xr > self.xl
            && self.yb > self.yt
    }

    fn corners(&self) -> Vec<Point> {
        vec![
            Point::new(self.xl, self.yt),
            Point::new(self.xr, self.yt),
            Point::new(self.xr, self.yb),
            Point::new(self.xl, self.yb),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub site: Point,
    pub vertices: Vec<Point>,
}

#[derive(Debug, Clone, Default)]
pub struct Diagram {
    /// Indexed like the input sites. `None` for sites without a cell
    /// (duplicates, or regions that fall entirely outside the box).
    pub cells: Vec<Option<Cell>>,
}

impl Diagram {
    pub fn valid_cells(&self) -> impl Iterator<Item = (usize, &Cell)> {
        self.cells.iter().enumerate().filter_map(|(i, c)| c.as_ref().map(|c| (i, c)))
    }
}

/// Tessellate `sites` inside `bbox`. Returns `None` for degenerate input:
/// fewer than two sites, an empty box, or non-finite site coordinates.
pub fn compute(sites: &[Point], bbox: &BoundingBox) -> Option<Diagram> {
    if sites.len() < 2 || !bbox.is_valid() || !sites.iter().all(|p| p.is_finite()) {
        return None;
    }

    let mut cells = Vec::with_capacity(sites.len());
    let mut order: Vec<usize> = Vec::with_capacity(sites.len());
    let mut poly = Vec::new();
    let mut scratch = Vec::new();

    for (i, &site) in sites.iter().enumerate() {
        // Later duplicates yield to the first occurrence.
        if sites[..i].contains(&site) {
            cells.push(None);
            continue;
        }

        order.clear();
        order.extend((0..sites.len()).filter(|&j| j != i && sites[j] != site));
        order.sort_by(|&a, &b| site.distance_sq(sites[a]).total_cmp(&site.distance_sq(sites[b])));

        poly.clear();
        poly.extend(bbox.corners());
        let mut radius_sq = max_radius_sq(&poly, site);

        for &j in &order {
            let other = sites[j];
            if site.distance_sq(other) > 4.0 * radius_sq {
                break;
            }
            let normal = other - site;
            let mid = site.lerp(other, 0.5);
            if clip(&poly, mid, normal, &mut scratch) {
                std::mem::swap(&mut poly, &mut scratch);
                if poly.len() < 3 {
                    break;
                }
                radius_sq = max_radius_sq(&poly, site);
            }
        }

        cells.push((poly.len() >= 3).then(|| Cell { site, vertices: poly.clone() }));
    }

    Some(Diagram { cells })
}

fn max_radius_sq(poly: &[Point], center: Point) -> f64 {
    poly.iter().map(|p| center.distance_sq(*p)).fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::polygon_centroid;

    fn area(poly: &[Point]) -> f64 {
        let n = poly.len();
        (0..n)
            .map(|i| {
                let (a, b) = (poly[i], poly[(i + 1) % n]);
                a.x * b.y - b.x * a.y
            })
            .sum::<f64>()
            .abs()
            / 2.0
    }

    #[test]
    fn degenerate_input_yields_nothing() {
        let bbox = BoundingBox::new(0.0, 100.0, 0.0, 100.0);
        assert!(compute(&[], &bbox).is_none());
        assert!(compute(&[Point::new(1.0, 1.0)], &bbox).is_none());
        let flat = BoundingBox::new(0.0, 0.0, 0.0, 100.0);
        assert!(compute(&[Point::new(1.0, 1.0), Point::new(2.0, 2.0)], &flat).is_none());
    }

    #[test]
    fn two_sites_split_the_box() {
        let bbox = BoundingBox::new(0.0, 100.0, 0.0, 100.0);
        let d = compute(&[Point::new(25.0, 50.0), Point::new(75.0, 50.0)], &bbox).unwrap();
        let left = d.cells[0].as_ref().unwrap();
        assert!(left.vertices.iter().all(|p| p.x <= 50.0 + 1e-9));
        assert!((area(&left.vertices) - 5000.0).abs() < 1e-6);
    }

    #[test]
    fn cells_cover_the_box() {
        let bbox = BoundingBox::new(0.0, 300.0, 0.0, 200.0);
        let sites: Vec<Point> = (0..12)
            .map(|i| Point::new(13.0 + (i * 37 % 280) as f64, 7.0 + (i * 53 % 190) as f64))
            .collect();
        let d = compute(&sites, &bbox).unwrap();
        let total: f64 = d.valid_cells().map(|(_, c)| area(&c.vertices)).sum();
        assert!((total - 60_000.0).abs() < 1e-6);
        for (i, cell) in d.valid_cells() {
            // every cell is closest to its own site at its centroid
            let c = polygon_centroid(&cell.vertices);
            let own = c.distance_sq(sites[i]);
            assert!(sites.iter().all(|s| c.distance_sq(*s) >= own - 1e-6));
        }
    }

    #[test]
    fn duplicate_site_gets_no_cell() {
        let bbox = BoundingBox::new(0.0, 100.0, 0.0, 100.0);
        let p = Point::new(30.0, 30.0);
        let d = compute(&[p, Point::new(70.0, 70.0), p], &bbox).unwrap();
        assert!(d.cells[0].is_some());
        assert!(d.cells[2].is_none());
    }
}

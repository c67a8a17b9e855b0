// voronoi.rs - Live Voronoi tessellation with rounded, shrunken cells
//
// Sites start on a jittered honeycomb grid. The last site always follows
// the pointer; clicks insert permanent sites just before it. The diagram
// is recomputed from scratch whenever the scene is repainted.

use log::{debug, warn};

use super::Effect;
use crate::color::Palette;
use crate::config::VoronoiConfig;
use crate::diagram::{self, BoundingBox, Diagram};
use crate::geom::{Path, Point, Segment, Size};
use crate::rng::Rng;
use crate::surface::Surface;

// Smallest grid step honoured; keeps the seeding loop bounded.
const MIN_CELL_SIZE: f64 = 10.0;

pub struct Voronoi {
    config: VoronoiConfig,
    palette: Palette,
    size: Size,
    bbox: BoundingBox,
    rng: Rng,

    /// Grid and clicked sites, then the cursor site last.
    sites: Vec<Point>,
    /// Last non-empty size the sites were placed or rescaled for.
    laid_out: Size,
    seeded: bool,
    dirty: bool,
}

impl Voronoi {
    pub fn new(config: VoronoiConfig, palette: Palette, size: Size, seed: u32) -> Self {
        let bbox = BoundingBox::inset(size.width, size.height, config.margin);
        let mut effect = Self {
            config,
            palette,
            size,
            bbox,
            rng: Rng::new(seed),
            sites: vec![size.center()],
            laid_out: Size::default(),
            seeded: false,
            dirty: true,
        };
        effect.seed_grid();
        effect
    }

    pub fn sites(&self) -> &[Point] {
        &self.sites
    }

    pub fn cursor(&self) -> Point {
        self.sites[self.sites.len() - 1]
    }

    pub fn bbox(&self) -> BoundingBox {
        self.bbox
    }

    pub fn diagram(&self) -> Option<Diagram> {
        diagram::compute(&self.sites, &self.bbox)
    }

    /// Rounded cell outlines for the current sites, in site order.
    pub fn cell_paths(&self) -> Vec<Path> {
        let Some(diagram) = self.diagram() else {
            return Vec::new();
        };
        diagram
            .valid_cells()
            .filter_map(|(_, cell)| cell_path(&cell.vertices, &self.config))
            .collect()
    }

    fn seed_grid(&mut self) {
        if self.size.is_empty() {
            warn!("voronoi: empty viewport, seeding deferred until resize");
            return;
        }
        let mut sites = honeycomb(self.size, &self.config, &mut self.rng);
        sites.push(self.size.center());
        debug!("voronoi: seeded {} sites", sites.len());
        self.sites = sites;
        self.laid_out = self.size;
        self.seeded = true;
    }
}

/// Offset-row grid covering the viewport plus one cell of overhang on each
/// side. Odd rows shift half a cell right.
pub fn honeycomb(size: Size, config: &VoronoiConfig, rng: &mut Rng) -> Vec<Point> {
    if size.is_empty() {
        return Vec::new();
    }
    let step = config.cell_size.max(MIN_CELL_SIZE);
    let cols = size.width / step;
    let rows = size.height / step;
    let jitter = step * config.jitter_amount;

    let mut points = Vec::new();
    let mut i = -1i32;
    while (i as f64) < cols + 1.0 {
        let mut j = -1i32;
        while (j as f64) < rows + 1.0 {
            let mut p = Point::new(i as f64 * step + step / 2.0, j as f64 * step + step / 2.0);
            if j % 2 != 0 {
                p.x += step / 2.0;
            }
            if config.jitter {
                p += Point::new((rng.next_f64() - 0.5) * jitter, (rng.next_f64() - 0.5) * jitter);
            }
            points.push(p);
            j += 1;
        }
        i += 1;
    }
    points
}

/// Rounded outline for one cell polygon: anchors sit on edge midpoints with
/// handles reaching towards the corners, then the shape is shrunk about its
/// centroid and short leftover segments are dropped.
pub fn cell_path(vertices: &[Point], config: &VoronoiConfig) -> Option<Path> {
    let n = vertices.len();
    if n < 3 {
        return None;
    }

    let segments = (0..n)
        .map(|i| {
            let point = vertices[i];
            let next = vertices[(i + 1) % n];
            let half = (next - point) / 2.0;
            Segment::new(point + half, -half * config.handle_scale, half * config.handle_scale)
        })
        .collect();

    let mut path = Path::new(segments);
    path.scale(config.shrink);
    let min = path.length() / config.small_segment_divisor;
    path.remove_small_bits(min);
    Some(path)
}

impl Effect for Voronoi {
    fn name(&self) -> &'static str {
        "voronoi"
    }

    fn resize(&mut self, size: Size) {
        if size == self.size {
            return;
        }
        self.size = size;
        self.bbox = BoundingBox::inset(size.width, size.height, self.config.margin);
        self.dirty = true;

        if size.is_empty() {
            return;
        }
        if !self.seeded {
            self.seed_grid();
            return;
        }

        let old = self.laid_out;
        let (sx, sy) = (size.width / old.width, size.height / old.height);
        for s in &mut self.sites {
            *s = Point::new(s.x * sx, s.y * sy);
        }
        self.laid_out = size;
    }

    fn pointer_move(&mut self, at: Point) {
        if !at.is_finite() {
            return;
        }
        let last = self.sites.len() - 1;
        self.sites[last] = at;
        self.dirty = true;
    }

    fn pointer_down(&mut self, at: Point) {
        if !at.is_finite() {
            return;
        }
        let last = self.sites.len() - 1;
        self.sites.insert(last, at);
        self.dirty = true;
    }

    fn tick(&mut self) -> bool {
        self.dirty
    }

    fn draw(&mut self, surface: &mut dyn Surface) {
        surface.clear();
        self.dirty = false;
        if self.size.is_empty() {
            return;
        }
        // Gap color shows between the shrunken cells.
        surface.fill_rect(self.size.bounds(), self.palette.backdrop);
        for path in self.cell_paths() {
            surface.fill_path(&path, self.palette.fill);
        }
    }
}

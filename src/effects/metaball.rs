// metaball.rs - Cursor blob melting into a field of static circles
//
// Static circles are scattered once at mount. Every frame the cursor circle
// eases towards the pointer and grows a connector to each of its nearest
// neighbours. Connectors are pure render output, rebuilt every frame.

use log::{debug, warn};

use super::Effect;
use crate::color::Palette;
use crate::config::MetaballConfig;
use crate::geom::{Circle, Connector, Path, Point, Rect, Size, metaball};
use crate::rng::Rng;
use crate::surface::Surface;

/// Where the cursor circle waits before the pointer first moves.
pub const PARKED: Point = Point::new(-1000.0, -1000.0);

pub struct Metaball {
    config: MetaballConfig,
    palette: Palette,
    size: Size,
    exclusion: Option<Rect>,
    seed: u32,

    circles: Vec<Circle>,
    /// Last non-empty size the circles were placed or rescaled for.
    laid_out: Size,
    cursor: Circle,
    target: Option<Point>,
    connectors: Vec<Path>,
}

impl Metaball {
    pub fn new(
        config: MetaballConfig,
        palette: Palette,
        size: Size,
        exclusion: Option<Rect>,
        seed: u32,
    ) -> Self {
        let cursor = Circle::new(PARKED, config.cursor_radius);
        let mut effect = Self {
            config,
            palette,
            size,
            exclusion,
            seed,
            circles: Vec::new(),
            laid_out: Size::default(),
            cursor,
            target: None,
            connectors: Vec::new(),
        };
        effect.scatter();
        effect
    }

    pub fn circles(&self) -> &[Circle] {
        &self.circles
    }

    pub fn cursor(&self) -> &Circle {
        &self.cursor
    }

    pub fn connectors(&self) -> &[Path] {
        &self.connectors
    }

    fn scatter(&mut self) {
        if self.size.is_empty() {
            warn!("metaball: empty viewport, placement deferred until resize");
            return;
        }
        let mut rng = Rng::new(self.seed);
        self.circles = place_circles(&self.config, self.size, self.exclusion, &mut rng);
        self.laid_out = self.size;
        if self.circles.len() < self.config.count {
            debug!(
                "metaball: placed {}/{} circles within {} attempts",
                self.circles.len(),
                self.config.count,
                self.config.max_attempts
            );
        }
    }

    /// Indices of the `neighbours` static circles closest to the cursor.
    /// Equal distances keep placement order.
    fn nearest(&self) -> Vec<usize> {
        let c = self.cursor.center;
        let mut idx: Vec<usize> = (0..self.circles.len()).collect();
        idx.sort_by(|&a, &b| {
            c.distance_sq(self.circles[a].center).total_cmp(&c.distance_sq(self.circles[b].center))
        });
        idx.truncate(self.config.neighbours);
        idx
    }

    fn connect(&mut self) {
        let k = Connector {
            v: self.config.v,
            handle_len_rate: self.config.handle_len_rate,
            max_distance: self.config.max_distance,
        };
        let nearest = self.nearest();
        self.connectors = nearest
            .into_iter()
            .filter_map(|i| metaball(&self.cursor, &self.circles[i], &k))
            .collect();
    }
}

/// Scatter up to `count` circles. Each attempt draws four values from `rng`
/// (x, y, sparse-region roll, radius) whether or not it is accepted, so the
/// layout depends only on the seed and the viewport.
pub fn place_circles(config: &MetaballConfig, size: Size, exclusion: Option<Rect>, rng: &mut Rng) -> Vec<Circle> {
    let pad = config.padding;
    let mut circles: Vec<Circle> = Vec::with_capacity(config.count);
    if size.is_empty() || size.width < 2.0 * pad || size.height < 2.0 * pad {
        return circles;
    }

    let sparse_below = size.height * config.sparse_top;
    let min_sq = config.min_dist * config.min_dist;

    for _ in 0..config.max_attempts {
        if circles.len() >= config.count {
            break;
        }
        let p = Point::new(rng.range(pad, size.width - pad), rng.range(pad, size.height - pad));
        let roll = rng.next_f64();
        let radius = rng.range(config.radius_min, config.radius_max);

        if exclusion.is_some_and(|r| r.contains(p)) {
            continue;
        }
        if p.y < sparse_below && roll < config.sparse_reject {
            continue;
        }
        if circles.iter().any(|c| c.center.distance_sq(p) < min_sq) {
            continue;
        }
        circles.push(Circle::new(p, radius));
    }
    circles
}

impl Effect for Metaball {
    fn name(&self) -> &'static str {
        "metaball"
    }

    fn resize(&mut self, size: Size) {
        if size == self.size {
            return;
        }
        self.size = size;
        if size.is_empty() {
            return;
        }
        if self.laid_out.is_empty() || self.circles.is_empty() {
            self.scatter();
            return;
        }

        let old = self.laid_out;
        self.laid_out = size;
        let (sx, sy) = (size.width / old.width, size.height / old.height);
        let rescale = |p: Point| Point::new(p.x * sx, p.y * sy);
        for c in &mut self.circles {
            c.center = rescale(c.center);
        }
        if let Some(t) = self.target {
            self.target = Some(rescale(t));
            self.cursor.center = rescale(self.cursor.center);
        }
        debug!("metaball: rescaled {} circles to {}x{}", self.circles.len(), size.width, size.height);
    }

    fn pointer_move(&mut self, at: Point) {
        if !at.is_finite() {
            return;
        }
        let at = if self.size.is_empty() { at } else { self.size.bounds().clamp(at) };
        self.target = Some(at);
    }

    fn tick(&mut self) -> bool {
        if let Some(t) = self.target {
            let c = self.cursor.center;
            self.cursor.center = c + (t - c) * self.config.easing;
        }
        self.connect();
        true
    }

    fn draw(&mut self, surface: &mut dyn Surface) {
        surface.clear();
        if self.size.is_empty() {
            return;
        }
        surface.fill_rect(self.size.bounds(), self.palette.backdrop);
        for c in &self.circles {
            surface.fill_path(&c.outline(), self.palette.fill);
        }
        surface.fill_path(&self.cursor.outline(), self.palette.fill);
        for path in &self.connectors {
            surface.fill_path(path, self.palette.fill);
        }
    }
}

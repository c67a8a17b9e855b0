// wave.rs - Mass-spring wave boundary
//
// A chain of points across an oversized width, joined by springs that
// only act vertically. The two points at each end are pinned; the outer
// pair sits a full viewport height below the baseline so the filled shape
// closes off-screen. Integration runs every frame; the pointer drags the
// nearest point (and, more weakly, its neighbours) towards itself.
//
// Points and springs live in flat arrays; springs refer to points by index.

use log::debug;

use super::Effect;
use crate::color::Palette;
use crate::config::WaveConfig;
use crate::geom::{Path, Point, Size, smooth_closed_path};
use crate::surface::Surface;

// Share of the spring correction applied per frame.
const SPRING_DAMPING: f64 = 0.2;

// Two pinned points at each end plus at least one free point.
const MIN_AMOUNT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringPoint {
    pub x: f64,
    pub y: f64,
    /// y at the previous frame; (y - py) is the velocity.
    pub py: f64,
    pub fixed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    pub a: usize,
    pub b: usize,
    pub rest_length: f64,
    pub strength: f64,
}

pub struct Wave {
    config: WaveConfig,
    palette: Palette,
    size: Size,
    animated: bool,
    drawn: bool,

    points: Vec<SpringPoint>,
    springs: Vec<Spring>,
    path: Path,
}

impl Wave {
    pub fn new(config: WaveConfig, palette: Palette, size: Size) -> Self {
        let mut wave = Self {
            config,
            palette,
            size,
            animated: true,
            drawn: false,
            points: Vec::new(),
            springs: Vec::new(),
            path: Path::default(),
        };
        wave.build();
        wave
    }

    /// Rest shape only: no integration, no pointer response.
    pub fn still(config: WaveConfig, palette: Palette, size: Size) -> Self {
        Self { animated: false, ..Self::new(config, palette, size) }
    }

    pub fn is_animated(&self) -> bool {
        self.animated
    }

    pub fn points(&self) -> &[SpringPoint] {
        &self.points
    }

    pub fn springs(&self) -> &[Spring] {
        &self.springs
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn build(&mut self) {
        self.points.clear();
        self.springs.clear();
        self.path = Path::default();
        if self.size.is_empty() {
            return;
        }

        let amount = self.config.amount.max(MIN_AMOUNT);
        let width = self.size.width * self.config.width_factor;
        let height = self.size.height;
        let spacing = width / amount as f64;
        let shift = width / 4.0;

        for i in 0..=amount {
            let mut y = 0.5 * height;
            if i == 0 || i == amount {
                y += height;
            }
            self.points.push(SpringPoint {
                x: i as f64 * spacing - shift,
                y,
                py: y,
                fixed: i < 2 || i > amount - 2,
            });
        }

        let rest_length = self.config.rest_length.unwrap_or(spacing);
        self.springs = (1..=amount)
            .map(|i| Spring { a: i - 1, b: i, rest_length, strength: self.config.stiffness })
            .collect();

        self.smooth();
        debug!("wave: built {} points across {}px", self.points.len(), width);
    }

    fn smooth(&mut self) {
        let outline: Vec<Point> = self.points.iter().map(|p| Point::new(p.x, p.y)).collect();
        self.path = smooth_closed_path(&outline);
    }

    fn integrate(&mut self) {
        let ts = self.config.time_step;
        let damping = 1.0 - self.config.friction * ts * ts;
        for p in self.points.iter_mut().filter(|p| !p.fixed) {
            let dy = (p.y - p.py) * damping;
            p.py = p.y;
            p.y = (p.y + dy).max(0.0);
        }

        let inv_mass = 1.0 / self.config.mass;
        let mamb = inv_mass * inv_mass;
        for s in &self.springs {
            let (a, b) = (self.points[s.a], self.points[s.b]);
            let delta = Point::new(b.x - a.x, b.y - a.y);
            let dist = delta.length();
            if dist <= 0.0 || !dist.is_finite() {
                continue;
            }
            let strength = ((dist - s.rest_length) / (dist * mamb)) * s.strength;
            let dy = delta.y * strength * inv_mass * SPRING_DAMPING;
            if !a.fixed {
                self.points[s.a].y = (a.y + dy).max(0.0);
            }
            if !b.fixed {
                self.points[s.b].y = (b.y - dy).max(0.0);
            }
        }
    }

    /// Point index closest to `at` along the chain, and the distance from
    /// `at` to the chain itself.
    fn nearest(&self, at: Point) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64)> = None;
        for i in 0..self.points.len().saturating_sub(1) {
            let a = Point::new(self.points[i].x, self.points[i].y);
            let b = Point::new(self.points[i + 1].x, self.points[i + 1].y);
            let ab = b - a;
            let len_sq = ab.dot(ab);
            let t = if len_sq > 0.0 { ((at - a).dot(ab) / len_sq).clamp(0.0, 1.0) } else { 0.0 };
            let d = at.distance(a + ab * t);
            if best.is_none_or(|(_, bd)| d < bd) {
                best = Some((if t < 0.5 { i } else { i + 1 }, d));
            }
        }
        best
    }

    fn pull(&mut self, i: usize, y: f64, rate: f64) {
        if let Some(p) = self.points.get_mut(i) {
            if !p.fixed {
                p.y = (p.y + (y - p.y) * rate).max(0.0);
            }
        }
    }
}

impl Effect for Wave {
    fn name(&self) -> &'static str {
        "wave"
    }

    fn resize(&mut self, size: Size) {
        if size == self.size {
            return;
        }
        self.size = size;
        self.drawn = false;
        self.build();
    }

    fn pointer_move(&mut self, at: Point) {
        if !self.animated || self.points.is_empty() || !at.is_finite() {
            return;
        }
        let at = self.size.bounds().clamp(at);
        let Some((i, dist)) = self.nearest(at) else {
            return;
        };
        if self.points[i].fixed || dist >= self.size.height * self.config.reach {
            return;
        }
        self.pull(i, at.y, self.config.pull);
        if i > 0 {
            self.pull(i - 1, at.y, self.config.neighbour_pull);
        }
        self.pull(i + 1, at.y, self.config.neighbour_pull);
    }

    fn tick(&mut self) -> bool {
        if !self.animated {
            return !self.drawn;
        }
        if self.points.is_empty() {
            return false;
        }
        self.integrate();
        self.smooth();
        true
    }

    fn draw(&mut self, surface: &mut dyn Surface) {
        surface.clear();
        self.drawn = true;
        if self.size.is_empty() {
            return;
        }
        surface.fill_rect(self.size.bounds(), self.palette.backdrop);
        if !self.path.is_empty() {
            surface.fill_path(&self.path, self.palette.fill);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Hsl;

    fn wave(size: Size) -> Wave {
        Wave::new(WaveConfig::default(), Palette::from_theme(Hsl::new(0.0, 0.0, 90.0)), size)
    }

    #[test]
    fn builds_pinned_chain() {
        let w = wave(Size::new(1000.0, 600.0));
        let pts = w.points();
        assert_eq!(pts.len(), 16);
        assert_eq!(w.springs().len(), 15);
        let fixed: Vec<usize> = (0..pts.len()).filter(|&i| pts[i].fixed).collect();
        assert_eq!(fixed, vec![0, 1, 14, 15]);
        assert_eq!(pts[0].y, 900.0);
        assert_eq!(pts[1].y, 300.0);
        assert_eq!(pts[15].y, 900.0);
        // 2000px wide, shifted left by a quarter
        assert_eq!(pts[0].x, -500.0);
        assert!((pts[15].x - 1500.0).abs() < 1e-9);
    }

    #[test]
    fn pointer_pulls_nearest_and_neighbours() {
        let mut w = wave(Size::new(1500.0, 600.0));
        // 3000px / 15 = 200px spacing from x = -750; point 7 at x = 650
        w.pointer_move(Point::new(650.0, 420.0));
        let pts = w.points();
        assert!((pts[7].y - (300.0 + 120.0 / 6.0)).abs() < 1e-9);
        assert!((pts[6].y - (300.0 + 120.0 / 24.0)).abs() < 1e-9);
        assert!((pts[8].y - (300.0 + 120.0 / 24.0)).abs() < 1e-9);
        assert_eq!(pts[5].y, 300.0);
    }

    #[test]
    fn far_pointer_is_ignored() {
        let mut w = wave(Size::new(1500.0, 600.0));
        let before = w.points().to_vec();
        // reach is 150px
        w.pointer_move(Point::new(650.0, 480.0));
        assert_eq!(w.points(), &before[..]);
    }

    #[test]
    fn disturbance_travels_and_stays_bounded() {
        let mut w = wave(Size::new(1500.0, 600.0));
        for _ in 0..30 {
            w.pointer_move(Point::new(650.0, 440.0));
        }
        let pinned: Vec<f64> = w.points().iter().filter(|p| p.fixed).map(|p| p.y).collect();
        for _ in 0..2000 {
            w.tick();
            for p in w.points() {
                assert!(p.y.is_finite() && p.y >= 0.0 && p.y < 2400.0);
            }
        }
        let after: Vec<f64> = w.points().iter().filter(|p| p.fixed).map(|p| p.y).collect();
        assert_eq!(pinned, after);
    }

    #[test]
    fn still_wave_ignores_input_and_draws_once() {
        let mut w = Wave::still(WaveConfig::default(), Palette::from_theme(Hsl::new(0.0, 0.0, 90.0)), Size::new(500.0, 800.0));
        let before = w.points().to_vec();
        w.pointer_move(Point::new(250.0, 420.0));
        assert_eq!(w.points(), &before[..]);
        assert!(w.tick());
        let mut rec = crate::surface::Recorder::new(Size::new(500.0, 800.0));
        w.draw(&mut rec);
        assert!(!w.tick());
    }

    #[test]
    fn tiny_amount_still_builds_a_free_point() {
        let config = WaveConfig { amount: 1, ..WaveConfig::default() };
        let w = Wave::new(config, Palette::from_theme(Hsl::new(0.0, 0.0, 90.0)), Size::new(1000.0, 600.0));
        let free: Vec<usize> = (0..w.points().len()).filter(|&i| !w.points()[i].fixed).collect();
        assert_eq!(w.points().len(), 5);
        assert_eq!(free, vec![2]);
    }

    #[test]
    fn resize_rebuilds() {
        let mut w = wave(Size::new(1000.0, 600.0));
        w.resize(Size::new(2000.0, 400.0));
        assert_eq!(w.points().len(), 16);
        assert_eq!(w.points()[0].x, -1000.0);
        assert_eq!(w.points()[3].y, 200.0);
    }
}

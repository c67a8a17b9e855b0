// config.rs - Effect tuning
//
// Every field has a default, so a host can pass `{}` or only the values it
// wants to change. JSON is the wire format because the browser host builds
// it from a plain object.

use serde::Deserialize;

use crate::error::{HeroError, Result};
use crate::geom::Rect;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HeroConfig {
    /// Seed for placement and jitter. Hosts pick one when absent.
    pub seed: Option<u32>,
    /// Area the metaball field keeps clear (e.g. behind headline text).
    pub exclusion: Option<Rect>,
    pub metaball: MetaballConfig,
    pub voronoi: VoronoiConfig,
    pub wave: WaveConfig,
    pub host: HostConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MetaballConfig {
    pub count: usize,
    pub min_dist: f64,
    pub padding: f64,
    pub max_attempts: usize,
    /// Upper fraction of the viewport that is kept sparser.
    pub sparse_top: f64,
    /// Extra rejection probability inside the sparse region.
    pub sparse_reject: f64,
    pub radius_min: f64,
    pub radius_max: f64,
    pub cursor_radius: f64,
    /// Fraction of the remaining distance the cursor covers per frame.
    pub easing: f64,
    /// How many nearest circles get a connector.
    pub neighbours: usize,
    pub v: f64,
    pub handle_len_rate: f64,
    pub max_distance: f64,
}

impl Default for MetaballConfig {
    fn default() -> Self {
        Self {
            count: 18,
            min_dist: 200.0,
            padding: 60.0,
            max_attempts: 2000,
            sparse_top: 0.45,
            sparse_reject: 0.55,
            radius_min: 30.0,
            radius_max: 60.0,
            cursor_radius: 50.0,
            easing: 0.15,
            neighbours: 4,
            v: 0.5,
            handle_len_rate: 2.4,
            max_distance: 300.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VoronoiConfig {
    /// Target spacing of the seeded site grid, in pixels.
    pub cell_size: f64,
    pub jitter: bool,
    /// Jitter span as a fraction of the cell size (0.5 = up to half of a
    /// cell's half-width either way).
    pub jitter_amount: f64,
    pub margin: f64,
    /// Per-cell scale about its centroid; leaves the gap between cells.
    pub shrink: f64,
    /// Corner handle length relative to half of each edge.
    pub handle_scale: f64,
    /// Segments shorter than outline length / divisor are dropped.
    pub small_segment_divisor: f64,
}

impl Default for VoronoiConfig {
    fn default() -> Self {
        Self {
            cell_size: 300.0,
            jitter: true,
            jitter_amount: 0.5,
            margin: 20.0,
            shrink: 0.95,
            handle_scale: 1.0,
            small_segment_divisor: 50.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    /// Number of spans; the path has `amount + 1` points.
    pub amount: usize,
    /// Path width relative to the viewport, so both ends sit off-screen.
    pub width_factor: f64,
    pub friction: f64,
    pub time_step: f64,
    pub mass: f64,
    pub stiffness: f64,
    /// Spring rest length; the point spacing when absent.
    pub rest_length: Option<f64>,
    pub pull: f64,
    pub neighbour_pull: f64,
    /// Pointer reach as a fraction of the viewport height.
    pub reach: f64,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            amount: 15,
            width_factor: 2.0,
            friction: 0.8,
            time_step: 0.01,
            mass: 2.0,
            stiffness: 0.55,
            rest_length: None,
            pull: 1.0 / 6.0,
            neighbour_pull: 1.0 / 24.0,
            reach: 0.25,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Surfaces narrower than this mount the wave as a static shape.
    pub narrow_breakpoint: f64,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self { narrow_breakpoint: 768.0 }
    }
}

impl HeroConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: HeroConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let m = &self.metaball;
        check("metaball.count", m.count as f64, 0.0, 500.0)?;
        check("metaball.min_dist", m.min_dist, 0.0, 10_000.0)?;
        check("metaball.padding", m.padding, 0.0, 10_000.0)?;
        check("metaball.max_attempts", m.max_attempts as f64, 0.0, 1_000_000.0)?;
        check("metaball.sparse_top", m.sparse_top, 0.0, 1.0)?;
        check("metaball.sparse_reject", m.sparse_reject, 0.0, 1.0)?;
        check("metaball.radius_min", m.radius_min, f64::MIN_POSITIVE, 10_000.0)?;
        check("metaball.radius_max", m.radius_max, m.radius_min, 10_000.0)?;
        check("metaball.cursor_radius", m.cursor_radius, f64::MIN_POSITIVE, 10_000.0)?;
        check("metaball.easing", m.easing, f64::MIN_POSITIVE, 1.0)?;
        check("metaball.neighbours", m.neighbours as f64, 0.0, 64.0)?;
        check("metaball.v", m.v, 0.0, 1.0)?;
        check("metaball.handle_len_rate", m.handle_len_rate, 0.0, 100.0)?;
        check("metaball.max_distance", m.max_distance, 0.0, 100_000.0)?;

        let v = &self.voronoi;
        check("voronoi.cell_size", v.cell_size, 10.0, 100_000.0)?;
        check("voronoi.jitter_amount", v.jitter_amount, 0.0, 1.0)?;
        check("voronoi.margin", v.margin, 0.0, 10_000.0)?;
        check("voronoi.shrink", v.shrink, f64::MIN_POSITIVE, 1.0)?;
        check("voronoi.handle_scale", v.handle_scale, 0.0, 4.0)?;
        check("voronoi.small_segment_divisor", v.small_segment_divisor, 1.0, 100_000.0)?;

        let w = &self.wave;
        check("wave.amount", w.amount as f64, 4.0, 1024.0)?;
        check("wave.width_factor", w.width_factor, 1.0, 4.0)?;
        check("wave.friction", w.friction, 0.0, 10_000.0)?;
        check("wave.time_step", w.time_step, f64::MIN_POSITIVE, 1.0)?;
        check("wave.mass", w.mass, f64::MIN_POSITIVE, 10_000.0)?;
        check("wave.stiffness", w.stiffness, 0.0, 1.0)?;
        if let Some(rest) = w.rest_length {
            check("wave.rest_length", rest, 0.0, 100_000.0)?;
        }
        check("wave.pull", w.pull, 0.0, 1.0)?;
        check("wave.neighbour_pull", w.neighbour_pull, 0.0, 1.0)?;
        check("wave.reach", w.reach, 0.0, 10.0)?;

        check("host.narrow_breakpoint", self.host.narrow_breakpoint, 0.0, 100_000.0)?;
        Ok(())
    }
}

fn check(field: &'static str, value: f64, min: f64, max: f64) -> Result<()> {
    // NaN fails both comparisons
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(HeroError::ValueOutOfRange { field, min, max, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_gives_defaults() {
        let c = HeroConfig::from_json("{}").unwrap();
        assert_eq!(c.metaball.count, 18);
        assert_eq!(c.wave.amount, 15);
        assert_eq!(c.voronoi.margin, 20.0);
        assert!(c.exclusion.is_none());
    }

    #[test]
    fn partial_override() {
        let c = HeroConfig::from_json(
            r#"{ "seed": 9, "metaball": { "count": 5 }, "exclusion": { "x": 1, "y": 2, "width": 3, "height": 4 } }"#,
        )
        .unwrap();
        assert_eq!(c.seed, Some(9));
        assert_eq!(c.metaball.count, 5);
        assert_eq!(c.metaball.min_dist, 200.0);
        assert_eq!(c.exclusion, Some(Rect::new(1.0, 2.0, 3.0, 4.0)));
    }

    #[test]
    fn out_of_range_rejected() {
        let err = HeroConfig::from_json(r#"{ "voronoi": { "shrink": 1.5 } }"#).unwrap_err();
        assert!(matches!(err, HeroError::ValueOutOfRange { field: "voronoi.shrink", .. }));
        assert!(matches!(HeroConfig::from_json("{ nope"), Err(HeroError::ConfigParse(_))));
    }
}

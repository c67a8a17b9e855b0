// scenarios.rs - End-to-end runs of each effect and of the host lifecycle

use hero_engine::color::{Hsl, Palette};
use hero_engine::config::{MetaballConfig, VoronoiConfig, WaveConfig};
use hero_engine::diagram::{self, BoundingBox};
use hero_engine::effects::{Effect, Metaball, Voronoi, Wave, cell_path};
use hero_engine::surface::{DrawCommand, Recorder};
use hero_engine::{EffectHost, HeroError, HeroKind, Mount, Point, Size};

fn palette() -> Palette {
    Palette::from_theme(Hsl::new(12.0, 70.0, 45.0))
}

/// Strictly inside a convex polygon, either winding.
fn strictly_inside(poly: &[Point], p: Point) -> bool {
    let n = poly.len();
    let mut sign = 0.0;
    for i in 0..n {
        let (a, b) = (poly[i], poly[(i + 1) % n]);
        let cross = (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x);
        if cross.abs() < 1e-6 {
            return false;
        }
        if sign == 0.0 {
            sign = cross.signum();
        } else if cross.signum() != sign {
            return false;
        }
    }
    true
}

#[test]
fn metaball_scenario() {
    let size = Size::new(800.0, 600.0);
    let config = MetaballConfig { count: 18, min_dist: 200.0, ..MetaballConfig::default() };
    let mut m = Metaball::new(config, palette(), size, None, 2024);

    let circles = m.circles().to_vec();
    assert!(!circles.is_empty() && circles.len() <= 18);
    for (i, a) in circles.iter().enumerate() {
        for b in &circles[i + 1..] {
            assert!(a.center.distance(b.center) >= 200.0);
        }
    }

    let target = Point::new(400.0, 300.0);
    let mut last = m.cursor().center.distance(target);
    for _ in 0..60 {
        m.pointer_move(target);
        m.tick();
        let d = m.cursor().center.distance(target);
        assert!(d < last);
        last = d;
    }
    assert!(last < 1.0);
}

#[test]
fn voronoi_scenario() {
    let sites = [
        Point::new(0.0, 0.0),
        Point::new(100.0, 0.0),
        Point::new(0.0, 100.0),
        Point::new(100.0, 100.0),
        Point::new(50.0, 50.0),
    ];
    let bbox = BoundingBox::new(0.0, 100.0, 0.0, 100.0);
    let d = diagram::compute(&sites, &bbox).unwrap();
    let cells: Vec<_> = d.valid_cells().collect();
    assert_eq!(cells.len(), 5);
    for (_, cell) in &cells {
        assert!(cell.vertices.len() >= 3);
    }

    let config = VoronoiConfig::default();
    for (i, cell) in &cells {
        let outline = cell_path(&cell.vertices, &config).unwrap().flatten();
        for (j, other) in &cells {
            if i == j {
                continue;
            }
            for p in &outline {
                assert!(!strictly_inside(&other.vertices, *p), "cell {i} overlaps cell {j} at {p:?}");
            }
        }
    }
}

#[test]
fn wave_scenario_settles() {
    let config = WaveConfig { amount: 15, time_step: 0.01, friction: 0.8, ..WaveConfig::default() };
    let mut w = Wave::new(config, palette(), Size::new(1280.0, 720.0));
    let mut prev: Vec<f64> = w.points().iter().map(|p| p.y).collect();
    let mut max_delta = f64::MAX;
    for _ in 0..1000 {
        w.tick();
        let now: Vec<f64> = w.points().iter().map(|p| p.y).collect();
        max_delta = prev.iter().zip(&now).map(|(a, b)| (a - b).abs()).fold(0.0, f64::max);
        prev = now;
    }
    assert!(max_delta < 1e-3);
    assert_eq!(w.path().len(), 16);
}

#[test]
fn wave_keeps_anchors_and_floor_under_input() {
    let mut w = Wave::new(WaveConfig::default(), palette(), Size::new(1280.0, 720.0));
    let anchors: Vec<(usize, f64)> =
        w.points().iter().enumerate().filter(|(_, p)| p.fixed).map(|(i, p)| (i, p.y)).collect();
    assert_eq!(anchors.iter().map(|a| a.0).collect::<Vec<_>>(), vec![0, 1, 14, 15]);

    for t in 0..400 {
        let x = (t as f64 * 7.0) % 1280.0;
        w.pointer_move(Point::new(x, if t % 2 == 0 { 250.0 } else { 470.0 }));
        w.tick();
        for p in w.points() {
            assert!(p.y >= 0.0);
        }
    }
    for (i, y) in anchors {
        assert_eq!(w.points()[i].y, y);
    }
}

#[test]
fn voronoi_cursor_site_is_always_last() {
    let size = Size::new(1200.0, 700.0);
    let mut v = Voronoi::new(VoronoiConfig::default(), palette(), size, 77);
    let clicks = [Point::new(100.0, 100.0), Point::new(900.0, 50.0), Point::new(-20.0, 800.0)];
    for (k, &c) in clicks.iter().enumerate() {
        let cursor = Point::new(10.0 * k as f64, 5.0);
        v.pointer_move(cursor);
        v.pointer_down(c);
        assert_eq!(v.cursor(), cursor);
        let n = v.sites().len();
        assert_eq!(v.sites()[n - 2], c);
    }
    v.resize(Size::new(600.0, 350.0));
    assert_eq!(v.cursor(), Point::new(10.0, 2.5));
}

#[test]
fn resize_round_trip_restores_layout() {
    let s1 = Size::new(1000.0, 800.0);
    let s2 = Size::new(640.0, 1100.0);

    let mut m = Metaball::new(MetaballConfig::default(), palette(), s1, None, 5);
    let before: Vec<Point> = m.circles().iter().map(|c| c.center).collect();
    m.resize(s2);
    m.resize(s1);
    for (a, c) in before.iter().zip(m.circles()) {
        assert!(a.distance(c.center) < 1e-9);
    }

    let mut v = Voronoi::new(VoronoiConfig::default(), palette(), s1, 5);
    let before = v.sites().to_vec();
    v.resize(s2);
    v.resize(s2);
    v.resize(s1);
    for (a, b) in before.iter().zip(v.sites()) {
        assert!(a.distance(*b) < 1e-9);
    }
}

#[test]
fn host_switches_effects_and_tears_down() {
    let mut host = EffectHost::new(Recorder::new(Size::new(1280.0, 720.0)));
    let theme = Hsl::new(160.0, 40.0, 40.0);

    let mut last = None;
    for kind in [HeroKind::Metaball, HeroKind::Voronoi, HeroKind::Wave] {
        let id = host.attach(Mount::new(kind, theme)).unwrap();
        assert_eq!(host.active_name(), Some(kind.name()));
        host.pointer_move(Point::new(640.0, 360.0));
        host.pointer_down(Point::new(320.0, 200.0));
        for _ in 0..5 {
            host.frame();
        }
        assert!(matches!(host.surface().commands.first(), Some(DrawCommand::Rect { .. })));
        if let Some(prev) = last {
            assert!(matches!(host.detach(prev), Err(HeroError::StaleHandle(_))));
        }
        last = Some(id);
    }

    let id = last.unwrap();
    host.detach(id).unwrap();
    let calls = host.surface().calls;
    for _ in 0..10 {
        host.frame();
    }
    host.resize();
    assert_eq!(host.surface().calls, calls);
    assert_eq!(host.active_name(), None);
}

#[test]
fn zero_ticks_is_a_valid_frame() {
    for kind in [HeroKind::Metaball, HeroKind::Voronoi, HeroKind::Wave] {
        let mut host = EffectHost::new(Recorder::new(Size::new(900.0, 500.0)));
        let id = host.attach(Mount::new(kind, Hsl::new(0.0, 0.0, 50.0))).unwrap();
        assert!(!host.surface().commands.is_empty());
        host.detach(id).unwrap();
    }
}

// host.rs - Effect host: one surface, at most one active effect
//
// The host owns the surface and the active effect together, so tearing an
// effect down and stopping its draw calls is a single operation. Platform
// glue (the browser loop in web.rs, the offline renderer) only forwards
// frames and input here.

use log::{debug, info};

use crate::color::{Hsl, Palette};
use crate::config::HeroConfig;
use crate::effects::{Effect, HeroKind, Metaball, Voronoi, Wave};
use crate::error::{HeroError, Result};
use crate::geom::{Point, Size};
use crate::rng::DEFAULT_SEED;
use crate::surface::Surface;

/// Handle returned by `attach`; only the matching handle can detach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MountId(u64);

impl MountId {
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Everything needed to mount an effect.
#[derive(Debug, Clone)]
pub struct Mount {
    pub kind: HeroKind,
    pub theme: Hsl,
    pub config: HeroConfig,
}

impl Mount {
    pub fn new(kind: HeroKind, theme: Hsl) -> Self {
        Self { kind, theme, config: HeroConfig::default() }
    }

    pub fn with_config(mut self, config: HeroConfig) -> Self {
        self.config = config;
        self
    }
}

pub struct EffectHost<S: Surface> {
    surface: S,
    active: Option<(MountId, Box<dyn Effect>)>,
    next_id: u64,
    frames: u64,
}

impl<S: Surface> EffectHost<S> {
    pub fn new(surface: S) -> Self {
        Self { surface, active: None, next_id: 1, frames: 0 }
    }

    /// Build the effect for `mount` at the surface's current size and draw
    /// its first frame. Any previously active effect is torn down first.
    pub fn attach(&mut self, mount: Mount) -> Result<MountId> {
        mount.config.validate()?;
        if let Some((id, _)) = &self.active {
            let id = *id;
            self.detach(id)?;
        }

        let size = self.surface.size();
        let mut effect = build(&mount, size);
        let id = MountId(self.next_id);
        self.next_id += 1;
        self.frames = 0;

        info!("host: mounted {} at {}x{} (handle {})", effect.name(), size.width, size.height, id.0);
        effect.draw(&mut self.surface);
        self.active = Some((id, effect));
        Ok(id)
    }

    /// Drop the active effect and clear the surface. After this returns the
    /// effect can no longer reach the surface.
    pub fn detach(&mut self, id: MountId) -> Result<()> {
        match &self.active {
            Some((active, _)) if *active == id => {}
            _ => return Err(HeroError::StaleHandle(id.0)),
        }
        if let Some((_, effect)) = self.active.take() {
            debug!("host: detached {} after {} frames", effect.name(), self.frames);
        }
        self.surface.clear();
        Ok(())
    }

    pub fn is_active(&self, id: MountId) -> bool {
        self.active.as_ref().is_some_and(|(active, _)| *active == id)
    }

    pub fn active_name(&self) -> Option<&'static str> {
        self.active.as_ref().map(|(_, e)| e.name())
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Advance the active effect one frame, repainting if it asks to.
    /// Returns whether anything was drawn.
    pub fn frame(&mut self) -> bool {
        let Some((_, effect)) = self.active.as_mut() else {
            return false;
        };
        self.frames += 1;
        if effect.tick() {
            effect.draw(&mut self.surface);
            return true;
        }
        false
    }

    pub fn pointer_move(&mut self, at: Point) {
        if let Some((_, effect)) = self.active.as_mut() {
            effect.pointer_move(at);
        }
    }

    pub fn pointer_down(&mut self, at: Point) {
        if let Some((_, effect)) = self.active.as_mut() {
            effect.pointer_down(at);
        }
    }

    /// Forward the surface's current size to the active effect and repaint.
    pub fn resize(&mut self) {
        let size = self.surface.size();
        if let Some((_, effect)) = self.active.as_mut() {
            effect.resize(size);
            effect.draw(&mut self.surface);
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }
}

fn build(mount: &Mount, size: Size) -> Box<dyn Effect> {
    let palette = Palette::from_theme(mount.theme);
    let config = &mount.config;
    let seed = config.seed.unwrap_or(DEFAULT_SEED);
    match mount.kind {
        HeroKind::Metaball => {
            Box::new(Metaball::new(config.metaball.clone(), palette, size, config.exclusion, seed))
        }
        HeroKind::Voronoi => Box::new(Voronoi::new(config.voronoi.clone(), palette, size, seed)),
        HeroKind::Wave if size.width < config.host.narrow_breakpoint => {
            debug!("host: {}px is below the {}px breakpoint, wave stays still", size.width, config.host.narrow_breakpoint);
            Box::new(Wave::still(config.wave.clone(), palette, size))
        }
        HeroKind::Wave => Box::new(Wave::new(config.wave.clone(), palette, size)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Recorder;

    fn host(w: f64, h: f64) -> EffectHost<Recorder> {
        EffectHost::new(Recorder::new(Size::new(w, h)))
    }

    fn mount(kind: HeroKind) -> Mount {
        Mount::new(kind, Hsl::new(210.0, 50.0, 45.0))
    }

    #[test]
    fn attach_draws_first_frame() {
        let mut h = host(1024.0, 600.0);
        h.attach(mount(HeroKind::Voronoi)).unwrap();
        assert_eq!(h.active_name(), Some("voronoi"));
        assert!(!h.surface().commands.is_empty());
    }

    #[test]
    fn no_draw_calls_after_detach() {
        let mut h = host(1024.0, 600.0);
        let id = h.attach(mount(HeroKind::Wave)).unwrap();
        h.frame();
        h.detach(id).unwrap();
        let calls = h.surface().calls;
        assert!(h.surface().commands.is_empty());

        h.pointer_move(Point::new(10.0, 10.0));
        h.pointer_down(Point::new(10.0, 10.0));
        h.resize();
        assert!(!h.frame());
        assert_eq!(h.surface().calls, calls);
    }

    #[test]
    fn stale_handle_is_rejected() {
        let mut h = host(800.0, 600.0);
        let first = h.attach(mount(HeroKind::Metaball)).unwrap();
        let second = h.attach(mount(HeroKind::Voronoi)).unwrap();
        assert!(!h.is_active(first));
        assert!(matches!(h.detach(first), Err(HeroError::StaleHandle(_))));
        assert_eq!(h.active_name(), Some("voronoi"));
        h.detach(second).unwrap();
        assert!(matches!(h.detach(second), Err(HeroError::StaleHandle(_))));
    }

    #[test]
    fn handles_are_fresh_and_frames_restart() {
        let mut h = host(800.0, 600.0);
        let first = h.attach(mount(HeroKind::Voronoi)).unwrap();
        for _ in 0..3 {
            h.frame();
        }
        assert_eq!(h.frames(), 3);
        let second = h.attach(mount(HeroKind::Metaball)).unwrap();
        assert!(second.get() > first.get());
        assert_eq!(h.frames(), 0);
        h.frame();
        assert_eq!(h.frames(), 1);
    }

    #[test]
    fn narrow_surface_mounts_still_wave() {
        let mut h = host(500.0, 800.0);
        h.attach(mount(HeroKind::Wave)).unwrap();
        let calls = h.surface().calls;
        // first draw already happened at attach
        assert!(!h.frame());
        assert_eq!(h.surface().calls, calls);
    }

    #[test]
    fn invalid_config_refuses_to_mount() {
        let mut h = host(800.0, 600.0);
        let mut config = HeroConfig::default();
        config.wave.amount = 1;
        let err = h.attach(mount(HeroKind::Wave).with_config(config)).unwrap_err();
        assert!(matches!(err, HeroError::ValueOutOfRange { .. }));
        assert_eq!(h.active_name(), None);
    }

    #[test]
    fn zero_size_mount_is_a_noop_frame() {
        let mut h = host(0.0, 0.0);
        h.attach(mount(HeroKind::Metaball)).unwrap();
        h.frame();
        assert!(h.surface().commands.is_empty());
        h.surface_mut().set_size(Size::new(800.0, 600.0));
        h.resize();
        assert!(h.surface().paths().count() > 0);
    }
}

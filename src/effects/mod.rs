// effects/ - Hero banner effects
//
// Each effect owns its simulation state and redraws itself on demand.
// The host drives them through the Effect trait:
//   pointer / resize events -> mutate state synchronously
//   tick                    -> advance one frame, report whether to redraw
//   draw                    -> repaint the whole scene

mod metaball;
mod voronoi;
mod wave;

use std::fmt;
use std::str::FromStr;

pub use metaball::{Metaball, PARKED, place_circles};
pub use voronoi::{Voronoi, cell_path, honeycomb};
pub use wave::{Spring, SpringPoint, Wave};

use crate::error::HeroError;
use crate::geom::{Point, Size};
use crate::surface::Surface;

pub trait Effect {
    fn name(&self) -> &'static str;

    /// Adapt to a new viewport. Calling it with the current size is a no-op.
    fn resize(&mut self, size: Size);

    fn pointer_move(&mut self, at: Point);

    fn pointer_down(&mut self, _at: Point) {}

    /// Advance one frame. Returns true when the scene needs repainting.
    fn tick(&mut self) -> bool;

    fn draw(&mut self, surface: &mut dyn Surface);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeroKind {
    Metaball,
    Voronoi,
    Wave,
}

impl HeroKind {
    pub fn name(self) -> &'static str {
        match self {
            HeroKind::Metaball => "metaball",
            HeroKind::Voronoi => "voronoi",
            HeroKind::Wave => "wave",
        }
    }
}

impl FromStr for HeroKind {
    type Err = HeroError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "metaball" | "metaballs" => Ok(HeroKind::Metaball),
            "voronoi" => Ok(HeroKind::Voronoi),
            "wave" => Ok(HeroKind::Wave),
            _ => Err(HeroError::UnknownEffect(s.to_string())),
        }
    }
}

impl fmt::Display for HeroKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

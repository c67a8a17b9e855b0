// hero-engine - Procedural hero-banner effects
//
// Three interactive 2D effects (metaball field, live Voronoi cells, spring
// wave) sharing one geometry kernel and one drawing contract. The core is
// plain Rust driven through EffectHost; web.rs exports it to the browser
// and the hero2png binary renders it offline.

pub mod color;
pub mod config;
pub mod diagram;
pub mod effects;
pub mod error;
pub mod geom;
pub mod host;
pub mod rng;
pub mod surface;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use color::{Hsl, Palette, Rgb};
pub use config::HeroConfig;
pub use effects::{Effect, HeroKind};
pub use error::{HeroError, Result};
pub use geom::{Point, Rect, Size};
pub use host::{EffectHost, Mount, MountId};
pub use surface::{Recorder, Surface};

// surface/ - Drawing surfaces
//
// Effects only ever clear, fill rectangles and fill closed bezier paths.
// The browser canvas, the software rasterizer and the recorder used by
// headless hosts all implement the same four calls.

#[cfg(not(target_arch = "wasm32"))]
mod raster;

#[cfg(not(target_arch = "wasm32"))]
pub use raster::Raster;

use crate::color::Rgb;
use crate::geom::{Path, Rect, Size};

pub trait Surface {
    /// Current pixel size.
    fn size(&self) -> Size;
    fn clear(&mut self);
    fn fill_rect(&mut self, rect: Rect, color: Rgb);
    fn fill_path(&mut self, path: &Path, color: Rgb);
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect { rect: Rect, color: Rgb },
    Path { path: Path, color: Rgb },
}

/// Keeps the shapes drawn since the last clear. `calls` counts every
/// surface call ever made, clears included.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    size: Size,
    pub commands: Vec<DrawCommand>,
    pub calls: usize,
}

impl Recorder {
    pub fn new(size: Size) -> Self {
        Self { size, ..Self::default() }
    }

    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    pub fn paths(&self) -> impl Iterator<Item = (&Path, Rgb)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Path { path, color } => Some((path, *color)),
            DrawCommand::Rect { .. } => None,
        })
    }
}

impl Surface for Recorder {
    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self) {
        self.calls += 1;
        self.commands.clear();
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        self.calls += 1;
        self.commands.push(DrawCommand::Rect { rect, color });
    }

    fn fill_path(&mut self, path: &Path, color: Rgb) {
        self.calls += 1;
        self.commands.push(DrawCommand::Path { path: path.clone(), color });
    }
}

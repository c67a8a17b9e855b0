// raster.rs - Software rasterizer into an RGBA image
//
// Paths are flattened to polygons and filled scanline by scanline with the
// nonzero winding rule, sampling at pixel centers. No anti-aliasing: this
// backs offline previews, not the live canvas.

use image::{Rgba, RgbaImage};

use super::Surface;
use crate::color::Rgb;
use crate::geom::{Path, Point, Rect, Size};

pub struct Raster {
    img: RgbaImage,
}

impl Raster {
    pub fn new(width: u32, height: u32) -> Self {
        Self { img: RgbaImage::new(width, height) }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.img
    }

    pub fn into_image(self) -> RgbaImage {
        self.img
    }

    /// Fill pixel columns whose centers fall inside [x0, x1) on row `y`.
    fn span(&mut self, y: u32, x0: f64, x1: f64, px: Rgba<u8>) {
        let w = self.img.width() as f64;
        let start = (x0 - 0.5).ceil().clamp(0.0, w) as u32;
        let end = (x1 - 0.5).ceil().clamp(0.0, w) as u32;
        for x in start..end {
            self.img.put_pixel(x, y, px);
        }
    }
}

impl Surface for Raster {
    fn size(&self) -> Size {
        Size::new(self.img.width() as f64, self.img.height() as f64)
    }

    fn clear(&mut self) {
        for p in self.img.pixels_mut() {
            *p = Rgba([0, 0, 0, 0]);
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        let px = Rgba(color.rgba());
        let h = self.img.height() as f64;
        let y0 = (rect.y - 0.5).ceil().clamp(0.0, h) as u32;
        let y1 = (rect.bottom() - 0.5).ceil().clamp(0.0, h) as u32;
        for y in y0..y1 {
            self.span(y, rect.x, rect.right(), px);
        }
    }

    fn fill_path(&mut self, path: &Path, color: Rgb) {
        let poly = path.flatten();
        if poly.len() < 3 || !poly.iter().all(|p| p.is_finite()) {
            return;
        }

        let px = Rgba(color.rgba());
        let h = self.img.height() as f64;
        let (lo, hi) = poly.iter().fold((f64::MAX, f64::MIN), |(lo, hi), p| (lo.min(p.y), hi.max(p.y)));
        let y0 = (lo - 0.5).ceil().clamp(0.0, h) as u32;
        let y1 = (hi - 0.5).ceil().clamp(0.0, h) as u32;

        let mut crossings: Vec<(f64, i32)> = Vec::new();
        for y in y0..y1 {
            let sy = y as f64 + 0.5;
            crossings.clear();
            for i in 0..poly.len() {
                let (a, b) = (poly[i], poly[(i + 1) % poly.len()]);
                if let Some(hit) = crossing(a, b, sy) {
                    crossings.push(hit);
                }
            }
            crossings.sort_by(|a, b| a.0.total_cmp(&b.0));

            let mut winding = 0;
            for pair in crossings.windows(2) {
                winding += pair[0].1;
                if winding != 0 {
                    self.span(y, pair[0].0, pair[1].0, px);
                }
            }
        }
    }
}

/// Where edge a->b crosses the horizontal line at `sy`, with its direction.
#[inline]
fn crossing(a: Point, b: Point, sy: f64) -> Option<(f64, i32)> {
    let dir = if a.y <= sy && b.y > sy {
        1
    } else if b.y <= sy && a.y > sy {
        -1
    } else {
        return None;
    };
    let t = (sy - a.y) / (b.y - a.y);
    Some((a.x + (b.x - a.x) * t, dir))
}

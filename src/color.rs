// color.rs - Theme colors and derived shades
//
// The host hands over a single HSL theme color (hue in degrees, saturation
// and lightness in percent, matching CSS custom properties). Effects never
// hardcode colors; every fill comes from a Palette derived here.

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Hsl {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
}

impl Hsl {
    pub fn new(hue: f64, saturation: f64, lightness: f64) -> Self {
        Self { hue, saturation, lightness }
    }

    /// Move lightness `amount` (0..1) of the way towards white.
    pub fn tint(self, amount: f64) -> Self {
        let l = self.lightness.clamp(0.0, 100.0);
        Self { lightness: l + (100.0 - l) * amount.clamp(0.0, 1.0), ..self }
    }

    pub fn to_rgb(self) -> Rgb {
        let h = self.hue.rem_euclid(360.0) / 60.0;
        let s = (self.saturation / 100.0).clamp(0.0, 1.0);
        let l = (self.lightness / 100.0).clamp(0.0, 1.0);

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let m = l - c / 2.0;
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        Rgb::from_unit(r + m, g + m, b + m)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    fn from_unit(r: f64, g: f64, b: f64) -> Self {
        let q = |v: f64| (v * 255.0).round().clamp(0.0, 255.0) as u8;
        Self { r: q(r), g: q(g), b: q(b) }
    }

    pub fn css(self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }

    pub fn rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

/// Fills used by an effect, all derived from one theme color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// Blobs, cells and the wave body.
    pub fill: Rgb,
    /// Backdrop and the gaps between cells.
    pub backdrop: Rgb,
}

impl Palette {
    pub fn from_theme(theme: Hsl) -> Self {
        Self { fill: theme.to_rgb(), backdrop: theme.tint(0.92).to_rgb() }
    }
}

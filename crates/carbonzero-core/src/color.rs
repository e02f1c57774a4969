//! RGBA color with straight (non-premultiplied) alpha.

use ratatui::style::Color;

/// An RGBA color. Channels are in `0.0..=1.0`, alpha is not premultiplied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Rgba = Rgba {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    /// Opaque color from 8-bit channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// Color from 8-bit channels and a `0.0..=1.0` alpha, like CSS `rgba()`.
    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a,
        }
    }

    /// Same color with a different alpha.
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Premultiplied `[r, g, b, a]`.
    pub fn premultiplied(self) -> [f32; 4] {
        [self.r * self.a, self.g * self.a, self.b * self.a, self.a]
    }

    /// Recover a straight-alpha color from premultiplied channels.
    pub fn from_premultiplied([r, g, b, a]: [f32; 4]) -> Self {
        if a <= f32::EPSILON {
            return Self::TRANSPARENT;
        }
        Self {
            r: (r / a).clamp(0.0, 1.0),
            g: (g / a).clamp(0.0, 1.0),
            b: (b / a).clamp(0.0, 1.0),
            a: a.clamp(0.0, 1.0),
        }
    }

    /// Linear interpolation between two colors (straight alpha).
    pub fn lerp(self, other: Rgba, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: f32, b: f32| a + (b - a) * t;
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }

    /// Composite this color over an opaque background, returning an opaque color.
    pub fn over(self, background: Rgba) -> Rgba {
        let a = self.a.clamp(0.0, 1.0);
        Rgba {
            r: self.r * a + background.r * (1.0 - a),
            g: self.g * a + background.g * (1.0 - a),
            b: self.b * a + background.b * (1.0 - a),
            a: 1.0,
        }
    }

    /// Convert to a terminal color, ignoring alpha.
    pub fn to_color(self) -> Color {
        let byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Color::Rgb(byte(self.r), byte(self.g), byte(self.b))
    }
}

//! Color types and the thermal palette.
//!
//! Provides an RGBA color representation and the nine-class palette used to
//! encode temperature buckets, ordered coldest to hottest.

/// RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(C)]
pub struct Rgba {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0-255, 255 = fully opaque).
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);

    /// Create a new RGBA color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color (alpha = 255).
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Create a color with modified alpha.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Convert to array representation.
    #[must_use]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Linear interpolation between two colors.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let inv_t = 1.0 - t;

        Self::new(
            (f32::from(self.r) * inv_t + f32::from(other.r) * t) as u8,
            (f32::from(self.g) * inv_t + f32::from(other.g) * t) as u8,
            (f32::from(self.b) * inv_t + f32::from(other.b) * t) as u8,
            (f32::from(self.a) * inv_t + f32::from(other.a) * t) as u8,
        )
    }

    /// CSS color string (`rgb(...)` or `rgba(...)` when translucent).
    #[must_use]
    pub fn to_css(self) -> String {
        if self.a == 255 {
            format!("rgb({},{},{})", self.r, self.g, self.b)
        } else {
            format!("rgba({},{},{},{:.3})", self.r, self.g, self.b, f32::from(self.a) / 255.0)
        }
    }
}

/// Number of discrete temperature buckets.
pub const BUCKET_COUNT: usize = 9;

/// Nine-class thermal palette, deep blue (coldest) through red (hottest).
///
/// Injected into classification and legend construction rather than read as
/// ambient state, so alternative palettes stay a one-argument change.
pub const THERMAL_PALETTE: [Rgba; BUCKET_COUNT] = [
    Rgba::rgb(0x1E, 0x3F, 0x66),
    Rgba::rgb(0x2E, 0x59, 0x84),
    Rgba::rgb(0x52, 0x8A, 0xAE),
    Rgba::rgb(0xBC, 0xD2, 0xE8),
    Rgba::rgb(0xFF, 0xF8, 0xD4),
    Rgba::rgb(0xFA, 0xC1, 0x50),
    Rgba::rgb(0xF2, 0xA2, 0x68),
    Rgba::rgb(0xFF, 0x77, 0x14),
    Rgba::rgb(0xEA, 0x09, 0x09),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_constants() {
        assert_eq!(Rgba::BLACK, Rgba::rgb(0, 0, 0));
        assert_eq!(Rgba::WHITE, Rgba::rgb(255, 255, 255));
        assert_eq!(Rgba::TRANSPARENT.a, 0);
    }

    #[test]
    fn test_rgba_lerp() {
        let mid = Rgba::BLACK.lerp(Rgba::WHITE, 0.5);
        assert_eq!(mid.r, 127);
        assert_eq!(mid.g, 127);
        assert_eq!(mid.b, 127);
    }

    #[test]
    fn test_lerp_boundaries() {
        let black = Rgba::BLACK;
        let white = Rgba::WHITE;

        assert_eq!(black.lerp(white, 0.0), black);
        assert_eq!(black.lerp(white, 1.0), white);
        // t clamped to [0, 1]
        assert_eq!(black.lerp(white, -0.5), black);
        assert_eq!(black.lerp(white, 1.5), white);
    }

    #[test]
    fn test_to_css_opaque() {
        assert_eq!(Rgba::rgb(30, 63, 102).to_css(), "rgb(30,63,102)");
    }

    #[test]
    fn test_to_css_translucent() {
        let css = Rgba::new(255, 0, 0, 128).to_css();
        assert!(css.starts_with("rgba(255,0,0,"));
    }

    #[test]
    fn test_with_alpha() {
        let c = Rgba::rgb(10, 20, 30).with_alpha(64);
        assert_eq!(c.a, 64);
        assert_eq!(c.r, 10);
    }

    #[test]
    fn test_palette_shape() {
        assert_eq!(THERMAL_PALETTE.len(), BUCKET_COUNT);
        // Coldest entry is the deep blue, hottest the red
        assert_eq!(THERMAL_PALETTE[0], Rgba::rgb(30, 63, 102));
        assert_eq!(THERMAL_PALETTE[8], Rgba::rgb(234, 9, 9));
    }
}

//! HSL color space conversion.
//!
//! Hue is wrapped into [0, 1) and saturation/lightness are clamped into
//! [0, 1], so every input produces a displayable RGB triple.

use serde::{Deserialize, Serialize};

/// Linear RGB triple with components in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed 0xRRGGBB value
    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }

    /// Convert from hue, saturation and lightness
    pub fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        let h = hue.rem_euclid(1.0);
        let s = saturation.clamp(0.0, 1.0);
        let l = lightness.clamp(0.0, 1.0);

        if s == 0.0 {
            return Self::new(l, l, l);
        }

        let high = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let low = 2.0 * l - high;

        Self {
            r: hue_to_channel(low, high, h + 1.0 / 3.0),
            g: hue_to_channel(low, high, h),
            b: hue_to_channel(low, high, h - 1.0 / 3.0),
        }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// True when every component is finite and inside [0, 1]
    pub fn is_normalized(&self) -> bool {
        [self.r, self.g, self.b]
            .iter()
            .all(|c| c.is_finite() && (0.0..=1.0).contains(c))
    }

    /// Convert to 8-bit channels
    pub fn to_rgb8(self) -> [u8; 3] {
        let quantize = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [quantize(self.r), quantize(self.g), quantize(self.b)]
    }
}

fn hue_to_channel(low: f32, high: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return low + (high - low) * 6.0 * t;
    }
    if t < 0.5 {
        return high;
    }
    if t < 2.0 / 3.0 {
        return low + (high - low) * 6.0 * (2.0 / 3.0 - t);
    }
    low
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Rgb, b: Rgb) -> bool {
        (a.r - b.r).abs() < 1e-5 && (a.g - b.g).abs() < 1e-5 && (a.b - b.b).abs() < 1e-5
    }

    #[test]
    fn test_primary_hues() {
        assert!(approx(Rgb::from_hsl(0.0, 1.0, 0.5), Rgb::new(1.0, 0.0, 0.0)));
        assert!(approx(Rgb::from_hsl(1.0 / 3.0, 1.0, 0.5), Rgb::new(0.0, 1.0, 0.0)));
        assert!(approx(Rgb::from_hsl(2.0 / 3.0, 1.0, 0.5), Rgb::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_hue_wraps() {
        assert!(approx(Rgb::from_hsl(1.25, 0.8, 0.4), Rgb::from_hsl(0.25, 0.8, 0.4)));
        assert!(approx(Rgb::from_hsl(-0.75, 0.8, 0.4), Rgb::from_hsl(0.25, 0.8, 0.4)));
    }

    #[test]
    fn test_zero_saturation_is_gray() {
        let gray = Rgb::from_hsl(0.7, 0.0, 0.3);
        assert!(approx(gray, Rgb::new(0.3, 0.3, 0.3)));
    }

    #[test]
    fn test_out_of_range_inputs_stay_normalized() {
        for &(h, s, l) in &[(3.7, 1.4, 0.5), (-0.2, -1.0, 2.0), (0.5, 0.5, -0.3)] {
            assert!(Rgb::from_hsl(h, s, l).is_normalized());
        }
    }

    #[test]
    fn test_from_hex() {
        let c = Rgb::from_hex(0xff8000);
        assert_eq!(c.to_rgb8(), [255, 128, 0]);
    }
}

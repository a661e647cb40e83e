//! 8-bit HSV colour space.
//!
//! H is stored halved (`0..=179`) so that all three channels fit a byte;
//! colour-filter tables are written against this scale.

use serde::{Deserialize, Serialize};

use crate::geometry::Rgb;

/// Hue in `0..=179`, saturation and value in `0..=255`.
///
/// Serialized as a `[h, s, v]` triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Hsv {
    pub h: u8,
    pub s: u8,
    pub v: u8,
}

impl Hsv {
    pub const fn new(h: u8, s: u8, v: u8) -> Self {
        Self { h, s, v }
    }

    /// Convert one RGB pixel.
    pub fn from_rgb(rgb: Rgb) -> Self {
        let Rgb(r, g, b) = rgb;
        let (rf, gf, bf) = (r as f32, g as f32, b as f32);

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let diff = (max - min) as f32;
        let v = max;

        let s = if max == 0 {
            0
        } else {
            (255.0 * diff / max as f32).round() as u8
        };

        let h = if diff == 0.0 {
            0.0
        } else if max == r {
            60.0 * (gf - bf) / diff
        } else if max == g {
            120.0 + 60.0 * (bf - rf) / diff
        } else {
            240.0 + 60.0 * (rf - gf) / diff
        };
        let h = if h < 0.0 { h + 360.0 } else { h };
        // 360 degrees folds back onto 0 after halving
        let h = ((h / 2.0).round() as u16 % 180) as u8;

        Self { h, s, v }
    }
}

impl From<[u8; 3]> for Hsv {
    fn from([h, s, v]: [u8; 3]) -> Self {
        Self::new(h, s, v)
    }
}

impl From<Hsv> for [u8; 3] {
    fn from(hsv: Hsv) -> Self {
        [hsv.h, hsv.s, hsv.v]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_colours() {
        assert_eq!(Hsv::from_rgb(Rgb(255, 0, 0)), Hsv::new(0, 255, 255));
        assert_eq!(Hsv::from_rgb(Rgb(0, 255, 0)), Hsv::new(60, 255, 255));
        assert_eq!(Hsv::from_rgb(Rgb(0, 0, 255)), Hsv::new(120, 255, 255));
    }

    #[test]
    fn test_greys_have_no_hue() {
        assert_eq!(Hsv::from_rgb(Rgb(0, 0, 0)), Hsv::new(0, 0, 0));
        assert_eq!(Hsv::from_rgb(Rgb(255, 255, 255)), Hsv::new(0, 0, 255));
        assert_eq!(Hsv::from_rgb(Rgb(128, 128, 128)), Hsv::new(0, 0, 128));
    }

    #[test]
    fn test_magenta_side_hue_stays_in_range() {
        // Hue just below 360 degrees must not overflow the halved scale
        let hsv = Hsv::from_rgb(Rgb(255, 0, 1));
        assert!(hsv.h < 180);

        let pink = Hsv::from_rgb(Rgb(255, 20, 147));
        assert!((145..=175).contains(&pink.h), "hue was {}", pink.h);
    }

    #[test]
    fn test_serde_as_triple() {
        let hsv: Hsv = serde_yaml::from_str("[22, 93, 0]").unwrap();
        assert_eq!(hsv, Hsv::new(22, 93, 0));
        assert_eq!(serde_json::to_string(&hsv).unwrap(), "[22,93,0]");
    }
}

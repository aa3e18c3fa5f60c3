//! RGB to RGBW conversion
//!
//! Gamut mapping after Wang et al.: a white level is derived from the
//! channel minimum, the color channels are scaled by a gain so the mix keeps
//! its hue, and the white part is subtracted back out.

use libm::floorf;

use super::{Rgb, Rgbw};

const ALGORITHM_NONE: u8 = 0;
const ALGORITHM_MIN: u8 = 1;
const ALGORITHM_SQUARED: u8 = 2;
const ALGORITHM_CUBIC: u8 = 3;
const ALGORITHM_RATIO_THRESHOLD: u8 = 4;

/// White extraction strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum ConversionAlgorithm {
    /// No conversion, the white channel stays dark
    #[default]
    None = ALGORITHM_NONE,
    /// `w = min`
    Min = ALGORITHM_MIN,
    /// `w = min²`
    Squared = ALGORITHM_SQUARED,
    /// `w = -min³ + min² + min`
    Cubic = ALGORITHM_CUBIC,
    /// `w = max` for unsaturated colors, `min·max / (max - min)` otherwise
    RatioThreshold = ALGORITHM_RATIO_THRESHOLD,
}

impl ConversionAlgorithm {
    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            ALGORITHM_NONE => Self::None,
            ALGORITHM_MIN => Self::Min,
            ALGORITHM_SQUARED => Self::Squared,
            ALGORITHM_CUBIC => Self::Cubic,
            ALGORITHM_RATIO_THRESHOLD => Self::RatioThreshold,
            _ => return None,
        })
    }

    pub const fn as_raw(self) -> u8 {
        self as u8
    }

    /// White level for the given channel minimum and maximum
    fn white(self, min: f32, max: f32) -> Option<f32> {
        Some(match self {
            Self::None => return None,
            Self::Min => min,
            Self::Squared => min * min,
            Self::Cubic => -(min * min * min) + min * min + min,
            Self::RatioThreshold => {
                if min / max >= 0.5 {
                    max
                } else {
                    (min * max) / (max - min)
                }
            }
        })
    }
}

/// Convert a color to RGBW with the given algorithm
///
/// Black maps to black for every algorithm. [`ConversionAlgorithm::None`]
/// passes the color through with the white channel off.
pub fn convert(color: Rgb, algorithm: ConversionAlgorithm) -> Rgbw {
    if color.r == 0 && color.g == 0 && color.b == 0 {
        return Rgbw::default();
    }

    let r = f32::from(color.r);
    let g = f32::from(color.g);
    let b = f32::from(color.b);
    let min = r.min(g).min(b);
    let max = r.max(g).max(b);

    let Some(w) = algorithm.white(min, max) else {
        return Rgbw::from(color);
    };
    let gain = (w + max) / max;

    Rgbw {
        r: to_channel(gain * r - w),
        g: to_channel(gain * g - w),
        b: to_channel(gain * b - w),
        w: to_channel(w),
    }
}

/// Convert with a raw algorithm selector
///
/// Unknown selectors behave like [`ConversionAlgorithm::None`].
pub fn convert_raw(color: Rgb, selector: u8) -> Rgbw {
    convert(
        color,
        ConversionAlgorithm::from_raw(selector).unwrap_or_default(),
    )
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_channel(value: f32) -> u8 {
    floorf(value).clamp(0.0, 255.0) as u8
}

mod rgbw;

pub use rgbw::{ConversionAlgorithm, convert, convert_raw};
use smart_leds::RGB8;

pub type Rgb = RGB8;

/// Four-channel pixel as sent to an RGBW strip
///
/// For plain RGB strips the white channel stays zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rgbw {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub w: u8,
}

impl Rgbw {
    pub const fn new(r: u8, g: u8, b: u8, w: u8) -> Self {
        Self { r, g, b, w }
    }

    /// Color part of the pixel, white channel dropped
    pub const fn rgb(self) -> Rgb {
        Rgb {
            r: self.r,
            g: self.g,
            b: self.b,
        }
    }
}

impl From<Rgb> for Rgbw {
    fn from(color: Rgb) -> Self {
        Self::new(color.r, color.g, color.b, 0)
    }
}

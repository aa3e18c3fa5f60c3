//! Rainbow cycling effect
//!
//! Spreads one full turn of the hue wheel across the strip and shifts it by
//! one wheel step per frame. The phase counter wraps after `256 * repeat`
//! frames.

use super::Effect;
use crate::color::Rgb;

/// Default number of wheel turns before the phase counter wraps
pub const DEFAULT_REPEAT: u8 = 5;

/// Position on the hue wheel for pixel `index` of `count` at `phase`
#[allow(clippy::cast_possible_truncation)]
pub const fn wheel_position(index: usize, phase: usize, count: usize) -> u8 {
    if count == 0 {
        return 0;
    }
    (((index * 256 / count) + phase) & 0xFF) as u8
}

/// Three-segment hue wheel: red, blue, green and back to red
pub const fn color_wheel(pos: u8) -> Rgb {
    let pos = 255 - pos;
    if pos < 85 {
        Rgb {
            r: 255 - pos * 3,
            g: 0,
            b: pos * 3,
        }
    } else if pos < 170 {
        let pos = pos - 85;
        Rgb {
            r: 0,
            g: pos * 3,
            b: 255 - pos * 3,
        }
    } else {
        let pos = pos - 170;
        Rgb {
            r: pos * 3,
            g: 255 - pos * 3,
            b: 0,
        }
    }
}

/// Color of pixel `index` of `count` at `phase`
pub const fn rainbow_pixel(index: usize, phase: usize, count: usize) -> Rgb {
    color_wheel(wheel_position(index, phase, count))
}

/// Phase-driven rainbow
#[derive(Debug, Clone)]
pub struct RainbowEffect {
    phase: u16,
    /// Exclusive upper bound of the phase counter
    period: u16,
}

impl Default for RainbowEffect {
    fn default() -> Self {
        Self::new(DEFAULT_REPEAT)
    }
}

impl RainbowEffect {
    /// Create a rainbow that wraps after `repeat` wheel turns
    ///
    /// A zero `repeat` is treated as one turn.
    pub fn new(repeat: u8) -> Self {
        Self {
            phase: 0,
            period: 256 * u16::from(repeat.max(1)),
        }
    }

    pub const fn phase(&self) -> u16 {
        self.phase
    }

    pub const fn period(&self) -> u16 {
        self.period
    }

    /// Move to the next frame
    pub fn advance(&mut self) {
        self.phase += 1;
        if self.phase >= self.period {
            self.phase = 0;
        }
    }
}

impl Effect for RainbowEffect {
    fn render(&mut self, leds: &mut [Rgb]) {
        let count = leds.len();
        for (index, led) in leds.iter_mut().enumerate() {
            *led = rainbow_pixel(index, usize::from(self.phase), count);
        }
    }

    fn reset(&mut self) {
        self.phase = 0;
    }
}

//! Static color fill effect
//!
//! Fills all LEDs with a single solid color.

use super::Effect;
use crate::color::Rgb;

/// Static color effect - fills all LEDs with one color
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticColorEffect {
    color: Rgb,
}

impl StaticColorEffect {
    /// Create a new static color effect
    pub const fn new(color: Rgb) -> Self {
        Self { color }
    }

    pub fn set_color(&mut self, color: Rgb) {
        self.color = color;
    }
}

impl Effect for StaticColorEffect {
    fn render(&mut self, leds: &mut [Rgb]) {
        leds.fill(self.color);
    }
}

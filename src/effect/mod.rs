//! Frame generators
//!
//! The renderer picks one of these per frame depending on the control mode.

mod rainbow;
mod static_color;

pub use rainbow::{DEFAULT_REPEAT, RainbowEffect, color_wheel, rainbow_pixel, wheel_position};
pub use static_color::StaticColorEffect;

use crate::color::Rgb;

pub trait Effect {
    /// Render a single frame
    fn render(&mut self, leds: &mut [Rgb]);

    /// Reset effect state
    fn reset(&mut self) {}
}

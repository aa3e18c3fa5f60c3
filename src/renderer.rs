use crate::color::{ConversionAlgorithm, Rgb, Rgbw, convert};
use crate::effect::{DEFAULT_REPEAT, Effect, RainbowEffect, StaticColorEffect};
use crate::gamma::apply_gamma;
use crate::state::{ControlMode, SharedControl};

/// Configuration for the renderer
#[derive(Debug, Clone, Copy)]
pub struct LightingConfig {
    /// White extraction applied after gamma correction
    pub algorithm: ConversionAlgorithm,
    /// Rainbow turns before the animation phase wraps
    pub repeat: u8,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            algorithm: ConversionAlgorithm::None,
            repeat: DEFAULT_REPEAT,
        }
    }
}

/// Decides every frame whether the strip shows the animation or the remote
/// override, and owns the pixel buffers.
pub struct Renderer<'a, const N: usize> {
    // External dependencies and configuration
    control: &'a SharedControl,
    algorithm: ConversionAlgorithm,

    // Internal state
    rainbow: RainbowEffect,
    fill: StaticColorEffect,
    mode: ControlMode,
    frame_buffer: [Rgb; N],
    output: [Rgbw; N],
}

impl<'a, const N: usize> Renderer<'a, N> {
    pub fn new(control: &'a SharedControl, config: &LightingConfig) -> Self {
        Self {
            control,
            algorithm: config.algorithm,
            rainbow: RainbowEffect::new(config.repeat),
            fill: StaticColorEffect::default(),
            mode: ControlMode::Animated,
            frame_buffer: [Rgb::default(); N],
            output: [Rgbw::default(); N],
        }
    }

    /// Process one frame
    ///
    /// The control state is read once, so a concurrent write shows up either
    /// in this frame or in the next one, never half applied.
    pub fn render(&mut self) -> &[Rgbw] {
        let state = self.control.snapshot();
        self.mode = state.mode;

        match state.mode {
            ControlMode::Animated => {
                self.rainbow.render(&mut self.frame_buffer);
                self.rainbow.advance();
            }
            ControlMode::Overridden => {
                self.fill.set_color(state.override_color);
                self.fill.render(&mut self.frame_buffer);
            }
        }

        apply_gamma(&mut self.frame_buffer);
        for (out, pixel) in self.output.iter_mut().zip(self.frame_buffer.iter()) {
            *out = convert(*pixel, self.algorithm);
        }

        &self.output
    }

    /// Last rendered frame
    pub fn frame(&self) -> &[Rgbw] {
        &self.output
    }

    /// Animation phase the next animated frame will be rendered at
    pub fn phase(&self) -> u16 {
        self.rainbow.phase()
    }

    /// Mode the last frame was rendered in
    pub const fn mode(&self) -> ControlMode {
        self.mode
    }
}

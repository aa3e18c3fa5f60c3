//! Control state shared between the frame tick and the BLE write path
//!
//! Both sides go through a critical section, so the tick always sees a mode
//! and override color that belong together.

use core::cell::Cell;

use critical_section::Mutex;

use crate::color::Rgb;

/// Where the pixel colors come from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ControlMode {
    /// Autonomous rainbow animation
    #[default]
    Animated,
    /// Solid color written by the remote peer. Latched until reset.
    Overridden,
}

/// Consistent view of the control state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlState {
    pub mode: ControlMode,
    pub override_color: Rgb,
}

/// Control state behind a critical-section mutex
///
/// Meant to live in a `static` and be borrowed by both the renderer and the
/// control channel.
pub struct SharedControl {
    inner: Mutex<Cell<ControlState>>,
}

impl SharedControl {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(Cell::new(ControlState {
                mode: ControlMode::Animated,
                override_color: Rgb { r: 0, g: 0, b: 0 },
            })),
        }
    }

    /// Replace the override color and latch the override mode
    ///
    /// Returns `true` if this call switched the mode away from the animation.
    pub fn apply_override(&self, color: Rgb) -> bool {
        critical_section::with(|cs| {
            let cell = self.inner.borrow(cs);
            let previous = cell.get();
            cell.set(ControlState {
                mode: ControlMode::Overridden,
                override_color: color,
            });
            previous.mode == ControlMode::Animated
        })
    }

    pub fn snapshot(&self) -> ControlState {
        critical_section::with(|cs| self.inner.borrow(cs).get())
    }

    pub fn mode(&self) -> ControlMode {
        self.snapshot().mode
    }

    pub fn override_color(&self) -> Rgb {
        self.snapshot().override_color
    }
}

impl Default for SharedControl {
    fn default() -> Self {
        Self::new()
    }
}

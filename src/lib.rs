#![no_std]

//! Lumen light controller core
//!
//! - `effect` - rainbow animation and solid fill
//! - `color` - pixel types and RGB to RGBW conversion
//! - `gamma` - perceptual output correction
//! - `state` / `renderer` - who decides the pixel colors each frame
//! - `frame_scheduler` - fixed-period tick, strip output and heartbeat
//! - `identity` - device name and passkey from the hardware id
//! - `ble` - color override service with tiered security
//! - `startup` - fatal-at-startup checks

pub mod ble;
pub mod channel;
pub mod color;
pub mod effect;
pub mod frame_scheduler;
pub mod gamma;
pub mod identity;
pub mod renderer;
pub mod startup;
pub mod state;

use core::fmt;

pub use ble::{
    BleTransport, ChannelConfig, LinkEvent, LinkEventChannel, LinkEventSender, PeerAddress,
    SecureControlChannel, SecurityLevel, SecurityTier,
};
pub use color::{ConversionAlgorithm, Rgb, Rgbw};
pub use frame_scheduler::FrameScheduler;
pub use identity::{DeviceIdentity, HardwareIdSource, derive_identity};
pub use renderer::{LightingConfig, Renderer};
pub use startup::{StartupError, bring_up};
pub use state::{ControlMode, ControlState, SharedControl};

pub use embassy_time::{Duration, Instant};

/// Error reported by the strip driver for a single frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkError {
    /// The previous transfer is still running
    Busy,
    /// Driver-specific error code
    Io(i32),
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkError::Busy => write!(f, "strip busy"),
            SinkError::Io(code) => write!(f, "strip error {}", code),
        }
    }
}

/// Abstract LED strip driver
///
/// Implement this trait to support different hardware platforms.
/// `emit` must return promptly; a failed frame is simply retried by the
/// next tick.
pub trait StripSink {
    /// Write one frame to the strip
    fn emit(&mut self, pixels: &[Rgbw]) -> Result<(), SinkError>;

    /// Whether the driver is usable, checked once at startup
    fn is_ready(&self) -> bool {
        true
    }
}

/// Route `log` output through `esp-println`
#[cfg(feature = "esp32-log")]
pub fn init_logger(level: log::LevelFilter) {
    esp_println::logger::init_logger(level);
}

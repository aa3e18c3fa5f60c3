//! Fatal-at-startup checks
//!
//! Everything here runs once before the tick loop. Any error aborts startup;
//! there is no degraded mode and no fallback identity.

use core::fmt;

use log::{error, info};

use crate::StripSink;
use crate::ble::{BleTransport, TransportError};
use crate::identity::{DeviceIdentity, HardwareIdSource, IdentityError, provision};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupError {
    /// The LED strip device did not come up
    StripNotReady,
    /// No usable hardware identifier
    Identity(IdentityError),
    /// The bluetooth stack failed to start
    Transport(TransportError),
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartupError::StripNotReady => write!(f, "led strip device is not ready"),
            StartupError::Identity(e) => write!(f, "identity: {}", e),
            StartupError::Transport(e) => write!(f, "transport: {}", e),
        }
    }
}

impl From<IdentityError> for StartupError {
    fn from(e: IdentityError) -> Self {
        StartupError::Identity(e)
    }
}

impl From<TransportError> for StartupError {
    fn from(e: TransportError) -> Self {
        StartupError::Transport(e)
    }
}

/// Check the strip, derive the identity and enable the bluetooth stack
pub fn bring_up<H, S, T>(
    hardware_id: &mut H,
    sink: &S,
    transport: &mut T,
) -> Result<DeviceIdentity, StartupError>
where
    H: HardwareIdSource,
    S: StripSink,
    T: BleTransport,
{
    info!("lumen light controller {}", env!("CARGO_PKG_VERSION"));

    let result = try_bring_up(hardware_id, sink, transport);
    if let Err(e) = &result {
        error!("startup failed: {}", e);
    }
    result
}

fn try_bring_up<H, S, T>(
    hardware_id: &mut H,
    sink: &S,
    transport: &mut T,
) -> Result<DeviceIdentity, StartupError>
where
    H: HardwareIdSource,
    S: StripSink,
    T: BleTransport,
{
    if !sink.is_ready() {
        return Err(StartupError::StripNotReady);
    }

    let identity = provision(hardware_id)?;
    info!("device name \"{}\"", identity.name());

    transport.enable()?;
    info!("bluetooth initialized");

    Ok(identity)
}

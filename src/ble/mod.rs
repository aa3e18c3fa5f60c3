//! Wireless control plane
//!
//! One primary service with one 3-byte color characteristic. Access to the
//! characteristic is gated by a [`SecurityTier`] chosen at build time; the
//! host stack itself lives behind [`BleTransport`].

mod advertising;
mod attribute;
mod control_channel;
mod event;
mod session;

use core::fmt;

pub use advertising::{
    AD_FLAGS_BR_EDR_NOT_SUPPORTED, AD_FLAGS_LE_GENERAL_DISCOVERABLE, Advertisement, AdPayload,
};
pub use attribute::{
    AttError, COLOR_PROPERTIES, COLOR_VALUE_LEN, CharacteristicProperties, Permissions,
    decode_color, encode_color,
};
pub use control_channel::{ChannelConfig, SecureControlChannel};
pub use event::{
    LINK_EVENT_QUEUE_DEPTH, LinkEvent, LinkEventChannel, LinkEventReceiver, LinkEventSender,
};
pub use session::{PairingFailure, PairingOutcome, PairingSession};

/// Primary service advertised by the controller.
pub const SERVICE_UUID: u128 = 0x6c5f_0001_7d2e_4b8a_9c4f_3b1e_2a9d_8c70;

/// Color characteristic inside [`SERVICE_UUID`].
pub const COLOR_CHARACTERISTIC_UUID: u128 = 0x6c5f_0002_7d2e_4b8a_9c4f_3b1e_2a9d_8c70;

/// Bluetooth device address of a peer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeerAddress(pub [u8; 6]);

impl fmt::Display for PeerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Most significant byte first, as printed by every host stack
        let [a0, a1, a2, a3, a4, a5] = self.0;
        write!(
            f,
            "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
            a5, a4, a3, a2, a1, a0
        )
    }
}

/// Security level of an established link
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum SecurityLevel {
    /// No encryption
    #[default]
    Open,
    /// Encrypted with unauthenticated keys (Just Works)
    Encrypted,
    /// Encrypted with keys from passkey pairing
    Authenticated,
}

/// Access policy of the color characteristic
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SecurityTier {
    /// Any connected peer may read and write
    #[default]
    Open,
    /// Reads and writes require an encrypted link
    Encrypted,
    /// Reads and writes require a link encrypted after passkey pairing
    Authenticated,
}

impl SecurityTier {
    /// Minimum link security for characteristic access
    pub const fn required_level(self) -> SecurityLevel {
        match self {
            SecurityTier::Open => SecurityLevel::Open,
            SecurityTier::Encrypted => SecurityLevel::Encrypted,
            SecurityTier::Authenticated => SecurityLevel::Authenticated,
        }
    }

    /// Whether the transport must run passkey pairing
    pub const fn uses_passkey(self) -> bool {
        matches!(self, SecurityTier::Authenticated)
    }

    /// Check a link against this tier
    pub fn check(self, level: SecurityLevel) -> Result<(), AttError> {
        if level >= self.required_level() {
            return Ok(());
        }
        Err(match self {
            SecurityTier::Authenticated => AttError::InsufficientAuthentication,
            SecurityTier::Open | SecurityTier::Encrypted => AttError::InsufficientEncryption,
        })
    }
}

/// Error reported by the host stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    /// The controller is not initialized
    NotReady,
    /// Another operation of the same kind is still running
    Busy,
    /// Stack-specific error code
    Failed(i32),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::NotReady => write!(f, "bluetooth not ready"),
            TransportError::Busy => write!(f, "bluetooth busy"),
            TransportError::Failed(code) => write!(f, "bluetooth error {}", code),
        }
    }
}

/// Operations the control channel needs from the host stack
///
/// Stack callbacks flow the other way, as [`LinkEvent`]s pushed into a
/// [`LinkEventChannel`].
pub trait BleTransport {
    /// Bring up the controller and host
    fn enable(&mut self) -> Result<(), TransportError>;

    /// Install the passkey shown during pairing, `None` for no fixed passkey
    fn set_fixed_passkey(&mut self, passkey: Option<u32>) -> Result<(), TransportError>;

    /// Start connectable advertising
    fn start_advertising(&mut self, advertisement: &Advertisement<'_>) -> Result<(), TransportError>;

    /// Ask the stack to raise the security of a link
    fn request_security(
        &mut self,
        peer: PeerAddress,
        level: SecurityLevel,
    ) -> Result<(), TransportError>;

    /// Drop a connection
    fn disconnect(&mut self, peer: PeerAddress) -> Result<(), TransportError>;
}

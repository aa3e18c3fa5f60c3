//! Device identity derived from the hardware-unique identifier
//!
//! The advertised name and the pairing passkey are both pure functions of the
//! identifier bytes, so a device keeps the same identity across reboots
//! without storing anything.

use core::fmt;

use heapless::String;

/// Fixed part of every advertised name.
pub const NAME_PREFIX: &str = "Lumen ";

/// Longest name that still fits a scan response (31 bytes minus the AD header).
pub const MAX_NAME_LEN: usize = 29;

/// Largest hardware identifier read at startup.
pub const MAX_HARDWARE_ID_LEN: usize = 16;

/// Passkeys are six decimal digits.
pub const PASSKEY_MODULUS: u32 = 1_000_000;

const DICTIONARY: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Error reported by a [`HardwareIdSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HardwareIdError {
    /// The identifier registers could not be read
    Unavailable,
    /// The platform does not expose a unique identifier
    Unsupported,
}

impl fmt::Display for HardwareIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HardwareIdError::Unavailable => write!(f, "hardware id unavailable"),
            HardwareIdError::Unsupported => write!(f, "hardware id not supported"),
        }
    }
}

/// Error while deriving the device identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityError {
    /// The identifier could not be obtained
    HardwareId(HardwareIdError),
    /// The identifier has fewer than 4 bytes, so no passkey can be derived
    TooShort(usize),
}

impl fmt::Display for IdentityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentityError::HardwareId(e) => write!(f, "{}", e),
            IdentityError::TooShort(len) => {
                write!(f, "hardware id too short ({} bytes, need 4)", len)
            }
        }
    }
}

impl From<HardwareIdError> for IdentityError {
    fn from(e: HardwareIdError) -> Self {
        IdentityError::HardwareId(e)
    }
}

/// Source of the device-unique identifier (FICR, eFuse MAC, ...)
pub trait HardwareIdSource {
    /// Copy the identifier into `buf` and return the number of bytes written
    fn read_id(&mut self, buf: &mut [u8]) -> Result<usize, HardwareIdError>;
}

/// Name and passkey of this device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceIdentity {
    name: String<MAX_NAME_LEN>,
    passkey: u32,
}

impl DeviceIdentity {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn passkey(&self) -> u32 {
        self.passkey
    }
}

/// Derive the advertised name and pairing passkey from a hardware identifier
pub fn derive_identity(hardware_id: &[u8]) -> Result<DeviceIdentity, IdentityError> {
    Ok(DeviceIdentity {
        name: derive_name(hardware_id),
        passkey: derive_passkey(hardware_id)?,
    })
}

/// Read the hardware identifier and derive the identity from it
pub fn provision<S: HardwareIdSource>(source: &mut S) -> Result<DeviceIdentity, IdentityError> {
    let mut buf = [0u8; MAX_HARDWARE_ID_LEN];
    let len = source.read_id(&mut buf)?.min(buf.len());
    derive_identity(&buf[..len])
}

/// `"Lumen "` followed by one alphanumeric symbol per identifier byte
pub fn derive_name(hardware_id: &[u8]) -> String<MAX_NAME_LEN> {
    let mut name = String::new();
    // The prefix is shorter than MAX_NAME_LEN
    let _ = name.push_str(NAME_PREFIX);
    for byte in hardware_id {
        let symbol = DICTIONARY[usize::from(*byte) % DICTIONARY.len()];
        if name.push(char::from(symbol)).is_err() {
            break;
        }
    }
    name
}

/// First four identifier bytes as little-endian, reduced to six digits
pub fn derive_passkey(hardware_id: &[u8]) -> Result<u32, IdentityError> {
    let Some(bytes) = hardware_id.first_chunk::<4>() else {
        return Err(IdentityError::TooShort(hardware_id.len()));
    };
    Ok(u32::from_le_bytes(*bytes) % PASSKEY_MODULUS)
}

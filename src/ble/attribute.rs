//! Color characteristic value and its access rules

use core::fmt;

use super::{SecurityLevel, SecurityTier};
use crate::color::Rgb;

/// The value is always `[r, g, b]`.
pub const COLOR_VALUE_LEN: usize = 3;

/// GATT characteristic property bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacteristicProperties(pub u8);

impl CharacteristicProperties {
    pub const READ: Self = Self(0x02);
    pub const WRITE_WITHOUT_RESPONSE: Self = Self(0x04);
    pub const WRITE: Self = Self(0x08);
    pub const INDICATE: Self = Self(0x20);

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

/// Properties of the color characteristic.
pub const COLOR_PROPERTIES: CharacteristicProperties = CharacteristicProperties::READ
    .union(CharacteristicProperties::WRITE)
    .union(CharacteristicProperties::WRITE_WITHOUT_RESPONSE)
    .union(CharacteristicProperties::INDICATE);

/// Link security needed to read or write an attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Permissions {
    pub read: SecurityLevel,
    pub write: SecurityLevel,
}

impl From<SecurityTier> for Permissions {
    fn from(tier: SecurityTier) -> Self {
        let level = tier.required_level();
        Self {
            read: level,
            write: level,
        }
    }
}

/// ATT error returned to the peer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttError {
    InsufficientAuthentication,
    InvalidOffset,
    InvalidAttributeValueLength,
    UnlikelyError,
    InsufficientEncryption,
}

impl AttError {
    /// Protocol error code
    pub const fn code(self) -> u8 {
        match self {
            AttError::InsufficientAuthentication => 0x05,
            AttError::InvalidOffset => 0x07,
            AttError::InvalidAttributeValueLength => 0x0D,
            AttError::UnlikelyError => 0x0E,
            AttError::InsufficientEncryption => 0x0F,
        }
    }
}

impl fmt::Display for AttError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttError::InsufficientAuthentication => write!(f, "insufficient authentication"),
            AttError::InvalidOffset => write!(f, "invalid offset"),
            AttError::InvalidAttributeValueLength => write!(f, "invalid length"),
            AttError::UnlikelyError => write!(f, "unlikely error"),
            AttError::InsufficientEncryption => write!(f, "insufficient encryption"),
        }
    }
}

/// Parse a write request, which must replace the whole value
pub fn decode_color(offset: u16, data: &[u8]) -> Result<Rgb, AttError> {
    if offset != 0 {
        return Err(AttError::InvalidOffset);
    }
    let [r, g, b] = data else {
        return Err(AttError::InvalidAttributeValueLength);
    };
    Ok(Rgb {
        r: *r,
        g: *g,
        b: *b,
    })
}

pub const fn encode_color(color: Rgb) -> [u8; COLOR_VALUE_LEN] {
    [color.r, color.g, color.b]
}

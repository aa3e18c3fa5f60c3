use heapless::Vec;

use super::SERVICE_UUID;

/// Largest legacy advertising or scan response payload.
pub const MAX_AD_LEN: usize = 31;

pub const AD_FLAGS_LE_GENERAL_DISCOVERABLE: u8 = 0x02;
pub const AD_FLAGS_BR_EDR_NOT_SUPPORTED: u8 = 0x04;

const AD_TYPE_FLAGS: u8 = 0x01;
const AD_TYPE_UUID128_COMPLETE: u8 = 0x07;
const AD_TYPE_NAME_SHORTENED: u8 = 0x08;
const AD_TYPE_NAME_COMPLETE: u8 = 0x09;

/// Raw AD structures as put on air
pub type AdPayload = Vec<u8, MAX_AD_LEN>;

/// What the controller announces while it waits for a connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Advertisement<'a> {
    pub flags: u8,
    pub service: u128,
    pub name: &'a str,
}

impl<'a> Advertisement<'a> {
    /// General discoverable, LE only, announcing the color service
    pub const fn new(name: &'a str) -> Self {
        Self {
            flags: AD_FLAGS_LE_GENERAL_DISCOVERABLE | AD_FLAGS_BR_EDR_NOT_SUPPORTED,
            service: SERVICE_UUID,
            name,
        }
    }

    /// Flags and the 128-bit service UUID
    pub fn advertising_data(&self) -> AdPayload {
        let mut payload = AdPayload::new();
        // 3 + 18 bytes always fit
        let _ = push_structure(&mut payload, AD_TYPE_FLAGS, &[self.flags]);
        let _ = push_structure(&mut payload, AD_TYPE_UUID128_COMPLETE, &self.service.to_le_bytes());
        payload
    }

    /// Device name, shortened if it does not fit
    pub fn scan_response(&self) -> AdPayload {
        let mut payload = AdPayload::new();
        let room = MAX_AD_LEN - 2;
        let name = self.name.as_bytes();
        let (ad_type, name) = if name.len() > room {
            (AD_TYPE_NAME_SHORTENED, &name[..room])
        } else {
            (AD_TYPE_NAME_COMPLETE, name)
        };
        let _ = push_structure(&mut payload, ad_type, name);
        payload
    }
}

/// Append one `[len, type, data..]` structure
fn push_structure(payload: &mut AdPayload, ad_type: u8, data: &[u8]) -> Result<(), ()> {
    let len = u8::try_from(data.len() + 1).map_err(|_| ())?;
    payload.push(len).map_err(|_| ())?;
    payload.push(ad_type).map_err(|_| ())?;
    payload.extend_from_slice(data)
}

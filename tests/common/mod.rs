#![allow(dead_code)]

use lumen_light::ble::{Advertisement, BleTransport, PeerAddress, SecurityLevel, TransportError};
use lumen_light::identity::{HardwareIdError, HardwareIdSource};
use lumen_light::{Rgbw, SinkError, StripSink};

pub const PEER_A: PeerAddress = PeerAddress([0x01, 0x02, 0x03, 0x04, 0x05, 0x06]);
pub const PEER_B: PeerAddress = PeerAddress([0x0A, 0x0B, 0x0C, 0x0D, 0x0E, 0x0F]);

/// Strip sink that keeps every frame and can fail on demand
#[derive(Default)]
pub struct RecordingSink {
    pub frames: Vec<Vec<Rgbw>>,
    pub fail_next: usize,
    pub not_ready: bool,
}

impl RecordingSink {
    pub fn last_frame(&self) -> &[Rgbw] {
        self.frames.last().map(Vec::as_slice).unwrap_or(&[])
    }
}

impl StripSink for RecordingSink {
    fn emit(&mut self, pixels: &[Rgbw]) -> Result<(), SinkError> {
        if self.fail_next > 0 {
            self.fail_next -= 1;
            return Err(SinkError::Io(-5));
        }
        self.frames.push(pixels.to_vec());
        Ok(())
    }

    fn is_ready(&self) -> bool {
        !self.not_ready
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportCall {
    Enable,
    SetPasskey(Option<u32>),
    Advertise { name: String, adv: Vec<u8>, scan: Vec<u8> },
    RequestSecurity(PeerAddress, SecurityLevel),
    Disconnect(PeerAddress),
}

/// Host stack double recording every call
#[derive(Default)]
pub struct MockTransport {
    pub calls: Vec<TransportCall>,
    pub fail_enable: bool,
    pub fail_advertising: usize,
}

impl MockTransport {
    pub fn advertise_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, TransportCall::Advertise { .. }))
            .count()
    }
}

impl BleTransport for MockTransport {
    fn enable(&mut self) -> Result<(), TransportError> {
        self.calls.push(TransportCall::Enable);
        if self.fail_enable {
            return Err(TransportError::NotReady);
        }
        Ok(())
    }

    fn set_fixed_passkey(&mut self, passkey: Option<u32>) -> Result<(), TransportError> {
        self.calls.push(TransportCall::SetPasskey(passkey));
        Ok(())
    }

    fn start_advertising(&mut self, advertisement: &Advertisement<'_>) -> Result<(), TransportError> {
        if self.fail_advertising > 0 {
            self.fail_advertising -= 1;
            return Err(TransportError::Failed(-12));
        }
        self.calls.push(TransportCall::Advertise {
            name: advertisement.name.to_string(),
            adv: advertisement.advertising_data().to_vec(),
            scan: advertisement.scan_response().to_vec(),
        });
        Ok(())
    }

    fn request_security(
        &mut self,
        peer: PeerAddress,
        level: SecurityLevel,
    ) -> Result<(), TransportError> {
        self.calls.push(TransportCall::RequestSecurity(peer, level));
        Ok(())
    }

    fn disconnect(&mut self, peer: PeerAddress) -> Result<(), TransportError> {
        self.calls.push(TransportCall::Disconnect(peer));
        Ok(())
    }
}

/// Hardware id source with fixed content
pub struct FixedId(pub Result<Vec<u8>, HardwareIdError>);

impl HardwareIdSource for FixedId {
    fn read_id(&mut self, buf: &mut [u8]) -> Result<usize, HardwareIdError> {
        let id = self.0.as_ref().map_err(|e| *e)?;
        let len = id.len().min(buf.len());
        buf[..len].copy_from_slice(&id[..len]);
        Ok(len)
    }
}

use log::{debug, error, info, warn};

use super::attribute::{COLOR_VALUE_LEN, decode_color, encode_color};
use super::{
    Advertisement, AttError, BleTransport, LinkEvent, LinkEventReceiver, PairingFailure,
    PairingOutcome, PairingSession, PeerAddress, SecurityTier, TransportError,
};
use crate::identity::DeviceIdentity;
use crate::state::SharedControl;

/// Configuration for the control channel
#[derive(Debug, Clone, Copy, Default)]
pub struct ChannelConfig {
    pub tier: SecurityTier,
}

/// Color override service with tiered access control
///
/// Holds at most one connection. Stack callbacks arrive through the link
/// event queue and are applied by [`SecureControlChannel::poll`]; attribute
/// accesses are direct calls because their result is the ATT response.
pub struct SecureControlChannel<'a, const EVENTS: usize> {
    // External dependencies and configuration
    control: &'a SharedControl,
    events: LinkEventReceiver<'a, EVENTS>,
    identity: DeviceIdentity,
    tier: SecurityTier,

    // Internal state
    session: Option<PairingSession>,
    advertising: bool,
}

impl<'a, const EVENTS: usize> SecureControlChannel<'a, EVENTS> {
    pub fn new(
        control: &'a SharedControl,
        events: LinkEventReceiver<'a, EVENTS>,
        identity: DeviceIdentity,
        config: &ChannelConfig,
    ) -> Self {
        Self {
            control,
            events,
            identity,
            tier: config.tier,
            session: None,
            advertising: false,
        }
    }

    /// Install the passkey if the tier needs one and start advertising
    ///
    /// Errors here happen before the device was ever reachable and are
    /// meant to abort startup.
    pub fn start<T: BleTransport>(&mut self, transport: &mut T) -> Result<(), TransportError> {
        if self.tier.uses_passkey() {
            transport.set_fixed_passkey(Some(self.identity.passkey()))?;
        }
        self.ensure_advertising(transport)
    }

    /// Apply queued link events and restart advertising if it is down
    ///
    /// Returns the number of processed events.
    pub fn poll<T: BleTransport>(&mut self, transport: &mut T) -> usize {
        let processed = self.process_events(transport);
        // Failure is logged, the next poll retries
        let _ = self.ensure_advertising(transport);
        processed
    }

    /// Drain the link event queue
    ///
    /// If the queue overflowed since the last call the session state can no
    /// longer be trusted: the current peer is disconnected and the session
    /// dropped, so advertising resumes.
    pub fn process_events<T: BleTransport>(&mut self, transport: &mut T) -> usize {
        let mut processed = 0;
        while let Ok(event) = self.events.try_receive() {
            debug!("link event from {}: {:?}", event.peer(), event);
            self.handle_event(event, transport);
            processed += 1;
        }

        let dropped = self.events.take_dropped();
        if dropped > 0 {
            error!("{} link events lost, resetting connection state", dropped);
            self.reset_session(transport);
        }
        processed
    }

    fn reset_session<T: BleTransport>(&mut self, transport: &mut T) {
        if let Some(session) = self.session.take() {
            if let Err(e) = transport.disconnect(session.peer) {
                warn!("failed to disconnect {}: {}", session.peer, e);
            }
        }
        // The advertising state may be stale too
        self.advertising = false;
    }

    /// Apply a single link event
    pub fn handle_event<T: BleTransport>(&mut self, event: LinkEvent, transport: &mut T) {
        match event {
            LinkEvent::Connected { peer } => self.on_connected(peer, transport),
            LinkEvent::ConnectFailed { peer, status } => {
                warn!("connection to {} failed (status 0x{:02x})", peer, status);
                self.advertising = false;
            }
            LinkEvent::Disconnected { peer, reason } => {
                if self.session.is_some_and(|session| session.peer == peer) {
                    info!("disconnected {} (reason 0x{:02x})", peer, reason);
                    self.session = None;
                } else {
                    debug!("ignoring disconnect of {}", peer);
                }
            }
            LinkEvent::SecurityChanged { peer, level } => {
                let required = self.tier.required_level();
                if let Some(session) = self.session_mut(peer) {
                    session.security = level;
                    if level < required {
                        warn!("link {} at {:?}, color access needs {:?}", peer, level, required);
                    } else {
                        info!("link {} secured at {:?}", peer, level);
                    }
                }
            }
            LinkEvent::SecurityFailed { peer, status } => {
                warn!("security upgrade for {} failed (status 0x{:02x})", peer, status);
            }
            LinkEvent::PasskeyDisplay { peer, passkey } => {
                info!("passkey for {}: {:06}", peer, passkey);
            }
            LinkEvent::PairingCancelled { peer } => {
                info!("pairing cancelled by {}", peer);
                if let Some(session) = self.session_mut(peer) {
                    session.outcome = PairingOutcome::Failed(PairingFailure::Cancelled);
                }
            }
            LinkEvent::PairingComplete { peer, bonded } => {
                info!("pairing with {} complete, bonded: {}", peer, bonded);
                if let Some(session) = self.session_mut(peer) {
                    session.outcome = if bonded {
                        PairingOutcome::Bonded
                    } else {
                        PairingOutcome::Unbonded
                    };
                }
            }
            LinkEvent::PairingFailed { peer, reason } => {
                error!("pairing with {} failed, reason {}", peer, reason);
                if let Some(session) = self.session_mut(peer) {
                    session.outcome = PairingOutcome::Failed(PairingFailure::Reason(reason));
                }
            }
        }
    }

    fn on_connected<T: BleTransport>(&mut self, peer: PeerAddress, transport: &mut T) {
        // Connectable advertising ends with the connection
        self.advertising = false;

        if let Some(current) = self.session {
            warn!("rejecting {}, already connected to {}", peer, current.peer);
            if let Err(e) = transport.disconnect(peer) {
                warn!("failed to disconnect {}: {}", peer, e);
            }
            return;
        }

        info!("connected {}", peer);
        self.session = Some(PairingSession::new(peer));

        let required = self.tier.required_level();
        if self.tier != SecurityTier::Open {
            if let Err(e) = transport.request_security(peer, required) {
                warn!("failed to request {:?} for {}: {}", required, peer, e);
            }
        }
    }

    /// Start advertising unless it runs already or a peer is connected
    pub fn ensure_advertising<T: BleTransport>(
        &mut self,
        transport: &mut T,
    ) -> Result<(), TransportError> {
        if self.advertising || self.session.is_some() {
            return Ok(());
        }

        match transport.start_advertising(&Advertisement::new(self.identity.name())) {
            Ok(()) => {
                info!("advertising as \"{}\"", self.identity.name());
                self.advertising = true;
                Ok(())
            }
            Err(e) => {
                warn!("advertising failed to start: {}", e);
                Err(e)
            }
        }
    }

    /// Read the color value starting at `offset` into `buf`
    pub fn read_color(
        &self,
        peer: PeerAddress,
        offset: u16,
        buf: &mut [u8],
    ) -> Result<usize, AttError> {
        self.authorize(peer)?;

        let value = encode_color(self.control.override_color());
        let offset = usize::from(offset);
        if offset > value.len() {
            return Err(AttError::InvalidOffset);
        }
        let len = (value.len() - offset).min(buf.len());
        buf[..len].copy_from_slice(&value[offset..offset + len]);
        Ok(len)
    }

    /// Accept a full `[r, g, b]` write and switch the strip to it
    ///
    /// The override is applied before this returns, so the next tick shows
    /// the new color.
    pub fn write_color(&self, peer: PeerAddress, offset: u16, data: &[u8]) -> Result<usize, AttError> {
        self.authorize(peer)?;

        let color = decode_color(offset, data).inspect_err(|e| {
            warn!("rejected color write from {} ({} bytes at {}): {}", peer, data.len(), offset, e);
        })?;

        if self.control.apply_override(color) {
            info!("remote color override active");
        }
        debug!("color set to ({}, {}, {}) by {}", color.r, color.g, color.b, peer);

        Ok(COLOR_VALUE_LEN)
    }

    fn authorize(&self, peer: PeerAddress) -> Result<(), AttError> {
        let Some(session) = self.session.filter(|session| session.peer == peer) else {
            warn!("attribute access from unknown peer {}", peer);
            return Err(AttError::UnlikelyError);
        };
        let granted = self.tier.check(session.security).and_then(|()| {
            // A failed or cancelled handshake revokes access even if the link
            // reached the level. Pending covers bonded peers re-encrypting.
            match (self.tier, session.outcome) {
                (SecurityTier::Authenticated, PairingOutcome::Failed(_)) => {
                    Err(AttError::InsufficientAuthentication)
                }
                _ => Ok(()),
            }
        });
        granted.inspect_err(|e| {
            debug!("access by {} denied: {}", peer, e);
        })
    }

    fn session_mut(&mut self, peer: PeerAddress) -> Option<&mut PairingSession> {
        self.session.as_mut().filter(|session| session.peer == peer)
    }

    pub const fn session(&self) -> Option<&PairingSession> {
        self.session.as_ref()
    }

    pub const fn is_advertising(&self) -> bool {
        self.advertising
    }

    pub const fn tier(&self) -> SecurityTier {
        self.tier
    }

    pub const fn identity(&self) -> &DeviceIdentity {
        &self.identity
    }
}

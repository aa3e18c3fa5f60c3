use super::{PeerAddress, SecurityLevel};
use crate::channel::{Channel, Receiver, Sender};

/// Callback from the host stack, queued for the control channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkEvent {
    /// A peer connected
    Connected { peer: PeerAddress },
    /// A connection attempt failed with an HCI status
    ConnectFailed { peer: PeerAddress, status: u8 },
    /// A link went down with an HCI reason
    Disconnected { peer: PeerAddress, reason: u8 },
    /// The link reached a new security level
    SecurityChanged { peer: PeerAddress, level: SecurityLevel },
    /// Raising the link security failed
    SecurityFailed { peer: PeerAddress, status: u8 },
    /// The stack shows the passkey the peer has to enter
    PasskeyDisplay { peer: PeerAddress, passkey: u32 },
    /// The peer aborted pairing
    PairingCancelled { peer: PeerAddress },
    /// Pairing finished
    PairingComplete { peer: PeerAddress, bonded: bool },
    /// Pairing failed with an SMP reason code
    PairingFailed { peer: PeerAddress, reason: u8 },
}

impl LinkEvent {
    pub const fn peer(&self) -> PeerAddress {
        match *self {
            LinkEvent::Connected { peer }
            | LinkEvent::ConnectFailed { peer, .. }
            | LinkEvent::Disconnected { peer, .. }
            | LinkEvent::SecurityChanged { peer, .. }
            | LinkEvent::SecurityFailed { peer, .. }
            | LinkEvent::PasskeyDisplay { peer, .. }
            | LinkEvent::PairingCancelled { peer }
            | LinkEvent::PairingComplete { peer, .. }
            | LinkEvent::PairingFailed { peer, .. } => peer,
        }
    }
}

/// Queue depth that holds every event of one connection lifecycle
///
/// Connect, security change, passkey display, pairing result and disconnect,
/// plus room for a rejected second connection. A smaller queue can drop
/// events between two polls; the control channel then resets the link.
pub const LINK_EVENT_QUEUE_DEPTH: usize = 8;

/// Type alias for link event sender
pub type LinkEventSender<'a, const SIZE: usize> = Sender<'a, LinkEvent, SIZE>;

/// Type alias for link event receiver
pub type LinkEventReceiver<'a, const SIZE: usize> = Receiver<'a, LinkEvent, SIZE>;

/// Type alias for the link event channel
pub type LinkEventChannel<const SIZE: usize> = Channel<LinkEvent, SIZE>;

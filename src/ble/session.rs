use super::{PeerAddress, SecurityLevel};

/// Why pairing did not finish
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairingFailure {
    /// The peer aborted
    Cancelled,
    /// SMP reason code
    Reason(u8),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PairingOutcome {
    #[default]
    Pending,
    /// Paired and keys stored
    Bonded,
    /// Paired for this connection only
    Unbonded,
    Failed(PairingFailure),
}

/// State of the current connection, dropped on disconnect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairingSession {
    pub peer: PeerAddress,
    pub security: SecurityLevel,
    pub outcome: PairingOutcome,
}

impl PairingSession {
    pub const fn new(peer: PeerAddress) -> Self {
        Self {
            peer,
            security: SecurityLevel::Open,
            outcome: PairingOutcome::Pending,
        }
    }
}

use thiserror::Error;

/// Configuration errors raised while building the I/O ownership table.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IoMapError {
    #[error("{claimant} claims 0x{addr:04X}, which is already owned by {owner}")]
    Conflict {
        addr: u16,
        owner: &'static str,
        claimant: &'static str,
    },
    #[error("{claimant} claims 0x{addr:04X}, which is outside the I/O window")]
    OutOfWindow { addr: u16, claimant: &'static str },
}

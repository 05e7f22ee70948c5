//! Notification records emitted to external observers.

use crate::{Amount, PartyId, ProgramId};
use serde::{Deserialize, Serialize};

/// Structured record of one ledger mutation.
///
/// Consumed fire-and-forget by external observers and indexers; delivery is
/// never allowed to fail a committed mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LedgerEvent {
    /// A program was registered
    ProgramCreated {
        id: ProgramId,
        name: String,
        target: Amount,
        responsible_party: PartyId,
    },
    /// A registered program's editable fields changed
    ProgramUpdated {
        id: ProgramId,
        name: String,
        description: String,
        responsible_party: PartyId,
    },
    /// Funds entered the pool
    FundsDeposited { caller: PartyId, amount: Amount },
    /// A program's full target was reserved out of the pool
    FundsAllocated { id: ProgramId, amount: Amount },
    /// Part of a program's reservation was released to its responsible party
    FundsWithdrawn {
        id: ProgramId,
        responsible_party: PartyId,
        note: String,
        amount: Amount,
    },
}

impl LedgerEvent {
    /// Short name of the event kind, for logs and display
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ProgramCreated { .. } => "program_created",
            Self::ProgramUpdated { .. } => "program_updated",
            Self::FundsDeposited { .. } => "funds_deposited",
            Self::FundsAllocated { .. } => "funds_allocated",
            Self::FundsWithdrawn { .. } => "funds_withdrawn",
        }
    }
}

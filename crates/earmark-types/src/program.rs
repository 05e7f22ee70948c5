//! Program records, lifecycle status, and withdrawal history.

use crate::{Amount, PartyId, ProgramId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a program.
///
/// Every created program starts `Registered`. A single allocation moves it
/// to `Allocated`, which is terminal with respect to status; the reserved
/// balance then only shrinks through withdrawals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProgramStatus {
    /// Created, mutable fields still editable, nothing reserved yet
    Registered,
    /// Full target reserved out of the pool; drawdown in progress
    Allocated,
}

impl fmt::Display for ProgramStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Registered => write!(f, "registered"),
            Self::Allocated => write!(f, "allocated"),
        }
    }
}

/// A named earmark target funded out of the shared pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Program {
    pub id: ProgramId,
    pub name: String,
    pub description: String,
    /// Funding goal. Immutable once allocation has occurred.
    pub target: Amount,
    /// Identity authorized to withdraw this program's allocation.
    /// May change only while the program is `Registered`.
    pub responsible_party: PartyId,
    pub status: ProgramStatus,
    /// Funds currently reserved to this program. Never exceeds `target`.
    pub allocated: Amount,
    pub created_at: DateTime<Utc>,
    pub allocated_at: Option<DateTime<Utc>>,
    /// Withdrawal audit trail, append-only in occurrence order.
    pub history: Vec<HistoryEntry>,
}

impl Program {
    /// Whether the program is still editable
    pub fn is_registered(&self) -> bool {
        self.status == ProgramStatus::Registered
    }

    /// Total withdrawn so far, per the audit trail
    pub fn total_withdrawn(&self) -> u64 {
        self.history.iter().map(|e| e.amount.value()).sum()
    }
}

/// Immutable audit record of one withdrawal event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Time of withdrawal
    pub timestamp: DateTime<Utc>,
    /// Free-text justification supplied by the withdrawer
    pub note: String,
    /// Amount withdrawn in this event
    pub amount: Amount,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_program() -> Program {
        Program {
            id: ProgramId::new(0),
            name: "irrigation".to_string(),
            description: "canal repair".to_string(),
            target: Amount::new(1000),
            responsible_party: PartyId::new(),
            status: ProgramStatus::Registered,
            allocated: Amount::ZERO,
            created_at: Utc::now(),
            allocated_at: None,
            history: Vec::new(),
        }
    }

    #[test]
    fn test_status_display() {
        assert_eq!(ProgramStatus::Registered.to_string(), "registered");
        assert_eq!(ProgramStatus::Allocated.to_string(), "allocated");
    }

    #[test]
    fn test_total_withdrawn_sums_history() {
        let mut program = sample_program();
        assert_eq!(program.total_withdrawn(), 0);

        program.history.push(HistoryEntry {
            timestamp: Utc::now(),
            note: "phase 1".to_string(),
            amount: Amount::new(400),
        });
        program.history.push(HistoryEntry {
            timestamp: Utc::now(),
            note: "phase 2".to_string(),
            amount: Amount::new(150),
        });
        assert_eq!(program.total_withdrawn(), 550);
    }

    #[test]
    fn test_is_registered() {
        let mut program = sample_program();
        assert!(program.is_registered());
        program.status = ProgramStatus::Allocated;
        assert!(!program.is_registered());
    }
}

//! Earmark Ledger - pooled-fund program accounting
//!
//! Tracks earmarked funds moving from a single pooled balance into named
//! programs, each with a funding target, a responsible party, and a
//! lifecycle from registration through allocation to withdrawal.
//!
//! The ledger is:
//! - Single-writer (one lock around the whole state; mutations never interleave)
//! - Append-only (programs and history entries are never deleted)
//! - Conservative (nothing is reserved that the pool does not hold)
//! - Attributable (every outbound movement is authorized and recorded)
//!
//! # Invariants
//!
//! 1. `0 <= allocated <= target` for every program
//! 2. The pool-wide reserved total equals the sum of program allocations
//! 3. The reserved total never exceeds the custody pool balance
//! 4. Program status moves `Registered -> Allocated` exactly once, never back
//! 5. Program ids are `0..n` in creation order, no gaps, no reuse

pub mod gate;
pub mod ledger;
pub mod notify;
pub mod registry;
pub mod state;

pub use gate::AccessGate;
pub use ledger::{FundingLedger, PoolSummary};
pub use notify::{NotificationSink, NullSink, RecordingSink};
pub use registry::ProgramRegistry;
pub use state::LedgerState;

pub use earmark_custody::{CustodyBackend, InMemoryCustody};
pub use earmark_types::{
    Amount, HistoryEntry, LedgerError, LedgerEvent, PartyId, Program, ProgramId, ProgramStatus,
    Result,
};

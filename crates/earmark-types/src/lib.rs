//! Earmark Types - Canonical domain types for the funding ledger
//!
//! This crate contains the foundational types for Earmark with zero
//! dependencies on other earmark crates:
//!
//! - Identity types (`PartyId`, `ProgramId`)
//! - Integer fund amounts with checked arithmetic
//! - Program records, lifecycle status, and withdrawal history
//! - Notification events emitted to external observers
//! - Error types
//!
//! # Accounting Invariants
//!
//! These types support the core ledger invariants:
//!
//! 1. A program's allocation never exceeds its target
//! 2. The sum of all allocations equals the pool's reserved total
//! 3. The pool never reserves more than it actually holds
//! 4. Program status moves `Registered -> Allocated` exactly once
//! 5. Program ids are sequential from zero, with no gaps and no reuse

pub mod amount;
pub mod error;
pub mod event;
pub mod identity;
pub mod program;

pub use amount::*;
pub use error::*;
pub use event::*;
pub use identity::*;
pub use program::*;

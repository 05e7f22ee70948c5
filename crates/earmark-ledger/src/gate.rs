//! Caller authorization checks.
//!
//! Pure checks against the ledger state, no side effects. Caller identity
//! arrives as an explicit parameter on every mutating operation; how a
//! transport proves the caller holds that identity is out of scope here.

use crate::LedgerState;
use earmark_types::{LedgerError, PartyId, ProgramId, Result};

/// Resolves a caller against the admin identity or a program's responsible
/// party. Depends on nothing but the state it inspects.
pub struct AccessGate;

impl AccessGate {
    /// Fail unless `caller` is the admin
    pub fn require_admin(state: &LedgerState, caller: PartyId) -> Result<()> {
        if caller == state.admin() {
            Ok(())
        } else {
            Err(LedgerError::unauthorized("caller is not the admin"))
        }
    }

    /// Fail unless `caller` is the program's responsible party.
    ///
    /// An unknown program id fails with not-found before any identity check.
    pub fn require_responsible_party(
        state: &LedgerState,
        caller: PartyId,
        id: ProgramId,
    ) -> Result<()> {
        let program = state.program(id)?;
        if caller == program.responsible_party {
            Ok(())
        } else {
            Err(LedgerError::unauthorized(format!(
                "caller is not the responsible party of {id}"
            )))
        }
    }
}

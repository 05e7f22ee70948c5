//! Ledger state owned by a single component instance.
//!
//! `LedgerState` is an explicit struct passed around behind one lock rather
//! than ambient global state. The mutation hooks that touch allocation
//! figures are crate-private: callers outside this crate reach them only
//! through the funding ledger's operations, never directly.

use chrono::Utc;
use earmark_types::{
    Amount, HistoryEntry, LedgerError, PartyId, Program, ProgramId, ProgramStatus, Result,
};

/// Process-wide accounting state: the admin identity, every program ever
/// created, and the pool-level totals.
#[derive(Debug)]
pub struct LedgerState {
    /// Set once at construction, immutable
    admin: PartyId,
    /// Append-only, creation order; a program's id is its position
    programs: Vec<Program>,
    /// Cumulative sum of all deposits ever received
    total_managed_fund: Amount,
    /// Sum of `allocated` across all programs
    total_allocated: Amount,
}

impl LedgerState {
    /// Create a fresh state with the given admin
    pub fn new(admin: PartyId) -> Self {
        Self {
            admin,
            programs: Vec::new(),
            total_managed_fund: Amount::ZERO,
            total_allocated: Amount::ZERO,
        }
    }

    /// The admin identity
    pub fn admin(&self) -> PartyId {
        self.admin
    }

    /// Cumulative deposits ever received
    pub fn total_managed_fund(&self) -> Amount {
        self.total_managed_fund
    }

    /// Funds currently reserved across all programs
    pub fn total_allocated(&self) -> Amount {
        self.total_allocated
    }

    /// All programs, creation order
    pub fn programs(&self) -> &[Program] {
        &self.programs
    }

    /// Look up a program by id
    pub fn program(&self, id: ProgramId) -> Result<&Program> {
        self.programs
            .get(id.index())
            .ok_or(LedgerError::ProgramNotFound { program_id: id.0 })
    }

    pub(crate) fn program_mut(&mut self, id: ProgramId) -> Result<&mut Program> {
        self.programs
            .get_mut(id.index())
            .ok_or(LedgerError::ProgramNotFound { program_id: id.0 })
    }

    /// Append a new program under the next sequential id.
    ///
    /// Ids are exactly `0..programs.len()`: assigned at append time under
    /// the caller's write guard, and programs are never removed.
    pub(crate) fn append_program(
        &mut self,
        name: String,
        description: String,
        target: Amount,
        responsible_party: PartyId,
    ) -> ProgramId {
        let id = ProgramId::new(self.programs.len() as u64);
        self.programs.push(Program {
            id,
            name,
            description,
            target,
            responsible_party,
            status: ProgramStatus::Registered,
            allocated: Amount::ZERO,
            created_at: Utc::now(),
            allocated_at: None,
            history: Vec::new(),
        });
        id
    }

    /// Record a deposit the custody backend has already confirmed.
    pub(crate) fn record_deposit(&mut self, amount: Amount) -> Result<()> {
        self.total_managed_fund = self.total_managed_fund.checked_add(amount)?;
        Ok(())
    }

    /// Reserve a registered program's full target.
    ///
    /// Moves the program to `Allocated` and raises the pool-wide reserved
    /// total by the same amount, both under the caller's write guard.
    /// Returns the reserved amount.
    pub(crate) fn mark_allocated(&mut self, id: ProgramId) -> Result<Amount> {
        let (target, status) = {
            let program = self.program(id)?;
            (program.target, program.status)
        };
        if status != ProgramStatus::Registered {
            return Err(LedgerError::InvalidState {
                program_id: id.0,
                status: status.to_string(),
                expected: ProgramStatus::Registered.to_string(),
            });
        }
        let new_total = self.total_allocated.checked_add(target)?;

        let program = self.program_mut(id)?;
        program.allocated = target;
        program.status = ProgramStatus::Allocated;
        program.allocated_at = Some(Utc::now());
        self.total_allocated = new_total;
        Ok(target)
    }

    /// Release `delta` from a program's reservation.
    ///
    /// Allocations only ever shrink after the initial reserve; the checked
    /// subtraction keeps both figures non-negative.
    pub(crate) fn adjust_allocated(&mut self, id: ProgramId, delta: Amount) -> Result<()> {
        let new_allocated = self.program(id)?.allocated.checked_sub(delta)?;
        let new_total = self.total_allocated.checked_sub(delta)?;

        let program = self.program_mut(id)?;
        program.allocated = new_allocated;
        self.total_allocated = new_total;
        Ok(())
    }

    /// Append a withdrawal audit record to a program's history.
    pub(crate) fn append_history(&mut self, id: ProgramId, entry: HistoryEntry) -> Result<()> {
        self.program_mut(id)?.history.push(entry);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registered(state: &mut LedgerState, target: u64) -> ProgramId {
        state.append_program(
            "test".to_string(),
            "test".to_string(),
            Amount::new(target),
            PartyId::new(),
        )
    }

    #[test]
    fn ids_are_sequential_from_zero() {
        let mut state = LedgerState::new(PartyId::new());
        assert_eq!(registered(&mut state, 100), ProgramId::new(0));
        assert_eq!(registered(&mut state, 200), ProgramId::new(1));
        assert_eq!(registered(&mut state, 300), ProgramId::new(2));

        for (n, program) in state.programs().iter().enumerate() {
            assert_eq!(program.id, ProgramId::new(n as u64));
        }
    }

    #[test]
    fn unknown_program_is_not_found() {
        let state = LedgerState::new(PartyId::new());
        assert!(matches!(
            state.program(ProgramId::new(0)),
            Err(LedgerError::ProgramNotFound { program_id: 0 })
        ));
    }

    #[test]
    fn mark_allocated_reserves_full_target_once() {
        let mut state = LedgerState::new(PartyId::new());
        let id = registered(&mut state, 1000);

        assert_eq!(state.mark_allocated(id).unwrap(), Amount::new(1000));
        let program = state.program(id).unwrap();
        assert_eq!(program.status, ProgramStatus::Allocated);
        assert_eq!(program.allocated, Amount::new(1000));
        assert!(program.allocated_at.is_some());
        assert_eq!(state.total_allocated(), Amount::new(1000));

        // status is terminal: a second allocation is rejected unchanged
        assert!(matches!(
            state.mark_allocated(id),
            Err(LedgerError::InvalidState { .. })
        ));
        assert_eq!(state.total_allocated(), Amount::new(1000));
    }

    #[test]
    fn adjust_allocated_moves_both_figures_together() {
        let mut state = LedgerState::new(PartyId::new());
        let a = registered(&mut state, 1000);
        let b = registered(&mut state, 500);
        state.mark_allocated(a).unwrap();
        state.mark_allocated(b).unwrap();

        state.adjust_allocated(a, Amount::new(400)).unwrap();
        assert_eq!(state.program(a).unwrap().allocated, Amount::new(600));
        assert_eq!(state.total_allocated(), Amount::new(1100));

        let sum: u64 = state.programs().iter().map(|p| p.allocated.value()).sum();
        assert_eq!(state.total_allocated().value(), sum);
    }

    #[test]
    fn adjust_allocated_cannot_go_negative() {
        let mut state = LedgerState::new(PartyId::new());
        let id = registered(&mut state, 100);
        state.mark_allocated(id).unwrap();

        assert!(state.adjust_allocated(id, Amount::new(101)).is_err());
        assert_eq!(state.program(id).unwrap().allocated, Amount::new(100));
        assert_eq!(state.total_allocated(), Amount::new(100));
    }

    #[test]
    fn record_deposit_accumulates() {
        let mut state = LedgerState::new(PartyId::new());
        state.record_deposit(Amount::new(300)).unwrap();
        state.record_deposit(Amount::new(200)).unwrap();
        assert_eq!(state.total_managed_fund(), Amount::new(500));
    }
}

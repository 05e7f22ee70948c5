//! Pool-level accounting: deposit, allocation, withdrawal, audit history.
//!
//! Every mutating operation validates first, then calls the custody backend
//! if value has to move, and commits its accounting only after the backend
//! confirms. The write guard is held across the whole span, so a declined
//! transfer leaves the state exactly as it was and no two mutations ever
//! interleave.

use std::sync::Arc;

use chrono::Utc;
use earmark_custody::CustodyBackend;
use earmark_types::{
    Amount, HistoryEntry, LedgerError, LedgerEvent, PartyId, ProgramId, ProgramStatus, Result,
};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::{AccessGate, LedgerState, NotificationSink, ProgramRegistry};

/// Read-only snapshot of pool-level accounting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolSummary {
    /// Cumulative deposits ever received
    pub total_managed_fund: Amount,
    /// Funds reserved to programs, not yet withdrawn
    pub total_allocated: Amount,
    /// What the custody backend actually holds for the pool
    pub pool_balance: Amount,
    /// Unreserved part of the pool balance
    pub available: Amount,
}

/// The funding ledger: orchestrates deposits into the pool, all-or-nothing
/// allocation of a program's target, and bounded withdrawals against an
/// allocation, appending an audit entry per withdrawal.
pub struct FundingLedger {
    state: Arc<RwLock<LedgerState>>,
    registry: ProgramRegistry,
    custody: Arc<dyn CustodyBackend>,
    sink: Arc<dyn NotificationSink>,
    pool: PartyId,
}

impl FundingLedger {
    /// Create a ledger over the given custody backend and sink.
    ///
    /// `pool` names the custody account this ledger manages; `admin` is
    /// fixed for the lifetime of the ledger.
    pub fn new(
        admin: PartyId,
        pool: PartyId,
        custody: Arc<dyn CustodyBackend>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        let state = Arc::new(RwLock::new(LedgerState::new(admin)));
        let registry = ProgramRegistry::new(state.clone(), sink.clone());
        Self {
            state,
            registry,
            custody,
            sink,
            pool,
        }
    }

    /// The program registry sharing this ledger's state
    pub fn registry(&self) -> &ProgramRegistry {
        &self.registry
    }

    /// The pool account this ledger manages
    pub fn pool(&self) -> PartyId {
        self.pool
    }

    /// Move `amount` from the caller into the pool.
    ///
    /// Open to any caller with a real identity and a positive amount; the
    /// custody backend decides whether the pull goes through.
    pub async fn deposit(&self, caller: PartyId, amount: Amount) -> Result<()> {
        if !amount.is_positive() {
            return Err(LedgerError::invalid_argument("amount", "must be positive"));
        }
        if caller.is_nil() {
            return Err(LedgerError::invalid_argument(
                "caller",
                "must not be the null identity",
            ));
        }

        let mut state = self.state.write().await;
        // stage the overflow check before any value moves
        state.total_managed_fund().checked_add(amount)?;

        if !self.custody.transfer_in(&caller, amount).await {
            return Err(LedgerError::TransferFailed {
                direction: "inbound".to_string(),
                amount: amount.value(),
            });
        }
        state.record_deposit(amount)?;
        info!("deposit of {} from {} confirmed", amount, caller);
        drop(state);

        self.sink
            .emit(LedgerEvent::FundsDeposited { caller, amount })
            .await;
        Ok(())
    }

    /// Reserve a registered program's full target out of the pool's
    /// unallocated balance. Admin only, all-or-nothing, exactly once.
    pub async fn allocate(&self, caller: PartyId, id: ProgramId) -> Result<()> {
        let mut state = self.state.write().await;
        AccessGate::require_admin(&state, caller)?;

        let program = state.program(id)?;
        if program.status != ProgramStatus::Registered {
            return Err(LedgerError::InvalidState {
                program_id: id.0,
                status: program.status.to_string(),
                expected: ProgramStatus::Registered.to_string(),
            });
        }
        let target = program.target;

        let pool_balance = self.custody.balance_of(&self.pool).await;
        let available = pool_balance.checked_sub(state.total_allocated())?;
        if available < target {
            return Err(LedgerError::InsufficientFunds {
                requested: target.value(),
                available: available.value(),
            });
        }

        let remaining = available.checked_sub(target)?;
        let amount = state.mark_allocated(id)?;
        info!(
            "{} allocated {} ({} of the pool still unallocated)",
            id, amount, remaining
        );
        drop(state);

        self.sink
            .emit(LedgerEvent::FundsAllocated { id, amount })
            .await;
        Ok(())
    }

    /// Release part of a funded program's reservation to its responsible
    /// party and record the withdrawal in the program's history.
    ///
    /// The accounting decrement and the custody push stand or fall
    /// together: a declined push leaves every field unchanged.
    pub async fn withdraw(
        &self,
        caller: PartyId,
        id: ProgramId,
        note: impl Into<String>,
        amount: Amount,
    ) -> Result<()> {
        let note = note.into();

        let mut state = self.state.write().await;
        AccessGate::require_responsible_party(&state, caller, id)?;

        let program = state.program(id)?;
        if program.status != ProgramStatus::Allocated {
            return Err(LedgerError::InvalidState {
                program_id: id.0,
                status: program.status.to_string(),
                expected: ProgramStatus::Allocated.to_string(),
            });
        }
        if note.is_empty() {
            return Err(LedgerError::invalid_argument("note", "must not be empty"));
        }
        if !amount.is_positive() {
            return Err(LedgerError::invalid_argument("amount", "must be positive"));
        }
        let allocated = program.allocated;
        if amount > allocated {
            return Err(LedgerError::InsufficientFunds {
                requested: amount.value(),
                available: allocated.value(),
            });
        }

        if !self.custody.transfer_out(&caller, amount).await {
            warn!("withdrawal push for {} declined; accounting unchanged", id);
            return Err(LedgerError::TransferFailed {
                direction: "outbound".to_string(),
                amount: amount.value(),
            });
        }
        state.adjust_allocated(id, amount)?;
        state.append_history(
            id,
            HistoryEntry {
                timestamp: Utc::now(),
                note: note.clone(),
                amount,
            },
        )?;
        info!("{} withdrew {} from {}", caller, amount, id);
        drop(state);

        self.sink
            .emit(LedgerEvent::FundsWithdrawn {
                id,
                responsible_party: caller,
                note,
                amount,
            })
            .await;
        Ok(())
    }

    /// A program's withdrawal history, append order
    pub async fn history(&self, id: ProgramId) -> Result<Vec<HistoryEntry>> {
        self.state
            .read()
            .await
            .program(id)
            .map(|p| p.history.clone())
    }

    /// Snapshot of pool-level accounting
    pub async fn pool_summary(&self) -> Result<PoolSummary> {
        let state = self.state.read().await;
        let pool_balance = self.custody.balance_of(&self.pool).await;
        let available = pool_balance.checked_sub(state.total_allocated())?;
        Ok(PoolSummary {
            total_managed_fund: state.total_managed_fund(),
            total_allocated: state.total_allocated(),
            pool_balance,
            available,
        })
    }
}

//! Earmark Custody - the token custody boundary
//!
//! The ledger never mutates balances directly. It asks the custody backend
//! to move value relative to the pool account and trusts the boolean result:
//! `false` means the backend declined the transfer, which the ledger maps to
//! an explicit error without touching its accounting.
//!
//! A declined or hanging transfer is a fault of the backend, never of the
//! ledger; the backend must not partially apply a transfer.

use std::collections::HashMap;
use std::sync::Arc;

use earmark_types::{Amount, PartyId};
use tokio::sync::RwLock;
use tracing::{info, warn};

/// External value-transfer service holding the pool's balance.
#[async_trait::async_trait]
pub trait CustodyBackend: Send + Sync {
    /// Balance currently held for `holder`
    async fn balance_of(&self, holder: &PartyId) -> Amount;

    /// Pull `amount` from `from` into the pool. Returns `false` if declined.
    async fn transfer_in(&self, from: &PartyId, amount: Amount) -> bool;

    /// Push `amount` from the pool to `to`. Returns `false` if declined.
    async fn transfer_out(&self, to: &PartyId, amount: Amount) -> bool;
}

/// In-memory reference backend, used by tests and the demo CLI.
///
/// Transfers are atomic under a single write lock and decline whenever the
/// source account cannot cover the amount.
pub struct InMemoryCustody {
    pool: PartyId,
    accounts: Arc<RwLock<HashMap<PartyId, Amount>>>,
}

impl InMemoryCustody {
    /// Create a backend holding the given pool account
    pub fn new(pool: PartyId) -> Self {
        Self {
            pool,
            accounts: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// The pool account this backend serves
    pub fn pool(&self) -> PartyId {
        self.pool
    }

    /// Credit an account out of thin air. Test and demo helper.
    pub async fn mint(&self, holder: PartyId, amount: Amount) {
        let mut accounts = self.accounts.write().await;
        let balance = accounts.entry(holder).or_insert(Amount::ZERO);
        if let Ok(new_balance) = balance.checked_add(amount) {
            *balance = new_balance;
        }
    }

    async fn move_value(&self, from: PartyId, to: PartyId, amount: Amount) -> bool {
        let mut accounts = self.accounts.write().await;

        let from_balance = accounts.get(&from).copied().unwrap_or(Amount::ZERO);
        let debited = match from_balance.checked_sub(amount) {
            Ok(debited) => debited,
            Err(_) => {
                warn!(
                    "custody declined: {} holds {}, cannot cover {}",
                    from, from_balance, amount
                );
                return false;
            }
        };

        let to_balance = accounts.get(&to).copied().unwrap_or(Amount::ZERO);
        let credited = match to_balance.checked_add(amount) {
            Ok(credited) => credited,
            Err(_) => return false,
        };

        accounts.insert(from, debited);
        accounts.insert(to, credited);
        info!("custody transfer: {} from {} to {}", amount, from, to);
        true
    }
}

#[async_trait::async_trait]
impl CustodyBackend for InMemoryCustody {
    async fn balance_of(&self, holder: &PartyId) -> Amount {
        self.accounts
            .read()
            .await
            .get(holder)
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    async fn transfer_in(&self, from: &PartyId, amount: Amount) -> bool {
        self.move_value(*from, self.pool, amount).await
    }

    async fn transfer_out(&self, to: &PartyId, amount: Amount) -> bool {
        self.move_value(self.pool, *to, amount).await
    }
}

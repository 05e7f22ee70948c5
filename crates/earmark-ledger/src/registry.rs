//! Program registration and field updates.

use std::sync::Arc;

use earmark_types::{
    Amount, LedgerError, LedgerEvent, PartyId, Program, ProgramId, ProgramStatus, Result,
};
use tokio::sync::RwLock;
use tracing::info;

use crate::{AccessGate, LedgerState, NotificationSink};

/// Owns the program collection: creation, field updates while registered,
/// and read-only listing.
///
/// Shares the ledger state with `FundingLedger`; every mutation runs under
/// the state's single write lock, so no two mutations interleave.
#[derive(Clone)]
pub struct ProgramRegistry {
    state: Arc<RwLock<LedgerState>>,
    sink: Arc<dyn NotificationSink>,
}

impl ProgramRegistry {
    pub(crate) fn new(state: Arc<RwLock<LedgerState>>, sink: Arc<dyn NotificationSink>) -> Self {
        Self { state, sink }
    }

    fn validate_fields(name: &str, description: &str, responsible_party: PartyId) -> Result<()> {
        if name.is_empty() {
            return Err(LedgerError::invalid_argument("name", "must not be empty"));
        }
        if description.is_empty() {
            return Err(LedgerError::invalid_argument(
                "description",
                "must not be empty",
            ));
        }
        if responsible_party.is_nil() {
            return Err(LedgerError::invalid_argument(
                "responsible_party",
                "must not be the null identity",
            ));
        }
        Ok(())
    }

    /// Register a new program. Admin only.
    ///
    /// The program starts `Registered` with nothing allocated and receives
    /// the next sequential id.
    pub async fn create(
        &self,
        caller: PartyId,
        name: impl Into<String>,
        target: Amount,
        description: impl Into<String>,
        responsible_party: PartyId,
    ) -> Result<ProgramId> {
        let name = name.into();
        let description = description.into();

        let mut state = self.state.write().await;
        AccessGate::require_admin(&state, caller)?;
        Self::validate_fields(&name, &description, responsible_party)?;
        if !target.is_positive() {
            return Err(LedgerError::invalid_argument("target", "must be positive"));
        }

        let id = state.append_program(name.clone(), description, target, responsible_party);
        info!("{} registered with target {}", id, target);
        drop(state);

        self.sink
            .emit(LedgerEvent::ProgramCreated {
                id,
                name,
                target,
                responsible_party,
            })
            .await;
        Ok(id)
    }

    /// Update a registered program's editable fields in place. Admin only.
    ///
    /// Target and status are untouched; once a program is allocated its
    /// fields are frozen.
    pub async fn update(
        &self,
        caller: PartyId,
        id: ProgramId,
        name: impl Into<String>,
        description: impl Into<String>,
        responsible_party: PartyId,
    ) -> Result<()> {
        let name = name.into();
        let description = description.into();

        let mut state = self.state.write().await;
        AccessGate::require_admin(&state, caller)?;

        let status = state.program(id)?.status;
        if status != ProgramStatus::Registered {
            return Err(LedgerError::InvalidState {
                program_id: id.0,
                status: status.to_string(),
                expected: ProgramStatus::Registered.to_string(),
            });
        }
        Self::validate_fields(&name, &description, responsible_party)?;

        let program = state.program_mut(id)?;
        program.name = name.clone();
        program.description = description.clone();
        program.responsible_party = responsible_party;
        info!("{} updated", id);
        drop(state);

        self.sink
            .emit(LedgerEvent::ProgramUpdated {
                id,
                name,
                description,
                responsible_party,
            })
            .await;
        Ok(())
    }

    /// Snapshot of one program
    pub async fn get(&self, id: ProgramId) -> Result<Program> {
        self.state.read().await.program(id).cloned()
    }

    /// Snapshot of all programs, creation order
    pub async fn list(&self) -> Vec<Program> {
        self.state.read().await.programs().to_vec()
    }

    /// Snapshot of programs in the given status, creation order
    pub async fn list_by_status(&self, status: ProgramStatus) -> Vec<Program> {
        self.state
            .read()
            .await
            .programs()
            .iter()
            .filter(|p| p.status == status)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NullSink;

    fn registry_with_admin() -> (ProgramRegistry, PartyId) {
        let admin = PartyId::new();
        let state = Arc::new(RwLock::new(LedgerState::new(admin)));
        (ProgramRegistry::new(state, Arc::new(NullSink)), admin)
    }

    #[tokio::test]
    async fn create_assigns_sequential_ids() {
        let (registry, admin) = registry_with_admin();
        let pic = PartyId::new();

        let first = registry
            .create(admin, "wells", Amount::new(1000), "drill two wells", pic)
            .await
            .unwrap();
        let second = registry
            .create(admin, "seeds", Amount::new(500), "buy seed stock", pic)
            .await
            .unwrap();

        assert_eq!(first, ProgramId::new(0));
        assert_eq!(second, ProgramId::new(1));

        let program = registry.get(first).await.unwrap();
        assert_eq!(program.status, ProgramStatus::Registered);
        assert_eq!(program.allocated, Amount::ZERO);
        assert_eq!(program.target, Amount::new(1000));
    }

    #[tokio::test]
    async fn create_rejects_bad_arguments() {
        let (registry, admin) = registry_with_admin();
        let pic = PartyId::new();

        let empty_name = registry
            .create(admin, "", Amount::new(100), "desc", pic)
            .await;
        assert!(matches!(
            empty_name,
            Err(LedgerError::InvalidArgument { .. })
        ));

        let empty_description = registry.create(admin, "name", Amount::new(100), "", pic).await;
        assert!(matches!(
            empty_description,
            Err(LedgerError::InvalidArgument { .. })
        ));

        let zero_target = registry
            .create(admin, "name", Amount::ZERO, "desc", pic)
            .await;
        assert!(matches!(
            zero_target,
            Err(LedgerError::InvalidArgument { .. })
        ));

        let nil_pic = registry
            .create(admin, "name", Amount::new(100), "desc", PartyId::nil())
            .await;
        assert!(matches!(nil_pic, Err(LedgerError::InvalidArgument { .. })));

        assert!(registry.list().await.is_empty());
    }

    #[tokio::test]
    async fn create_requires_admin() {
        let (registry, _admin) = registry_with_admin();
        let outsider = PartyId::new();

        let result = registry
            .create(outsider, "wells", Amount::new(100), "desc", PartyId::new())
            .await;
        assert!(matches!(result, Err(LedgerError::Unauthorized { .. })));
    }

    #[tokio::test]
    async fn update_rewrites_editable_fields_only() {
        let (registry, admin) = registry_with_admin();
        let pic = PartyId::new();
        let new_pic = PartyId::new();

        let id = registry
            .create(admin, "wells", Amount::new(1000), "drill two wells", pic)
            .await
            .unwrap();
        registry
            .update(admin, id, "wells-v2", "drill three wells", new_pic)
            .await
            .unwrap();

        let program = registry.get(id).await.unwrap();
        assert_eq!(program.name, "wells-v2");
        assert_eq!(program.description, "drill three wells");
        assert_eq!(program.responsible_party, new_pic);
        // untouched
        assert_eq!(program.target, Amount::new(1000));
        assert_eq!(program.status, ProgramStatus::Registered);
    }

    #[tokio::test]
    async fn update_unknown_program_is_not_found() {
        let (registry, admin) = registry_with_admin();
        let result = registry
            .update(admin, ProgramId::new(9), "n", "d", PartyId::new())
            .await;
        assert!(matches!(result, Err(LedgerError::ProgramNotFound { .. })));
    }

    #[tokio::test]
    async fn list_by_status_filters() {
        let (registry, admin) = registry_with_admin();
        let pic = PartyId::new();
        registry
            .create(admin, "a", Amount::new(100), "d", pic)
            .await
            .unwrap();
        registry
            .create(admin, "b", Amount::new(200), "d", pic)
            .await
            .unwrap();

        assert_eq!(
            registry.list_by_status(ProgramStatus::Registered).await.len(),
            2
        );
        assert!(registry
            .list_by_status(ProgramStatus::Allocated)
            .await
            .is_empty());
    }
}

//! Change notification to external observers.
//!
//! Sinks consume structured records of committed mutations. Delivery is
//! fire-and-forget: a sink cannot fail a mutation that already committed,
//! so `emit` is infallible and a sink that wants to error must keep that
//! to itself.

use std::sync::Arc;

use earmark_types::LedgerEvent;
use tokio::sync::RwLock;

/// Receives one record per committed mutation.
#[async_trait::async_trait]
pub trait NotificationSink: Send + Sync {
    /// Deliver one event
    async fn emit(&self, event: LedgerEvent);
}

/// Discards every event.
#[derive(Debug, Default)]
pub struct NullSink;

#[async_trait::async_trait]
impl NotificationSink for NullSink {
    async fn emit(&self, _event: LedgerEvent) {}
}

/// Buffers events in memory, append order. Used by tests and the demo CLI.
#[derive(Clone, Default)]
pub struct RecordingSink {
    events: Arc<RwLock<Vec<LedgerEvent>>>,
}

impl RecordingSink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far
    pub async fn events(&self) -> Vec<LedgerEvent> {
        self.events.read().await.clone()
    }

    /// Number of events recorded
    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }

    /// Whether nothing has been recorded yet
    pub async fn is_empty(&self) -> bool {
        self.events.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl NotificationSink for RecordingSink {
    async fn emit(&self, event: LedgerEvent) {
        self.events.write().await.push(event);
    }
}

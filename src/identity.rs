//! Caller identity.
//!
//! Identity establishment itself is an external concern; this module holds
//! the contract the engine needs: an opaque caller id and a watchable
//! available/absent state. `LocalIdentity` is the in-process provider that
//! issues anonymous identities, mirroring the anonymous sign-in flow the
//! deployed identity service performs.

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use uuid::Uuid;

/// Opaque caller identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallerId(pub Uuid);

impl CallerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CallerId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CallerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Short display: first 8 chars of UUID
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// Whether a caller identity is currently established.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdentityState {
    #[default]
    Absent,
    Available(CallerId),
}

impl IdentityState {
    pub fn caller(&self) -> Option<CallerId> {
        match self {
            IdentityState::Available(id) => Some(*id),
            IdentityState::Absent => None,
        }
    }
}

/// In-process identity provider. Starts absent; anonymous sign-in issues a
/// fresh caller id and publishes the transition to every watcher.
pub struct LocalIdentity {
    tx: watch::Sender<IdentityState>,
}

impl LocalIdentity {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(IdentityState::Absent);
        Self { tx }
    }

    /// Watch identity transitions.
    pub fn watch(&self) -> watch::Receiver<IdentityState> {
        self.tx.subscribe()
    }

    /// Issue a fresh anonymous identity and publish it.
    pub fn sign_in_anonymously(&self) -> CallerId {
        let id = CallerId::new();
        self.tx.send_replace(IdentityState::Available(id));
        id
    }

    /// Revoke the current identity.
    pub fn sign_out(&self) {
        self.tx.send_replace(IdentityState::Absent);
    }
}

impl Default for LocalIdentity {
    fn default() -> Self {
        Self::new()
    }
}

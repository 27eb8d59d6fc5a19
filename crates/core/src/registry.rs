use std::collections::HashMap;
use std::fmt::{self, Display};

use pet_facts_actor::{Actor, Message};
use pet_facts_model::{FactKind, FactStore};
use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

use crate::LookupError;

/// An opaque key naming one session.
#[derive(
    Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Creates a session identifier.
    #[inline]
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionId {
    #[inline]
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for SessionId {
    #[inline]
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[derive(Default)]
struct RegistryState {
    stores: HashMap<SessionId, FactStore>,
}

impl RegistryState {
    #[inline]
    fn store_mut(&mut self, session: SessionId) -> &mut FactStore {
        self.stores.entry(session).or_insert_with(|| {
            debug!("created fact store");
            FactStore::new()
        })
    }
}

/// Owns the [`FactStore`] of every session.
///
/// A store is created on the first access to its session and lives as
/// long as the registry. All reads and writes go through a single actor,
/// so each update is applied as a whole. Two concurrent updates of the
/// same slot are not merged, the one that arrives last wins.
///
/// Cloning the registry yields another handle to the same stores.
#[derive(Clone)]
pub struct SessionRegistry {
    handle: Actor<RegistryState>,
}

impl SessionRegistry {
    /// Spawns an empty registry.
    ///
    /// Must be called within a Tokio runtime.
    #[inline]
    pub fn spawn() -> Self {
        Self {
            handle: Actor::spawn(RegistryState::default(), Some("registry")),
        }
    }

    /// Overwrites the value of `kind` in the session's store, and waits
    /// until the write is applied.
    pub async fn update(
        &self,
        session: &SessionId,
        kind: FactKind,
        value: String,
    ) -> Result<(), LookupError> {
        self.handle
            .ask(|ack| UpdateFact {
                session: session.clone(),
                kind,
                value,
                ack,
            })
            .await
            .map_err(|_| LookupError::new(session.clone()))
    }

    /// Returns a copy of the session's store.
    pub async fn snapshot(
        &self,
        session: &SessionId,
    ) -> Result<FactStore, LookupError> {
        self.handle
            .ask(|reply| Snapshot {
                session: session.clone(),
                reply,
            })
            .await
            .map_err(|_| LookupError::new(session.clone()))
    }

    /// Returns the latest value of `kind` for the session.
    #[inline]
    pub async fn get(
        &self,
        session: &SessionId,
        kind: FactKind,
    ) -> Result<Option<String>, LookupError> {
        let store = self.snapshot(session).await?;
        Ok(store.get(kind).map(ToOwned::to_owned))
    }

    /// Renders the session's store, see [`FactStore::render`].
    #[inline]
    pub async fn render(
        &self,
        session: &SessionId,
    ) -> Result<String, LookupError> {
        Ok(self.snapshot(session).await?.render())
    }

    /// Stops the registry. Every later operation fails with
    /// [`LookupError`].
    #[inline]
    pub fn shutdown(&self) {
        self.handle.try_kill();
    }
}

#[derive(Debug)]
struct UpdateFact {
    session: SessionId,
    kind: FactKind,
    value: String,
    ack: oneshot::Sender<()>,
}

impl Message<RegistryState> for UpdateFact {
    fn apply(self, state: &mut RegistryState) {
        let span = trace_span!("update", session = %self.session);
        let _enter = span.enter();

        let store = state.store_mut(self.session);
        store.set(self.kind, self.value);
        trace!("stored {}", self.kind);
        self.ack.send(()).ok();
    }
}

#[derive(Debug)]
struct Snapshot {
    session: SessionId,
    reply: oneshot::Sender<FactStore>,
}

impl Message<RegistryState> for Snapshot {
    #[inline]
    fn apply(self, state: &mut RegistryState) {
        let store = state.store_mut(self.session).clone();
        self.reply.send(store).ok();
    }
}

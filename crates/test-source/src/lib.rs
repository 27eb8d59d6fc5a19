//! A local fake fact source for testing purpose.

mod preset;

use std::collections::{HashMap, VecDeque};
use std::error::Error as StdError;
use std::fmt::{self, Display, Formatter};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use pet_facts_model::{
    ErrorKind, FactKind, FactSource, FactSourceError, FetchResult,
};
use tokio::time::sleep;

pub use preset::*;

#[derive(Debug)]
pub struct Error {
    message: String,
    kind: ErrorKind,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for Error {}

impl FactSourceError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

#[derive(Default)]
struct Script {
    presets: HashMap<FactKind, VecDeque<PresetFetch>>,
    calls: HashMap<FactKind, usize>,
}

/// A local fake fact source for testing purpose.
///
/// Before fetching, push presets for the kinds you are going to request.
/// Each fetch consumes the next preset of its kind in push order. When a
/// kind has run out of presets, the fetch fails with a transport error.
///
/// Clones share the same script, so a test can hand one clone to the code
/// under test and keep another to push presets or inspect call counts.
#[derive(Clone, Default)]
pub struct ScriptedFactSource {
    script: Arc<Mutex<Script>>,
    delay: Option<Duration>,
}

impl ScriptedFactSource {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a preset for `kind`.
    pub fn push(&self, kind: FactKind, preset: PresetFetch) {
        self.lock()
            .presets
            .entry(kind)
            .or_default()
            .push_back(preset);
    }

    /// Delays every fetch by `duration` before it resolves.
    #[inline]
    pub fn set_delay(&mut self, duration: Duration) {
        self.delay = Some(duration);
    }

    /// Returns how many times `kind` has been fetched.
    pub fn calls(&self, kind: FactKind) -> usize {
        self.lock().calls.get(&kind).copied().unwrap_or(0)
    }

    fn lock(&self) -> MutexGuard<'_, Script> {
        // A panicking test must not poison the others sharing the script.
        self.script.lock().unwrap_or_else(|err| err.into_inner())
    }

    fn next_result(&self, kind: FactKind) -> FetchResult<Error> {
        let mut script = self.lock();
        *script.calls.entry(kind).or_default() += 1;
        let preset = script.presets.get_mut(&kind).and_then(VecDeque::pop_front);
        match preset {
            Some(PresetFetch::Value(value)) => Ok(value),
            Some(PresetFetch::TransportFailure(message)) => Err(Error {
                message,
                kind: ErrorKind::Transport,
            }),
            Some(PresetFetch::ShapeFailure(message)) => Err(Error {
                message,
                kind: ErrorKind::Shape,
            }),
            None => Err(Error {
                message: format!("no preset left for {kind}"),
                kind: ErrorKind::Transport,
            }),
        }
    }
}

impl FactSource for ScriptedFactSource {
    type Error = crate::Error;

    fn fetch(
        &self,
        kind: FactKind,
    ) -> impl Future<Output = FetchResult<Self::Error>> + Send + 'static {
        // Consume the preset eagerly so results follow call order, not
        // completion order.
        let result = self.next_result(kind);
        let delay = self.delay;
        async move {
            if let Some(delay) = delay {
                sleep(delay).await;
            }
            result
        }
    }
}

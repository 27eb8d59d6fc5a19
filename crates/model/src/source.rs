use std::error::Error;

use crate::{ErrorKind, FactKind};

/// The error type for a fact source.
pub trait FactSourceError: Error + Send + Sync + 'static {
    /// Returns the kind of this error.
    fn kind(&self) -> ErrorKind;
}

/// The result of a single fetch.
pub type FetchResult<E> = Result<String, E>;

/// A type that can fetch one fact of a given [`FactKind`] on demand.
///
/// Implementations perform exactly one attempt per call. Retrying, if
/// desired, is the caller's business. Every failure must come back as an
/// ordinary `Err` instead of a panic.
///
/// Like a model provider, a source should behave like a stateless object
/// once created, and be prepared for being dropped at any time.
pub trait FactSource: Send + Sync {
    /// The error type that may be returned by the source.
    type Error: FactSourceError;

    /// Fetches one fact of `kind`.
    ///
    /// The returned future must not borrow `self`.
    fn fetch(
        &self,
        kind: FactKind,
    ) -> impl Future<Output = FetchResult<Self::Error>> + Send + 'static;
}

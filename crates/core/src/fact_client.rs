use std::pin::Pin;
use std::sync::Arc;

use pet_facts_model::{FactKind, FactSource, FactSourceError};
use tracing::Instrument;

pub type FetchOutcome = Result<String, Box<dyn FactSourceError>>;
type BoxedFetchFuture = Pin<Box<dyn Future<Output = FetchOutcome> + Send>>;
type FetchFn = Arc<dyn Fn(FactKind) -> BoxedFetchFuture + Send + Sync>;

/// A wrapper around a fact source that provides a type-erased interface
/// for the other modules.
#[derive(Clone)]
pub struct FactClient {
    fetch_fn: FetchFn,
}

impl FactClient {
    #[inline]
    pub fn new<S: FactSource + 'static>(source: S) -> Self {
        // Erase `S` so that handlers and tools don't need a generic
        // parameter for it.
        let fetch_fn: FetchFn = Arc::new(move |kind| {
            let fut = source.fetch(kind);
            Box::pin(
                async move {
                    let result = fut.await;
                    trace!("fetch finished, ok: {}", result.is_ok());
                    result.map_err(|err| Box::new(err) as Box<dyn FactSourceError>)
                }
                .instrument(trace_span!("fact client fetch", %kind)),
            )
        });
        Self { fetch_fn }
    }

    /// Fetches one fact of `kind` from the underlying source.
    #[inline]
    pub async fn fetch(&self, kind: FactKind) -> FetchOutcome {
        (self.fetch_fn)(kind).await
    }
}

#[cfg(test)]
mod tests {
    use pet_facts_model::ErrorKind;
    use pet_facts_test_source::{PresetFetch, ScriptedFactSource};

    use super::*;

    #[tokio::test]
    async fn test_fetch_through_erased_source() {
        let source = ScriptedFactSource::new();
        source.push(FactKind::DogImage, PresetFetch::value("http://x/y.jpg"));
        source.push(
            FactKind::DogImage,
            PresetFetch::failure(ErrorKind::Transport, "HTTP 503"),
        );
        let client = FactClient::new(source.clone());

        assert_eq!(
            client.fetch(FactKind::DogImage).await.unwrap(),
            "http://x/y.jpg"
        );
        let err = client.fetch(FactKind::DogImage).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(err.to_string(), "HTTP 503");
        assert_eq!(source.calls(FactKind::DogImage), 2);
    }
}

use pet_facts_model::{ActionOutcome, FactKind, FactSource};
use tracing::Instrument;

use crate::fact_client::FactClient;
use crate::{ActionError, SessionId, SessionRegistry};

/// Fetches a fact and remembers it in the session's store.
///
/// A failed fetch is reported as a failed [`ActionOutcome`] and leaves the
/// store untouched. A successful fetch is only reported once the store
/// has acknowledged the new value. If the store cannot be reached, the
/// action fails with [`ActionError`] rather than claiming success.
#[derive(Clone)]
pub struct ActionHandler {
    client: FactClient,
    registry: SessionRegistry,
}

impl ActionHandler {
    /// Creates a handler that fetches from `source` and writes into
    /// `registry`.
    #[inline]
    pub fn new<S: FactSource + 'static>(
        source: S,
        registry: SessionRegistry,
    ) -> Self {
        Self {
            client: FactClient::new(source),
            registry,
        }
    }

    /// Returns the registry this handler writes into.
    #[inline]
    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    /// Runs one fetch-and-remember action for `kind` in `session`.
    ///
    /// The returned future is independent of `self`.
    pub fn fetch(
        &self,
        session: SessionId,
        kind: FactKind,
    ) -> impl Future<Output = Result<ActionOutcome, ActionError>> + Send + 'static
    {
        let client = self.client.clone();
        let registry = self.registry.clone();
        let span = debug_span!("action", session = %session, %kind);

        async move {
            let value = match client.fetch(kind).await {
                Ok(value) => value,
                Err(err) => {
                    warn!("failed to fetch {kind}: {err}");
                    let error = format!("{}: {err}", err.kind());
                    return Ok(ActionOutcome::failed(kind, error));
                }
            };

            registry.update(&session, kind, value.clone()).await?;
            debug!("remembered {kind}");
            Ok(ActionOutcome::fetched(kind, value))
        }
        .instrument(span)
    }
}

#[cfg(test)]
mod tests {
    use pet_facts_model::ErrorKind;
    use pet_facts_test_source::{PresetFetch, ScriptedFactSource};

    use super::*;

    fn setup() -> (ActionHandler, ScriptedFactSource, SessionId) {
        let source = ScriptedFactSource::new();
        let handler =
            ActionHandler::new(source.clone(), SessionRegistry::spawn());
        (handler, source, SessionId::from("test"))
    }

    #[tokio::test]
    async fn test_successful_dog_image_fetch() {
        let (handler, source, session) = setup();
        source.push(
            FactKind::DogImage,
            PresetFetch::value("http://example.com/dog.jpg"),
        );

        let outcome = handler
            .fetch(session.clone(), FactKind::DogImage)
            .await
            .unwrap();
        assert!(outcome.success());
        assert_eq!(outcome.value(), Some("http://example.com/dog.jpg"));
        assert_eq!(outcome.error(), None);

        let registry = handler.registry();
        assert_eq!(
            registry
                .get(&session, FactKind::DogImage)
                .await
                .unwrap()
                .as_deref(),
            Some("http://example.com/dog.jpg")
        );
        assert_eq!(registry.get(&session, FactKind::CatFact).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_transport_failure_leaves_store_unchanged() {
        let (handler, source, session) = setup();
        source.push(
            FactKind::DogImage,
            PresetFetch::failure(
                ErrorKind::Transport,
                "HTTP status server error (500 Internal Server Error)",
            ),
        );

        let outcome = handler
            .fetch(session.clone(), FactKind::DogImage)
            .await
            .unwrap();
        assert!(!outcome.success());
        assert_eq!(outcome.value(), None);
        assert!(!outcome.error().unwrap().is_empty());
        assert_eq!(outcome.message(), "Failed to fetch dog image.");

        let store = handler.registry().snapshot(&session).await.unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_shape_failure_leaves_store_unchanged() {
        let (handler, source, session) = setup();
        source.push(
            FactKind::CatFact,
            PresetFetch::failure(ErrorKind::Shape, "missing field `fact`"),
        );

        let outcome = handler
            .fetch(session.clone(), FactKind::CatFact)
            .await
            .unwrap();
        assert!(!outcome.success());
        assert!(outcome.error().unwrap().contains("missing field `fact`"));

        let store = handler.registry().snapshot(&session).await.unwrap();
        assert_eq!(store.get(FactKind::CatFact), None);
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_value() {
        let (handler, source, session) = setup();
        source.push(
            FactKind::CatFact,
            PresetFetch::value("Cats sleep 70% of their lives."),
        );
        source.push(
            FactKind::CatFact,
            PresetFetch::failure(ErrorKind::Transport, "connection reset"),
        );

        let first = handler
            .fetch(session.clone(), FactKind::CatFact)
            .await
            .unwrap();
        assert!(first.success());
        let second = handler
            .fetch(session.clone(), FactKind::CatFact)
            .await
            .unwrap();
        assert!(!second.success());

        assert_eq!(
            handler
                .registry()
                .get(&session, FactKind::CatFact)
                .await
                .unwrap()
                .as_deref(),
            Some("Cats sleep 70% of their lives.")
        );
    }

    #[tokio::test]
    async fn test_success_after_failures_is_stored() {
        let (handler, source, session) = setup();
        for _ in 0..3 {
            source.push(
                FactKind::DogImage,
                PresetFetch::failure(ErrorKind::Shape, "bad marker"),
            );
        }
        source.push(FactKind::DogImage, PresetFetch::value("http://d/1.jpg"));
        source.push(FactKind::DogImage, PresetFetch::value("http://d/2.jpg"));

        for _ in 0..5 {
            handler
                .fetch(session.clone(), FactKind::DogImage)
                .await
                .unwrap();
        }

        assert_eq!(
            handler
                .registry()
                .get(&session, FactKind::DogImage)
                .await
                .unwrap()
                .as_deref(),
            Some("http://d/2.jpg")
        );
        assert_eq!(source.calls(FactKind::DogImage), 5);
    }

    #[tokio::test]
    async fn test_outcome_invariant_holds() {
        let (handler, source, session) = setup();
        source.push(FactKind::CatFact, PresetFetch::value("Cats purr."));
        source.push(
            FactKind::CatFact,
            PresetFetch::failure(ErrorKind::Transport, "timeout"),
        );

        for _ in 0..2 {
            let outcome = handler
                .fetch(session.clone(), FactKind::CatFact)
                .await
                .unwrap();
            assert_eq!(
                outcome.success(),
                outcome.value().is_some() && outcome.error().is_none()
            );
            assert_eq!(
                !outcome.success(),
                outcome.error().is_some() && outcome.value().is_none()
            );
        }
    }

    #[tokio::test]
    async fn test_unreachable_store_fails_closed() {
        let (handler, source, session) = setup();
        source.push(FactKind::CatFact, PresetFetch::value("Cats purr."));
        handler.registry().shutdown();

        let err = handler
            .fetch(session.clone(), FactKind::CatFact)
            .await
            .unwrap_err();
        let ActionError::Lookup(err) = err;
        assert_eq!(err.session(), &session);
        assert_eq!(source.calls(FactKind::CatFact), 1);
    }

    #[tokio::test]
    async fn test_concurrent_sessions_are_independent() {
        let (handler, mut source, _) = setup();
        source.set_delay(std::time::Duration::from_millis(5));
        let handler = ActionHandler::new(source.clone(), handler.registry().clone());
        source.push(FactKind::CatFact, PresetFetch::value("for alice"));
        source.push(FactKind::CatFact, PresetFetch::value("for bob"));

        let alice = SessionId::from("alice");
        let bob = SessionId::from("bob");
        let (a, b) = tokio::join!(
            handler.fetch(alice.clone(), FactKind::CatFact),
            handler.fetch(bob.clone(), FactKind::CatFact),
        );
        assert!(a.unwrap().success());
        assert!(b.unwrap().success());

        let registry = handler.registry();
        assert_eq!(
            registry.get(&alice, FactKind::CatFact).await.unwrap().as_deref(),
            Some("for alice")
        );
        assert_eq!(
            registry.get(&bob, FactKind::CatFact).await.unwrap().as_deref(),
            Some("for bob")
        );
    }
}

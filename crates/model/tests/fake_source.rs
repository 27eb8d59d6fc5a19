use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::time::Duration;

use pet_facts_model::{
    ErrorKind, FactKind, FactSource, FactSourceError, FactStore, FetchResult,
};
use tokio::time::sleep;

#[derive(Debug)]
struct FakeSourceError(ErrorKind);

impl Display for FakeSourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Error for FakeSourceError {}

impl FactSourceError for FakeSourceError {
    fn kind(&self) -> ErrorKind {
        self.0
    }
}

/// Answers dog requests after a short delay and refuses cat requests.
struct FakeSource {
    delay: Duration,
}

impl FactSource for FakeSource {
    type Error = FakeSourceError;

    fn fetch(
        &self,
        kind: FactKind,
    ) -> impl Future<Output = FetchResult<Self::Error>> + Send + 'static {
        let delay = self.delay;
        async move {
            sleep(delay).await;
            match kind {
                FactKind::DogImage => Ok("http://example.com/dog.jpg".to_owned()),
                FactKind::CatFact => Err(FakeSourceError(ErrorKind::Shape)),
            }
        }
    }
}

#[tokio::test]
async fn test_fetch_future_outlives_source() {
    let source = FakeSource {
        delay: Duration::from_millis(10),
    };
    let dog_fut = source.fetch(FactKind::DogImage);
    let cat_fut = source.fetch(FactKind::CatFact);
    drop(source);

    let mut store = FactStore::new();
    if let Ok(value) = dog_fut.await {
        store.set(FactKind::DogImage, value);
    }
    match cat_fut.await {
        Ok(value) => store.set(FactKind::CatFact, value),
        Err(err) => assert_eq!(err.kind(), ErrorKind::Shape),
    }

    assert_eq!(
        store.get(FactKind::DogImage),
        Some("http://example.com/dog.jpg")
    );
    assert_eq!(store.get(FactKind::CatFact), None);
}

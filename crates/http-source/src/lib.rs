//! A fact source backed by public HTTP APIs.

#[macro_use]
extern crate tracing;

mod config;
mod proto;

use std::error::Error as StdError;
use std::fmt::{self, Display};
use std::sync::Arc;

use mime::Mime;
use pet_facts_model::{
    ErrorKind, FactKind, FactSource, FactSourceError, FetchResult,
};
use reqwest::{Client, header};
use tracing::Instrument;

pub use config::{
    DEFAULT_CAT_FACT_URL, DEFAULT_DOG_IMAGE_URL, HttpSourceConfig,
    HttpSourceConfigBuilder,
};

/// Error type for [`HttpFactSource`].
#[derive(Debug)]
pub struct Error {
    message: String,
    kind: ErrorKind,
}

impl Error {
    fn new(message: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }

    /// Returns the error message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl StdError for Error {}

impl FactSourceError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

/// A fact source that issues one unauthenticated GET per fetch.
///
/// There is no retry and no timeout beyond the HTTP client's defaults.
#[derive(Clone, Debug)]
pub struct HttpFactSource {
    client: Client,
    config: Arc<HttpSourceConfig>,
}

impl HttpFactSource {
    /// Creates a new `HttpFactSource` with the given configuration.
    #[inline]
    pub fn new(config: HttpSourceConfig) -> Self {
        Self {
            client: Client::new(),
            config: Arc::new(config),
        }
    }

    /// Returns the configuration of this source.
    #[inline]
    pub fn config(&self) -> &HttpSourceConfig {
        &self.config
    }
}

impl Default for HttpFactSource {
    #[inline]
    fn default() -> Self {
        Self::new(HttpSourceConfig::default())
    }
}

impl FactSource for HttpFactSource {
    type Error = Error;

    fn fetch(
        &self,
        kind: FactKind,
    ) -> impl Future<Output = FetchResult<Self::Error>> + Send + 'static {
        let url = self.config.endpoint(kind).to_owned();
        let resp_fut = self
            .client
            .get(&url)
            .header(header::ACCEPT, "application/json")
            .header(header::USER_AGENT, &self.config.user_agent)
            .send();

        async move {
            trace!("requesting {url}");
            let resp = resp_fut.await.map_err(|err| {
                Error::new(format!("{err}"), ErrorKind::Transport)
            })?;
            let status = resp.status();
            if !status.is_success() {
                return Err(Error::new(
                    format!("HTTP status {status}"),
                    ErrorKind::Transport,
                ));
            }

            if let Some(value) = resp.headers().get(header::CONTENT_TYPE) {
                let Ok(content_type) = value.to_str() else {
                    return Err(Error::new(
                        "Unreadable content type",
                        ErrorKind::Shape,
                    ));
                };
                let is_json = content_type
                    .parse()
                    .map(|m: Mime| {
                        m.subtype() == mime::JSON
                            || m.suffix() == Some(mime::JSON)
                    })
                    .unwrap_or(false);
                if !is_json {
                    return Err(Error::new(
                        format!("Unexpected content type: {content_type}"),
                        ErrorKind::Shape,
                    ));
                }
            }

            let body = resp.bytes().await.map_err(|err| {
                Error::new(format!("{err}"), ErrorKind::Transport)
            })?;

            // Here we got a complete body from a successful response.
            proto::extract_fact(kind, &body).map_err(|reason| {
                Error::new(
                    format!("Malformed {kind} response: {reason}"),
                    ErrorKind::Shape,
                )
            })
        }
        .instrument(debug_span!("fact fetch", %kind))
    }
}

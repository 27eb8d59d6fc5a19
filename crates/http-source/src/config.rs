use pet_facts_model::FactKind;

/// The default endpoint for random dog images.
pub const DEFAULT_DOG_IMAGE_URL: &str =
    "https://dog.ceo/api/breeds/image/random";

/// The default endpoint for random cat facts.
pub const DEFAULT_CAT_FACT_URL: &str = "https://catfact.ninja/fact";

/// Builder for [`HttpSourceConfig`].
#[derive(Clone, Default, Debug, PartialEq, Eq, Hash)]
pub struct HttpSourceConfigBuilder {
    dog_image_url: Option<String>,
    cat_fact_url: Option<String>,
    user_agent: Option<String>,
}

impl HttpSourceConfigBuilder {
    /// Creates a builder that uses the public endpoints by default.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the endpoint that serves dog images.
    #[inline]
    pub fn with_dog_image_url<S: Into<String>>(mut self, url: S) -> Self {
        self.dog_image_url = Some(url.into());
        self
    }

    /// Sets the endpoint that serves cat facts.
    #[inline]
    pub fn with_cat_fact_url<S: Into<String>>(mut self, url: S) -> Self {
        self.cat_fact_url = Some(url.into());
        self
    }

    /// Sets a custom `User-Agent` header.
    #[inline]
    pub fn with_user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Builds the configuration.
    #[inline]
    pub fn build(self) -> HttpSourceConfig {
        HttpSourceConfig {
            dog_image_url: self
                .dog_image_url
                .unwrap_or_else(|| DEFAULT_DOG_IMAGE_URL.to_string()),
            cat_fact_url: self
                .cat_fact_url
                .unwrap_or_else(|| DEFAULT_CAT_FACT_URL.to_string()),
            user_agent: self.user_agent.unwrap_or_else(|| {
                concat!("pet-facts/", env!("CARGO_PKG_VERSION")).to_string()
            }),
        }
    }
}

/// Configuration for the HTTP fact source.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HttpSourceConfig {
    pub(crate) dog_image_url: String,
    pub(crate) cat_fact_url: String,
    pub(crate) user_agent: String,
}

impl HttpSourceConfig {
    /// Returns the endpoint used for `kind`.
    #[inline]
    pub fn endpoint(&self, kind: FactKind) -> &str {
        match kind {
            FactKind::DogImage => &self.dog_image_url,
            FactKind::CatFact => &self.cat_fact_url,
        }
    }
}

impl Default for HttpSourceConfig {
    #[inline]
    fn default() -> Self {
        HttpSourceConfigBuilder::new().build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HttpSourceConfig::default();
        assert_eq!(config.endpoint(FactKind::DogImage), DEFAULT_DOG_IMAGE_URL);
        assert_eq!(config.endpoint(FactKind::CatFact), DEFAULT_CAT_FACT_URL);
        assert!(config.user_agent.starts_with("pet-facts/"));
    }

    #[test]
    fn test_overrides() {
        let config = HttpSourceConfigBuilder::new()
            .with_cat_fact_url("http://localhost:1234/fact")
            .with_user_agent("test-agent")
            .build();
        assert_eq!(config.endpoint(FactKind::DogImage), DEFAULT_DOG_IMAGE_URL);
        assert_eq!(
            config.endpoint(FactKind::CatFact),
            "http://localhost:1234/fact"
        );
        assert_eq!(config.user_agent, "test-agent");
    }
}

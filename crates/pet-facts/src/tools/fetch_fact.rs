use pet_facts_core::tool::{Tool, ToolResult};
use pet_facts_core::{ActionHandler, SessionId};
use pet_facts_model::FactKind;
use schemars::{JsonSchema, schema_for};
use serde::Deserialize;
use serde_json::Value;

/// Both sources take no parameters.
#[derive(Deserialize, JsonSchema)]
pub struct FetchFactParameters {}

/// A tool for fetching a fresh fact and remembering it in the session.
pub struct FetchFactTool {
    kind: FactKind,
    handler: ActionHandler,
    parameter_schema: Value,
}

impl FetchFactTool {
    /// Creates a tool that fetches facts of `kind` through `handler`.
    #[inline]
    pub fn new(kind: FactKind, handler: ActionHandler) -> Self {
        FetchFactTool {
            kind,
            handler,
            parameter_schema: schema_for!(FetchFactParameters).to_value(),
        }
    }

    /// Creates the `fetch_dog_image` tool.
    #[inline]
    pub fn dog_image(handler: ActionHandler) -> Self {
        Self::new(FactKind::DogImage, handler)
    }

    /// Creates the `fetch_cat_fact` tool.
    #[inline]
    pub fn cat_fact(handler: ActionHandler) -> Self {
        Self::new(FactKind::CatFact, handler)
    }
}

impl Tool for FetchFactTool {
    type Input = FetchFactParameters;

    fn name(&self) -> &str {
        match self.kind {
            FactKind::DogImage => "fetch_dog_image",
            FactKind::CatFact => "fetch_cat_fact",
        }
    }

    fn description(&self) -> &str {
        match self.kind {
            FactKind::DogImage => {
                r#"
Fetches the URL of a random dog picture and remembers it as the latest dog image.
Use it whenever the user wants to see a dog."#
            }
            FactKind::CatFact => {
                r#"
Fetches a random fact about cats and remembers it as the latest cat fact.
Use it whenever the user asks for cat trivia."#
            }
        }
    }

    fn parameter_schema(&self) -> &Value {
        &self.parameter_schema
    }

    #[allow(clippy::manual_async_fn)]
    fn execute(
        &self,
        session: SessionId,
        _input: FetchFactParameters,
    ) -> impl Future<Output = ToolResult> + Send + 'static {
        let fut = self.handler.fetch(session, self.kind);
        async move { Ok(fut.await?) }
    }
}

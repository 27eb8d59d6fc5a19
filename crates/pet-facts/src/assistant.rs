use pet_facts_core::tool::{ToolCall, ToolDefinition, ToolResult, Toolset};
use pet_facts_core::{
    ActionError, ActionHandler, LookupError, SessionId, SessionRegistry,
};
use pet_facts_model::{ActionOutcome, FactKind, FactSource, FactStore};

use crate::tools::FetchFactTool;

const FACTS_PLACEHOLDER: &str = "{{FACTS}}";

type MakeHandler = Box<dyn FnOnce(SessionRegistry) -> ActionHandler + Send>;

/// An assistant builder.
///
/// See [`Assistant`].
pub struct AssistantBuilder {
    make_handler: MakeHandler,
    registry: Option<SessionRegistry>,
    system_prompt: Option<String>,
}

impl AssistantBuilder {
    /// Creates an assistant builder with a specified fact source.
    pub fn with_fact_source<S: FactSource + 'static>(source: S) -> Self {
        let make_handler: MakeHandler =
            Box::new(move |registry| ActionHandler::new(source, registry));
        Self {
            make_handler,
            registry: None,
            system_prompt: None,
        }
    }

    /// Uses an existing registry instead of spawning a new one, so that
    /// several assistants can share the same session stores.
    #[inline]
    pub fn with_registry(mut self, registry: SessionRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Sets the system prompt template.
    ///
    /// Every occurrence of `{{FACTS}}` is replaced with the session's
    /// rendered facts, see [`Assistant::render_prompt`].
    #[inline]
    pub fn with_system_prompt<S: Into<String>>(mut self, prompt: S) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Builds a new assistant.
    ///
    /// Must be called within a Tokio runtime unless a registry was given.
    pub fn build(self) -> Assistant {
        let registry = self.registry.unwrap_or_else(SessionRegistry::spawn);
        let handler = (self.make_handler)(registry);
        let toolset = Toolset::default()
            .with_tool(FetchFactTool::dog_image(handler.clone()))
            .with_tool(FetchFactTool::cat_fact(handler.clone()));
        let system_prompt = self
            .system_prompt
            .unwrap_or_else(|| include_str!("./system_prompt.md").to_owned());

        Assistant {
            handler,
            toolset,
            system_prompt,
        }
    }
}

/// An assistant that fetches pet facts on behalf of any number of
/// sessions, and remembers the latest ones per session.
///
/// It holds a fully configured action handler and toolset. Orchestration
/// layers usually call [`Assistant::call_tool`] with requests from a model,
/// and [`Assistant::render_prompt`] before each model turn.
#[derive(Clone)]
pub struct Assistant {
    handler: ActionHandler,
    toolset: Toolset,
    system_prompt: String,
}

impl Assistant {
    /// Fetches a fact of `kind` and remembers it in `session`.
    #[inline]
    pub async fn fetch(
        &self,
        session: &SessionId,
        kind: FactKind,
    ) -> Result<ActionOutcome, ActionError> {
        self.handler.fetch(session.clone(), kind).await
    }

    /// Dispatches a tool call on behalf of `session`.
    #[inline]
    pub async fn call_tool(
        &self,
        session: &SessionId,
        call: ToolCall,
    ) -> ToolResult {
        self.toolset.call(session, call).await
    }

    /// Returns the definitions of the built-in tools.
    #[inline]
    pub fn tool_definitions(&self) -> Vec<ToolDefinition> {
        self.toolset.definitions()
    }

    /// Returns a copy of the facts remembered for `session`.
    #[inline]
    pub async fn facts(
        &self,
        session: &SessionId,
    ) -> Result<FactStore, LookupError> {
        self.handler.registry().snapshot(session).await
    }

    /// Renders the system prompt for `session`.
    pub async fn render_prompt(
        &self,
        session: &SessionId,
    ) -> Result<String, LookupError> {
        let facts = self.handler.registry().render(session).await?;
        Ok(self.system_prompt.replace(FACTS_PLACEHOLDER, &facts))
    }

    /// Stops the underlying registry.
    ///
    /// Assistants sharing the same registry are stopped as well.
    #[inline]
    pub fn shutdown(&self) {
        self.handler.registry().shutdown();
    }
}

use std::collections::BTreeMap;
use std::pin::Pin;
use std::sync::Arc;

use super::object::{ToolObject, ToolObjectImpl};
use super::{Error, Tool, ToolCall, ToolDefinition, ToolResult};
use crate::SessionId;

/// An object that holds a set of tools and dispatches calls to them.
#[derive(Clone, Default)]
pub struct Toolset {
    tools: BTreeMap<String, Arc<dyn ToolObject>>,
}

impl Toolset {
    /// Registers a tool, replacing any previous tool with the same name.
    pub fn add_tool<T: Tool>(&mut self, tool: T) {
        let name = tool.name().to_owned();
        if self
            .tools
            .insert(name, Arc::new(ToolObjectImpl(tool)))
            .is_some()
        {
            debug!("replaced an existing tool");
        }
    }

    /// Registers a tool, builder style.
    #[inline]
    pub fn with_tool<T: Tool>(mut self, tool: T) -> Self {
        self.add_tool(tool);
        self
    }

    /// Returns the definitions of all tools, ordered by name.
    #[inline]
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .values()
            .map(|tool| ToolDefinition {
                name: tool.name().to_owned(),
                description: tool.description().to_owned(),
                parameters: tool.parameter_schema().clone(),
            })
            .collect()
    }

    /// Dispatches the calls, handing each call id and its future to
    /// `spawner`.
    ///
    /// Calls to unknown tools are still handed over, with a future that
    /// resolves to a `NotFound` error, so that every call gets an answer.
    pub fn handle_calls<S>(
        &self,
        session: &SessionId,
        calls: Vec<ToolCall>,
        spawner: S,
    ) where
        S: FnMut(String, Pin<Box<dyn Future<Output = ToolResult> + Send>>),
    {
        let mut spawner = spawner;

        let span = debug_span!("toolset", session = %session);
        let _enter = span.enter();

        for call in calls {
            let id = call.id;
            let Some(tool) = self.tools.get(&call.name) else {
                warn!("tool not found: {}", call.name);
                let err = Error::not_found().with_reason(format!(
                    "no tool named `{}`",
                    call.name
                ));
                spawner(id, Box::pin(std::future::ready(Err(err))));
                continue;
            };

            let arguments = call.arguments;
            trace!("spawning a tool ({id}) with args: {arguments:?}");
            spawner(id, Arc::clone(tool).execute(session.clone(), arguments));
        }
    }

    /// Dispatches a single call and waits for its result.
    pub async fn call(&self, session: &SessionId, call: ToolCall) -> ToolResult {
        let mut pending = None;
        self.handle_calls(session, vec![call], |_, fut| pending = Some(fut));
        match pending {
            Some(fut) => fut.await,
            None => Err(Error::execution_error()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::future::ready;

    use pet_facts_model::{ActionOutcome, FactKind};
    use serde::Deserialize;
    use serde_json::{Value, json};

    use super::*;
    use crate::tool::ErrorKind;

    static EMPTY_SCHEMA: &Value = &Value::Null;

    #[derive(Deserialize)]
    struct EchoInput {
        text: String,
    }

    struct EchoTool;

    impl Tool for EchoTool {
        type Input = EchoInput;

        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Pretends to have fetched the given text"
        }

        fn parameter_schema(&self) -> &Value {
            EMPTY_SCHEMA
        }

        fn execute(
            &self,
            _session: SessionId,
            input: Self::Input,
        ) -> impl Future<Output = ToolResult> + Send + 'static {
            ready(Ok(ActionOutcome::fetched(FactKind::CatFact, input.text)))
        }
    }

    fn call(name: &str, arguments: Value) -> ToolCall {
        ToolCall {
            id: "tool:1".to_owned(),
            name: name.to_owned(),
            arguments,
        }
    }

    #[test]
    fn test_handle_calls() {
        let toolset = Toolset::default().with_tool(EchoTool);
        let session = SessionId::from("s");

        let mut spawned_ids: Vec<String> = vec![];
        toolset.handle_calls(
            &session,
            vec![call("echo", json!({ "text": "hi" }))],
            |id, _future| spawned_ids.push(id),
        );
        assert_eq!(spawned_ids, vec!["tool:1".to_owned()]);

        // Unknown tools are answered too.
        let mut spawned_ids: Vec<String> = vec![];
        toolset.handle_calls(
            &session,
            vec![call("read_file", json!({}))],
            |id, _future| spawned_ids.push(id),
        );
        assert_eq!(spawned_ids, vec!["tool:1".to_owned()]);
    }

    #[tokio::test]
    async fn test_call_results() {
        let toolset = Toolset::default().with_tool(EchoTool);
        let session = SessionId::from("s");

        let outcome = toolset
            .call(&session, call("echo", json!({ "text": "Cats purr." })))
            .await
            .unwrap();
        assert_eq!(outcome.value(), Some("Cats purr."));

        let err = toolset
            .call(&session, call("echo", json!({ "txt": 1 })))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);

        let err = toolset
            .call(&session, call("missing", Value::Null))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.reason(), "no tool named `missing`");
    }

    #[test]
    fn test_definitions() {
        let toolset = Toolset::default().with_tool(EchoTool);
        let definitions = toolset.definitions();
        assert_eq!(definitions.len(), 1);
        assert_eq!(definitions[0].name, "echo");
        assert_eq!(definitions[0].parameters, Value::Null);
    }
}

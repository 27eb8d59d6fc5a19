//! Tool call supports.
//!
//! A tool is the unit of work an orchestration layer can invoke on behalf
//! of a model. Tools are registered in a [`Toolset`], which advertises
//! their definitions and dispatches incoming [`ToolCall`]s by name.

mod error;
mod object;
mod toolset;

use pet_facts_model::ActionOutcome;
pub use pet_facts_model::{ToolCall, ToolDefinition};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::SessionId;
pub use error::{Error, ErrorKind};
pub use toolset::Toolset;

/// The result of a tool call.
pub type ToolResult = Result<ActionOutcome, Error>;

/// A tool that can be called by the model.
///
/// Implementations of this trait should be stateless. Anything a tool
/// needs, such as the handler it delegates to, should be an immutable
/// part of the tool, set during initialization and cloned into the
/// future when executing. Per-session state is addressed through the
/// `session` argument instead.
pub trait Tool: Send + Sync + 'static {
    /// The type of input that the tool accepts.
    type Input: DeserializeOwned;

    /// Returns the name of the tool.
    fn name(&self) -> &str;

    /// Returns the description of the tool.
    fn description(&self) -> &str;

    /// Returns the parameter schema of the tool.
    fn parameter_schema(&self) -> &Value;

    /// Executes the tool with the given input on behalf of `session`.
    ///
    /// This method must return a future that is fully independent of
    /// `self`.
    fn execute(
        &self,
        session: SessionId,
        input: Self::Input,
    ) -> impl Future<Output = ToolResult> + Send + 'static;
}

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A request from an orchestration layer to call a tool.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ToolCall {
    /// The unique identifier for the tool call.
    pub id: String,
    /// The name of the tool to call.
    pub name: String,
    /// The arguments, usually a JSON object.
    #[serde(default)]
    pub arguments: Value,
}

/// Describes a tool that an orchestration layer may offer to a model.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Name of the tool.
    pub name: String,
    /// Description of the tool.
    pub description: String,
    /// Parameters definition of the tool.
    ///
    /// This is typically a [JSON schema](https://json-schema.org/).
    pub parameters: Value,
}

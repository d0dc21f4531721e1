// Routes tool calls to their handlers and shapes the result for the caller

use crate::error::ToolError;
use crate::protocol::{CallToolResult, ListToolsResult, ToolContent};
use crate::tools::ToolRegistry;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, error};

/// Tool-call front door.
///
/// Never fails: every error raised while resolving, validating or running a
/// tool comes back as an error-flagged text result.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
}

impl Dispatcher {
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// The full catalog, unfiltered.
    pub fn list_tools(&self) -> ListToolsResult {
        ListToolsResult {
            tools: self.registry.list_schemas(),
        }
    }

    pub async fn call_tool(&self, name: &str, arguments: Value) -> CallToolResult {
        match self.try_call(name, arguments).await {
            Ok(text) => CallToolResult {
                content: vec![ToolContent::text(text)],
                is_error: None,
            },
            Err(e) => {
                error!(tool = name, error = %e, "Tool call failed");
                CallToolResult {
                    content: vec![ToolContent::error(e.to_string())],
                    is_error: Some(true),
                }
            }
        }
    }

    async fn try_call(&self, name: &str, arguments: Value) -> Result<String, ToolError> {
        let tool = self
            .registry
            .get(name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;

        let arguments = match arguments {
            Value::Null => Value::Object(Map::new()),
            Value::Object(map) => Value::Object(map),
            other => {
                return Err(ToolError::Validation(format!(
                    "arguments must be an object, got {}",
                    json_type(&other)
                )))
            }
        };

        debug!(tool = name, "Calling tool");
        let result = tool.execute(arguments).await?;
        serde_json::to_string_pretty(&result).map_err(ToolError::Encode)
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::ToolSchema;
    use crate::tools::{json_schema_object, Tool};
    use serde_json::json;

    struct EchoTool;

    #[async_trait::async_trait]
    impl Tool for EchoTool {
        fn schema(&self) -> ToolSchema {
            ToolSchema {
                name: "echo".to_string(),
                description: "Echo the arguments".to_string(),
                input_schema: json_schema_object(json!({}), vec![]),
            }
        }

        async fn execute(&self, arguments: Value) -> Result<Value, ToolError> {
            Ok(arguments)
        }
    }

    fn dispatcher() -> Dispatcher {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool)).unwrap();
        Dispatcher::new(registry)
    }

    #[tokio::test]
    async fn test_unknown_tool_becomes_error_text() {
        let result = dispatcher().call_tool("nope", json!({})).await;
        assert_eq!(result.is_error, Some(true));
        assert_eq!(result.text(), Some("Error: Unknown tool: nope"));
    }

    #[tokio::test]
    async fn test_null_arguments_become_empty_object() {
        let result = dispatcher().call_tool("echo", Value::Null).await;
        assert_eq!(result.is_error, None);
        assert_eq!(result.text(), Some("{}"));
    }

    #[tokio::test]
    async fn test_non_object_arguments_are_rejected() {
        let result = dispatcher().call_tool("echo", json!([1, 2])).await;
        assert_eq!(
            result.text(),
            Some("Error: Invalid arguments: arguments must be an object, got an array")
        );
    }

    #[tokio::test]
    async fn test_result_is_pretty_printed_without_escaping() {
        let result = dispatcher()
            .call_tool("echo", json!({"name": "Société Générale", "id": 1}))
            .await;
        assert_eq!(
            result.text(),
            Some("{\n  \"name\": \"Société Générale\",\n  \"id\": 1\n}")
        );
    }

    #[test]
    fn test_list_tools_returns_catalog() {
        let tools = dispatcher().list_tools().tools;
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, "echo");
    }
}

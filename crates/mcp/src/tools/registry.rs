// MCP tool registry: the catalog of tools and their handlers

use crate::error::{RegistryError, ToolError};
use crate::protocol::ToolSchema;
use futures_util::future::BoxFuture;
use pennylane_sdk::PennylaneClient;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Tool executor trait
#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool schema for MCP
    fn schema(&self) -> ToolSchema;

    /// Execute the tool with the caller's argument object
    async fn execute(&self, arguments: Value) -> Result<Value, ToolError>;
}

pub type ToolFuture<'a> = BoxFuture<'a, Result<Value, ToolError>>;

/// Translates arguments into exactly one Pennylane API call.
pub type ToolHandler = for<'a> fn(&'a PennylaneClient, Value) -> ToolFuture<'a>;

/// A tool's schema paired with the handler that serves it.
///
/// Declaring both in one place keeps the listed catalog and the routing
/// table from drifting apart.
#[derive(Clone)]
pub struct ToolDefinition {
    pub schema: ToolSchema,
    pub handler: ToolHandler,
}

impl ToolDefinition {
    pub fn new(
        name: &str,
        description: &str,
        input_schema: Value,
        handler: ToolHandler,
    ) -> Self {
        Self {
            schema: ToolSchema {
                name: name.to_string(),
                description: description.to_string(),
                input_schema,
            },
            handler,
        }
    }

    /// Bind the definition to the client its handler will use.
    pub fn bind(self, client: PennylaneClient) -> ApiTool {
        ApiTool {
            schema: self.schema,
            handler: self.handler,
            client,
        }
    }
}

/// Tool backed by the shared Pennylane client.
pub struct ApiTool {
    schema: ToolSchema,
    handler: ToolHandler,
    client: PennylaneClient,
}

#[async_trait::async_trait]
impl Tool for ApiTool {
    fn schema(&self) -> ToolSchema {
        self.schema.clone()
    }

    async fn execute(&self, arguments: Value) -> Result<Value, ToolError> {
        (self.handler)(&self.client, arguments).await
    }
}

/// Deserialize a tool's argument object into its typed parameters.
///
/// Schema defaults are applied by the target type's serde defaults; missing
/// required fields surface as [`ToolError::Validation`].
pub fn parse_args<T: DeserializeOwned>(arguments: Value) -> Result<T, ToolError> {
    serde_json::from_value(arguments).map_err(|e| ToolError::Validation(e.to_string()))
}

/// Tool registry for managing available tools
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Register a tool. Names must be unique.
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> Result<(), RegistryError> {
        let name = tool.schema().name;
        if self.index.contains_key(&name) {
            return Err(RegistryError::Duplicate(name));
        }
        self.index.insert(name, self.tools.len());
        self.tools.push(tool);
        Ok(())
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.index.get(name).map(|&i| self.tools[i].clone())
    }

    /// List all tool schemas, in registration order
    pub fn list_schemas(&self) -> Vec<ToolSchema> {
        self.tools.iter().map(|t| t.schema()).collect()
    }

    /// Check if a tool exists
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Check that the listed catalog and the routing table agree.
    ///
    /// Every routing key must resolve to a tool whose schema carries the same
    /// name, and every schema must be an object schema whose `required`
    /// entries are declared properties.
    pub fn verify(&self) -> Result<(), RegistryError> {
        if self.index.len() != self.tools.len() {
            return Err(RegistryError::InvalidSchema {
                tool: "<registry>".to_string(),
                reason: format!(
                    "{} routing entries for {} tools",
                    self.index.len(),
                    self.tools.len()
                ),
            });
        }

        for (key, &i) in &self.index {
            let schema = self.tools[i].schema();
            if &schema.name != key {
                return Err(RegistryError::NameMismatch {
                    key: key.clone(),
                    schema_name: schema.name,
                });
            }
            verify_input_schema(&schema)?;
        }
        Ok(())
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn verify_input_schema(schema: &ToolSchema) -> Result<(), RegistryError> {
    let invalid = |reason: String| RegistryError::InvalidSchema {
        tool: schema.name.clone(),
        reason,
    };

    if schema.input_schema.get("type").and_then(Value::as_str) != Some("object") {
        return Err(invalid("input schema must have type \"object\"".to_string()));
    }

    let properties = schema
        .input_schema
        .get("properties")
        .and_then(Value::as_object)
        .ok_or_else(|| invalid("input schema has no properties object".to_string()))?;

    let required = match schema.input_schema.get("required") {
        None => return Ok(()),
        Some(Value::Array(required)) => required,
        Some(_) => return Err(invalid("\"required\" must be an array".to_string())),
    };

    for entry in required {
        let field = entry
            .as_str()
            .ok_or_else(|| invalid("\"required\" entries must be strings".to_string()))?;
        if !properties.contains_key(field) {
            return Err(invalid(format!("required field {} is not declared", field)));
        }
    }
    Ok(())
}

// Helper functions for creating tool schemas

pub fn json_schema_object(properties: Value, required: Vec<&str>) -> Value {
    serde_json::json!({
        "type": "object",
        "properties": properties,
        "required": required
    })
}

pub fn json_schema_string(description: &str) -> Value {
    serde_json::json!({
        "type": "string",
        "description": description
    })
}

pub fn json_schema_integer(description: &str) -> Value {
    serde_json::json!({
        "type": "integer",
        "description": description
    })
}

pub fn json_schema_boolean(description: &str) -> Value {
    serde_json::json!({
        "type": "boolean",
        "description": description
    })
}

pub fn json_schema_array(items: Value, description: &str) -> Value {
    serde_json::json!({
        "type": "array",
        "items": items,
        "description": description
    })
}

/// Attach a documented default to a property schema.
pub fn with_default(mut schema: Value, default: impl Into<Value>) -> Value {
    if let Some(object) = schema.as_object_mut() {
        object.insert("default".to_string(), default.into());
    }
    schema
}

/// Restrict a property schema to a fixed set of values.
pub fn with_enum(mut schema: Value, values: &[&str]) -> Value {
    if let Some(object) = schema.as_object_mut() {
        object.insert("enum".to_string(), serde_json::json!(values));
    }
    schema
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct StaticTool {
        schema: ToolSchema,
    }

    #[async_trait::async_trait]
    impl Tool for StaticTool {
        fn schema(&self) -> ToolSchema {
            self.schema.clone()
        }

        async fn execute(&self, arguments: Value) -> Result<Value, ToolError> {
            Ok(arguments)
        }
    }

    fn static_tool(name: &str, input_schema: Value) -> Arc<dyn Tool> {
        Arc::new(StaticTool {
            schema: ToolSchema {
                name: name.to_string(),
                description: "test".to_string(),
                input_schema,
            },
        })
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let mut registry = ToolRegistry::new();
        let schema = json_schema_object(json!({}), vec![]);
        registry.register(static_tool("echo", schema.clone())).unwrap();

        let err = registry.register(static_tool("echo", schema)).unwrap_err();
        assert!(matches!(err, RegistryError::Duplicate(name) if name == "echo"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_verify_rejects_undeclared_required_field() {
        let mut registry = ToolRegistry::new();
        registry
            .register(static_tool(
                "broken",
                json_schema_object(json!({"a": json_schema_string("a")}), vec!["b"]),
            ))
            .unwrap();

        let err = registry.verify().unwrap_err();
        assert!(err.to_string().contains("required field b is not declared"));
    }

    #[test]
    fn test_verify_rejects_non_object_schema() {
        let mut registry = ToolRegistry::new();
        registry
            .register(static_tool("scalar", json!({"type": "string"})))
            .unwrap();

        assert!(matches!(
            registry.verify(),
            Err(RegistryError::InvalidSchema { .. })
        ));
    }

    #[test]
    fn test_list_schemas_keeps_registration_order() {
        let mut registry = ToolRegistry::new();
        for name in ["b", "a", "c"] {
            registry
                .register(static_tool(name, json_schema_object(json!({}), vec![])))
                .unwrap();
        }
        registry.verify().unwrap();

        let names: Vec<String> = registry.list_schemas().into_iter().map(|s| s.name).collect();
        assert_eq!(names, ["b", "a", "c"]);
        assert!(registry.contains("a"));
        assert!(registry.get("d").is_none());
    }

    #[test]
    fn test_schema_helpers() {
        let limit = with_default(json_schema_integer("Number of results"), 20);
        assert_eq!(limit["default"], 20);

        let lang = with_enum(json_schema_string("Language"), &["fr_FR", "en_GB"]);
        assert_eq!(lang["enum"], json!(["fr_FR", "en_GB"]));
    }

    #[test]
    fn test_parse_args_reports_missing_field() {
        #[derive(Debug, serde::Deserialize)]
        struct Args {
            #[allow(dead_code)]
            invoice_id: u64,
        }

        let err = parse_args::<Args>(json!({})).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid arguments: missing field `invoice_id`"
        );
    }
}

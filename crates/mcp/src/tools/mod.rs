// Pennylane tools exposed over MCP, one module per resource family

mod accounting;
mod customers;
mod invoices;
mod quotes;
mod registry;
mod suppliers;
mod transactions;

pub use registry::{
    json_schema_array, json_schema_boolean, json_schema_integer, json_schema_object,
    json_schema_string, parse_args, with_default, with_enum, ApiTool, Tool, ToolDefinition,
    ToolFuture, ToolHandler, ToolRegistry,
};

use crate::error::RegistryError;
use pennylane_sdk::PennylaneClient;
use serde_json::{json, Map, Value};
use std::sync::Arc;

/// Every tool definition, in catalog order.
pub fn definitions() -> Vec<ToolDefinition> {
    let mut definitions = Vec::new();
    definitions.extend(invoices::definitions());
    definitions.extend(quotes::definitions());
    definitions.extend(customers::definitions());
    definitions.extend(suppliers::definitions());
    definitions.extend(transactions::definitions());
    definitions.extend(accounting::definitions());
    definitions
}

/// Build the registry of every tool, bound to one shared client, and verify it.
pub fn build_registry(client: PennylaneClient) -> Result<ToolRegistry, RegistryError> {
    let mut registry = ToolRegistry::new();
    for definition in definitions() {
        registry.register(Arc::new(definition.bind(client.clone())))?;
    }
    registry.verify()?;
    Ok(registry)
}

/// Properties shared by cursor-paginated list tools.
pub(crate) fn list_properties(limit: u32, sort: Option<&str>, filter: bool) -> Map<String, Value> {
    let mut properties = Map::new();
    properties.insert(
        "limit".to_string(),
        with_default(json_schema_integer("Number of results per page"), limit),
    );
    properties.insert(
        "cursor".to_string(),
        json_schema_string("Pagination cursor returned by the previous page"),
    );
    if let Some(sort) = sort {
        properties.insert(
            "sort".to_string(),
            with_default(
                json_schema_string("Sort key, prefixed with '-' for descending order"),
                sort,
            ),
        );
    }
    if filter {
        properties.insert(
            "filter".to_string(),
            json_schema_string("Filter expression, e.g. 'paid:eq:false'"),
        );
    }
    properties
}

pub(crate) fn categories_property() -> Value {
    json_schema_array(
        json!({
            "type": "object",
            "properties": {
                "category_id": json_schema_integer("Category ID"),
                "weight": json_schema_string("Share of the amount, e.g. '0.5'")
            }
        }),
        "Category allocations",
    )
}

pub(crate) fn object(properties: Map<String, Value>, required: Vec<&str>) -> Value {
    json_schema_object(Value::Object(properties), required)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn test_client() -> PennylaneClient {
        PennylaneClient::builder()
            .api_key("test-key")
            .base_url("http://127.0.0.1:9")
            .build()
            .unwrap()
    }

    #[test]
    fn test_catalog_is_consistent() {
        let registry = build_registry(test_client()).unwrap();
        assert_eq!(registry.len(), definitions().len());
        assert_eq!(registry.len(), 41);
    }

    #[test]
    fn test_every_tool_is_prefixed_and_described() {
        let mut seen = HashSet::new();
        for definition in definitions() {
            let name = definition.schema.name;
            assert!(name.starts_with("pennylane_"), "{} lacks prefix", name);
            assert!(!definition.schema.description.is_empty(), "{}", name);
            assert!(seen.insert(name.clone()), "{} declared twice", name);
        }
    }

    #[test]
    fn test_list_properties() {
        let properties = list_properties(20, Some("-id"), true);
        assert_eq!(properties["limit"]["default"], 20);
        assert_eq!(properties["sort"]["default"], "-id");
        assert!(properties.contains_key("filter"));

        let properties = list_properties(20, None, false);
        assert!(!properties.contains_key("sort"));
        assert!(!properties.contains_key("filter"));
    }
}

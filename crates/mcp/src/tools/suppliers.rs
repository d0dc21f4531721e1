// Supplier tools

use super::{
    json_schema_array, json_schema_integer, json_schema_object, json_schema_string,
    list_properties, object, parse_args, with_enum, ToolDefinition, ToolFuture,
};
use pennylane_sdk::api::suppliers::{DEFAULT_SUPPLIER_LIMIT, DEFAULT_SUPPLIER_SORT};
use pennylane_sdk::api::{
    CreateSupplierRequest, ExtraFields, ListQuery, SupplierDueDateRule, SupplierPaymentMethod,
};
use pennylane_sdk::PennylaneClient;
use serde::Deserialize;
use serde_json::{json, Map, Value};

#[derive(Debug, Deserialize)]
struct SupplierIdArgs {
    supplier_id: u64,
}

#[derive(Debug, Deserialize)]
struct UpdateSupplierArgs {
    supplier_id: u64,
    #[serde(flatten)]
    fields: ExtraFields,
}

pub(super) fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "pennylane_list_suppliers",
            "List suppliers with pagination, filters and sorting",
            object(
                list_properties(DEFAULT_SUPPLIER_LIMIT, Some(DEFAULT_SUPPLIER_SORT), true),
                vec![],
            ),
            list_suppliers,
        ),
        ToolDefinition::new(
            "pennylane_get_supplier",
            "Get a supplier by ID",
            supplier_id_schema(),
            get_supplier,
        ),
        ToolDefinition::new(
            "pennylane_create_supplier",
            "Create a supplier",
            create_supplier_schema(),
            create_supplier,
        ),
        ToolDefinition::new(
            "pennylane_update_supplier",
            "Update a supplier. Only the given fields change; unlisted fields are sent as is",
            update_supplier_schema(),
            update_supplier,
        ),
    ]
}

fn supplier_id_schema() -> Value {
    json_schema_object(
        json!({ "supplier_id": json_schema_integer("Supplier ID") }),
        vec!["supplier_id"],
    )
}

fn create_supplier_schema() -> Value {
    let mut properties = Map::new();
    properties.insert("name".into(), json_schema_string("Supplier name"));
    properties.extend(supplier_properties());
    object(properties, vec!["name"])
}

fn update_supplier_schema() -> Value {
    let mut properties = Map::new();
    properties.insert("supplier_id".into(), json_schema_integer("Supplier ID"));
    properties.insert("name".into(), json_schema_string("New supplier name"));
    properties.extend(supplier_properties());
    object(properties, vec!["supplier_id"])
}

/// Optional supplier fields, shared by create and update.
fn supplier_properties() -> Map<String, Value> {
    let mut properties = Map::new();
    properties.insert(
        "postal_address".into(),
        json!({
            "type": "object",
            "description": "Postal address",
            "properties": {
                "address": {"type": "string"},
                "postal_code": {"type": "string"},
                "city": {"type": "string"},
                "country_alpha2": {"type": "string"}
            }
        }),
    );
    properties.insert(
        "emails".into(),
        json_schema_array(json!({"type": "string"}), "Contact emails"),
    );
    properties.insert("iban".into(), json_schema_string("Supplier IBAN"));
    properties.insert(
        "vat_number".into(),
        json_schema_string("Intra-community VAT number"),
    );
    properties.insert("reg_no".into(), json_schema_string("SIREN (9 digits)"));
    properties.insert(
        "establishment_no".into(),
        json_schema_string("SIRET (14 digits)"),
    );
    properties.insert(
        "supplier_payment_method".into(),
        with_enum(json_schema_string("Payment method"), &SupplierPaymentMethod::ALL),
    );
    properties.insert(
        "supplier_due_date_delay".into(),
        json_schema_integer("Payment delay in days"),
    );
    properties.insert(
        "supplier_due_date_rule".into(),
        with_enum(json_schema_string("Due date rule"), &SupplierDueDateRule::ALL),
    );
    properties
}

fn list_suppliers(client: &PennylaneClient, args: Value) -> ToolFuture<'_> {
    Box::pin(async move {
        let query: ListQuery = parse_args(args)?;
        Ok(client.suppliers().list(query).await?)
    })
}

fn get_supplier(client: &PennylaneClient, args: Value) -> ToolFuture<'_> {
    Box::pin(async move {
        let args: SupplierIdArgs = parse_args(args)?;
        Ok(client.suppliers().get(args.supplier_id).await?)
    })
}

fn create_supplier(client: &PennylaneClient, args: Value) -> ToolFuture<'_> {
    Box::pin(async move {
        let request: CreateSupplierRequest = parse_args(args)?;
        Ok(client.suppliers().create(&request).await?)
    })
}

fn update_supplier(client: &PennylaneClient, args: Value) -> ToolFuture<'_> {
    Box::pin(async move {
        let args: UpdateSupplierArgs = parse_args(args)?;
        Ok(client
            .suppliers()
            .update(args.supplier_id, &args.fields)
            .await?)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_requires_only_name() {
        assert_eq!(create_supplier_schema()["required"], json!(["name"]));
    }

    #[test]
    fn test_update_schema_lists_updatable_fields() {
        let schema = update_supplier_schema();
        assert_eq!(schema["required"], json!(["supplier_id"]));
        for field in ["name", "postal_address", "emails", "iban", "supplier_payment_method"] {
            assert!(schema["properties"].get(field).is_some(), "missing {}", field);
        }
        assert_eq!(
            schema["properties"]["supplier_due_date_rule"]["enum"],
            json!(SupplierDueDateRule::ALL)
        );
    }

    #[test]
    fn test_update_args_require_supplier_id() {
        let err = parse_args::<UpdateSupplierArgs>(json!({"iban": "FR76..."})).unwrap_err();
        assert!(err.to_string().contains("supplier_id"));
    }
}

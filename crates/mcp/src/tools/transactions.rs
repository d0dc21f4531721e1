// Bank transaction tools, including invoice matching

use super::{
    categories_property, json_schema_integer, json_schema_object, json_schema_string,
    list_properties, object, parse_args, with_default, ToolDefinition, ToolFuture,
};
use crate::error::ToolError;
use pennylane_sdk::api::transactions::{DEFAULT_TRANSACTION_LIMIT, DEFAULT_TRANSACTION_SORT};
use pennylane_sdk::api::{
    CategorizeRequest, CreateTransactionRequest, ExtraFields, InvoiceKind, ListQuery,
    MatchTransactionRequest,
};
use pennylane_sdk::PennylaneClient;
use serde::Deserialize;
use serde_json::{json, Map, Value};

#[derive(Debug, Deserialize)]
struct TransactionIdArgs {
    transaction_id: u64,
}

#[derive(Debug, Deserialize)]
struct UpdateTransactionArgs {
    transaction_id: u64,
    #[serde(flatten)]
    fields: ExtraFields,
}

#[derive(Debug, Deserialize)]
struct CategorizeTransactionArgs {
    transaction_id: u64,
    #[serde(flatten)]
    request: CategorizeRequest,
}

#[derive(Debug, Deserialize)]
struct MatchArgs {
    invoice_id: u64,
    #[serde(flatten)]
    request: MatchTransactionRequest,
}

#[derive(Debug, Deserialize)]
struct UnmatchArgs {
    invoice_id: u64,
    transaction_id: u64,
}

pub(super) fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "pennylane_list_transactions",
            "List bank transactions with pagination, filters and sorting",
            object(
                list_properties(
                    DEFAULT_TRANSACTION_LIMIT,
                    Some(DEFAULT_TRANSACTION_SORT),
                    true,
                ),
                vec![],
            ),
            list_transactions,
        ),
        ToolDefinition::new(
            "pennylane_get_transaction",
            "Get a bank transaction by ID",
            transaction_id_schema(),
            get_transaction,
        ),
        ToolDefinition::new(
            "pennylane_create_transaction",
            "Create a bank transaction",
            create_transaction_schema(),
            create_transaction,
        ),
        ToolDefinition::new(
            "pennylane_update_transaction",
            "Update a bank transaction. Only the given fields change; unlisted fields are sent as is",
            update_transaction_schema(),
            update_transaction,
        ),
        ToolDefinition::new(
            "pennylane_categorize_transaction",
            "Assign accounting categories to a bank transaction",
            json_schema_object(
                json!({
                    "transaction_id": transaction_id_property(),
                    "categories": categories_property()
                }),
                vec!["transaction_id", "categories"],
            ),
            categorize_transaction,
        ),
        ToolDefinition::new(
            "pennylane_match_transaction_to_customer_invoice",
            "Match a bank transaction to a customer invoice",
            match_schema(InvoiceKind::Customer),
            match_transaction_to_customer_invoice,
        ),
        ToolDefinition::new(
            "pennylane_unmatch_transaction_from_customer_invoice",
            "Remove the match between a bank transaction and a customer invoice",
            unmatch_schema(InvoiceKind::Customer),
            unmatch_transaction_from_customer_invoice,
        ),
        ToolDefinition::new(
            "pennylane_match_transaction_to_supplier_invoice",
            "Match a bank transaction to a supplier invoice",
            match_schema(InvoiceKind::Supplier),
            match_transaction_to_supplier_invoice,
        ),
        ToolDefinition::new(
            "pennylane_unmatch_transaction_from_supplier_invoice",
            "Remove the match between a bank transaction and a supplier invoice",
            unmatch_schema(InvoiceKind::Supplier),
            unmatch_transaction_from_supplier_invoice,
        ),
    ]
}

fn transaction_id_property() -> Value {
    json_schema_integer("Transaction ID")
}

fn transaction_id_schema() -> Value {
    json_schema_object(
        json!({ "transaction_id": transaction_id_property() }),
        vec!["transaction_id"],
    )
}

fn invoice_id_property(kind: InvoiceKind) -> Value {
    match kind {
        InvoiceKind::Customer => json_schema_integer("Customer invoice ID"),
        InvoiceKind::Supplier => json_schema_integer("Supplier invoice ID"),
    }
}

fn match_schema(kind: InvoiceKind) -> Value {
    json_schema_object(
        json!({
            "invoice_id": invoice_id_property(kind),
            "transaction_id": transaction_id_property(),
            "amount": json_schema_string("Amount to match when only part of the transaction applies")
        }),
        vec!["invoice_id", "transaction_id"],
    )
}

fn unmatch_schema(kind: InvoiceKind) -> Value {
    json_schema_object(
        json!({
            "invoice_id": invoice_id_property(kind),
            "transaction_id": transaction_id_property()
        }),
        vec!["invoice_id", "transaction_id"],
    )
}

fn create_transaction_schema() -> Value {
    let mut properties = Map::new();
    properties.insert("date".into(), json_schema_string("Date (YYYY-MM-DD)"));
    properties.insert(
        "amount".into(),
        json_schema_string("Amount, positive for a credit and negative for a debit"),
    );
    properties.insert("label".into(), json_schema_string("Transaction label"));
    properties.insert(
        "bank_account_id".into(),
        json_schema_integer("Bank account ID"),
    );
    properties.insert(
        "fee".into(),
        with_default(json_schema_string("Bank fee"), "0.00"),
    );
    object(
        properties,
        vec!["date", "amount", "label", "bank_account_id"],
    )
}

fn update_transaction_schema() -> Value {
    json_schema_object(
        json!({
            "transaction_id": transaction_id_property(),
            "date": json_schema_string("New date (YYYY-MM-DD)"),
            "amount": json_schema_string("New amount"),
            "label": json_schema_string("New label")
        }),
        vec!["transaction_id"],
    )
}

fn list_transactions(client: &PennylaneClient, args: Value) -> ToolFuture<'_> {
    Box::pin(async move {
        let query: ListQuery = parse_args(args)?;
        Ok(client.transactions().list(query).await?)
    })
}

fn get_transaction(client: &PennylaneClient, args: Value) -> ToolFuture<'_> {
    Box::pin(async move {
        let args: TransactionIdArgs = parse_args(args)?;
        Ok(client.transactions().get(args.transaction_id).await?)
    })
}

fn create_transaction(client: &PennylaneClient, args: Value) -> ToolFuture<'_> {
    Box::pin(async move {
        let request: CreateTransactionRequest = parse_args(args)?;
        Ok(client.transactions().create(&request).await?)
    })
}

fn update_transaction(client: &PennylaneClient, args: Value) -> ToolFuture<'_> {
    Box::pin(async move {
        let args: UpdateTransactionArgs = parse_args(args)?;
        Ok(client
            .transactions()
            .update(args.transaction_id, &args.fields)
            .await?)
    })
}

fn categorize_transaction(client: &PennylaneClient, args: Value) -> ToolFuture<'_> {
    Box::pin(async move {
        let args: CategorizeTransactionArgs = parse_args(args)?;
        Ok(client
            .transactions()
            .categorize(args.transaction_id, &args.request)
            .await?)
    })
}

async fn match_invoice(
    client: &PennylaneClient,
    kind: InvoiceKind,
    args: Value,
) -> Result<Value, ToolError> {
    let args: MatchArgs = parse_args(args)?;
    Ok(client
        .transactions()
        .match_invoice(kind, args.invoice_id, &args.request)
        .await?)
}

async fn unmatch_invoice(
    client: &PennylaneClient,
    kind: InvoiceKind,
    args: Value,
) -> Result<Value, ToolError> {
    let args: UnmatchArgs = parse_args(args)?;
    Ok(client
        .transactions()
        .unmatch_invoice(kind, args.invoice_id, args.transaction_id)
        .await?)
}

fn match_transaction_to_customer_invoice(client: &PennylaneClient, args: Value) -> ToolFuture<'_> {
    Box::pin(match_invoice(client, InvoiceKind::Customer, args))
}

fn unmatch_transaction_from_customer_invoice(
    client: &PennylaneClient,
    args: Value,
) -> ToolFuture<'_> {
    Box::pin(unmatch_invoice(client, InvoiceKind::Customer, args))
}

fn match_transaction_to_supplier_invoice(client: &PennylaneClient, args: Value) -> ToolFuture<'_> {
    Box::pin(match_invoice(client, InvoiceKind::Supplier, args))
}

fn unmatch_transaction_from_supplier_invoice(
    client: &PennylaneClient,
    args: Value,
) -> ToolFuture<'_> {
    Box::pin(unmatch_invoice(client, InvoiceKind::Supplier, args))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_args_split_path_and_body() {
        let args: MatchArgs = parse_args(json!({
            "invoice_id": 1,
            "transaction_id": 2,
            "amount": "50.00"
        }))
        .unwrap();
        assert_eq!(args.invoice_id, 1);
        assert_eq!(
            serde_json::to_value(&args.request).unwrap(),
            json!({"transaction_id": 2, "amount": "50.00"})
        );
    }

    #[test]
    fn test_create_schema_documents_fee_default() {
        let schema = create_transaction_schema();
        assert_eq!(schema["properties"]["fee"]["default"], "0.00");
    }

    #[test]
    fn test_update_schema_lists_updatable_fields() {
        let schema = update_transaction_schema();
        let properties: Vec<&String> = schema["properties"].as_object().unwrap().keys().collect();
        assert_eq!(properties, ["transaction_id", "date", "amount", "label"]);
        assert_eq!(schema["required"], json!(["transaction_id"]));
    }
}

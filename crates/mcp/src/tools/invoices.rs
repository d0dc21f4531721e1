// Customer and supplier invoice tools

use super::{
    categories_property, json_schema_array, json_schema_boolean, json_schema_integer,
    json_schema_object, json_schema_string, list_properties, object, parse_args, with_default,
    with_enum, ToolDefinition, ToolFuture,
};
use pennylane_sdk::api::invoices::{DEFAULT_INVOICE_LIMIT, DEFAULT_INVOICE_SORT};
use pennylane_sdk::api::{
    BillingLanguage, CategorizeRequest, CreateCustomerInvoiceRequest, ListQuery,
    SendByEmailRequest,
};
use pennylane_sdk::PennylaneClient;
use serde::Deserialize;
use serde_json::{json, Map, Value};

#[derive(Debug, Deserialize)]
struct InvoiceIdArgs {
    invoice_id: u64,
}

#[derive(Debug, Deserialize)]
struct SendByEmailArgs {
    invoice_id: u64,
    #[serde(flatten)]
    request: SendByEmailRequest,
}

#[derive(Debug, Deserialize)]
struct CategorizeArgs {
    invoice_id: u64,
    #[serde(flatten)]
    request: CategorizeRequest,
}

pub(super) fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "pennylane_list_customer_invoices",
            "List customer invoices with pagination, filters and sorting",
            object(
                list_properties(DEFAULT_INVOICE_LIMIT, Some(DEFAULT_INVOICE_SORT), true),
                vec![],
            ),
            list_customer_invoices,
        ),
        ToolDefinition::new(
            "pennylane_get_customer_invoice",
            "Get a customer invoice by ID",
            invoice_id_schema(),
            get_customer_invoice,
        ),
        ToolDefinition::new(
            "pennylane_create_customer_invoice",
            "Create a customer invoice, as a draft unless draft is false",
            create_customer_invoice_schema(),
            create_customer_invoice,
        ),
        ToolDefinition::new(
            "pennylane_finalize_customer_invoice",
            "Finalize a draft customer invoice. It becomes immutable and its PDF is generated",
            invoice_id_schema(),
            finalize_customer_invoice,
        ),
        ToolDefinition::new(
            "pennylane_send_customer_invoice_email",
            "Send a customer invoice by email",
            send_by_email_schema(),
            send_customer_invoice_email,
        ),
        ToolDefinition::new(
            "pennylane_categorize_customer_invoice",
            "Assign accounting categories to a customer invoice",
            categorize_schema(),
            categorize_customer_invoice,
        ),
        ToolDefinition::new(
            "pennylane_list_supplier_invoices",
            "List supplier invoices with pagination, filters and sorting",
            object(
                list_properties(DEFAULT_INVOICE_LIMIT, Some(DEFAULT_INVOICE_SORT), true),
                vec![],
            ),
            list_supplier_invoices,
        ),
        ToolDefinition::new(
            "pennylane_get_supplier_invoice",
            "Get a supplier invoice by ID",
            invoice_id_schema(),
            get_supplier_invoice,
        ),
        ToolDefinition::new(
            "pennylane_categorize_supplier_invoice",
            "Assign accounting categories to a supplier invoice",
            categorize_schema(),
            categorize_supplier_invoice,
        ),
    ]
}

fn invoice_id_property() -> Value {
    json_schema_integer("Invoice ID")
}

fn invoice_id_schema() -> Value {
    json_schema_object(json!({ "invoice_id": invoice_id_property() }), vec!["invoice_id"])
}

fn create_customer_invoice_schema() -> Value {
    let mut properties = Map::new();
    properties.insert("customer_id".into(), json_schema_integer("Customer ID"));
    properties.insert("date".into(), json_schema_string("Issue date (YYYY-MM-DD)"));
    properties.insert(
        "deadline".into(),
        json_schema_string("Payment deadline (YYYY-MM-DD)"),
    );
    properties.insert(
        "invoice_lines".into(),
        json_schema_array(
            json!({"type": "object"}),
            "Invoice lines with label, raw_currency_unit_price, quantity, unit and vat_rate",
        ),
    );
    properties.insert(
        "draft".into(),
        with_default(
            json_schema_boolean("true keeps the invoice editable, false finalizes it"),
            true,
        ),
    );
    properties.insert(
        "currency".into(),
        with_default(json_schema_string("Currency code (EUR, USD, ...)"), "EUR"),
    );
    properties.insert(
        "language".into(),
        with_default(
            with_enum(json_schema_string("Document language"), &BillingLanguage::ALL),
            "fr_FR",
        ),
    );
    object(
        properties,
        vec!["customer_id", "date", "deadline", "invoice_lines"],
    )
}

fn send_by_email_schema() -> Value {
    json_schema_object(
        json!({
            "invoice_id": invoice_id_property(),
            "recipients": with_default(
                json_schema_array(
                    json!({"type": "string"}),
                    "Recipient emails (empty uses the customer's addresses)",
                ),
                json!([]),
            )
        }),
        vec!["invoice_id"],
    )
}

fn categorize_schema() -> Value {
    json_schema_object(
        json!({
            "invoice_id": invoice_id_property(),
            "categories": categories_property()
        }),
        vec!["invoice_id", "categories"],
    )
}

fn list_customer_invoices(client: &PennylaneClient, args: Value) -> ToolFuture<'_> {
    Box::pin(async move {
        let query: ListQuery = parse_args(args)?;
        Ok(client.customer_invoices().list(query).await?)
    })
}

fn get_customer_invoice(client: &PennylaneClient, args: Value) -> ToolFuture<'_> {
    Box::pin(async move {
        let args: InvoiceIdArgs = parse_args(args)?;
        Ok(client.customer_invoices().get(args.invoice_id).await?)
    })
}

fn create_customer_invoice(client: &PennylaneClient, args: Value) -> ToolFuture<'_> {
    Box::pin(async move {
        let request: CreateCustomerInvoiceRequest = parse_args(args)?;
        Ok(client.customer_invoices().create(&request).await?)
    })
}

fn finalize_customer_invoice(client: &PennylaneClient, args: Value) -> ToolFuture<'_> {
    Box::pin(async move {
        let args: InvoiceIdArgs = parse_args(args)?;
        Ok(client.customer_invoices().finalize(args.invoice_id).await?)
    })
}

fn send_customer_invoice_email(client: &PennylaneClient, args: Value) -> ToolFuture<'_> {
    Box::pin(async move {
        let args: SendByEmailArgs = parse_args(args)?;
        Ok(client
            .customer_invoices()
            .send_by_email(args.invoice_id, &args.request)
            .await?)
    })
}

fn categorize_customer_invoice(client: &PennylaneClient, args: Value) -> ToolFuture<'_> {
    Box::pin(async move {
        let args: CategorizeArgs = parse_args(args)?;
        Ok(client
            .customer_invoices()
            .categorize(args.invoice_id, &args.request)
            .await?)
    })
}

fn list_supplier_invoices(client: &PennylaneClient, args: Value) -> ToolFuture<'_> {
    Box::pin(async move {
        let query: ListQuery = parse_args(args)?;
        Ok(client.supplier_invoices().list(query).await?)
    })
}

fn get_supplier_invoice(client: &PennylaneClient, args: Value) -> ToolFuture<'_> {
    Box::pin(async move {
        let args: InvoiceIdArgs = parse_args(args)?;
        Ok(client.supplier_invoices().get(args.invoice_id).await?)
    })
}

fn categorize_supplier_invoice(client: &PennylaneClient, args: Value) -> ToolFuture<'_> {
    Box::pin(async move {
        let args: CategorizeArgs = parse_args(args)?;
        Ok(client
            .supplier_invoices()
            .categorize(args.invoice_id, &args.request)
            .await?)
    })
}

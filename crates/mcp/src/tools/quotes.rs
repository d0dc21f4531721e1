// Quote tools

use super::{
    json_schema_array, json_schema_integer, json_schema_object, json_schema_string,
    list_properties, object, parse_args, with_default, with_enum, ToolDefinition, ToolFuture,
};
use pennylane_sdk::api::quotes::{
    DEFAULT_APPENDIX_LIMIT, DEFAULT_QUOTE_LIMIT, DEFAULT_QUOTE_SORT, DEFAULT_SECTION_LIMIT,
};
use pennylane_sdk::api::{BillingLanguage, CreateQuoteRequest, ExtraFields, ListQuery, QuoteStatus};
use pennylane_sdk::PennylaneClient;
use serde::Deserialize;
use serde_json::{json, Map, Value};

#[derive(Debug, Deserialize)]
struct QuoteIdArgs {
    quote_id: u64,
}

#[derive(Debug, Deserialize)]
struct QuoteListArgs {
    quote_id: u64,
    #[serde(flatten)]
    query: ListQuery,
}

#[derive(Debug, Deserialize)]
struct UpdateQuoteArgs {
    quote_id: u64,
    #[serde(flatten)]
    fields: ExtraFields,
}

#[derive(Debug, Deserialize)]
struct UpdateStatusArgs {
    quote_id: u64,
    status: QuoteStatus,
}

#[derive(Debug, Deserialize)]
struct AddAppendixArgs {
    quote_id: u64,
    file_path: String,
    file_name: String,
}

pub(super) fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "pennylane_list_quotes",
            "List quotes with pagination, filters and sorting",
            object(
                list_properties(DEFAULT_QUOTE_LIMIT, Some(DEFAULT_QUOTE_SORT), true),
                vec![],
            ),
            list_quotes,
        ),
        ToolDefinition::new(
            "pennylane_get_quote",
            "Get a quote by ID",
            quote_id_schema(),
            get_quote,
        ),
        ToolDefinition::new(
            "pennylane_list_quote_invoice_line_sections",
            "List the invoice line sections of a quote",
            quote_list_schema(DEFAULT_SECTION_LIMIT, Some(DEFAULT_QUOTE_SORT)),
            list_quote_invoice_line_sections,
        ),
        ToolDefinition::new(
            "pennylane_list_quote_appendices",
            "List the file appendices attached to a quote",
            quote_list_schema(DEFAULT_APPENDIX_LIMIT, None),
            list_quote_appendices,
        ),
        ToolDefinition::new(
            "pennylane_create_quote",
            "Create a quote",
            create_quote_schema(),
            create_quote,
        ),
        ToolDefinition::new(
            "pennylane_update_quote",
            "Update a quote. Only the given fields change; unlisted fields are sent as is",
            update_quote_schema(),
            update_quote,
        ),
        ToolDefinition::new(
            "pennylane_update_quote_status",
            "Change the status of a quote",
            json_schema_object(
                json!({
                    "quote_id": quote_id_property(),
                    "status": with_enum(json_schema_string("New status"), &QuoteStatus::ALL)
                }),
                vec!["quote_id", "status"],
            ),
            update_quote_status,
        ),
        ToolDefinition::new(
            "pennylane_add_quote_appendix",
            "Attach a file to a quote (not supported yet: requires a multipart upload)",
            json_schema_object(
                json!({
                    "quote_id": quote_id_property(),
                    "file_path": json_schema_string("Local path of the file to upload"),
                    "file_name": json_schema_string("File name shown in Pennylane")
                }),
                vec!["quote_id", "file_path", "file_name"],
            ),
            add_quote_appendix,
        ),
    ]
}

fn quote_id_property() -> Value {
    json_schema_integer("Quote ID")
}

fn quote_id_schema() -> Value {
    json_schema_object(json!({ "quote_id": quote_id_property() }), vec!["quote_id"])
}

fn quote_list_schema(limit: u32, sort: Option<&str>) -> Value {
    let mut properties = Map::new();
    properties.insert("quote_id".into(), quote_id_property());
    properties.extend(list_properties(limit, sort, false));
    object(properties, vec!["quote_id"])
}

/// One quote line. `vat_rate` uses Pennylane codes such as `FR_200` for 20%.
fn invoice_line_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "label": json_schema_string("Line label"),
            "quantity": {"type": "number", "description": "Quantity"},
            "raw_currency_unit_price": json_schema_string(
                "Unit price excluding tax, up to 6 decimals"
            ),
            "vat_rate": json_schema_string(
                "VAT rate code: FR_200 for 20%, FR_100 for 10%, FR_55 for 5.5%, FR_21 for 2.1%"
            ),
            "unit": json_schema_string("Unit, e.g. piece, day, hour"),
            "description": json_schema_string("Line description"),
            "section_rank": json_schema_integer("Rank of the section holding the line"),
            "ledger_account_id": json_schema_integer("Ledger account ID"),
            "product_id": json_schema_integer("Product ID"),
            "discount": discount_schema("Line discount")
        },
        "required": ["label", "quantity", "raw_currency_unit_price", "vat_rate", "unit"]
    })
}

fn discount_schema(description: &str) -> Value {
    json!({
        "type": "object",
        "description": description,
        "properties": {
            "type": with_enum(json_schema_string("Discount kind"), &["absolute", "percentage"]),
            "value": json_schema_string("Amount, or percentage when type is percentage")
        }
    })
}

fn invoice_line_section_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "rank": json_schema_integer("Section rank"),
            "title": json_schema_string("Section title"),
            "description": json_schema_string("Section description")
        }
    })
}

/// Optional fields shared by create and update.
fn quote_document_properties() -> Map<String, Value> {
    let mut properties = Map::new();
    properties.insert(
        "quote_template_id".into(),
        json_schema_integer("Quote template ID"),
    );
    properties.insert(
        "pdf_invoice_free_text".into(),
        json_schema_string("Free text printed on the PDF"),
    );
    properties.insert(
        "pdf_invoice_subject".into(),
        json_schema_string("Subject printed on the PDF"),
    );
    properties.insert(
        "pdf_description".into(),
        json_schema_string("Description printed on the PDF"),
    );
    properties.insert(
        "special_mention".into(),
        json_schema_string("Additional legal mention"),
    );
    properties.insert(
        "external_reference".into(),
        json_schema_string("Reference in your own system"),
    );
    properties
}

fn language_property() -> Value {
    with_enum(json_schema_string("Document language"), &BillingLanguage::ALL)
}

fn create_quote_schema() -> Value {
    let mut properties = Map::new();
    properties.insert("customer_id".into(), json_schema_integer("Customer ID"));
    properties.insert(
        "invoice_lines".into(),
        json_schema_array(invoice_line_schema(), "Quote lines"),
    );
    properties.insert("date".into(), json_schema_string("Quote date (YYYY-MM-DD)"));
    properties.insert(
        "deadline".into(),
        json_schema_string("Validity deadline (YYYY-MM-DD)"),
    );
    properties.insert(
        "currency".into(),
        with_default(json_schema_string("Currency code"), "EUR"),
    );
    properties.insert("language".into(), with_default(language_property(), "fr_FR"));
    properties.insert("discount".into(), discount_schema("Global discount"));
    properties.insert(
        "invoice_line_sections".into(),
        json_schema_array(invoice_line_section_schema(), "Sections grouping the lines"),
    );
    properties.extend(quote_document_properties());
    object(
        properties,
        vec!["customer_id", "invoice_lines", "date", "deadline"],
    )
}

fn update_quote_schema() -> Value {
    let mut properties = Map::new();
    properties.insert("quote_id".into(), quote_id_property());
    properties.insert("customer_id".into(), json_schema_integer("Customer ID"));
    properties.insert(
        "invoice_lines".into(),
        json!({
            "type": "object",
            "description": "Line changes; lines listed under create are added",
            "properties": {
                "create": json_schema_array(invoice_line_schema(), "Lines to add")
            }
        }),
    );
    properties.insert("date".into(), json_schema_string("Quote date (YYYY-MM-DD)"));
    properties.insert(
        "deadline".into(),
        json_schema_string("Validity deadline (YYYY-MM-DD)"),
    );
    properties.insert("language".into(), language_property());
    properties.insert("discount".into(), discount_schema("Global discount"));
    properties.extend(quote_document_properties());
    object(properties, vec!["quote_id"])
}

fn list_quotes(client: &PennylaneClient, args: Value) -> ToolFuture<'_> {
    Box::pin(async move {
        let query: ListQuery = parse_args(args)?;
        Ok(client.quotes().list(query).await?)
    })
}

fn get_quote(client: &PennylaneClient, args: Value) -> ToolFuture<'_> {
    Box::pin(async move {
        let args: QuoteIdArgs = parse_args(args)?;
        Ok(client.quotes().get(args.quote_id).await?)
    })
}

fn list_quote_invoice_line_sections(client: &PennylaneClient, args: Value) -> ToolFuture<'_> {
    Box::pin(async move {
        let args: QuoteListArgs = parse_args(args)?;
        Ok(client
            .quotes()
            .invoice_line_sections(args.quote_id, args.query)
            .await?)
    })
}

fn list_quote_appendices(client: &PennylaneClient, args: Value) -> ToolFuture<'_> {
    Box::pin(async move {
        let args: QuoteListArgs = parse_args(args)?;
        Ok(client.quotes().appendices(args.quote_id, args.query).await?)
    })
}

fn create_quote(client: &PennylaneClient, args: Value) -> ToolFuture<'_> {
    Box::pin(async move {
        let request: CreateQuoteRequest = parse_args(args)?;
        Ok(client.quotes().create(&request).await?)
    })
}

fn update_quote(client: &PennylaneClient, args: Value) -> ToolFuture<'_> {
    Box::pin(async move {
        let args: UpdateQuoteArgs = parse_args(args)?;
        Ok(client.quotes().update(args.quote_id, &args.fields).await?)
    })
}

fn update_quote_status(client: &PennylaneClient, args: Value) -> ToolFuture<'_> {
    Box::pin(async move {
        let args: UpdateStatusArgs = parse_args(args)?;
        Ok(client
            .quotes()
            .update_status(args.quote_id, args.status)
            .await?)
    })
}

fn add_quote_appendix(client: &PennylaneClient, args: Value) -> ToolFuture<'_> {
    Box::pin(async move {
        let args: AddAppendixArgs = parse_args(args)?;
        Ok(client
            .quotes()
            .add_appendix(args.quote_id, &args.file_path, &args.file_name)
            .await?)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_args_keep_only_body_fields() {
        let args: UpdateQuoteArgs = parse_args(json!({
            "quote_id": 3,
            "pdf_invoice_subject": "Devis révisé"
        }))
        .unwrap();
        assert_eq!(args.quote_id, 3);
        assert_eq!(
            Value::Object(args.fields),
            json!({"pdf_invoice_subject": "Devis révisé"})
        );
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let err = parse_args::<UpdateStatusArgs>(json!({"quote_id": 3, "status": "signed"}))
            .unwrap_err();
        assert!(err.to_string().starts_with("Invalid arguments: unknown variant `signed`"));
    }

    #[test]
    fn test_create_schema_describes_lines_and_discount() {
        let schema = create_quote_schema();
        let line = &schema["properties"]["invoice_lines"]["items"];
        assert_eq!(
            line["required"],
            json!(["label", "quantity", "raw_currency_unit_price", "vat_rate", "unit"])
        );
        assert!(line["properties"]["vat_rate"]["description"]
            .as_str()
            .unwrap()
            .contains("FR_200"));
        assert_eq!(
            schema["properties"]["discount"]["properties"]["type"]["enum"],
            json!(["absolute", "percentage"])
        );
    }

    #[test]
    fn test_update_schema_lists_updatable_fields() {
        let schema = update_quote_schema();
        assert_eq!(schema["required"], json!(["quote_id"]));
        for field in [
            "customer_id",
            "invoice_lines",
            "date",
            "deadline",
            "language",
            "discount",
            "pdf_invoice_subject",
            "external_reference",
        ] {
            assert!(schema["properties"].get(field).is_some(), "missing {}", field);
        }
        assert_eq!(
            schema["properties"]["invoice_lines"]["properties"]["create"]["type"],
            "array"
        );
    }

    #[test]
    fn test_appendix_schema_has_no_sort() {
        let schema = quote_list_schema(DEFAULT_APPENDIX_LIMIT, None);
        assert!(schema["properties"].get("sort").is_none());
        assert_eq!(schema["properties"]["limit"]["default"], 20);
    }
}

// Customer tools

use super::{
    json_schema_array, json_schema_integer, json_schema_object, json_schema_string,
    list_properties, object, parse_args, with_default, with_enum, ToolDefinition, ToolFuture,
};
use pennylane_sdk::api::customers::{DEFAULT_CUSTOMER_LIMIT, DEFAULT_CUSTOMER_SORT};
use pennylane_sdk::api::{
    BillingLanguage, CreateCompanyCustomerRequest, CreateIndividualCustomerRequest, ListQuery,
    PaymentConditions,
};
use pennylane_sdk::PennylaneClient;
use serde::Deserialize;
use serde_json::{json, Map, Value};

#[derive(Debug, Deserialize)]
struct CustomerIdArgs {
    customer_id: u64,
}

pub(super) fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "pennylane_list_customers",
            "List all customers, companies and individuals",
            object(
                list_properties(DEFAULT_CUSTOMER_LIMIT, Some(DEFAULT_CUSTOMER_SORT), true),
                vec![],
            ),
            list_customers,
        ),
        ToolDefinition::new(
            "pennylane_get_customer",
            "Get a customer by ID, whatever its type",
            customer_id_schema("Customer ID"),
            get_customer,
        ),
        ToolDefinition::new(
            "pennylane_get_company_customer",
            "Get a company customer by ID",
            customer_id_schema("Company customer ID"),
            get_company_customer,
        ),
        ToolDefinition::new(
            "pennylane_get_individual_customer",
            "Get an individual customer by ID",
            customer_id_schema("Individual customer ID"),
            get_individual_customer,
        ),
        ToolDefinition::new(
            "pennylane_create_company_customer",
            "Create a company customer",
            create_company_schema(),
            create_company_customer,
        ),
        ToolDefinition::new(
            "pennylane_create_individual_customer",
            "Create an individual customer",
            create_individual_schema(),
            create_individual_customer,
        ),
    ]
}

fn customer_id_schema(description: &str) -> Value {
    json_schema_object(
        json!({ "customer_id": json_schema_integer(description) }),
        vec!["customer_id"],
    )
}

fn address_property(description: &str, required: bool) -> Value {
    let mut schema = json!({
        "type": "object",
        "description": description,
        "properties": {
            "address": {"type": "string"},
            "postal_code": {"type": "string"},
            "city": {"type": "string"},
            "country_alpha2": {"type": "string"}
        }
    });
    if required {
        schema["required"] = json!(["address", "postal_code", "city", "country_alpha2"]);
    }
    schema
}

/// Properties shared by both customer kinds.
fn common_customer_properties() -> Map<String, Value> {
    let mut properties = Map::new();
    properties.insert(
        "billing_address".into(),
        address_property("Billing address", true),
    );
    properties.insert(
        "delivery_address".into(),
        address_property("Delivery address", false),
    );
    properties.insert(
        "emails".into(),
        json_schema_array(json!({"type": "string"}), "Contact emails"),
    );
    properties.insert("phone".into(), json_schema_string("Phone number"));
    properties.insert(
        "payment_conditions".into(),
        with_default(
            with_enum(json_schema_string("Payment terms"), &PaymentConditions::ALL),
            "30_days",
        ),
    );
    properties.insert(
        "billing_language".into(),
        with_default(
            with_enum(json_schema_string("Invoice language"), &BillingLanguage::ALL),
            "fr_FR",
        ),
    );
    properties.insert(
        "ledger_account".into(),
        json!({
            "type": "object",
            "description": "Customer ledger account, e.g. {\"number\": \"411ACME\"}"
        }),
    );
    properties
}

fn create_company_schema() -> Value {
    let mut properties = Map::new();
    properties.insert("name".into(), json_schema_string("Company name"));
    properties.extend(common_customer_properties());
    properties.insert(
        "vat_number".into(),
        json_schema_string("Intra-community VAT number"),
    );
    properties.insert("reg_no".into(), json_schema_string("SIREN or SIRET"));
    object(properties, vec!["name", "billing_address"])
}

fn create_individual_schema() -> Value {
    let mut properties = Map::new();
    properties.insert("first_name".into(), json_schema_string("First name"));
    properties.insert("last_name".into(), json_schema_string("Last name"));
    properties.extend(common_customer_properties());
    object(properties, vec!["first_name", "last_name", "billing_address"])
}

fn list_customers(client: &PennylaneClient, args: Value) -> ToolFuture<'_> {
    Box::pin(async move {
        let query: ListQuery = parse_args(args)?;
        Ok(client.customers().list(query).await?)
    })
}

fn get_customer(client: &PennylaneClient, args: Value) -> ToolFuture<'_> {
    Box::pin(async move {
        let args: CustomerIdArgs = parse_args(args)?;
        Ok(client.customers().get(args.customer_id).await?)
    })
}

fn get_company_customer(client: &PennylaneClient, args: Value) -> ToolFuture<'_> {
    Box::pin(async move {
        let args: CustomerIdArgs = parse_args(args)?;
        Ok(client.customers().get_company(args.customer_id).await?)
    })
}

fn get_individual_customer(client: &PennylaneClient, args: Value) -> ToolFuture<'_> {
    Box::pin(async move {
        let args: CustomerIdArgs = parse_args(args)?;
        Ok(client.customers().get_individual(args.customer_id).await?)
    })
}

fn create_company_customer(client: &PennylaneClient, args: Value) -> ToolFuture<'_> {
    Box::pin(async move {
        let request: CreateCompanyCustomerRequest = parse_args(args)?;
        Ok(client.customers().create_company(&request).await?)
    })
}

fn create_individual_customer(client: &PennylaneClient, args: Value) -> ToolFuture<'_> {
    Box::pin(async move {
        let request: CreateIndividualCustomerRequest = parse_args(args)?;
        Ok(client.customers().create_individual(&request).await?)
    })
}

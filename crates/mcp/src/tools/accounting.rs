// Accounting tools: reports and reference data

use super::{
    json_schema_boolean, json_schema_integer, json_schema_object, json_schema_string,
    list_properties, object, parse_args, with_default, ToolDefinition, ToolFuture,
};
use pennylane_sdk::api::accounting::{
    DEFAULT_ACCOUNTING_SORT, DEFAULT_BANK_ACCOUNT_LIMIT, DEFAULT_CATEGORY_LIMIT, DEFAULT_PAGE,
    DEFAULT_PER_PAGE,
};
use pennylane_sdk::api::{ListQuery, PageQuery, TrialBalanceQuery};
use pennylane_sdk::PennylaneClient;
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
struct ExportFecArgs {
    fiscal_year_id: u64,
}

pub(super) fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "pennylane_get_trial_balance",
            "Get the trial balance over a period",
            json_schema_object(
                json!({
                    "period_start": json_schema_string("Period start (YYYY-MM-DD)"),
                    "period_end": json_schema_string("Period end (YYYY-MM-DD)"),
                    "is_auxiliary": with_default(
                        json_schema_boolean("Include auxiliary (third-party) accounts"),
                        false,
                    ),
                    "page": page_property(),
                    "per_page": per_page_property()
                }),
                vec!["period_start", "period_end"],
            ),
            get_trial_balance,
        ),
        ToolDefinition::new(
            "pennylane_list_ledger_accounts",
            "List the ledger accounts of the chart of accounts",
            json_schema_object(
                json!({
                    "page": page_property(),
                    "per_page": per_page_property(),
                    "filter": json_schema_string("Filter expression, e.g. 'number:start_with:411'")
                }),
                vec![],
            ),
            list_ledger_accounts,
        ),
        ToolDefinition::new(
            "pennylane_list_categories",
            "List accounting categories",
            object(
                list_properties(DEFAULT_CATEGORY_LIMIT, Some(DEFAULT_ACCOUNTING_SORT), true),
                vec![],
            ),
            list_categories,
        ),
        ToolDefinition::new(
            "pennylane_list_bank_accounts",
            "List the company's bank accounts",
            object(
                list_properties(
                    DEFAULT_BANK_ACCOUNT_LIMIT,
                    Some(DEFAULT_ACCOUNTING_SORT),
                    false,
                ),
                vec![],
            ),
            list_bank_accounts,
        ),
        ToolDefinition::new(
            "pennylane_export_fec",
            "Start an FEC (Fichier des Écritures Comptables) export for a fiscal year",
            json_schema_object(
                json!({ "fiscal_year_id": json_schema_integer("Fiscal year ID") }),
                vec!["fiscal_year_id"],
            ),
            export_fec,
        ),
    ]
}

fn page_property() -> Value {
    with_default(json_schema_integer("Page number"), DEFAULT_PAGE)
}

fn per_page_property() -> Value {
    with_default(
        json_schema_integer("Results per page (1-1000)"),
        DEFAULT_PER_PAGE,
    )
}

fn get_trial_balance(client: &PennylaneClient, args: Value) -> ToolFuture<'_> {
    Box::pin(async move {
        let query: TrialBalanceQuery = parse_args(args)?;
        Ok(client.accounting().trial_balance(&query).await?)
    })
}

fn list_ledger_accounts(client: &PennylaneClient, args: Value) -> ToolFuture<'_> {
    Box::pin(async move {
        let query: PageQuery = parse_args(args)?;
        Ok(client.accounting().ledger_accounts(query).await?)
    })
}

fn list_categories(client: &PennylaneClient, args: Value) -> ToolFuture<'_> {
    Box::pin(async move {
        let query: ListQuery = parse_args(args)?;
        Ok(client.accounting().categories(query).await?)
    })
}

fn list_bank_accounts(client: &PennylaneClient, args: Value) -> ToolFuture<'_> {
    Box::pin(async move {
        let query: ListQuery = parse_args(args)?;
        Ok(client.accounting().bank_accounts(query).await?)
    })
}

fn export_fec(client: &PennylaneClient, args: Value) -> ToolFuture<'_> {
    Box::pin(async move {
        let args: ExportFecArgs = parse_args(args)?;
        Ok(client.accounting().export_fec(args.fiscal_year_id).await?)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trial_balance_requires_period() {
        let err = parse_args::<TrialBalanceQuery>(json!({"period_start": "2024-01-01"}))
            .unwrap_err();
        assert!(err.to_string().contains("period_end"));
    }

    #[test]
    fn test_categories_schema_declares_sort() {
        let definitions = definitions();
        let categories = definitions
            .iter()
            .find(|d| d.schema.name == "pennylane_list_categories")
            .unwrap();
        assert_eq!(
            categories.schema.input_schema["properties"]["sort"]["default"],
            "-id"
        );
    }
}

//! Accounting reference data and reports.

use super::{non_empty, ListQuery};
use crate::client::PennylaneClient;
use crate::error::PennylaneResult;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PER_PAGE: u32 = 100;
pub const DEFAULT_CATEGORY_LIMIT: u32 = 100;
pub const DEFAULT_BANK_ACCOUNT_LIMIT: u32 = 100;
pub const DEFAULT_ACCOUNTING_SORT: &str = "-id";

/// Accounting API.
pub struct AccountingApi<'a> {
    client: &'a PennylaneClient,
}

impl<'a> AccountingApi<'a> {
    pub(crate) fn new(client: &'a PennylaneClient) -> Self {
        Self { client }
    }

    /// Trial balance over a period.
    pub async fn trial_balance(&self, query: &TrialBalanceQuery) -> PennylaneResult<Value> {
        self.client.http.get_with_query("trial_balance", query).await
    }

    /// Chart of accounts, page-numbered.
    pub async fn ledger_accounts(&self, query: PageQuery) -> PennylaneResult<Value> {
        let query = PageQuery {
            filter: non_empty(query.filter),
            ..query
        };
        self.client.http.get_with_query("ledger_accounts", &query).await
    }

    /// Accounting categories.
    pub async fn categories(&self, query: ListQuery) -> PennylaneResult<Value> {
        let query = query.with_defaults(DEFAULT_CATEGORY_LIMIT, Some(DEFAULT_ACCOUNTING_SORT));
        self.client.http.get_with_query("categories", &query).await
    }

    /// Bank accounts of the company. Filters are not supported by this endpoint.
    pub async fn bank_accounts(&self, query: ListQuery) -> PennylaneResult<Value> {
        let query = ListQuery {
            filter: None,
            ..query
        }
        .with_defaults(DEFAULT_BANK_ACCOUNT_LIMIT, Some(DEFAULT_ACCOUNTING_SORT));
        self.client.http.get_with_query("bank_accounts", &query).await
    }

    /// Start an FEC (Fichier des Écritures Comptables) export for a fiscal year.
    pub async fn export_fec(&self, fiscal_year_id: u64) -> PennylaneResult<Value> {
        self.client
            .http
            .post("exports/fec", &json!({ "fiscal_year_id": fiscal_year_id }))
            .await
    }
}

fn default_page() -> u32 {
    DEFAULT_PAGE
}

fn default_per_page() -> u32 {
    DEFAULT_PER_PAGE
}

/// Page-numbered listing parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    /// 1 to 1000.
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
            filter: None,
        }
    }
}

/// Trial balance parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalanceQuery {
    /// `YYYY-MM-DD`.
    pub period_start: String,
    /// `YYYY-MM-DD`.
    pub period_end: String,
    /// Include auxiliary (third-party) accounts.
    #[serde(default)]
    pub is_auxiliary: bool,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

impl TrialBalanceQuery {
    pub fn new(period_start: impl Into<String>, period_end: impl Into<String>) -> Self {
        Self {
            period_start: period_start.into(),
            period_end: period_end.into(),
            is_auxiliary: false,
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trial_balance_defaults() {
        let query: TrialBalanceQuery = serde_json::from_value(json!({
            "period_start": "2024-01-01",
            "period_end": "2024-12-31"
        }))
        .unwrap();
        assert_eq!(query, TrialBalanceQuery::new("2024-01-01", "2024-12-31"));
    }

    #[test]
    fn test_trial_balance_requires_period() {
        let err = serde_json::from_value::<TrialBalanceQuery>(json!({"period_start": "2024-01-01"}))
            .unwrap_err();
        assert!(err.to_string().contains("period_end"));
    }
}

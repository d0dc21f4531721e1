//! Bank transaction endpoints, including matching transactions to invoices.

use super::invoices::{CategorizeRequest, InvoiceKind};
use super::{non_empty, ExtraFields, ListQuery};
use crate::client::PennylaneClient;
use crate::error::PennylaneResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_TRANSACTION_LIMIT: u32 = 20;
/// Newest first.
pub const DEFAULT_TRANSACTION_SORT: &str = "-date";

/// Transactions API.
pub struct TransactionsApi<'a> {
    client: &'a PennylaneClient,
}

impl<'a> TransactionsApi<'a> {
    pub(crate) fn new(client: &'a PennylaneClient) -> Self {
        Self { client }
    }

    /// List bank transactions.
    pub async fn list(&self, query: ListQuery) -> PennylaneResult<Value> {
        let query =
            query.with_defaults(DEFAULT_TRANSACTION_LIMIT, Some(DEFAULT_TRANSACTION_SORT));
        self.client.http.get_with_query("transactions", &query).await
    }

    /// Get a transaction.
    pub async fn get(&self, transaction_id: u64) -> PennylaneResult<Value> {
        self.client
            .http
            .get(&format!("transactions/{}", transaction_id))
            .await
    }

    /// Create a transaction on a bank account.
    pub async fn create(&self, request: &CreateTransactionRequest) -> PennylaneResult<Value> {
        self.client.http.post("transactions", request).await
    }

    /// Update a transaction with whatever fields are given.
    pub async fn update(&self, transaction_id: u64, fields: &ExtraFields) -> PennylaneResult<Value> {
        self.client
            .http
            .put(&format!("transactions/{}", transaction_id), fields)
            .await
    }

    /// Replace the accounting categories of a transaction.
    pub async fn categorize(
        &self,
        transaction_id: u64,
        request: &CategorizeRequest,
    ) -> PennylaneResult<Value> {
        self.client
            .http
            .put(&format!("transactions/{}/categories", transaction_id), request)
            .await
    }

    /// Match a transaction to an invoice, optionally for part of its amount.
    pub async fn match_invoice(
        &self,
        kind: InvoiceKind,
        invoice_id: u64,
        request: &MatchTransactionRequest,
    ) -> PennylaneResult<Value> {
        let request = MatchTransactionRequest {
            transaction_id: request.transaction_id,
            amount: non_empty(request.amount.clone()),
        };
        self.client
            .http
            .post(
                &format!("{}/matched_transactions", kind.path(invoice_id)),
                &request,
            )
            .await
    }

    /// Remove the match between a transaction and an invoice.
    pub async fn unmatch_invoice(
        &self,
        kind: InvoiceKind,
        invoice_id: u64,
        transaction_id: u64,
    ) -> PennylaneResult<Value> {
        self.client
            .http
            .delete(&format!(
                "{}/matched_transactions/{}",
                kind.path(invoice_id),
                transaction_id
            ))
            .await
    }
}

fn default_fee() -> String {
    "0.00".to_string()
}

/// Request to create a bank transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTransactionRequest {
    /// `YYYY-MM-DD`.
    pub date: String,
    /// Positive for a credit, negative for a debit.
    pub amount: String,
    pub label: String,
    pub bank_account_id: u64,
    #[serde(default = "default_fee")]
    pub fee: String,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl CreateTransactionRequest {
    pub fn new(
        date: impl Into<String>,
        amount: impl Into<String>,
        label: impl Into<String>,
        bank_account_id: u64,
    ) -> Self {
        Self {
            date: date.into(),
            amount: amount.into(),
            label: label.into(),
            bank_account_id,
            fee: default_fee(),
            extra: ExtraFields::new(),
        }
    }
}

/// Request to match a transaction to an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchTransactionRequest {
    pub transaction_id: u64,
    /// Partial amount; the whole transaction is matched when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
}

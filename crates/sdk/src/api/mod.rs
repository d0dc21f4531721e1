//! Resource endpoints of the Pennylane API, one module per resource family.
//!
//! Every call issues exactly one HTTP request and returns the decoded JSON
//! body untouched.

pub mod accounting;
pub mod customers;
pub mod invoices;
pub mod quotes;
pub mod suppliers;
pub mod transactions;

pub use accounting::{AccountingApi, PageQuery, TrialBalanceQuery};
pub use customers::{
    Address, BillingLanguage, CreateCompanyCustomerRequest, CreateIndividualCustomerRequest,
    CustomersApi, PaymentConditions,
};
pub use invoices::{
    CategorizeRequest, CreateCustomerInvoiceRequest, CustomerInvoicesApi, InvoiceKind,
    SendByEmailRequest, SupplierInvoicesApi,
};
pub use quotes::{CreateQuoteRequest, QuoteStatus, QuotesApi};
pub use suppliers::{
    CreateSupplierRequest, SupplierDueDateRule, SupplierPaymentMethod, SuppliersApi,
};
pub use transactions::{CreateTransactionRequest, MatchTransactionRequest, TransactionsApi};

use serde::{Deserialize, Serialize};

/// Free-form fields merged into a request body after the modeled ones.
pub type ExtraFields = serde_json::Map<String, serde_json::Value>;

/// Cursor-paginated listing parameters.
///
/// Unset fields fall back to the defaults of the endpoint being called.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    pub fn cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    /// Filter expression, e.g. `paid:eq:false`.
    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Fill unset fields with an endpoint's defaults and drop empty strings.
    pub(crate) fn with_defaults(mut self, limit: u32, sort: Option<&str>) -> Self {
        self.limit.get_or_insert(limit);
        if let Some(sort) = sort {
            self.sort.get_or_insert_with(|| sort.to_string());
        }
        self.cursor = non_empty(self.cursor);
        self.filter = non_empty(self.filter);
        self
    }

    /// Same as [`ListQuery::with_defaults`] for endpoints that take no sort key.
    pub(crate) fn without_sort(mut self, limit: u32) -> Self {
        self.sort = None;
        self.with_defaults(limit, None)
    }
}

pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_only_unset_fields() {
        let query = ListQuery::new().sort("date").with_defaults(20, Some("-id"));
        assert_eq!(query.limit, Some(20));
        assert_eq!(query.sort.as_deref(), Some("date"));
    }

    #[test]
    fn test_empty_cursor_and_filter_are_dropped() {
        let query = ListQuery::new().cursor("").filter("").with_defaults(20, Some("-id"));
        assert!(query.cursor.is_none());
        assert!(query.filter.is_none());
    }

    #[test]
    fn test_query_string_order() {
        let query = ListQuery::new()
            .cursor("abc")
            .filter("paid:eq:false")
            .with_defaults(20, Some("-id"));
        let encoded = serde_json::to_value(&query).unwrap();
        let keys: Vec<&String> = encoded.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["limit", "sort", "cursor", "filter"]);
    }

    #[test]
    fn test_without_sort_drops_sort() {
        let query = ListQuery::new().sort("-id").without_sort(20);
        assert!(query.sort.is_none());
        assert_eq!(query.limit, Some(20));
    }
}

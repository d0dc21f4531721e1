//! Customer and supplier invoice endpoints.

use super::{ExtraFields, ListQuery};
use crate::client::PennylaneClient;
use crate::error::PennylaneResult;
use super::customers::BillingLanguage;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const DEFAULT_INVOICE_LIMIT: u32 = 20;
pub const DEFAULT_INVOICE_SORT: &str = "-id";

/// Which side of the ledger an invoice belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceKind {
    Customer,
    Supplier,
}

impl InvoiceKind {
    /// Collection segment in API paths.
    pub fn collection(&self) -> &'static str {
        match self {
            Self::Customer => "customer_invoices",
            Self::Supplier => "supplier_invoices",
        }
    }

    pub(crate) fn path(&self, invoice_id: u64) -> String {
        format!("{}/{}", self.collection(), invoice_id)
    }
}

/// Customer invoices API.
pub struct CustomerInvoicesApi<'a> {
    client: &'a PennylaneClient,
}

impl<'a> CustomerInvoicesApi<'a> {
    pub(crate) fn new(client: &'a PennylaneClient) -> Self {
        Self { client }
    }

    /// List customer invoices.
    pub async fn list(&self, query: ListQuery) -> PennylaneResult<Value> {
        list(self.client, InvoiceKind::Customer, query).await
    }

    /// Get a customer invoice.
    pub async fn get(&self, invoice_id: u64) -> PennylaneResult<Value> {
        get(self.client, InvoiceKind::Customer, invoice_id).await
    }

    /// Create a customer invoice, as a draft unless `draft` is false.
    pub async fn create(&self, request: &CreateCustomerInvoiceRequest) -> PennylaneResult<Value> {
        self.client.http.post("customer_invoices", request).await
    }

    /// Finalize a draft invoice. The invoice becomes immutable and its PDF is generated.
    pub async fn finalize(&self, invoice_id: u64) -> PennylaneResult<Value> {
        self.client
            .http
            .put_empty(&format!("customer_invoices/{}/finalize", invoice_id))
            .await
    }

    /// Email an invoice. An empty recipient list lets Pennylane use the customer's addresses.
    pub async fn send_by_email(
        &self,
        invoice_id: u64,
        request: &SendByEmailRequest,
    ) -> PennylaneResult<Value> {
        self.client
            .http
            .post(&format!("customer_invoices/{}/send_by_email", invoice_id), request)
            .await
    }

    /// Replace the accounting categories of a customer invoice.
    pub async fn categorize(
        &self,
        invoice_id: u64,
        request: &CategorizeRequest,
    ) -> PennylaneResult<Value> {
        categorize(self.client, InvoiceKind::Customer, invoice_id, request).await
    }
}

/// Supplier invoices API.
pub struct SupplierInvoicesApi<'a> {
    client: &'a PennylaneClient,
}

impl<'a> SupplierInvoicesApi<'a> {
    pub(crate) fn new(client: &'a PennylaneClient) -> Self {
        Self { client }
    }

    /// List supplier invoices.
    pub async fn list(&self, query: ListQuery) -> PennylaneResult<Value> {
        list(self.client, InvoiceKind::Supplier, query).await
    }

    /// Get a supplier invoice.
    pub async fn get(&self, invoice_id: u64) -> PennylaneResult<Value> {
        get(self.client, InvoiceKind::Supplier, invoice_id).await
    }

    /// Replace the accounting categories of a supplier invoice.
    pub async fn categorize(
        &self,
        invoice_id: u64,
        request: &CategorizeRequest,
    ) -> PennylaneResult<Value> {
        categorize(self.client, InvoiceKind::Supplier, invoice_id, request).await
    }
}

async fn list(client: &PennylaneClient, kind: InvoiceKind, query: ListQuery) -> PennylaneResult<Value> {
    let query = query.with_defaults(DEFAULT_INVOICE_LIMIT, Some(DEFAULT_INVOICE_SORT));
    client.http.get_with_query(kind.collection(), &query).await
}

async fn get(client: &PennylaneClient, kind: InvoiceKind, invoice_id: u64) -> PennylaneResult<Value> {
    client.http.get(&kind.path(invoice_id)).await
}

async fn categorize(
    client: &PennylaneClient,
    kind: InvoiceKind,
    invoice_id: u64,
    request: &CategorizeRequest,
) -> PennylaneResult<Value> {
    client
        .http
        .put(&format!("{}/categories", kind.path(invoice_id)), request)
        .await
}

fn default_draft() -> bool {
    true
}

fn default_currency() -> String {
    "EUR".to_string()
}

/// Request to create a customer invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateCustomerInvoiceRequest {
    pub customer_id: u64,
    /// Issue date, `YYYY-MM-DD`.
    pub date: String,
    /// Payment deadline, `YYYY-MM-DD`.
    pub deadline: String,
    /// Lines with `label`, `raw_currency_unit_price`, `quantity`, `unit`, `vat_rate`.
    pub invoice_lines: Vec<Value>,
    #[serde(default = "default_draft")]
    pub draft: bool,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub language: BillingLanguage,
    /// e.g. `pdf_invoice_subject`, `special_mention`, `discount`.
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl CreateCustomerInvoiceRequest {
    pub fn new(
        customer_id: u64,
        date: impl Into<String>,
        deadline: impl Into<String>,
        invoice_lines: Vec<Value>,
    ) -> Self {
        Self {
            customer_id,
            date: date.into(),
            deadline: deadline.into(),
            invoice_lines,
            draft: default_draft(),
            currency: default_currency(),
            language: BillingLanguage::default(),
            extra: ExtraFields::new(),
        }
    }
}

/// Request to email an invoice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendByEmailRequest {
    /// Absent, `null` and `[]` all mean "the customer's own addresses".
    #[serde(default, deserialize_with = "null_as_empty")]
    pub recipients: Vec<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Category allocation for an invoice or a transaction.
///
/// Each entry carries a `category_id` and a `weight` (e.g. `"0.5"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorizeRequest {
    pub categories: Vec<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_invoice_defaults_and_extra_fields() {
        let request: CreateCustomerInvoiceRequest = serde_json::from_value(json!({
            "customer_id": 12,
            "date": "2024-01-15",
            "deadline": "2024-02-14",
            "invoice_lines": [{"label": "Conseil", "quantity": 2}],
            "pdf_invoice_subject": "Mission janvier"
        }))
        .unwrap();

        assert!(request.draft);
        assert_eq!(request.currency, "EUR");
        assert_eq!(request.language, BillingLanguage::French);
        assert_eq!(request.extra["pdf_invoice_subject"], "Mission janvier");

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["pdf_invoice_subject"], "Mission janvier");
        assert_eq!(body["draft"], true);
    }

    #[test]
    fn test_create_invoice_requires_lines() {
        let err = serde_json::from_value::<CreateCustomerInvoiceRequest>(json!({
            "customer_id": 12,
            "date": "2024-01-15",
            "deadline": "2024-02-14"
        }))
        .unwrap_err();
        assert!(err.to_string().contains("invoice_lines"));
    }

    #[test]
    fn test_create_invoice_rejects_unknown_language() {
        let err = serde_json::from_value::<CreateCustomerInvoiceRequest>(json!({
            "customer_id": 12,
            "date": "2024-01-15",
            "deadline": "2024-02-14",
            "invoice_lines": [],
            "language": "es_ES"
        }))
        .unwrap_err();
        assert!(err.to_string().contains("unknown variant `es_ES`"));
    }

    #[test]
    fn test_null_recipients_mean_customer_addresses() {
        for args in [json!({}), json!({"recipients": null}), json!({"recipients": []})] {
            let request: SendByEmailRequest = serde_json::from_value(args).unwrap();
            assert!(request.recipients.is_empty());
            assert_eq!(serde_json::to_value(&request).unwrap(), json!({"recipients": []}));
        }
    }

    #[test]
    fn test_invoice_kind_paths() {
        assert_eq!(InvoiceKind::Customer.path(3), "customer_invoices/3");
        assert_eq!(InvoiceKind::Supplier.path(4), "supplier_invoices/4");
    }
}

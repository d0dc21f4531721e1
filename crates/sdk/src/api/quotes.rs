//! Quote endpoints.

use super::customers::BillingLanguage;
use super::{ExtraFields, ListQuery};
use crate::client::PennylaneClient;
use crate::error::{PennylaneError, PennylaneResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const DEFAULT_QUOTE_LIMIT: u32 = 30;
pub const DEFAULT_QUOTE_SORT: &str = "-id";
pub const DEFAULT_SECTION_LIMIT: u32 = 100;
pub const DEFAULT_APPENDIX_LIMIT: u32 = 20;

/// Quotes API.
pub struct QuotesApi<'a> {
    client: &'a PennylaneClient,
}

impl<'a> QuotesApi<'a> {
    pub(crate) fn new(client: &'a PennylaneClient) -> Self {
        Self { client }
    }

    /// List quotes.
    pub async fn list(&self, query: ListQuery) -> PennylaneResult<Value> {
        let query = query.with_defaults(DEFAULT_QUOTE_LIMIT, Some(DEFAULT_QUOTE_SORT));
        self.client.http.get_with_query("quotes", &query).await
    }

    /// Get a quote.
    pub async fn get(&self, quote_id: u64) -> PennylaneResult<Value> {
        self.client.http.get(&format!("quotes/{}", quote_id)).await
    }

    /// List the invoice-line sections of a quote. Filters are not supported.
    pub async fn invoice_line_sections(
        &self,
        quote_id: u64,
        query: ListQuery,
    ) -> PennylaneResult<Value> {
        let query = ListQuery {
            filter: None,
            ..query
        }
        .with_defaults(DEFAULT_SECTION_LIMIT, Some(DEFAULT_QUOTE_SORT));
        self.client
            .http
            .get_with_query(&format!("quotes/{}/invoice_line_sections", quote_id), &query)
            .await
    }

    /// List the file appendices of a quote.
    pub async fn appendices(&self, quote_id: u64, query: ListQuery) -> PennylaneResult<Value> {
        let query = ListQuery {
            filter: None,
            ..query
        }
        .without_sort(DEFAULT_APPENDIX_LIMIT);
        self.client
            .http
            .get_with_query(&format!("quotes/{}/appendices", quote_id), &query)
            .await
    }

    /// Create a quote.
    pub async fn create(&self, request: &CreateQuoteRequest) -> PennylaneResult<Value> {
        self.client.http.post("quotes", request).await
    }

    /// Update a quote with whatever fields are given.
    pub async fn update(&self, quote_id: u64, fields: &ExtraFields) -> PennylaneResult<Value> {
        self.client
            .http
            .put(&format!("quotes/{}", quote_id), fields)
            .await
    }

    /// Move a quote to another status.
    pub async fn update_status(&self, quote_id: u64, status: QuoteStatus) -> PennylaneResult<Value> {
        self.client
            .http
            .put(
                &format!("quotes/{}/update_status", quote_id),
                &json!({ "status": status }),
            )
            .await
    }

    /// Attach a file to a quote.
    ///
    /// The endpoint needs a multipart/form-data upload, which this client does
    /// not speak. Always fails without contacting the API.
    pub async fn add_appendix(
        &self,
        quote_id: u64,
        file_path: &str,
        file_name: &str,
    ) -> PennylaneResult<Value> {
        tracing::debug!(quote_id, file_path, file_name, "quote appendix upload requested");
        Err(PennylaneError::NotImplemented(
            "uploading quote appendices requires a multipart/form-data upload, \
             which is not supported yet"
                .to_string(),
        ))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStatus {
    Pending,
    Accepted,
    Denied,
    Invoiced,
    Expired,
}

impl QuoteStatus {
    pub const ALL: [&'static str; 5] = ["pending", "accepted", "denied", "invoiced", "expired"];
}

fn default_currency() -> String {
    "EUR".to_string()
}

/// Request to create a quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateQuoteRequest {
    pub customer_id: u64,
    /// Lines with `label`, `quantity`, `raw_currency_unit_price`, `vat_rate`, `unit`.
    pub invoice_lines: Vec<Value>,
    /// `YYYY-MM-DD`.
    pub date: String,
    /// `YYYY-MM-DD`.
    pub deadline: String,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub language: BillingLanguage,
    /// `{"type": "absolute" | "percentage", "value": "..."}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_line_sections: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote_template_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_invoice_free_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_invoice_subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_mention: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_reference: Option<String>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl CreateQuoteRequest {
    pub fn new(
        customer_id: u64,
        invoice_lines: Vec<Value>,
        date: impl Into<String>,
        deadline: impl Into<String>,
    ) -> Self {
        Self {
            customer_id,
            invoice_lines,
            date: date.into(),
            deadline: deadline.into(),
            currency: default_currency(),
            language: BillingLanguage::default(),
            discount: None,
            invoice_line_sections: None,
            quote_template_id: None,
            pdf_invoice_free_text: None,
            pdf_invoice_subject: None,
            pdf_description: None,
            special_mention: None,
            external_reference: None,
            extra: ExtraFields::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_status_wire_names() {
        let statuses = [
            QuoteStatus::Pending,
            QuoteStatus::Accepted,
            QuoteStatus::Denied,
            QuoteStatus::Invoiced,
            QuoteStatus::Expired,
        ];
        for (status, name) in statuses.iter().zip(QuoteStatus::ALL) {
            assert_eq!(serde_json::to_value(status).unwrap(), name);
        }
    }

    #[test]
    fn test_create_quote_defaults() {
        let body = serde_json::to_value(CreateQuoteRequest::new(
            5,
            vec![json!({"label": "Audit", "quantity": 1})],
            "2024-05-01",
            "2024-05-31",
        ))
        .unwrap();
        assert_eq!(body["currency"], "EUR");
        assert_eq!(body["language"], "fr_FR");
        assert!(body.get("discount").is_none());
    }
}

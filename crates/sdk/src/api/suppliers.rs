//! Supplier endpoints.

use super::{ExtraFields, ListQuery};
use crate::client::PennylaneClient;
use crate::error::PennylaneResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_SUPPLIER_LIMIT: u32 = 20;
pub const DEFAULT_SUPPLIER_SORT: &str = "-id";

/// Suppliers API.
pub struct SuppliersApi<'a> {
    client: &'a PennylaneClient,
}

impl<'a> SuppliersApi<'a> {
    pub(crate) fn new(client: &'a PennylaneClient) -> Self {
        Self { client }
    }

    /// List suppliers.
    pub async fn list(&self, query: ListQuery) -> PennylaneResult<Value> {
        let query = query.with_defaults(DEFAULT_SUPPLIER_LIMIT, Some(DEFAULT_SUPPLIER_SORT));
        self.client.http.get_with_query("suppliers", &query).await
    }

    /// Get a supplier.
    pub async fn get(&self, supplier_id: u64) -> PennylaneResult<Value> {
        self.client
            .http
            .get(&format!("suppliers/{}", supplier_id))
            .await
    }

    /// Create a supplier.
    pub async fn create(&self, request: &CreateSupplierRequest) -> PennylaneResult<Value> {
        self.client.http.post("suppliers", request).await
    }

    /// Update a supplier with whatever fields are given.
    pub async fn update(&self, supplier_id: u64, fields: &ExtraFields) -> PennylaneResult<Value> {
        self.client
            .http
            .put(&format!("suppliers/{}", supplier_id), fields)
            .await
    }
}

/// How a supplier is paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupplierPaymentMethod {
    AutomaticTransfer,
    ManualTransfer,
    AutomaticDebiting,
    BillOfExchange,
    Check,
    Cash,
    Card,
}

impl SupplierPaymentMethod {
    pub const ALL: [&'static str; 7] = [
        "automatic_transfer",
        "manual_transfer",
        "automatic_debiting",
        "bill_of_exchange",
        "check",
        "cash",
        "card",
    ];
}

/// How `supplier_due_date_delay` is counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupplierDueDateRule {
    Days,
    DaysOrEndOfMonth,
}

impl SupplierDueDateRule {
    pub const ALL: [&'static str; 2] = ["days", "days_or_end_of_month"];
}

/// Request to create a supplier. Only `name` is required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateSupplierRequest {
    pub name: String,
    /// `address`, `postal_code`, `city`, `country_alpha2`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_address: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emails: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iban: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vat_number: Option<String>,
    /// SIREN (9 digits).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reg_no: Option<String>,
    /// SIRET (14 digits).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub establishment_no: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_payment_method: Option<SupplierPaymentMethod>,
    /// In days.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_due_date_delay: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_due_date_rule: Option<SupplierDueDateRule>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl CreateSupplierRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

//! Customer endpoints (companies and individuals).

use super::{ExtraFields, ListQuery};
use crate::client::PennylaneClient;
use crate::error::PennylaneResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_CUSTOMER_LIMIT: u32 = 20;
pub const DEFAULT_CUSTOMER_SORT: &str = "-id";

/// Customers API.
pub struct CustomersApi<'a> {
    client: &'a PennylaneClient,
}

impl<'a> CustomersApi<'a> {
    pub(crate) fn new(client: &'a PennylaneClient) -> Self {
        Self { client }
    }

    /// List customers of both kinds.
    pub async fn list(&self, query: ListQuery) -> PennylaneResult<Value> {
        let query = query.with_defaults(DEFAULT_CUSTOMER_LIMIT, Some(DEFAULT_CUSTOMER_SORT));
        self.client.http.get_with_query("customers", &query).await
    }

    /// Get a customer through the generic endpoint.
    pub async fn get(&self, customer_id: u64) -> PennylaneResult<Value> {
        self.client
            .http
            .get(&format!("customers/{}", customer_id))
            .await
    }

    /// Get a company customer.
    pub async fn get_company(&self, customer_id: u64) -> PennylaneResult<Value> {
        self.client
            .http
            .get(&format!("company_customers/{}", customer_id))
            .await
    }

    /// Get an individual customer.
    pub async fn get_individual(&self, customer_id: u64) -> PennylaneResult<Value> {
        self.client
            .http
            .get(&format!("individual_customers/{}", customer_id))
            .await
    }

    /// Create a company customer.
    pub async fn create_company(
        &self,
        request: &CreateCompanyCustomerRequest,
    ) -> PennylaneResult<Value> {
        self.client.http.post("company_customers", request).await
    }

    /// Create an individual customer.
    pub async fn create_individual(
        &self,
        request: &CreateIndividualCustomerRequest,
    ) -> PennylaneResult<Value> {
        self.client.http.post("individual_customers", request).await
    }
}

/// Postal address as Pennylane expects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub address: String,
    pub postal_code: String,
    pub city: String,
    /// ISO 3166-1 alpha-2 country code, e.g. `FR`.
    pub country_alpha2: String,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl Address {
    pub fn new(
        address: impl Into<String>,
        postal_code: impl Into<String>,
        city: impl Into<String>,
        country_alpha2: impl Into<String>,
    ) -> Self {
        Self {
            address: address.into(),
            postal_code: postal_code.into(),
            city: city.into(),
            country_alpha2: country_alpha2.into(),
            extra: ExtraFields::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentConditions {
    #[serde(rename = "upon_receipt")]
    UponReceipt,
    #[serde(rename = "custom")]
    Custom,
    #[serde(rename = "15_days")]
    Days15,
    #[default]
    #[serde(rename = "30_days")]
    Days30,
    #[serde(rename = "45_days")]
    Days45,
    #[serde(rename = "60_days")]
    Days60,
}

impl PaymentConditions {
    pub const ALL: [&'static str; 6] = [
        "upon_receipt",
        "custom",
        "15_days",
        "30_days",
        "45_days",
        "60_days",
    ];
}

/// Language of generated documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BillingLanguage {
    #[default]
    #[serde(rename = "fr_FR")]
    French,
    #[serde(rename = "en_GB")]
    English,
    #[serde(rename = "de_DE")]
    German,
}

impl BillingLanguage {
    pub const ALL: [&'static str; 3] = ["fr_FR", "en_GB", "de_DE"];
}

/// Request to create a company customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateCompanyCustomerRequest {
    pub name: String,
    pub billing_address: Address,
    #[serde(default)]
    pub payment_conditions: PaymentConditions,
    #[serde(default)]
    pub billing_language: BillingLanguage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emails: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vat_number: Option<String>,
    /// SIREN/SIRET.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reg_no: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_address: Option<Value>,
    /// e.g. `{"number": "411ACME"}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ledger_account: Option<Value>,
    /// `billing_iban`, `recipient`, `reference`, `notes`, `external_reference`, ...
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl CreateCompanyCustomerRequest {
    pub fn new(name: impl Into<String>, billing_address: Address) -> Self {
        Self {
            name: name.into(),
            billing_address,
            payment_conditions: PaymentConditions::default(),
            billing_language: BillingLanguage::default(),
            emails: None,
            phone: None,
            vat_number: None,
            reg_no: None,
            delivery_address: None,
            ledger_account: None,
            extra: ExtraFields::new(),
        }
    }
}

/// Request to create an individual customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateIndividualCustomerRequest {
    pub first_name: String,
    pub last_name: String,
    pub billing_address: Address,
    #[serde(default)]
    pub payment_conditions: PaymentConditions,
    #[serde(default)]
    pub billing_language: BillingLanguage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emails: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_address: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ledger_account: Option<Value>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl CreateIndividualCustomerRequest {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        billing_address: Address,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            billing_address,
            payment_conditions: PaymentConditions::default(),
            billing_language: BillingLanguage::default(),
            emails: None,
            phone: None,
            delivery_address: None,
            ledger_account: None,
            extra: ExtraFields::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn paris() -> Address {
        Address::new("1 rue de Rivoli", "75001", "Paris", "FR")
    }

    #[test]
    fn test_company_defaults_serialize() {
        let body = serde_json::to_value(CreateCompanyCustomerRequest::new("ACME", paris())).unwrap();
        assert_eq!(body["payment_conditions"], "30_days");
        assert_eq!(body["billing_language"], "fr_FR");
        assert!(body.get("emails").is_none());
        assert!(body.get("vat_number").is_none());
    }

    #[test]
    fn test_company_rejects_unknown_payment_condition() {
        let result = serde_json::from_value::<CreateCompanyCustomerRequest>(json!({
            "name": "ACME",
            "billing_address": {
                "address": "1 rue de Rivoli",
                "postal_code": "75001",
                "city": "Paris",
                "country_alpha2": "FR"
            },
            "payment_conditions": "90_days"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_billing_address_fields_are_required() {
        let result = serde_json::from_value::<CreateIndividualCustomerRequest>(json!({
            "first_name": "Marie",
            "last_name": "Curie",
            "billing_address": {"address": "1 rue de Rivoli", "city": "Paris"}
        }));
        assert!(result.unwrap_err().to_string().contains("postal_code"));
    }

    #[test]
    fn test_billing_address_keeps_unknown_keys() {
        let request: CreateCompanyCustomerRequest = serde_json::from_value(json!({
            "name": "ACME",
            "billing_address": {
                "address": "1 rue de Rivoli",
                "address_line_2": "Bat B",
                "postal_code": "75001",
                "city": "Paris",
                "country_alpha2": "FR"
            }
        }))
        .unwrap();

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body["billing_address"],
            json!({
                "address": "1 rue de Rivoli",
                "postal_code": "75001",
                "city": "Paris",
                "country_alpha2": "FR",
                "address_line_2": "Bat B"
            })
        );
    }

    #[test]
    fn test_enum_wire_names_match_constants() {
        let conditions = [
            PaymentConditions::UponReceipt,
            PaymentConditions::Custom,
            PaymentConditions::Days15,
            PaymentConditions::Days30,
            PaymentConditions::Days45,
            PaymentConditions::Days60,
        ];
        for (value, name) in conditions.iter().zip(PaymentConditions::ALL) {
            assert_eq!(serde_json::to_value(value).unwrap(), name);
        }

        let languages = [
            BillingLanguage::French,
            BillingLanguage::English,
            BillingLanguage::German,
        ];
        for (value, name) in languages.iter().zip(BillingLanguage::ALL) {
            assert_eq!(serde_json::to_value(value).unwrap(), name);
        }
    }
}

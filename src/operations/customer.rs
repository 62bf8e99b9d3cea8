//! Customer mutations.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::graphql::GraphqlOperation;

/// Document for the `customerUpdate` mutation.
const CUSTOMER_UPDATE: &str = "\
mutation CustomerUpdate($input: CustomerInput!) {
  customerUpdate(input: $input) {
    customer {
      id
      firstName
      lastName
      email
    }
    userErrors {
      field
      message
      code
    }
  }
}";

/// A mailing address, serialized in the shape `MailingAddressInput` expects.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MailingAddress {
    /// First address line.
    pub address1: String,
    /// Second address line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    /// City.
    pub city: String,
    /// Province or state code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub province_code: Option<String>,
    /// Country code, e.g. `US`.
    pub country_code: String,
    /// Postal or ZIP code.
    pub zip: String,
}

/// Typed input for the `customerUpdate` mutation.
///
/// Optional fields are omitted from the serialized input entirely rather
/// than sent as null, so the mutation only touches what the caller set.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerUpdate {
    /// Global id of the customer, e.g. `gid://shopify/Customer/123`.
    pub id: String,
    /// New first name.
    pub first_name: String,
    /// New last name.
    pub last_name: String,
    /// New email address, if changing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Birthday, if changing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<NaiveDate>,
    /// Billing address, if changing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<MailingAddress>,
}

/// Builds the `customerUpdate` operation.
///
/// The input travels as a bound variable; nothing from it reaches the
/// document text.
#[must_use]
pub fn customer_update(input: &CustomerUpdate) -> GraphqlOperation {
    GraphqlOperation::new(
        CUSTOMER_UPDATE,
        "customerUpdate",
        json!({ "input": input }),
    )
}

/// The customer object returned by `customerUpdate`.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Global id of the customer.
    pub id: String,
    /// First name after the update.
    #[serde(default)]
    pub first_name: Option<String>,
    /// Last name after the update.
    #[serde(default)]
    pub last_name: Option<String>,
    /// Email after the update.
    #[serde(default)]
    pub email: Option<String>,
}

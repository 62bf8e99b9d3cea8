//! Subscription contract and draft mutations.
//!
//! The contract lifecycle is: create a contract, open a draft on it with
//! `subscriptionContractUpdate`, stage changes on the draft (line adds),
//! then commit the draft to make the changes live.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::ConfigError;
use crate::graphql::GraphqlOperation;

use super::customer::MailingAddress;

const SUBSCRIPTION_CONTRACT_CREATE: &str = "\
mutation SubscriptionContractCreate($input: SubscriptionContractCreateInput!) {
  subscriptionContractCreate(input: $input) {
    draft {
      id
    }
    userErrors {
      field
      message
      code
    }
  }
}";

const SUBSCRIPTION_CONTRACT_UPDATE: &str = "\
mutation SubscriptionContractUpdate($contractId: ID!) {
  subscriptionContractUpdate(contractId: $contractId) {
    draft {
      id
    }
    userErrors {
      field
      message
      code
    }
  }
}";

const SUBSCRIPTION_DRAFT_LINE_ADD: &str = "\
mutation SubscriptionDraftLineAdd($draftId: ID!, $input: SubscriptionLineInput!) {
  subscriptionDraftLineAdd(draftId: $draftId, input: $input) {
    lineAdded {
      id
      quantity
    }
    userErrors {
      field
      message
      code
    }
  }
}";

const SUBSCRIPTION_DRAFT_COMMIT: &str = "\
mutation SubscriptionDraftCommit($draftId: ID!) {
  subscriptionDraftCommit(draftId: $draftId) {
    contract {
      id
      status
    }
    userErrors {
      field
      message
      code
    }
  }
}";

/// A validated ISO 4217 currency code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Creates a validated currency code.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCurrencyCode`] unless the code is
    /// exactly three ASCII letters (normalized to uppercase).
    pub fn new(code: impl Into<String>) -> Result<Self, ConfigError> {
        let code = code.into().trim().to_uppercase();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(ConfigError::InvalidCurrencyCode { code });
        }
        Ok(Self(code))
    }
}

impl AsRef<str> for CurrencyCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for CurrencyCode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// Billing or delivery interval unit.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PolicyInterval {
    /// Every N days.
    Day,
    /// Every N weeks.
    Week,
    /// Every N months.
    Month,
    /// Every N years.
    Year,
}

/// A billing or delivery policy: an interval unit and a count.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionPolicy {
    /// Interval unit.
    pub interval: PolicyInterval,
    /// Number of interval units between occurrences.
    pub interval_count: u32,
}

/// Typed input for the `subscriptionContractCreate` mutation.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionContractCreate {
    /// Global id of the subscribing customer.
    pub customer_id: String,
    /// Instant of the first billing attempt.
    pub next_billing_date: DateTime<Utc>,
    /// Currency the contract bills in.
    pub currency_code: CurrencyCode,
    /// How often the contract bills.
    pub billing_policy: SubscriptionPolicy,
    /// How often the contract delivers.
    pub delivery_policy: SubscriptionPolicy,
    /// Where the contract ships.
    pub shipping_address: MailingAddress,
}

/// A line staged onto a subscription draft.
///
/// `current_price` is a [`Decimal`], which serializes as an exact decimal
/// string. A price of `19.99` arrives upstream as `19.99`, never as a
/// float-rounded neighbor.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionLine {
    /// Global id of the product variant.
    pub product_variant_id: String,
    /// Units per delivery.
    pub quantity: u32,
    /// Per-unit price at the time of the change.
    pub current_price: Decimal,
}

/// Builds the `subscriptionContractCreate` operation.
#[must_use]
pub fn subscription_contract_create(input: &SubscriptionContractCreate) -> GraphqlOperation {
    GraphqlOperation::new(
        SUBSCRIPTION_CONTRACT_CREATE,
        "subscriptionContractCreate",
        json!({ "input": input }),
    )
}

/// Builds the `subscriptionContractUpdate` operation, which opens a draft
/// on an existing contract.
#[must_use]
pub fn subscription_contract_update(contract_id: &str) -> GraphqlOperation {
    GraphqlOperation::new(
        SUBSCRIPTION_CONTRACT_UPDATE,
        "subscriptionContractUpdate",
        json!({ "contractId": contract_id }),
    )
}

/// Builds the `subscriptionDraftLineAdd` operation.
#[must_use]
pub fn subscription_draft_line_add(draft_id: &str, line: &SubscriptionLine) -> GraphqlOperation {
    GraphqlOperation::new(
        SUBSCRIPTION_DRAFT_LINE_ADD,
        "subscriptionDraftLineAdd",
        json!({ "draftId": draft_id, "input": line }),
    )
}

/// Builds the `subscriptionDraftCommit` operation.
#[must_use]
pub fn subscription_draft_commit(draft_id: &str) -> GraphqlOperation {
    GraphqlOperation::new(
        SUBSCRIPTION_DRAFT_COMMIT,
        "subscriptionDraftCommit",
        json!({ "draftId": draft_id }),
    )
}

/// The draft reference returned by contract create and update.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct SubscriptionDraft {
    /// Global id of the draft.
    pub id: String,
}

/// The contract reference returned by a draft commit.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct SubscriptionContract {
    /// Global id of the contract.
    pub id: String,
    /// Contract status after commit, if the response included it.
    #[serde(default)]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_code_validates_and_normalizes() {
        assert_eq!(CurrencyCode::new("usd").unwrap().as_ref(), "USD");
        assert_eq!(CurrencyCode::new(" EUR ").unwrap().as_ref(), "EUR");
        assert!(CurrencyCode::new("").is_err());
        assert!(CurrencyCode::new("US").is_err());
        assert!(CurrencyCode::new("USDT").is_err());
        assert!(CurrencyCode::new("U5D").is_err());
    }

    #[test]
    fn test_policy_interval_serializes_screaming_snake() {
        let policy = SubscriptionPolicy {
            interval: PolicyInterval::Month,
            interval_count: 1,
        };
        let value = serde_json::to_value(policy).unwrap();
        assert_eq!(value["interval"], "MONTH");
        assert_eq!(value["intervalCount"], 1);
    }

    #[test]
    fn test_contract_update_binds_contract_id() {
        let op = subscription_contract_update("gid://shopify/SubscriptionContract/1");
        assert_eq!(op.root_field, "subscriptionContractUpdate");
        assert_eq!(
            op.variables["contractId"],
            "gid://shopify/SubscriptionContract/1"
        );
    }

    #[test]
    fn test_line_add_preserves_decimal_price_exactly() {
        let line = SubscriptionLine {
            product_variant_id: "gid://shopify/ProductVariant/9".to_string(),
            quantity: 3,
            current_price: Decimal::new(1999, 2),
        };
        let op = subscription_draft_line_add("gid://shopify/SubscriptionDraft/5", &line);
        let serialized = serde_json::to_string(&op.variables).unwrap();
        assert!(serialized.contains("\"19.99\""));
        assert_eq!(op.variables["input"]["quantity"], 3);
    }

    #[test]
    fn test_decimal_price_round_trips_through_request_body() {
        let line = SubscriptionLine {
            product_variant_id: "gid://shopify/ProductVariant/9".to_string(),
            quantity: 3,
            current_price: "19.99".parse().unwrap(),
        };
        let op = subscription_draft_line_add("gid://shopify/SubscriptionDraft/5", &line);
        let body = serde_json::to_string(&op.request_body()).unwrap();
        assert!(body.contains("19.99"));
        assert!(!body.contains("19.990000"));
    }

    #[test]
    fn test_hostile_draft_id_never_enters_document() {
        let hostile = "\" } mutation { evil";
        let op = subscription_draft_commit(hostile);
        assert_eq!(op.document, SUBSCRIPTION_DRAFT_COMMIT);
        assert_eq!(op.variables["draftId"], hostile);
    }

    #[test]
    fn test_contract_create_serializes_full_input() {
        let input = SubscriptionContractCreate {
            customer_id: "gid://shopify/Customer/123".to_string(),
            next_billing_date: "2026-10-01T00:00:00Z".parse().unwrap(),
            currency_code: CurrencyCode::new("USD").unwrap(),
            billing_policy: SubscriptionPolicy {
                interval: PolicyInterval::Month,
                interval_count: 1,
            },
            delivery_policy: SubscriptionPolicy {
                interval: PolicyInterval::Week,
                interval_count: 2,
            },
            shipping_address: MailingAddress {
                address1: "1 Main St".to_string(),
                address2: None,
                city: "Springfield".to_string(),
                province_code: Some("IL".to_string()),
                country_code: "US".to_string(),
                zip: "62701".to_string(),
            },
        };
        let op = subscription_contract_create(&input);
        let vars = &op.variables["input"];
        assert_eq!(vars["customerId"], "gid://shopify/Customer/123");
        assert_eq!(vars["nextBillingDate"], "2026-10-01T00:00:00Z");
        assert_eq!(vars["currencyCode"], "USD");
        assert_eq!(vars["billingPolicy"]["interval"], "MONTH");
        assert_eq!(vars["deliveryPolicy"]["intervalCount"], 2);
        assert_eq!(vars["shippingAddress"]["countryCode"], "US");
    }
}

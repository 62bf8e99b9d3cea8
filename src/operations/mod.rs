//! Typed request builders.
//!
//! One builder per Admin API mutation. Each takes strongly-typed arguments
//! and returns a [`GraphqlOperation`](crate::graphql::GraphqlOperation)
//! whose document is a compile-time constant; caller values only ever
//! appear in the variables map.

mod customer;
mod subscription;

pub use customer::{customer_update, Customer, CustomerUpdate, MailingAddress};
pub use subscription::{
    subscription_contract_create, subscription_contract_update, subscription_draft_commit,
    subscription_draft_line_add, CurrencyCode, PolicyInterval, SubscriptionContract,
    SubscriptionContractCreate, SubscriptionDraft, SubscriptionLine, SubscriptionPolicy,
};

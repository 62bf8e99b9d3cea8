//! Multi-step subscription update flow.
//!
//! Adding a line to a live contract takes three sequential calls: open a
//! draft on the contract, add the line to the draft, commit the draft. A
//! failure at any step aborts the rest and reports which step failed. The
//! draft created by an aborted chain is left behind; nothing here attempts
//! cleanup.

use std::fmt;

use thiserror::Error;

use crate::auth::AccessToken;
use crate::config::ShopDomain;
use crate::graphql::{GraphqlMediator, MediationError};
use crate::operations::{
    subscription_contract_update, subscription_draft_commit, subscription_draft_line_add,
    SubscriptionContract, SubscriptionDraft, SubscriptionLine,
};

/// A step in the subscription update chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateStep {
    /// Step 1: open a draft on the contract.
    OpenDraft,
    /// Step 2: add the line to the draft.
    AddLine,
    /// Step 3: commit the draft.
    Commit,
}

impl fmt::Display for UpdateStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::OpenDraft => "draft open",
            Self::AddLine => "draft line add",
            Self::Commit => "draft commit",
        })
    }
}

/// An upstream failure attributed to the chain step it occurred in.
#[derive(Debug, Error)]
#[error("subscription update failed during {step}: {source}")]
pub struct StepFailure {
    /// The step that failed.
    pub step: UpdateStep,
    /// The classified upstream failure.
    #[source]
    pub source: MediationError,
}

fn at_step(step: UpdateStep) -> impl FnOnce(MediationError) -> StepFailure {
    move |source| StepFailure { step, source }
}

fn parse_payload<T: serde::de::DeserializeOwned>(
    step: UpdateStep,
    payload: serde_json::Value,
    field: &str,
) -> Result<T, StepFailure> {
    serde_json::from_value(payload[field].clone()).map_err(|e| StepFailure {
        step,
        source: MediationError::Malformed {
            reason: format!("unreadable '{field}' payload: {e}"),
        },
    })
}

/// Runs the full update chain: open a draft on `contract_id`, add `line`,
/// commit.
///
/// Steps run strictly in order and each depends on the prior's output. On
/// failure the remaining steps are not attempted and the error names the
/// step that failed.
///
/// # Errors
///
/// Returns a [`StepFailure`] wrapping the first step's [`MediationError`].
pub async fn add_line_and_commit(
    mediator: &GraphqlMediator,
    shop: &ShopDomain,
    token: &AccessToken,
    contract_id: &str,
    line: &SubscriptionLine,
) -> Result<SubscriptionContract, StepFailure> {
    let payload = mediator
        .execute(shop, token, &subscription_contract_update(contract_id))
        .await
        .map_err(at_step(UpdateStep::OpenDraft))?;
    let draft: SubscriptionDraft = parse_payload(UpdateStep::OpenDraft, payload, "draft")?;

    tracing::debug!(shop = %shop, draft_id = %draft.id, "draft opened");

    mediator
        .execute(shop, token, &subscription_draft_line_add(&draft.id, line))
        .await
        .map_err(at_step(UpdateStep::AddLine))?;

    let payload = mediator
        .execute(shop, token, &subscription_draft_commit(&draft.id))
        .await
        .map_err(at_step(UpdateStep::Commit))?;
    let contract: SubscriptionContract = parse_payload(UpdateStep::Commit, payload, "contract")?;

    tracing::debug!(shop = %shop, contract_id = %contract.id, "draft committed");

    Ok(contract)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_step_display_names() {
        assert_eq!(UpdateStep::OpenDraft.to_string(), "draft open");
        assert_eq!(UpdateStep::AddLine.to_string(), "draft line add");
        assert_eq!(UpdateStep::Commit.to_string(), "draft commit");
    }

    #[test]
    fn test_step_failure_message_names_step() {
        let failure = StepFailure {
            step: UpdateStep::AddLine,
            source: MediationError::Transport {
                status: 500,
                body: "Internal Server Error".to_string(),
            },
        };
        let message = failure.to_string();
        assert!(message.contains("draft line add"));
    }
}

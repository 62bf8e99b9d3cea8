//! GraphQL mediation.
//!
//! All Admin API traffic flows through [`GraphqlMediator::execute`], which
//! takes a [`GraphqlOperation`] (a static document plus serde-built
//! variables) and returns either the root-field payload or a classified
//! [`MediationError`].

mod errors;
mod mediator;
mod operation;

pub use errors::{MediationError, UserError};
pub use mediator::GraphqlMediator;
pub use operation::GraphqlOperation;

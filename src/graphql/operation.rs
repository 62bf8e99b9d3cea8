//! The executable unit the mediator accepts.

use serde_json::{json, Value};

/// A GraphQL operation ready for execution.
///
/// The document is always a `&'static str` compiled into the crate; caller
/// input travels exclusively through `variables` and is serialized by serde,
/// so no request value can alter the document's structure.
#[derive(Clone, Debug)]
pub struct GraphqlOperation {
    /// The GraphQL document, compiled into the binary.
    pub document: &'static str,
    /// The root field under `data` that carries this operation's payload.
    pub root_field: &'static str,
    /// Operation variables, built by the typed request builders.
    pub variables: Value,
}

impl GraphqlOperation {
    /// Creates an operation from a static document and its variables.
    #[must_use]
    pub fn new(document: &'static str, root_field: &'static str, variables: Value) -> Self {
        Self {
            document,
            root_field,
            variables,
        }
    }

    /// Returns the JSON request body: `{"query": ..., "variables": ...}`.
    #[must_use]
    pub fn request_body(&self) -> Value {
        json!({
            "query": self.document,
            "variables": self.variables,
        })
    }
}

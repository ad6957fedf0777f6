//! Error types for the field configuration engine

use crate::state::{RecordKind, StandardFieldId};
use thiserror::Error;

/// Required custom-entry fields that were missing or blank
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing required fields: {}", .missing.join(", "))]
pub struct ValidationError {
    pub missing: Vec<&'static str>,
}

impl ValidationError {
    pub fn is_missing(&self, field: &str) -> bool {
        self.missing.contains(&field)
    }
}

/// Errors surfaced by selector and form operations
#[derive(Debug, Error)]
pub enum FieldsError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{kind} request failed: {source}")]
    Adapter {
        kind: RecordKind,
        #[source]
        source: anyhow::Error,
    },

    #[error("a custom entry request is already in progress")]
    SubmitInFlight,

    #[error("{} has no custom value list", .0.label())]
    NoCustomList(StandardFieldId),

    #[error("{} has no open custom entry form", .0.label())]
    FormNotOpen(StandardFieldId),
}

pub type FieldsResult<T> = std::result::Result<T, FieldsError>;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, StoreError};

/// Every operation in the vector store contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Add,
    Query,
    GetNodes,
    DeleteByRefDoc,
    DeleteNodes,
    Clear,
    Persist,
}

impl Operation {
    pub const ALL: [Operation; 7] = [
        Operation::Add,
        Operation::Query,
        Operation::GetNodes,
        Operation::DeleteByRefDoc,
        Operation::DeleteNodes,
        Operation::Clear,
        Operation::Persist,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Query => "query",
            Operation::GetNodes => "get_nodes",
            Operation::DeleteByRefDoc => "delete_by_ref_doc",
            Operation::DeleteNodes => "delete_nodes",
            Operation::Clear => "clear",
            Operation::Persist => "persist",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of an operation that a store may not implement.
///
/// Keeps "the store cannot do this" apart from "the store did it and found
/// nothing".
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Supported(T),
    Unsupported(Operation),
}

impl<T> Outcome<T> {
    pub fn is_supported(&self) -> bool {
        matches!(self, Outcome::Supported(_))
    }

    pub fn supported(self) -> Option<T> {
        match self {
            Outcome::Supported(value) => Some(value),
            Outcome::Unsupported(_) => None,
        }
    }

    /// Back to the error form, with `Unsupported` as `StoreError::NotSupported`
    pub fn into_result(self) -> Result<T> {
        match self {
            Outcome::Supported(value) => Ok(value),
            Outcome::Unsupported(operation) => Err(StoreError::not_supported(operation)),
        }
    }
}

/// Splits `NotSupported` out of a store result into an `Outcome`
pub trait OutcomeExt<T> {
    fn into_outcome(self) -> Result<Outcome<T>>;
}

impl<T> OutcomeExt<T> for Result<T> {
    fn into_outcome(self) -> Result<Outcome<T>> {
        match self {
            Ok(value) => Ok(Outcome::Supported(value)),
            Err(StoreError::NotSupported { operation }) => Ok(Outcome::Unsupported(operation)),
            Err(e) => Err(e),
        }
    }
}

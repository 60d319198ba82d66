//! Core type definitions.

use std::fmt;

use serde::Serialize;

/// Opaque node identifier, assigned once by the parser and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Transaction boundary attached to a transition.
///
/// Carried through the IR but not interpreted by the converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionControl {
    Begin,
    Commit,
    Rollback,
}

impl TransactionControl {
    /// Parse the `transaction-control` attribute value.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "begin" => Some(Self::Begin),
            "commit" => Some(Self::Commit),
            "rollback" => Some(Self::Rollback),
            _ => None,
        }
    }

    /// Get the lowercase string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionControl::Begin => "begin",
            TransactionControl::Commit => "commit",
            TransactionControl::Rollback => "rollback",
        }
    }
}

/// Well-known connector labels.
pub mod connector {
    pub const YES: &str = "yes";
    pub const NO: &str = "no";
    pub const ERROR: &str = "error";
    pub const NEXT: &str = "next";
    pub const DO: &str = "do";
    pub const LOOP: &str = "loop";
}

use std::fmt;

use crate::engine::NodeSet;
use crate::error::Error;

/// The result of a successful XPath check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Matched,
    NotMatched,
}

impl Outcome {
    pub fn is_matched(self) -> bool {
        matches!(self, Outcome::Matched)
    }
}

impl From<NodeSet> for Outcome {
    fn from(node_set: NodeSet) -> Self {
        if node_set.is_empty() {
            Outcome::NotMatched
        } else {
            Outcome::Matched
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Matched => write!(f, "matched"),
            Outcome::NotMatched => write!(f, "not matched"),
        }
    }
}

/// What a [`Matcher`](crate::Matcher) found, with a description of it.
///
/// The description says what was actually there, so it can be reported
/// whichever way round the assertion was meant.
#[derive(Debug)]
pub enum MatchStatus {
    Matched(String),
    Mismatched(String),
    Error(Error),
}

impl MatchStatus {
    pub fn is_matched(&self) -> bool {
        matches!(self, Self::Matched(..))
    }

    /// Swap matched and mismatched. Errors stay errors.
    pub fn negate(self) -> Self {
        match self {
            Self::Matched(description) => Self::Mismatched(description),
            Self::Mismatched(description) => Self::Matched(description),
            Self::Error(error) => Self::Error(error),
        }
    }
}

/// Crawl node state definitions
///
/// Every invocation of the crawl engine walks through these states for a
/// single address.
use std::fmt;

/// Represents where one address is in the crawl state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeState {
    // ===== Terminal Skip States =====
    /// Address is empty or not http(s); nothing was touched
    Rejected,

    /// Another branch (or an earlier run) already claimed the address
    AlreadyVisited,

    /// Address was claimed but the depth budget is spent, so no fetch
    DepthExhausted,

    // ===== Active States =====
    /// Address was claimed and the page is being fetched
    Fetching,

    /// Links are being extracted, resolved and filtered by origin
    Expanding,

    /// Child branches are running
    Recursing,

    // ===== Terminal Success State =====
    /// Every child branch has finished
    Completed,
}

impl NodeState {
    /// Returns true if this is a terminal state (the branch has ended)
    pub fn is_terminal(&self) -> bool {
        !self.is_active()
    }

    /// Returns true if the branch may still do work in this state
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Fetching | Self::Expanding | Self::Recursing)
    }

    /// Returns true if the branch ended before fetching anything
    pub fn is_skipped(&self) -> bool {
        matches!(
            self,
            Self::Rejected | Self::AlreadyVisited | Self::DepthExhausted
        )
    }

    /// Returns true if the address was recorded in the visited set
    ///
    /// Depth-exhausted addresses count: the claim precedes the depth check.
    pub fn is_claimed(&self) -> bool {
        !matches!(self, Self::Rejected | Self::AlreadyVisited)
    }

    /// Returns true if `next` is a legal successor of this state
    pub fn can_transition_to(&self, next: NodeState) -> bool {
        matches!(
            (self, next),
            (Self::Fetching, Self::Expanding)
                | (Self::Expanding, Self::Recursing)
                | (Self::Recursing, Self::Completed)
        )
    }

    /// Returns the log-friendly name of the state
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rejected => "rejected",
            Self::AlreadyVisited => "already_visited",
            Self::DepthExhausted => "depth_exhausted",
            Self::Fetching => "fetching",
            Self::Expanding => "expanding",
            Self::Recursing => "recursing",
            Self::Completed => "completed",
        }
    }

    /// Returns all possible node states
    pub fn all_states() -> Vec<Self> {
        vec![
            Self::Rejected,
            Self::AlreadyVisited,
            Self::DepthExhausted,
            Self::Fetching,
            Self::Expanding,
            Self::Recursing,
            Self::Completed,
        ]
    }
}

impl fmt::Display for NodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

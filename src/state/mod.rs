//! State module for tracking crawl progress
//!
//! `NodeState` is the per-address state machine of the crawl engine: an
//! address is either skipped (rejected, already visited, depth exhausted) or
//! walks through fetching, expanding and recursing to completion.

mod node_state;

pub use node_state::NodeState;

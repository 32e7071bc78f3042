//! Progression effect boundary.
//!
//! The crafting/story graph lives outside this core. When one of its nodes
//! changes state it notifies an implementation of [`ProgressionEffects`],
//! which the simulation provides bound to a room and a player.

use serde::{Deserialize, Serialize};

/// Identifier of a progression graph node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub String);

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Reactions to progression node transitions.
pub trait ProgressionEffects {
    fn on_start(&mut self, node: &NodeId);
    fn on_complete(&mut self, node: &NodeId);
    fn on_cancel(&mut self, node: &NodeId);
}

/// A node transition recorded on a player for the transport to forward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressEvent {
    pub node: NodeId,
    pub kind: ProgressKind,
    /// Room time of the transition.
    pub at: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProgressKind {
    Started,
    Completed,
    Cancelled,
}

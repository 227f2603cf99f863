use super::RouteRecord;
use crate::model::network::NodeId;
use serde::Serialize;
use std::fmt::Display;

/// why a random draw did not produce a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// both points resolved to the same network node
    SameNode(NodeId),
    /// no path exists from origin to destination
    Unreachable(NodeId, NodeId),
}

impl Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::SameNode(n) => write!(f, "origin and destination both at node '{n}'"),
            RejectReason::Unreachable(o, d) => write!(f, "node '{d}' unreachable from '{o}'"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOutcome {
    Accepted(RouteRecord),
    Rejected(RejectReason),
}

/// counts of what happened across all draws of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DrawStatistics {
    pub accepted: usize,
    pub rejected_same_node: u64,
    pub rejected_unreachable: u64,
    pub sampler_batches: u64,
}

impl DrawStatistics {
    pub fn record(&mut self, outcome: &DrawOutcome) {
        match outcome {
            DrawOutcome::Accepted(_) => self.accepted += 1,
            DrawOutcome::Rejected(RejectReason::SameNode(_)) => self.rejected_same_node += 1,
            DrawOutcome::Rejected(RejectReason::Unreachable(_, _)) => {
                self.rejected_unreachable += 1
            }
        }
    }

    pub fn rejected(&self) -> u64 {
        self.rejected_same_node + self.rejected_unreachable
    }

    pub fn total_draws(&self) -> u64 {
        self.accepted as u64 + self.rejected()
    }
}

impl Display for DrawStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} routes accepted from {} draws ({} same node, {} unreachable, {} sampler batches)",
            self.accepted,
            self.total_draws(),
            self.rejected_same_node,
            self.rejected_unreachable,
            self.sampler_batches
        )
    }
}

//! Explicit dependency graph over the derived nodes.
//!
//! ```text
//! seed ──────────────► [Input] ──► input
//! input, output ─────► [MaxTurn] ─► max_turn, turn
//! input, output,
//! turn, problem ─────► [Frame] ───► render state
//! ```
//!
//! Nodes are visited in topological order. A node recomputes only when one of
//! its declared dependencies is in the change set, and the fields it writes
//! join the change set for the nodes after it.

use std::fmt;

use crate::store::{Field, FieldSet};

/// A derived node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Node {
    /// `input` regenerated from `seed`.
    Input,
    /// `max_turn` validated from `(input, output)`; resets `turn`.
    MaxTurn,
    /// Frame rendered from `(input, output, turn, problem)`.
    Frame,
}

impl Node {
    /// Every node, upstream first.
    pub const TOPOLOGICAL: [Self; 3] = [Self::Input, Self::MaxTurn, Self::Frame];

    /// Fields whose change invalidates this node.
    pub fn dependencies(&self) -> &'static [Field] {
        match self {
            Self::Input => &[Field::Seed],
            Self::MaxTurn => &[Field::Input, Field::Output],
            Self::Frame => &[Field::Input, Field::Output, Field::Turn, Field::Problem],
        }
    }

    /// Fields this node may write.
    pub fn writes(&self) -> &'static [Field] {
        match self {
            Self::Input => &[Field::Input],
            Self::MaxTurn => &[Field::MaxTurn, Field::Turn],
            Self::Frame => &[],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::MaxTurn => "max_turn",
            Self::Frame => "frame",
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Nodes that may need recomputation after `changed`, assuming every node
/// that runs also changes everything it writes.
pub fn affected_nodes(changed: FieldSet) -> Vec<Node> {
    let mut changed = changed;
    let mut nodes = Vec::new();
    for node in Node::TOPOLOGICAL {
        if changed.intersects(node.dependencies()) {
            changed = changed.union(node.writes().iter().copied().collect());
            nodes.push(node);
        }
    }
    nodes
}

/// Run `recompute` for each node whose dependencies changed, in order.
///
/// `recompute` returns the fields it actually changed, so a node whose output
/// stayed the same does not wake its dependents. Returns the nodes that ran.
pub fn propagate<E>(
    changed: FieldSet,
    mut recompute: impl FnMut(Node) -> Result<FieldSet, E>,
) -> Result<Vec<Node>, E> {
    let mut changed = changed;
    let mut ran = Vec::new();
    for node in Node::TOPOLOGICAL {
        if !changed.intersects(node.dependencies()) {
            continue;
        }
        let _span = tracing::debug_span!("recompute", node = %node).entered();
        let written = recompute(node)?;
        tracing::debug!(?written, "Node settled");
        changed = changed.union(written);
        ran.push(node);
    }
    Ok(ran)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    #[test]
    fn test_writes_only_feed_downstream_nodes() {
        for (writer, node) in Node::TOPOLOGICAL.iter().enumerate() {
            for field in node.writes() {
                for (reader, other) in Node::TOPOLOGICAL.iter().enumerate() {
                    if other.dependencies().contains(field) {
                        assert!(reader > writer, "{other} reads {field} written by {node}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_affected_by_seed_is_everything() {
        assert_eq!(
            affected_nodes(FieldSet::of(Field::Seed)),
            vec![Node::Input, Node::MaxTurn, Node::Frame]
        );
    }

    #[test]
    fn test_affected_by_turn_is_frame_only() {
        assert_eq!(affected_nodes(FieldSet::of(Field::Turn)), vec![Node::Frame]);
    }

    #[test]
    fn test_affected_by_problem_is_frame_only() {
        assert_eq!(
            affected_nodes(FieldSet::of(Field::Problem)),
            vec![Node::Frame]
        );
    }

    #[test]
    fn test_affected_by_output_skips_generation() {
        assert_eq!(
            affected_nodes(FieldSet::of(Field::Output)),
            vec![Node::MaxTurn, Node::Frame]
        );
    }

    #[test]
    fn test_propagate_stops_when_nothing_changes() {
        // Seed changed, but regeneration produced the same input.
        let ran = propagate::<Infallible>(FieldSet::of(Field::Seed), |_| Ok(FieldSet::empty()))
            .unwrap();
        assert_eq!(ran, vec![Node::Input]);
    }

    #[test]
    fn test_propagate_follows_written_fields() {
        let ran = propagate::<Infallible>(FieldSet::of(Field::Seed), |node| {
            Ok(match node {
                Node::Input => FieldSet::of(Field::Input),
                _ => FieldSet::empty(),
            })
        })
        .unwrap();
        assert_eq!(ran, vec![Node::Input, Node::MaxTurn, Node::Frame]);
    }

    #[test]
    fn test_propagate_short_circuits_on_error() {
        let mut visited = Vec::new();
        let result = propagate(FieldSet::of(Field::Seed), |node| {
            visited.push(node);
            Err::<FieldSet, _>("generator down")
        });
        assert_eq!(result, Err("generator down"));
        assert_eq!(visited, vec![Node::Input]);
    }
}

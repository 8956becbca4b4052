pub mod content;
pub mod context;
pub mod error;
pub mod layout;
pub mod node;
pub mod store;

use node::{Node, NodeId};

/// A slot in a compound or layout node: either a node held directly, or
/// a lazy reference to one that must be fetched from the store before use.
///
/// Resolving the same reference twice yields equivalent content; a
/// reference the store does not know is a terminal error for that slot.
#[derive(Clone)]
pub enum Subordinate {
    Direct(Node),
    Reference(NodeId),
}

impl Subordinate {
    /// The persistent identifier involved, when there is one.
    pub fn node_id(&self) -> Option<NodeId> {
        match self {
            Subordinate::Direct(node) => node.id(),
            Subordinate::Reference(id) => Some(*id),
        }
    }
}

impl From<Node> for Subordinate {
    fn from(node: Node) -> Self {
        Subordinate::Direct(node)
    }
}

impl From<NodeId> for Subordinate {
    fn from(id: NodeId) -> Self {
        Subordinate::Reference(id)
    }
}

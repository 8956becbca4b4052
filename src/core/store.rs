use crate::core::error::LayoutError;
use crate::core::node::{Node, NodeId};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Persistence collaborator for nodes.
///
/// The resolution pass only ever calls [`fetch`](NodeStore::fetch); the
/// rest of the contract exists so stored nodes can be created, replaced,
/// and retired by whatever layer owns the store.
#[async_trait]
pub trait NodeStore: Send + Sync {
    /// Looks up a node by identifier. `Ok(None)` means the id is unknown,
    /// which the resolver translates into a reference-not-found failure.
    async fn fetch(&self, id: &NodeId) -> Result<Option<Node>, LayoutError>;

    /// Persists a node, assigning a fresh identifier when it has none.
    /// Returns the identifier the node is stored under.
    async fn insert(&self, node: Node) -> Result<NodeId, LayoutError>;

    /// Replaces the node stored under `id`. Fails with
    /// [`LayoutError::ReferenceNotFound`] when nothing is stored there.
    async fn update(&self, id: &NodeId, node: Node) -> Result<(), LayoutError>;

    /// Removes and returns the node stored under `id`, if any.
    async fn remove(&self, id: &NodeId) -> Result<Option<Node>, LayoutError>;
}

/// Simple in-memory store, for tests and embedded use.
#[derive(Default)]
pub struct MemoryStore {
    nodes: Mutex<HashMap<NodeId, Node>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.lock().map(|n| n.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned(_: impl std::fmt::Debug) -> LayoutError {
    LayoutError::Store("memory store mutex poisoned".into())
}

#[async_trait]
impl NodeStore for MemoryStore {
    async fn fetch(&self, id: &NodeId) -> Result<Option<Node>, LayoutError> {
        Ok(self.nodes.lock().map_err(poisoned)?.get(id).cloned())
    }

    async fn insert(&self, mut node: Node) -> Result<NodeId, LayoutError> {
        let id = node.id().unwrap_or_default();
        let core = node.core_mut();
        core.id = Some(id);
        core.touch();
        self.nodes.lock().map_err(poisoned)?.insert(id, node);
        Ok(id)
    }

    async fn update(&self, id: &NodeId, mut node: Node) -> Result<(), LayoutError> {
        let mut nodes = self.nodes.lock().map_err(poisoned)?;
        if !nodes.contains_key(id) {
            return Err(LayoutError::ReferenceNotFound(*id));
        }
        let core = node.core_mut();
        core.id = Some(*id);
        core.touch();
        nodes.insert(*id, node);
        Ok(())
    }

    async fn remove(&self, id: &NodeId) -> Result<Option<Node>, LayoutError> {
        Ok(self.nodes.lock().map_err(poisoned)?.remove(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::node::{StaticNode, StoredNode};

    #[tokio::test]
    async fn test_insert_assigns_an_id() {
        let store = MemoryStore::new();
        let node = Node::Stored(StoredNode::new("a", "first", "A"));
        assert_eq!(node.id(), None);

        let id = store.insert(node).await.unwrap();
        let fetched = store.fetch(&id).await.unwrap().unwrap();
        assert_eq!(fetched.id(), Some(id));
        assert_eq!(fetched.name(), "a");
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_insert_keeps_an_existing_id() {
        let store = MemoryStore::new();
        let mut node = StoredNode::new("b", "second", "B");
        let id = NodeId::new();
        node.assign_id(id);

        let stored_under = store.insert(Node::Stored(node)).await.unwrap();
        assert_eq!(stored_under, id);
    }

    #[tokio::test]
    async fn test_fetch_unknown_id_is_none() {
        let store = MemoryStore::new();
        assert!(store.fetch(&NodeId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_replaces_and_missing_fails() {
        let store = MemoryStore::new();
        let id = store
            .insert(Node::Stored(StoredNode::new("c", "old", "old")))
            .await
            .unwrap();

        store
            .update(&id, Node::Stored(StoredNode::new("c", "new", "new")))
            .await
            .unwrap();
        let fetched = store.fetch(&id).await.unwrap().unwrap();
        assert_eq!(fetched.description(), "new");

        let missing = NodeId::new();
        let err = store
            .update(&missing, Node::Static(StaticNode::new("x", "x", "x")))
            .await
            .unwrap_err();
        assert!(matches!(err, LayoutError::ReferenceNotFound(got) if got == missing));
    }

    #[tokio::test]
    async fn test_remove_then_fetch_is_none() {
        let store = MemoryStore::new();
        let id = store
            .insert(Node::Stored(StoredNode::new("d", "doomed", "D")))
            .await
            .unwrap();

        let removed = store.remove(&id).await.unwrap();
        assert!(removed.is_some());
        assert!(store.fetch(&id).await.unwrap().is_none());
        assert!(store.is_empty());
    }
}

use crate::core::content::Content;
use crate::core::context::Context;
use crate::core::error::LayoutError;
use crate::core::layout::{CompoundNode, LayoutNode};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Persistent identifier for a stored node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(Uuid);

impl NodeId {
    pub fn new() -> Self {
        NodeId(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        NodeId::new()
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Identity and bookkeeping shared by every node variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeCore {
    /// Human-readable node name
    pub name: String,
    /// What this node is for
    pub description: String,
    /// Persistent identifier, present once the node has been stored
    pub id: Option<NodeId>,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl NodeCore {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        let now = Utc::now();
        NodeCore {
            name: name.into(),
            description: description.into(),
            id: None,
            created: now,
            modified: now,
        }
    }

    /// Stamps the modification time with the current instant.
    pub fn touch(&mut self) {
        self.modified = Utc::now();
    }
}

/// Defines the asynchronous generation behavior of a node.
///
/// Implement this trait to supply custom content generation. The contract:
/// never block the calling thread, and signal failure through the returned
/// `Result`, never by panicking.
#[async_trait]
pub trait Generator: Send + Sync + 'static {
    /// Produce this generator's content for one invocation.
    async fn generate(&self, ctx: &Context) -> Result<Content, LayoutError>;

    /// Create a boxed clone of this trait object.
    ///
    /// Required for cloning `Box<dyn Generator>`.
    fn clone_box(&self) -> Box<dyn Generator>;
}

impl Clone for Box<dyn Generator> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// A node whose content is fixed at construction.
///
/// Generation short-circuits to the already-available value, so it never
/// suspends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticNode {
    pub core: NodeCore,
    pub content: Content,
}

impl StaticNode {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        content: impl Into<Content>,
    ) -> Self {
        StaticNode {
            core: NodeCore::new(name, description),
            content: content.into(),
        }
    }
}

#[async_trait]
impl Generator for StaticNode {
    async fn generate(&self, _ctx: &Context) -> Result<Content, LayoutError> {
        Ok(self.content.clone())
    }

    fn clone_box(&self) -> Box<dyn Generator> {
        Box::new(self.clone())
    }
}

/// The persisted variant of [`StaticNode`].
///
/// Shares its generation behavior but additionally carries an assignable
/// persistent identifier and round-trips through a [`NodeStore`](crate::core::store::NodeStore).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredNode {
    pub core: NodeCore,
    pub content: Content,
}

impl StoredNode {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        content: impl Into<Content>,
    ) -> Self {
        StoredNode {
            core: NodeCore::new(name, description),
            content: content.into(),
        }
    }

    /// Assigns the persistent identifier and stamps the modification time.
    pub fn assign_id(&mut self, id: NodeId) {
        self.core.id = Some(id);
        self.core.touch();
    }

    pub fn is_persisted(&self) -> bool {
        self.core.id.is_some()
    }
}

impl From<StaticNode> for StoredNode {
    fn from(node: StaticNode) -> Self {
        StoredNode {
            core: node.core,
            content: node.content,
        }
    }
}

#[async_trait]
impl Generator for StoredNode {
    async fn generate(&self, _ctx: &Context) -> Result<Content, LayoutError> {
        Ok(self.content.clone())
    }

    fn clone_box(&self) -> Box<dyn Generator> {
        Box::new(self.clone())
    }
}

/// A node wrapping an arbitrary [`Generator`] implementation.
///
/// This is the escape hatch for content that is computed rather than
/// stored or derived from a layout.
pub struct DynamicNode {
    pub core: NodeCore,
    /// The generation behavior this node delegates to
    pub behaviour: Box<dyn Generator>,
}

impl Clone for DynamicNode {
    fn clone(&self) -> Self {
        Self {
            core: self.core.clone(),
            behaviour: self.behaviour.clone_box(),
        }
    }
}

impl DynamicNode {
    pub fn new<G: Generator>(
        name: impl Into<String>,
        description: impl Into<String>,
        behaviour: G,
    ) -> Self {
        DynamicNode {
            core: NodeCore::new(name, description),
            behaviour: Box::new(behaviour),
        }
    }
}

/// The closed set of node variants.
///
/// Dispatch is by pattern matching. Static and stored nodes complete
/// immediately; compound and layout nodes resolve their subordinates
/// first; dynamic nodes run caller-supplied behavior.
#[derive(Clone)]
pub enum Node {
    Static(StaticNode),
    Stored(StoredNode),
    Compound(CompoundNode),
    Layout(LayoutNode),
    Dynamic(DynamicNode),
}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let variant = match self {
            Node::Static(_) => "Static",
            Node::Stored(_) => "Stored",
            Node::Compound(_) => "Compound",
            Node::Layout(_) => "Layout",
            Node::Dynamic(_) => "Dynamic",
        };
        f.debug_struct("Node")
            .field("variant", &variant)
            .field("core", self.core())
            .finish()
    }
}

impl Node {
    pub fn core(&self) -> &NodeCore {
        match self {
            Node::Static(n) => &n.core,
            Node::Stored(n) => &n.core,
            Node::Compound(n) => &n.core,
            Node::Layout(n) => &n.core,
            Node::Dynamic(n) => &n.core,
        }
    }

    pub fn core_mut(&mut self) -> &mut NodeCore {
        match self {
            Node::Static(n) => &mut n.core,
            Node::Stored(n) => &mut n.core,
            Node::Compound(n) => &mut n.core,
            Node::Layout(n) => &mut n.core,
            Node::Dynamic(n) => &mut n.core,
        }
    }

    pub fn name(&self) -> &str {
        &self.core().name
    }

    pub fn description(&self) -> &str {
        &self.core().description
    }

    pub fn id(&self) -> Option<NodeId> {
        self.core().id
    }
}

#[async_trait]
impl Generator for Node {
    async fn generate(&self, ctx: &Context) -> Result<Content, LayoutError> {
        match self {
            Node::Static(n) => n.generate(ctx).await,
            Node::Stored(n) => n.generate(ctx).await,
            Node::Compound(n) => n.generate(ctx).await,
            Node::Layout(n) => n.generate(ctx).await,
            Node::Dynamic(n) => n.behaviour.generate(ctx).await,
        }
    }

    fn clone_box(&self) -> Box<dyn Generator> {
        Box::new(self.clone())
    }
}

impl From<StaticNode> for Node {
    fn from(n: StaticNode) -> Self {
        Node::Static(n)
    }
}

impl From<StoredNode> for Node {
    fn from(n: StoredNode) -> Self {
        Node::Stored(n)
    }
}

impl From<CompoundNode> for Node {
    fn from(n: CompoundNode) -> Self {
        Node::Compound(n)
    }
}

impl From<LayoutNode> for Node {
    fn from(n: LayoutNode) -> Self {
        Node::Layout(n)
    }
}

impl From<DynamicNode> for Node {
    fn from(n: DynamicNode) -> Self {
        Node::Dynamic(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::content::MediaType;
    use crate::core::store::MemoryStore;
    use std::sync::Arc;

    fn test_context() -> Context {
        Context::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn test_static_node_generates_its_content() {
        let node = StaticNode::new("greeting", "fixed text", "hello");
        let content = node.generate(&test_context()).await.unwrap();
        assert_eq!(content, Content::Text("hello".into()));
    }

    #[tokio::test]
    async fn test_stored_node_shares_static_generation() {
        let mut node = StoredNode::new("banner", "stored text", "welcome");
        assert!(!node.is_persisted());

        let id = NodeId::new();
        node.assign_id(id);
        assert!(node.is_persisted());
        assert_eq!(node.core.id, Some(id));

        let content = node.generate(&test_context()).await.unwrap();
        assert_eq!(content, Content::Text("welcome".into()));
    }

    #[tokio::test]
    async fn test_dynamic_node_runs_custom_behaviour() {
        #[derive(Clone)]
        struct Clock;

        #[async_trait]
        impl Generator for Clock {
            async fn generate(&self, ctx: &Context) -> Result<Content, LayoutError> {
                tokio::time::sleep(tokio::time::Duration::from_millis(1)).await;
                Ok(Content::Text(ctx.started().to_rfc3339()))
            }

            fn clone_box(&self) -> Box<dyn Generator> {
                Box::new(self.clone())
            }
        }

        let node = DynamicNode::new("clock", "current time", Clock);
        let ctx = test_context();
        let content = node.behaviour.generate(&ctx).await.unwrap();
        assert_eq!(content, Content::Text(ctx.started().to_rfc3339()));
    }

    #[tokio::test]
    async fn test_dynamic_node_failure_is_a_result() {
        #[derive(Clone)]
        struct Broken;

        #[async_trait]
        impl Generator for Broken {
            async fn generate(&self, _ctx: &Context) -> Result<Content, LayoutError> {
                Err(LayoutError::generation("broken", "backing service down"))
            }

            fn clone_box(&self) -> Box<dyn Generator> {
                Box::new(self.clone())
            }
        }

        let node = Node::Dynamic(DynamicNode::new("broken", "always fails", Broken));
        let err = node.generate(&test_context()).await.unwrap_err();
        assert!(matches!(err, LayoutError::Generation { .. }));
    }

    #[tokio::test]
    async fn test_node_enum_dispatch_and_accessors() {
        let node: Node = StaticNode::new("name", "desc", "body").into();
        assert_eq!(node.name(), "name");
        assert_eq!(node.description(), "desc");
        assert_eq!(node.id(), None);

        let content = node.generate(&test_context()).await.unwrap();
        assert_eq!(content.media_type(), MediaType::Plain);
    }

    #[test]
    fn test_node_core_touch_advances_modified() {
        let mut core = NodeCore::new("n", "d");
        let before = core.modified;
        core.touch();
        assert!(core.modified >= before);
    }

    #[test]
    fn test_stored_node_serde_round_trip() {
        let mut node = StoredNode::new("page", "round trip", "content");
        node.assign_id(NodeId::new());

        let encoded = serde_json::to_string(&node).unwrap();
        let decoded: StoredNode = serde_json::from_str(&encoded).unwrap();
        assert_eq!(node, decoded);
    }
}

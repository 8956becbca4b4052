//! # Weft
//!
//! A content-node resolution and layout substitution engine: named nodes
//! generate content asynchronously, layout templates reference them through
//! `@@@tag@@@` markers, and the engine stitches the resolved pieces into a
//! single output stream.
//!
//! ## Features
//!
//! - **Composable Nodes**: Static, stored, compound, layout, and fully
//!   custom generators, dispatched through one closed enum
//! - **Concurrent Resolution**: Every subordinate is fetched and generated
//!   concurrently, with fail-fast propagation of the first failure
//! - **Total Tag Scanner**: Every byte sequence has a defined
//!   interpretation, so a template can never be "malformed"
//! - **Ordered Chunk Stream**: Output arrives as a lazy, forward-only
//!   sequence of chunks in strict document order
//!
//! ## Quick Start
//!
//! ```rust
//! use weft::prelude::*;
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let ctx = Context::new(Arc::new(MemoryStore::new()));
//!
//! let layout = Layout::new("page", "demo page", MediaType::Plain, "Hello @@@name@@@!");
//! let page = LayoutNode::new("hello", "a greeting", layout)
//!     .with_subordinate("name", Node::Static(StaticNode::new("name", "who", "World")));
//!
//! let out = page.render(&ctx).await.unwrap();
//! assert_eq!(out, b"Hello World!");
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`crate::core::node`]: Content generators and the node variants
//! - [`crate::core::layout`]: Layout assets, the tag scanner, the resolver, and
//!   the stream assembler
//! - [`crate::core::store`]: The node persistence contract and an in-memory store
//! - [`prelude`]: Commonly used types and traits (import with `use weft::prelude::*`)

// ============================================================================
// Core Module
// ============================================================================

pub mod core;

// ============================================================================
// Public Re-exports - Granular Imports
// ============================================================================

// Core types
pub use crate::core::Subordinate;
pub use crate::core::content::{Content, MediaType};
pub use crate::core::context::Context;
pub use crate::core::error::LayoutError;

// Nodes
pub use crate::core::node::{DynamicNode, Generator, Node, NodeCore, NodeId, StaticNode, StoredNode};

// Layout engine
pub use crate::core::layout::assembler::{Chunk, Chunks, assemble};
pub use crate::core::layout::resolver::{TagsMap, resolve};
pub use crate::core::layout::scanner::{Scanner, TagRef};
pub use crate::core::layout::{CompoundNode, Layout, LayoutNode};

// Persistence
pub use crate::core::store::{MemoryStore, NodeStore};

// ============================================================================
// Prelude Module - Convenient Bulk Imports
// ============================================================================

/// The prelude: imports everything you need to define and render nodes.
///
/// # Example
/// ```rust
/// use weft::prelude::*;
/// ```
pub mod prelude {
    pub use super::{
        CompoundNode,
        // Content
        Content,
        Context,
        DynamicNode,
        // Generation
        Generator,
        // Layout engine
        Layout,
        LayoutError,
        LayoutNode,
        MediaType,
        // Persistence
        MemoryStore,
        // Nodes
        Node,
        NodeCore,
        NodeId,
        NodeStore,
        Scanner,
        StaticNode,
        StoredNode,
        Subordinate,
        TagRef,
        TagsMap,
        assemble,
        resolve,
    };
}

// ============================================================================
// Re-export commonly used external types for convenience
// ============================================================================

pub use serde_json::Value as JsonValue;

// ============================================================================
// Library Metadata
// ============================================================================

/// The version of this crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The name of this crate.
pub const NAME: &str = env!("CARGO_PKG_NAME");

//! Layout templates and the node variants that resolve subordinates.

pub mod assembler;
pub mod resolver;
pub mod scanner;

use crate::core::Subordinate;
use crate::core::content::{Content, MediaType};
use crate::core::context::Context;
use crate::core::error::LayoutError;
use crate::core::node::{Generator, NodeCore};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use assembler::{Chunks, assemble};
use resolver::{TagsMap, resolve};

/// An identified template asset: a byte buffer with zero or more
/// `@@@tag@@@` markers and a declared media type. Immutable once built;
/// the buffer is shared, so cloning a layout never copies the template.
#[derive(Debug, Clone)]
pub struct Layout {
    pub name: String,
    pub description: String,
    pub media: MediaType,
    template: Arc<[u8]>,
}

impl Layout {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        media: MediaType,
        template: impl Into<Vec<u8>>,
    ) -> Self {
        Layout {
            name: name.into(),
            description: description.into(),
            media,
            template: template.into().into(),
        }
    }

    pub fn template(&self) -> &[u8] {
        &self.template
    }
}

/// Warns and overwrites when a tag is declared twice. Last write wins.
fn declare_subordinate(
    subordinates: &mut HashMap<String, Subordinate>,
    tag: &str,
    subordinate: Subordinate,
) {
    if subordinates.contains_key(tag) {
        log::warn!(
            "Warning: Tag {} was found in subordinates, Overwriting key {}.",
            &tag,
            &tag
        );
    }
    subordinates.insert(tag.to_string(), subordinate);
}

/// A node whose content is derived by resolving subordinates against a
/// layout template.
///
/// On generation it resolves every subordinate concurrently, then feeds
/// the template and the resolved tags through the scanner and assembler
/// to produce the substituted document.
#[derive(Clone)]
pub struct LayoutNode {
    pub core: NodeCore,
    pub layout: Layout,
    /// Tag name to the subordinate that fills it; exclusively owned
    pub subordinates: HashMap<String, Subordinate>,
}

impl LayoutNode {
    pub fn new(name: impl Into<String>, description: impl Into<String>, layout: Layout) -> Self {
        LayoutNode {
            core: NodeCore::new(name, description),
            layout,
            subordinates: HashMap::new(),
        }
    }

    /// Declares the subordinate filling `tag`.
    ///
    /// Declaring the same tag twice overwrites the earlier subordinate
    /// with a warning logged.
    pub fn with_subordinate(mut self, tag: &str, subordinate: impl Into<Subordinate>) -> Self {
        declare_subordinate(&mut self.subordinates, tag, subordinate.into());
        self
    }

    /// Resolves this node's subordinates into a fresh [`TagsMap`].
    pub async fn resolve_tags(&self, ctx: &Context) -> Result<TagsMap, LayoutError> {
        resolve(&self.subordinates, ctx).await
    }

    /// Assembles the template against an already-resolved tags map,
    /// yielding chunks in document order.
    pub fn assemble<'t, 'm>(&'t self, tags: &'m TagsMap) -> Chunks<'t, 'm> {
        assemble(self.layout.template(), tags)
    }

    /// Resolves and assembles in one pass, concatenating the chunk
    /// sequence into the substituted document.
    pub async fn render(&self, ctx: &Context) -> Result<Vec<u8>, LayoutError> {
        let tags = self.resolve_tags(ctx).await?;
        let mut out = Vec::with_capacity(self.layout.template().len());
        for chunk in self.assemble(&tags) {
            out.extend_from_slice(&chunk);
        }
        Ok(out)
    }
}

#[async_trait]
impl Generator for LayoutNode {
    async fn generate(&self, ctx: &Context) -> Result<Content, LayoutError> {
        let data = self.render(ctx).await?;
        Ok(Content::Bytes {
            media: self.layout.media,
            data,
        })
    }

    fn clone_box(&self) -> Box<dyn Generator> {
        Box::new(self.clone())
    }
}

/// A node whose content is the structured aggregation of its
/// subordinates: a JSON object mapping each tag name to that
/// subordinate's generated content. The template-less sibling of
/// [`LayoutNode`], sharing its resolution pass.
#[derive(Clone)]
pub struct CompoundNode {
    pub core: NodeCore,
    pub subordinates: HashMap<String, Subordinate>,
}

impl CompoundNode {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        CompoundNode {
            core: NodeCore::new(name, description),
            subordinates: HashMap::new(),
        }
    }

    /// Declares the subordinate stored under `tag`. Last write wins,
    /// with a warning, as for [`LayoutNode::with_subordinate`].
    pub fn with_subordinate(mut self, tag: &str, subordinate: impl Into<Subordinate>) -> Self {
        declare_subordinate(&mut self.subordinates, tag, subordinate.into());
        self
    }
}

#[async_trait]
impl Generator for CompoundNode {
    async fn generate(&self, ctx: &Context) -> Result<Content, LayoutError> {
        let tags = resolve(&self.subordinates, ctx).await?;
        let object = tags
            .into_iter()
            .map(|(tag, (_node, content))| (tag, content.to_value()))
            .collect::<serde_json::Map<String, Value>>();
        Ok(Content::Json(Value::Object(object)))
    }

    fn clone_box(&self) -> Box<dyn Generator> {
        Box::new(self.clone())
    }
}

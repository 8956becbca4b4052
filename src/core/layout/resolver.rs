//! Concurrent subordinate resolution.

use crate::core::Subordinate;
use crate::core::content::Content;
use crate::core::context::Context;
use crate::core::error::LayoutError;
use crate::core::node::{Generator, Node};
use futures::future::try_join_all;
use std::collections::HashMap;

/// Per-invocation mapping from tag name to the resolved node and the
/// content it generated. Built fresh for each resolution pass and
/// discarded after assembly; it is never shared across invocations.
pub type TagsMap = HashMap<String, (Node, Content)>;

/// Resolves every subordinate into a complete [`TagsMap`].
///
/// All per-tag work is dispatched concurrently with no ordering between
/// tags: a direct subordinate goes straight to generation, a reference is
/// first fetched from the context's store and fails its entry with
/// [`LayoutError::ReferenceNotFound`] when the store has no such node.
///
/// The pass is fail-fast. The first per-tag failure aborts the whole
/// resolution and no partial map escapes, so a broken subordinate never
/// produces a partial page. Contrast this with the assembler, which
/// tolerates a tag name the template mentions but no subordinate declares.
pub async fn resolve(
    subordinates: &HashMap<String, Subordinate>,
    ctx: &Context,
) -> Result<TagsMap, LayoutError> {
    let pending = subordinates.iter().map(|(tag, subordinate)| async move {
        let node = match subordinate {
            Subordinate::Direct(node) => node.clone(),
            Subordinate::Reference(id) => ctx
                .store()
                .fetch(id)
                .await?
                .ok_or(LayoutError::ReferenceNotFound(*id))?,
        };
        let content = node.generate(ctx).await?;
        Ok::<_, LayoutError>((tag.clone(), (node, content)))
    });

    let resolved = try_join_all(pending).await?;
    Ok(resolved.into_iter().collect())
}

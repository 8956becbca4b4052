//! Stream assembly: template plus resolved tags, out as ordered chunks.

use crate::core::layout::resolver::TagsMap;
use crate::core::layout::scanner::Scanner;
use std::borrow::Cow;

/// One chunk of assembled output. Literal spans borrow the template;
/// substituted content owns its bytes.
pub type Chunk<'t> = Cow<'t, [u8]>;

/// Assembles a template against a resolved tags map.
///
/// The result is a lazy, finite, forward-only sequence of chunks in
/// strict document order. Concatenating every chunk yields the fully
/// substituted document. A tagless template comes back as a single
/// chunk equal to the whole template.
pub fn assemble<'t, 'm>(template: &'t [u8], tags: &'m TagsMap) -> Chunks<'t, 'm> {
    Chunks {
        scanner: Scanner::new(template),
        template,
        tags,
        cursor: 0,
        pending: None,
        emitted: false,
        done: false,
    }
}

/// The chunk sequence produced by [`assemble`]. Not restartable; build a
/// fresh one to render again.
pub struct Chunks<'t, 'm> {
    scanner: Scanner<'t>,
    template: &'t [u8],
    tags: &'m TagsMap,
    /// First template byte not yet emitted
    cursor: usize,
    /// Substituted bytes queued behind a literal prefix
    pending: Option<Chunk<'t>>,
    emitted: bool,
    done: bool,
}

impl<'t, 'm> Chunks<'t, 'm> {
    /// The replacement for one recognized tag: the subordinate's byte
    /// serialization when the resolver produced one, otherwise a visible
    /// placeholder naming the tag. A tag the template mentions but no
    /// subordinate declares degrades inline instead of failing the page.
    fn substitution(&self, name: &str) -> Chunk<'t> {
        match self.tags.get(name) {
            Some((_node, content)) => Cow::Owned(content.to_bytes()),
            None => Cow::Owned(format!("@@@ Missing Tag '{}' @@@", name).into_bytes()),
        }
    }
}

impl<'t, 'm> Iterator for Chunks<'t, 'm> {
    type Item = Chunk<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(chunk) = self.pending.take() {
            self.emitted = true;
            return Some(chunk);
        }
        if self.done {
            return None;
        }

        match self.scanner.next_tag() {
            Some(tag) => {
                let replacement = self.substitution(&tag.name);
                let literal = &self.template[self.cursor..tag.start];
                self.cursor = tag.end;
                self.emitted = true;
                if literal.is_empty() {
                    Some(replacement)
                } else {
                    self.pending = Some(replacement);
                    Some(Cow::Borrowed(literal))
                }
            }
            None => {
                self.done = true;
                let trailing = &self.template[self.cursor..];
                self.cursor = self.template.len();
                if trailing.is_empty() && self.emitted {
                    None
                } else {
                    // a tagless template is exactly one chunk, even when empty
                    self.emitted = true;
                    Some(Cow::Borrowed(trailing))
                }
            }
        }
    }
}

//! Single-pass tag scanner over a byte template.
//!
//! A tag reference is a run of exactly three marker bytes, a name of one
//! or more non-marker bytes, and three more marker bytes: `@@@title@@@`.
//! The automaton below is total. Every byte has a defined transition out
//! of every state, so any sequence that does not match the exact
//! 3-open/name/3-close shape is literal content and scanning continues.
//! There is no malformed-template error and no unreachable state.

const MARKER: u8 = b'@';

/// One tag reference found in a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRef {
    /// The bytes between the marker runs, decoded lossily as UTF-8
    pub name: String,
    /// Offset of the opening run's first marker byte
    pub start: usize,
    /// Offset one past the closing run's last marker byte
    pub end: usize,
}

/// Scanner states, each carrying the offset of the opening run's first
/// marker. The name always begins three bytes past it.
///
/// `Open3` means the opening run is complete and the first name byte is
/// awaited. A marker byte there extends the run, sliding the opener
/// forward one byte; the byte that falls off the front is literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Skip,
    Open1 { start: usize },
    Open2 { start: usize },
    Open3 { start: usize },
    Name { start: usize },
    Close1 { start: usize },
    Close2 { start: usize },
}

/// Forward-only scanner over a template buffer.
///
/// Consumed bytes are never revisited: each [`next_tag`](Scanner::next_tag)
/// call resumes from the byte after the previous tag's closer. Scanning
/// the same template twice from the start yields the same tags.
#[derive(Debug, Clone)]
pub struct Scanner<'t> {
    template: &'t [u8],
    pos: usize,
}

impl<'t> Scanner<'t> {
    pub fn new(template: &'t [u8]) -> Self {
        Scanner { template, pos: 0 }
    }

    /// Position of the next unconsumed byte.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// The unconsumed remainder of the template.
    pub fn rest(&self) -> &'t [u8] {
        &self.template[self.pos..]
    }

    /// Finds the next complete tag at or after the cursor.
    ///
    /// Returns `None` when the remainder holds no complete tag; the cursor
    /// is left where it was so [`rest`](Scanner::rest) is the trailing
    /// literal span, truncated openers and all.
    pub fn next_tag(&mut self) -> Option<TagRef> {
        let mut state = State::Skip;

        for i in self.pos..self.template.len() {
            let marker = self.template[i] == MARKER;
            state = match state {
                State::Skip => {
                    if marker {
                        State::Open1 { start: i }
                    } else {
                        State::Skip
                    }
                }
                State::Open1 { start } => {
                    if marker {
                        State::Open2 { start }
                    } else {
                        // a lone marker is not an opener
                        State::Skip
                    }
                }
                State::Open2 { start } => {
                    if marker {
                        State::Open3 { start }
                    } else {
                        State::Skip
                    }
                }
                State::Open3 { start } => {
                    if marker {
                        // run longer than three: the front byte is literal
                        // and the opener slides forward
                        State::Open3 { start: start + 1 }
                    } else {
                        State::Name { start }
                    }
                }
                State::Name { start } => {
                    if marker {
                        State::Close1 { start }
                    } else {
                        State::Name { start }
                    }
                }
                State::Close1 { start } => {
                    if marker {
                        State::Close2 { start }
                    } else {
                        // a short closing run folds back into the name
                        State::Name { start }
                    }
                }
                State::Close2 { start } => {
                    if marker {
                        // third closing marker: the tag is complete. The
                        // name spans from just past the opener to the
                        // closing run, which began two bytes back.
                        let name_bytes = &self.template[start + 3..i - 2];
                        let tag = TagRef {
                            name: String::from_utf8_lossy(name_bytes).into_owned(),
                            start,
                            end: i + 1,
                        };
                        self.pos = i + 1;
                        return Some(tag);
                    } else {
                        State::Name { start }
                    }
                }
            };
        }

        None
    }
}

impl<'t> Iterator for Scanner<'t> {
    type Item = TagRef;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_tag()
    }
}

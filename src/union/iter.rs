//! Union Iterator
//!
//! Merges the buffer and snapshot streams into one ordered key sequence.

use std::cmp::Ordering;

use tracing::trace;

use crate::entry::{is_tombstone, Entry, EntryIter};
use crate::error::{KvError, Result};

/// One side of the merge: a sub-iterator and its current head
///
/// The head is refilled lazily, so an entry already taken from a cursor is
/// handed out before that cursor's next error is seen.
struct Cursor<'a> {
    iter: EntryIter<'a>,
    head: Option<Entry>,
    exhausted: bool,
    context: &'static str,
}

impl<'a> Cursor<'a> {
    fn new(iter: EntryIter<'a>, context: &'static str) -> Self {
        Self {
            iter,
            head: None,
            exhausted: false,
            context,
        }
    }

    /// Load the next entry into `head` if it is empty
    fn fill(&mut self) -> Result<()> {
        if self.head.is_none() && !self.exhausted {
            self.head = self
                .iter
                .next()
                .transpose()
                .map_err(|e| e.context(self.context))?;
            self.exhausted = self.head.is_none();
        }
        Ok(())
    }
}

/// Which cursor(s) the next candidate comes from
enum Pick {
    Buffer,
    Snapshot,
    /// Same key on both sides; the buffer entry shadows the snapshot's
    Both,
}

/// Ordered, deduplicated view over a buffer iterator and a snapshot iterator
///
/// - Smaller key wins; on equal keys the buffer entry wins and both advance
/// - Tombstones are skipped, hiding any snapshot entry for the same key
/// - Output keys are strictly increasing
///
/// A sub-iterator error is yielded once, wrapped with the side it came from,
/// after which the iterator is fused.
pub struct UnionIter<'a> {
    buffer: Cursor<'a>,
    snapshot: Cursor<'a>,

    /// Last key taken from either cursor, tombstones included
    last_seen: Option<Vec<u8>>,

    /// Last key handed to the caller
    last_key: Option<Vec<u8>>,

    done: bool,
}

impl<'a> UnionIter<'a> {
    /// Position both cursors on their first entry
    pub fn new(buffer: EntryIter<'a>, snapshot: EntryIter<'a>) -> Result<Self> {
        let mut buffer = Cursor::new(buffer, "read write buffer iterator");
        let mut snapshot = Cursor::new(snapshot, "read snapshot iterator");
        buffer.fill()?;
        snapshot.fill()?;
        Ok(Self {
            buffer,
            snapshot,
            last_seen: None,
            last_key: None,
            done: false,
        })
    }

    /// Last key yielded, if any
    pub fn last_key(&self) -> Option<&[u8]> {
        self.last_key.as_deref()
    }

    /// Take the next candidate entry, tombstones included
    fn step(&mut self) -> Result<Option<Entry>> {
        self.buffer.fill()?;
        self.snapshot.fill()?;

        let pick = match (&self.buffer.head, &self.snapshot.head) {
            (None, None) => return Ok(None),
            (Some(_), None) => Pick::Buffer,
            (None, Some(_)) => Pick::Snapshot,
            (Some((bk, _)), Some((sk, _))) => match bk.cmp(sk) {
                Ordering::Less => Pick::Buffer,
                Ordering::Greater => Pick::Snapshot,
                Ordering::Equal => Pick::Both,
            },
        };

        let candidate = match pick {
            Pick::Buffer => self.buffer.head.take(),
            Pick::Snapshot => self.snapshot.head.take(),
            Pick::Both => {
                self.snapshot.head = None;
                self.buffer.head.take()
            }
        };

        Ok(candidate)
    }

    fn advance(&mut self) -> Result<Option<Entry>> {
        loop {
            let Some((key, value)) = self.step()? else {
                return Ok(None);
            };

            if let Some(last) = &self.last_seen {
                if key.as_slice() <= last.as_slice() {
                    return Err(KvError::UnorderedIterator { key });
                }
            }
            self.last_seen = Some(key.clone());

            if is_tombstone(&value) {
                trace!(key = ?key, "skipping tombstone");
                continue;
            }

            self.last_key = Some(key.clone());
            return Ok(Some((key, value)));
        }
    }
}

impl<'a> Iterator for UnionIter<'a> {
    type Item = Result<Entry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.advance() {
            Ok(Some(entry)) => Some(Ok(entry)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

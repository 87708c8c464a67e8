//! The lifetime chain: resources currently open, innermost first.
//!
//! A singly linked stack where every node links to the chain as it stood
//! before that node was pushed. Restoring an earlier [`Snapshot`] and
//! draining to empty are both a walk along `next` pointers.

use crate::entry::ResourceEntry;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, trace};

static NEXT_SLOT_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of one pushed node.
///
/// Ids are unique for the life of the process, so a stale id never
/// matches a later node, even in another chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(u64);

impl SlotId {
    fn next() -> Self {
        SlotId(NEXT_SLOT_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The chain state at one program point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    depth: usize,
    head: Option<SlotId>,
}

impl Snapshot {
    pub fn depth(&self) -> usize {
        self.depth
    }
}

struct Node {
    id: SlotId,
    entry: ResourceEntry,
    next: Option<Box<Node>>,
}

/// Ordered record of pending cleanups, innermost first.
///
/// Dropping a chain finalizes whatever it still holds, innermost first.
#[derive(Default)]
pub struct LifetimeChain {
    head: Option<Box<Node>>,
    depth: usize,
}

impl LifetimeChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            depth: self.depth,
            head: self.head.as_ref().map(|node| node.id),
        }
    }

    /// Prepend `entry`; its node links to the current head
    pub fn push(&mut self, entry: ResourceEntry) -> SlotId {
        let id = SlotId::next();
        trace!(slot = %id, label = entry.label(), depth = self.depth + 1, "pushing resource");
        let next = self.head.take();
        self.head = Some(Box::new(Node { id, entry, next }));
        self.depth += 1;
        id
    }

    /// Unlink the innermost entry without finalizing it
    pub fn pop(&mut self) -> Option<ResourceEntry> {
        let node = self.head.take()?;
        let Node { entry, next, .. } = *node;
        self.head = next;
        self.depth -= 1;
        Some(entry)
    }

    /// Finalize innermost entries until the chain is back at `snapshot`.
    ///
    /// A chain already at or below the snapshot depth is left untouched.
    /// Returns the number of entries finalized.
    pub fn restore(&mut self, snapshot: Snapshot) -> usize {
        let mut finalized = 0;
        while self.depth > snapshot.depth {
            match self.pop() {
                Some(entry) => {
                    entry.finalize();
                    finalized += 1;
                }
                None => break,
            }
        }
        if self.depth == snapshot.depth && self.snapshot() != snapshot {
            debug!(
                depth = self.depth,
                "chain restored to snapshot depth after an unwind replaced its entries"
            );
        }
        finalized
    }

    /// Finalize every entry, innermost first. Returns the number finalized.
    pub fn drain(&mut self) -> usize {
        let mut finalized = 0;
        while let Some(entry) = self.pop() {
            entry.finalize();
            finalized += 1;
        }
        finalized
    }

    pub fn find(&self, id: SlotId) -> Option<&ResourceEntry> {
        let mut cursor = self.head.as_deref();
        while let Some(node) = cursor {
            if node.id == id {
                return Some(&node.entry);
            }
            cursor = node.next.as_deref();
        }
        None
    }

    pub fn find_mut(&mut self, id: SlotId) -> Option<&mut ResourceEntry> {
        let mut cursor = self.head.as_deref_mut();
        while let Some(node) = cursor {
            if node.id == id {
                return Some(&mut node.entry);
            }
            cursor = node.next.as_deref_mut();
        }
        None
    }

    /// Entry labels, innermost first
    pub fn labels(&self) -> Labels<'_> {
        Labels {
            cursor: self.head.as_deref(),
        }
    }
}

impl Drop for LifetimeChain {
    fn drop(&mut self) {
        let finalized = self.drain();
        if finalized > 0 {
            debug!(finalized, "lifetime chain dropped with pending resources");
        }
    }
}

impl fmt::Debug for LifetimeChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifetimeChain")
            .field("depth", &self.depth)
            .field("labels", &self.labels().collect::<Vec<_>>())
            .finish()
    }
}

/// Iterator over entry labels, innermost first.
pub struct Labels<'a> {
    cursor: Option<&'a Node>,
}

impl<'a> Iterator for Labels<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.cursor?;
        self.cursor = node.next.as_deref();
        Some(node.entry.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording(log: &Rc<RefCell<Vec<String>>>, label: &str) -> ResourceEntry {
        let sink = Rc::clone(log);
        ResourceEntry::new(label, label.to_string(), move |name| {
            sink.borrow_mut().push(name)
        })
    }

    #[test]
    fn test_push_prepends() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut chain = LifetimeChain::new();
        chain.push(recording(&log, "outer"));
        chain.push(recording(&log, "inner"));

        assert_eq!(chain.depth(), 2);
        assert_eq!(chain.labels().collect::<Vec<_>>(), vec!["inner", "outer"]);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_drain_finalizes_innermost_first() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut chain = LifetimeChain::new();
        for label in ["a", "b", "c"] {
            chain.push(recording(&log, label));
        }

        assert_eq!(chain.drain(), 3);
        assert!(chain.is_empty());
        assert_eq!(*log.borrow(), vec!["c", "b", "a"]);
        assert_eq!(chain.drain(), 0);
    }

    #[test]
    fn test_restore_returns_to_snapshot() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut chain = LifetimeChain::new();
        chain.push(recording(&log, "kept"));
        let before = chain.snapshot();

        chain.push(recording(&log, "x"));
        chain.push(recording(&log, "y"));
        assert_eq!(chain.restore(before), 2);

        assert_eq!(chain.snapshot(), before);
        assert_eq!(*log.borrow(), vec!["y", "x"]);
    }

    #[test]
    fn test_restore_below_snapshot_is_noop() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut chain = LifetimeChain::new();
        chain.push(recording(&log, "a"));
        let snapshot = chain.snapshot();
        chain.drain();

        assert_eq!(chain.restore(snapshot), 0);
        assert_eq!(*log.borrow(), vec!["a"]);
    }

    #[test]
    fn test_pop_does_not_finalize() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut chain = LifetimeChain::new();
        chain.push(recording(&log, "a"));

        let entry = chain.pop().unwrap();
        assert!(log.borrow().is_empty());
        entry.finalize();
        assert_eq!(*log.borrow(), vec!["a"]);
    }

    #[test]
    fn test_find_by_id() {
        let mut chain = LifetimeChain::new();
        let a = chain.push(ResourceEntry::new("a", 1_i32, drop));
        let b = chain.push(ResourceEntry::new("b", 2_i32, drop));

        assert_eq!(chain.find(a).and_then(|e| e.resource::<i32>()), Some(&1));
        if let Some(v) = chain.find_mut(b).and_then(|e| e.resource_mut::<i32>()) {
            *v = 20;
        }
        assert_eq!(chain.find(b).and_then(|e| e.resource::<i32>()), Some(&20));

        chain.drain();
        assert!(chain.find(a).is_none());
    }

    #[test]
    fn test_slot_ids_never_repeat() {
        let mut chain = LifetimeChain::new();
        let first = chain.push(ResourceEntry::new("a", (), drop));
        chain.drain();
        let second = chain.push(ResourceEntry::new("a", (), drop));
        assert_ne!(first, second);
    }

    #[test]
    fn test_drop_finalizes_pending() {
        let log = Rc::new(RefCell::new(Vec::new()));
        {
            let mut chain = LifetimeChain::new();
            chain.push(recording(&log, "first"));
            chain.push(recording(&log, "second"));
        }
        assert_eq!(*log.borrow(), vec!["second", "first"]);
    }

    #[test]
    fn test_long_chain_drops_without_recursion() {
        let mut chain = LifetimeChain::new();
        for _ in 0..100_000 {
            chain.push(ResourceEntry::new("n", 0_u8, drop));
        }
        drop(chain);
    }
}

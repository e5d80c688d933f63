//! LRU List Module
//!
//! Recency-ordered entry list with a key index for O(1) eviction.

use std::collections::HashMap;

use crate::cache::CacheEntry;

/// Position of a node inside the arena.
type Slot = usize;

#[derive(Debug)]
struct Node {
    entry: CacheEntry,
    prev: Option<Slot>,
    next: Option<Slot>,
}

// == LRU List ==
/// Doubly linked list of entries stored in an arena, plus a key index.
///
/// - Head = Most recently used
/// - Tail = Least recently used
///
/// Lookup, promote, remove and pop-oldest are all O(1). Freed slots are
/// recycled so the arena never grows past the peak entry count.
#[derive(Debug, Default)]
pub struct LruList {
    nodes: Vec<Option<Node>>,
    free: Vec<Slot>,
    index: HashMap<String, Slot>,
    head: Option<Slot>,
    tail: Option<Slot>,
}

impl LruList {
    // == Constructor ==
    /// Creates a new empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty list with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            free: Vec::new(),
            index: HashMap::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    // == Push Front ==
    /// Inserts an entry at the most recently used end.
    ///
    /// An existing entry with the same key is unlinked first and returned.
    pub fn push_front(&mut self, entry: CacheEntry) -> Option<CacheEntry> {
        let previous = self.remove(&entry.key);
        let key = entry.key.clone();
        let slot = self.allocate(entry);
        self.link_front(slot);
        self.index.insert(key, slot);
        previous
    }

    // == Touch ==
    /// Moves a key to the front and returns its entry.
    pub fn touch(&mut self, key: &str) -> Option<&mut CacheEntry> {
        let slot = *self.index.get(key)?;
        if self.head != Some(slot) {
            self.unlink(slot);
            self.link_front(slot);
        }
        self.nodes[slot].as_mut().map(|node| &mut node.entry)
    }

    // == Lookups ==
    /// Returns an entry without changing its recency.
    pub fn peek(&self, key: &str) -> Option<&CacheEntry> {
        let slot = *self.index.get(key)?;
        self.nodes[slot].as_ref().map(|node| &node.entry)
    }

    /// Mutable access to an entry without changing its recency.
    pub fn peek_mut(&mut self, key: &str) -> Option<&mut CacheEntry> {
        let slot = *self.index.get(key)?;
        self.nodes[slot].as_mut().map(|node| &mut node.entry)
    }

    /// Returns the least recently used entry without removing it.
    pub fn peek_oldest(&self) -> Option<&CacheEntry> {
        let slot = self.tail?;
        self.nodes[slot].as_ref().map(|node| &node.entry)
    }

    /// Checks if a key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    // == Removal ==
    /// Removes a key, returning its entry.
    pub fn remove(&mut self, key: &str) -> Option<CacheEntry> {
        let slot = *self.index.get(key)?;
        self.release(slot)
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_oldest(&mut self) -> Option<CacheEntry> {
        let slot = self.tail?;
        self.release(slot)
    }

    // == Length ==
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    // == Iteration ==
    /// Iterates entries from most to least recently used.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    /// Mutable access to every entry, in no particular order.
    pub fn entries_mut(&mut self) -> impl Iterator<Item = &mut CacheEntry> {
        self.nodes.iter_mut().flatten().map(|node| &mut node.entry)
    }

    // == Arena Helpers ==
    fn allocate(&mut self, entry: CacheEntry) -> Slot {
        let node = Node {
            entry,
            prev: None,
            next: None,
        };
        match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = Some(node);
                slot
            }
            None => {
                self.nodes.push(Some(node));
                self.nodes.len() - 1
            }
        }
    }

    fn release(&mut self, slot: Slot) -> Option<CacheEntry> {
        self.unlink(slot);
        let node = self.nodes[slot].take()?;
        self.free.push(slot);
        self.index.remove(&node.entry.key);
        Some(node.entry)
    }

    fn unlink(&mut self, slot: Slot) {
        let (prev, next) = match self.nodes[slot].as_ref() {
            Some(node) => (node.prev, node.next),
            None => return,
        };

        match prev {
            Some(p) => {
                if let Some(node) = self.nodes[p].as_mut() {
                    node.next = next;
                }
            }
            None => self.head = next,
        }
        match next {
            Some(n) => {
                if let Some(node) = self.nodes[n].as_mut() {
                    node.prev = prev;
                }
            }
            None => self.tail = prev,
        }

        if let Some(node) = self.nodes[slot].as_mut() {
            node.prev = None;
            node.next = None;
        }
    }

    fn link_front(&mut self, slot: Slot) {
        let old_head = self.head;
        if let Some(node) = self.nodes[slot].as_mut() {
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(h) => {
                if let Some(node) = self.nodes[h].as_mut() {
                    node.prev = Some(slot);
                }
            }
            None => self.tail = Some(slot),
        }
        self.head = Some(slot);
    }
}

// == Iterator ==
/// Iterator over entries, most recently used first.
pub struct Iter<'a> {
    list: &'a LruList,
    cursor: Option<Slot>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a CacheEntry;

    fn next(&mut self) -> Option<Self::Item> {
        let list: &'a LruList = self.list;
        let slot = self.cursor?;
        let node = list.nodes[slot].as_ref()?;
        self.cursor = node.next;
        Some(&node.entry)
    }
}

//! Singly linked sequence with a sentinel head and a cached tail.
//!
//! Nodes live in an arena and link to each other by index. Slot [`HEAD`] is
//! the sentinel: it never carries a value and always exists. A node's `next`
//! index is the only edge that keeps its successor reachable, so unlinking a
//! node is what releases it; released slots go on a free list for reuse.

use std::fmt;

use crate::error::{Error, Result};

const NAME: &str = "LinkedSequence";
const HEAD: usize = 0;

#[derive(Debug)]
struct Node<T> {
    value: Option<T>,
    next: Option<usize>,
}

impl<T> Node<T> {
    fn sentinel() -> Self {
        Self {
            value: None,
            next: None,
        }
    }
}

/// Ordered sequence with O(1) append and O(1) access to the last element.
#[derive(Debug)]
pub struct LinkedSequence<T> {
    nodes: Vec<Node<T>>,
    free: Vec<usize>,
    tail: usize,
    len: usize,
}

impl<T> LinkedSequence<T> {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::sentinel()],
            free: Vec::new(),
            tail: HEAD,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append `value` after the current tail.
    pub fn add(&mut self, value: T) {
        let tail = self.tail;
        self.link_after(tail, value);
        self.tail = self.nodes[tail].next.unwrap_or(tail);
        self.len += 1;
    }

    /// Insert `value` so that it ends up at position `pos`.
    pub fn insert(&mut self, pos: usize, value: T) -> Result<()> {
        if pos > self.len {
            return Err(Error::out_of_range(NAME, pos));
        }
        if pos == self.len {
            self.add(value);
            return Ok(());
        }
        let prev = self.node_before(pos);
        self.link_after(prev, value);
        self.len += 1;
        Ok(())
    }

    /// Unlink and return the element at `pos`.
    pub fn remove(&mut self, pos: usize) -> Result<T> {
        if pos >= self.len {
            return Err(Error::out_of_range(NAME, pos));
        }
        let prev = self.node_before(pos);
        let Some(curr) = self.nodes[prev].next else {
            return Err(Error::out_of_range(NAME, pos));
        };
        self.nodes[prev].next = self.nodes[curr].next.take();
        if pos == self.len - 1 {
            self.tail = prev;
        }
        self.len -= 1;
        let value = self.nodes[curr].value.take();
        self.free.push(curr);
        value.ok_or_else(|| Error::out_of_range(NAME, pos))
    }

    pub fn get(&self, pos: usize) -> Result<&T> {
        self.check(pos)?;
        self.nodes[self.node_at(pos)]
            .value
            .as_ref()
            .ok_or_else(|| Error::out_of_range(NAME, pos))
    }

    pub fn get_mut(&mut self, pos: usize) -> Result<&mut T> {
        self.check(pos)?;
        let idx = self.node_at(pos);
        self.nodes[idx]
            .value
            .as_mut()
            .ok_or_else(|| Error::out_of_range(NAME, pos))
    }

    pub fn set(&mut self, pos: usize, value: T) -> Result<()> {
        *self.get_mut(pos)? = value;
        Ok(())
    }

    pub fn first(&self) -> Option<&T> {
        self.get(0).ok()
    }

    /// Last element, read straight from the tail.
    pub fn last(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        self.nodes[self.tail].value.as_ref()
    }

    /// Remove elements from the back until the sequence is empty.
    pub fn clear(&mut self) {
        while self.len > 0 {
            if self.remove(self.len - 1).is_err() {
                break;
            }
        }
        self.nodes.truncate(1);
        self.free.clear();
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            current: self.nodes[HEAD].next,
        }
    }

    /// Read/write traversal starting at the first element.
    pub fn cursor_mut(&mut self) -> CursorMut<'_, T> {
        let current = self.nodes[HEAD].next;
        CursorMut {
            list: self,
            current,
            index: 0,
        }
    }

    fn check(&self, pos: usize) -> Result<()> {
        if pos >= self.len {
            return Err(Error::out_of_range(NAME, pos));
        }
        Ok(())
    }

    /// Arena index of the node at `pos` (which must be valid).
    fn node_at(&self, pos: usize) -> usize {
        if pos + 1 == self.len {
            return self.tail;
        }
        let mut idx = HEAD;
        for _ in 0..=pos {
            match self.nodes[idx].next {
                Some(next) => idx = next,
                None => break,
            }
        }
        idx
    }

    /// Arena index of the node preceding `pos`; the sentinel for 0.
    fn node_before(&self, pos: usize) -> usize {
        if pos == 0 {
            HEAD
        } else {
            self.node_at(pos - 1)
        }
    }

    fn link_after(&mut self, prev: usize, value: T) {
        let node = Node {
            value: Some(value),
            next: self.nodes[prev].next,
        };
        let idx = match self.free.pop() {
            Some(idx) => {
                self.nodes[idx] = node;
                idx
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        };
        self.nodes[prev].next = Some(idx);
    }
}

impl<T: PartialEq> LinkedSequence<T> {
    /// Position of the first element equal to `value`.
    pub fn find(&self, value: &T) -> Option<usize> {
        self.iter().position(|e| e == value)
    }
}

impl<T> Default for LinkedSequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for LinkedSequence<T> {
    /// Rebuild the chain node by node into a fresh, compact arena.
    fn clone(&self) -> Self {
        let mut copy = Self::new();
        for value in self.iter() {
            copy.add(value.clone());
        }
        copy
    }
}

impl<T: PartialEq> PartialEq for LinkedSequence<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T: Eq> Eq for LinkedSequence<T> {}

impl<T> Extend<T> for LinkedSequence<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

impl<T> FromIterator<T> for LinkedSequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<'a, T> IntoIterator for &'a LinkedSequence<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Display> fmt::Display for LinkedSequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        super::write_bracketed(f, self.iter())
    }
}

/// Forward iterator over the real nodes of a [`LinkedSequence`].
///
/// Two iterators are equal when they point at the same node of the same
/// list; an exhausted iterator is the `end()` position.
pub struct Iter<'a, T> {
    list: &'a LinkedSequence<T>,
    current: Option<usize>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.current?;
        let node = &self.list.nodes[idx];
        self.current = node.next;
        node.value.as_ref()
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            list: self.list,
            current: self.current,
        }
    }
}

impl<T> PartialEq for Iter<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.list, other.list) && self.current == other.current
    }
}

/// Cursor giving mutable access to each element in order.
pub struct CursorMut<'a, T> {
    list: &'a mut LinkedSequence<T>,
    current: Option<usize>,
    index: usize,
}

impl<T> CursorMut<'_, T> {
    /// Element under the cursor, or `None` once past the end.
    pub fn current(&mut self) -> Option<&mut T> {
        let idx = self.current?;
        self.list.nodes[idx].value.as_mut()
    }

    /// Position of the cursor; equals `len()` once past the end.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn move_next(&mut self) {
        if let Some(idx) = self.current {
            self.current = self.list.nodes[idx].next;
            self.index += 1;
        }
    }
}

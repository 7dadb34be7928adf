use std::fmt;

use super::DynamicBuffer;
use crate::error::{Error, Result};

const NAME: &str = "SequenceList";

/// Initial capacity used by [`SequenceList::new`].
pub const DEFAULT_CAPACITY: usize = 100;

/// Array-backed ordered list over a [`DynamicBuffer`].
///
/// Elements `[0, len)` are meaningful; the remaining slots are slack kept
/// for growth. Capacity doubles when an insert finds the buffer full.
#[derive(Debug, Clone)]
pub struct SequenceList<T> {
    data: DynamicBuffer<T>,
    count: usize,
}

impl<T: Default + Clone> SequenceList<T> {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: DynamicBuffer::new(capacity),
            count: 0,
        }
    }

    /// Append `value` at the end.
    pub fn add(&mut self, value: T) {
        self.grow_if_full();
        let count = self.count;
        self.data.as_mut_slice()[count] = value;
        self.count += 1;
    }

    /// Insert `value` at `pos`, shifting the suffix right by one.
    pub fn insert(&mut self, pos: usize, value: T) -> Result<()> {
        if pos > self.count {
            return Err(Error::out_of_range(NAME, pos));
        }
        self.grow_if_full();
        let count = self.count;
        let slots = self.data.as_mut_slice();
        slots[count] = value;
        slots[pos..=count].rotate_right(1);
        self.count += 1;
        Ok(())
    }

    /// Remove and return the element at `pos`, shifting the suffix left.
    pub fn remove(&mut self, pos: usize) -> Result<T> {
        if pos >= self.count {
            return Err(Error::out_of_range(NAME, pos));
        }
        let count = self.count;
        let slots = self.data.as_mut_slice();
        slots[pos..count].rotate_left(1);
        self.count -= 1;
        Ok(std::mem::take(&mut slots[count - 1]))
    }

    /// Elements in reverse order.
    pub fn reverse(&self) -> Self {
        let mut r = Self::with_capacity(self.count);
        r.extend(self.iter().rev().cloned());
        r
    }

    /// The first `n` elements.
    pub fn take(&self, n: usize) -> Result<Self> {
        if n > self.count {
            return Err(Error::invalid_count(NAME, "take", n));
        }
        let mut t = Self::with_capacity(n);
        t.extend(self.iter().take(n).cloned());
        Ok(t)
    }

    /// Everything after the first `n` elements.
    pub fn drop(&self, n: usize) -> Result<Self> {
        if n > self.count {
            return Err(Error::invalid_count(NAME, "drop", n));
        }
        let mut d = Self::with_capacity(self.count - n);
        d.extend(self.iter().skip(n).cloned());
        Ok(d)
    }

    /// This list's elements followed by `other`'s.
    pub fn concat(&self, other: &Self) -> Self {
        let mut c = Self::with_capacity(self.count + other.count);
        c.extend(self.iter().cloned());
        c.extend(other.iter().cloned());
        c
    }

    /// `count` elements starting at `start`.
    pub fn mid(&self, start: usize, count: usize) -> Result<Self> {
        if start >= self.count || count > self.count - start {
            return Err(Error::invalid_window(NAME, start, count));
        }
        self.drop(start)?.take(count)
    }

    /// Move the first `n` elements out into a new list, shifting the rest
    /// to the front. Nothing changes when fewer than `n` are present.
    pub fn split_front(&mut self, n: usize) -> Result<Self> {
        if n > self.count {
            return Err(Error::invalid_count(NAME, "split", n));
        }
        let count = self.count;
        let slots = self.data.as_mut_slice();
        let mut front = Self::with_capacity(n);
        front.extend(slots[..n].iter_mut().map(std::mem::take));
        slots[..count].rotate_left(n);
        self.count -= n;
        Ok(front)
    }

    fn grow_if_full(&mut self) {
        if self.count == self.data.capacity() {
            self.data.resize((self.count * 2).max(1));
        }
    }
}

impl<T> SequenceList<T> {
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Forget every element; capacity is retained.
    pub fn clear(&mut self) {
        self.count = 0;
    }

    pub fn get(&self, pos: usize) -> Result<&T> {
        self.as_slice()
            .get(pos)
            .ok_or_else(|| Error::out_of_range(NAME, pos))
    }

    pub fn get_mut(&mut self, pos: usize) -> Result<&mut T> {
        let count = self.count;
        self.data.as_mut_slice()[..count]
            .get_mut(pos)
            .ok_or_else(|| Error::out_of_range(NAME, pos))
    }

    pub fn set(&mut self, pos: usize, value: T) -> Result<()> {
        *self.get_mut(pos)? = value;
        Ok(())
    }

    pub fn first(&self) -> Option<&T> {
        self.as_slice().first()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data.as_slice()[..self.count]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }
}

impl<T: PartialEq> SequenceList<T> {
    /// Position of the first element equal to `value`.
    pub fn find(&self, value: &T) -> Option<usize> {
        self.iter().position(|e| e == value)
    }
}

impl<T: Default + Clone> Default for SequenceList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialEq> PartialEq for SequenceList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for SequenceList<T> {}

impl<T: Default + Clone> Extend<T> for SequenceList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

impl<T: Default + Clone> FromIterator<T> for SequenceList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut list = Self::with_capacity(iter.size_hint().0);
        list.extend(iter);
        list
    }
}

impl<'a, T> IntoIterator for &'a SequenceList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Display> fmt::Display for SequenceList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        super::write_bracketed(f, self.iter())
    }
}

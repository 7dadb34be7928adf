use std::fmt;

use crate::error::{Error, Result};

const NAME: &str = "DynamicBuffer";

/// Fixed-capacity, bounds-checked storage of `T`.
///
/// Every slot in `[0, capacity)` always holds a live value: either the
/// default it was created with or whatever was assigned later. The capacity
/// only changes through [`DynamicBuffer::resize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamicBuffer<T> {
    elements: Vec<T>,
}

impl<T: Default + Clone> DynamicBuffer<T> {
    /// Allocate `size` default-initialised slots.
    pub fn new(size: usize) -> Self {
        Self {
            elements: vec![T::default(); size],
        }
    }

    /// Build a buffer holding a copy of `data`.
    pub fn from_slice(data: &[T]) -> Self {
        Self {
            elements: data.to_vec(),
        }
    }

    /// Resize to `new_size` slots.
    ///
    /// The first `min(old, new)` elements are kept in order and any new slots
    /// are default-initialised. A size of `0` leaves the buffer untouched.
    pub fn resize(&mut self, new_size: usize) {
        if new_size == 0 {
            return;
        }
        let mut replacement = Vec::with_capacity(new_size);
        let kept = new_size.min(self.elements.len());
        replacement.extend(self.elements.drain(..kept));
        replacement.resize(new_size, T::default());
        self.elements = replacement;
    }

    /// Overwrite every slot with `value`.
    pub fn initialise(&mut self, value: T) {
        self.elements.fill(value);
    }
}

impl<T> DynamicBuffer<T> {
    pub fn capacity(&self) -> usize {
        self.elements.len()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&T> {
        self.elements
            .get(index)
            .ok_or_else(|| Error::out_of_range(NAME, index))
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        self.elements
            .get_mut(index)
            .ok_or_else(|| Error::out_of_range(NAME, index))
    }

    pub fn set(&mut self, index: usize, value: T) -> Result<()> {
        *self.get_mut(index)? = value;
        Ok(())
    }

    pub fn as_slice(&self) -> &[T] {
        &self.elements
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.elements
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.elements.iter()
    }
}

impl<T: Default + Clone> Default for DynamicBuffer<T> {
    fn default() -> Self {
        Self::new(0)
    }
}

impl<T: fmt::Display> fmt::Display for DynamicBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        super::write_bracketed(f, self.elements.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::DynamicBuffer;
    use crate::error::Error;

    #[test]
    fn new_buffer_is_default_filled() {
        let b: DynamicBuffer<i32> = DynamicBuffer::new(4);
        assert_eq!(b.capacity(), 4);
        assert_eq!(b.as_slice(), &[0, 0, 0, 0]);
    }

    #[test]
    fn access_outside_capacity_fails() {
        let mut b: DynamicBuffer<i32> = DynamicBuffer::new(3);
        assert_eq!(
            b.get(3),
            Err(Error::out_of_range("DynamicBuffer", 3))
        );
        assert!(b.set(10, 1).is_err());
        assert!(b.get_mut(2).is_ok());
    }

    #[test]
    fn resize_shrink_keeps_prefix() {
        let mut b = DynamicBuffer::from_slice(&[1, 2, 3, 4, 5]);
        b.resize(3);
        assert_eq!(b.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn resize_grow_keeps_all_and_defaults_rest() {
        let mut b = DynamicBuffer::from_slice(&[7, 8]);
        b.resize(5);
        assert_eq!(b.as_slice(), &[7, 8, 0, 0, 0]);
    }

    #[test]
    fn resize_to_zero_is_noop() {
        let mut b = DynamicBuffer::from_slice(&[1, 2]);
        b.resize(0);
        assert_eq!(b.as_slice(), &[1, 2]);
    }

    #[test]
    fn initialise_overwrites_every_slot() {
        let mut b: DynamicBuffer<String> = DynamicBuffer::new(3);
        b.initialise("x".to_string());
        assert!(b.iter().all(|s| s == "x"));
    }

    #[test]
    fn clone_is_independent() {
        let original = DynamicBuffer::from_slice(&[1, 2, 3]);
        let mut copy = original.clone();
        copy.set(0, 99).unwrap();
        copy.resize(10);
        assert_eq!(original.as_slice(), &[1, 2, 3]);
        assert_eq!(copy.get(0), Ok(&99));
    }

    #[test]
    fn display_is_bracketed() {
        let b = DynamicBuffer::from_slice(&[1, 2, 3]);
        assert_eq!(b.to_string(), "[ 1 2 3 ]");
        let empty: DynamicBuffer<i32> = DynamicBuffer::new(0);
        assert_eq!(empty.to_string(), "[ ]");
    }
}

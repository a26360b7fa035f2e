// Growable code-point buffer.
//
// A thin wrapper over `Vec<CodePoint>` that grows by doubling
// (new capacity = max(2 * old, required)) and reports allocation failure
// as `BootstringError::OutOfMemory` instead of aborting the process.

use crate::CodePoint;
use crate::error::{BootstringError, Result};

/// Append-only code-point sequence with positional insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodePointBuf {
    data: Vec<CodePoint>,
}

impl CodePointBuf {
    /// Create an empty buffer. Does not allocate.
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Create an empty buffer able to hold `capacity` code points.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        let mut buf = Self::new();
        buf.reserve(capacity)?;
        Ok(buf)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    #[inline]
    pub fn as_slice(&self) -> &[CodePoint] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<CodePoint> {
        self.data
    }

    /// Make room for at least `additional` more code points.
    pub fn reserve(&mut self, additional: usize) -> Result<()> {
        let required = self
            .data
            .len()
            .checked_add(additional)
            .ok_or(BootstringError::OutOfMemory {
                requested: usize::MAX,
            })?;
        self.grow_to(required)
    }

    /// Append a single code point.
    #[inline]
    pub fn push(&mut self, cp: CodePoint) -> Result<()> {
        self.append(std::slice::from_ref(&cp))
    }

    /// Append a contiguous run of code points, preserving order.
    pub fn append(&mut self, src: &[CodePoint]) -> Result<()> {
        self.reserve(src.len())?;
        self.data.extend_from_slice(src);
        Ok(())
    }

    /// Insert `value` at `index`, shifting every element at or after `index`
    /// one slot later.
    pub fn insert_at(&mut self, index: usize, value: CodePoint) -> Result<()> {
        if index > self.data.len() {
            return Err(BootstringError::input(format!(
                "insertion index {index} beyond buffer length {}",
                self.data.len()
            )));
        }
        self.reserve(1)?;
        self.data.insert(index, value);
        Ok(())
    }

    fn grow_to(&mut self, required: usize) -> Result<()> {
        let cap = self.data.capacity();
        if required <= cap {
            return Ok(());
        }
        let target = required.max(cap.saturating_mul(2));
        self.data
            .try_reserve_exact(target - self.data.len())
            .map_err(|_| BootstringError::OutOfMemory { requested: target })
    }
}

impl AsRef<[CodePoint]> for CodePointBuf {
    fn as_ref(&self) -> &[CodePoint] {
        &self.data
    }
}

impl From<CodePointBuf> for Vec<CodePoint> {
    fn from(buf: CodePointBuf) -> Self {
        buf.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_preserves_order() {
        let mut buf = CodePointBuf::new();
        buf.append(&[1, 2, 3]).unwrap();
        buf.push(4).unwrap();
        buf.append(&[]).unwrap();
        assert_eq!(buf.as_slice(), &[1, 2, 3, 4]);
        assert_eq!(buf.len(), 4);
    }

    #[test]
    fn capacity_doubles() {
        let mut buf = CodePointBuf::new();
        buf.push(0).unwrap();
        assert!(buf.capacity() >= 1);
        buf.push(1).unwrap();
        assert!(buf.capacity() >= 2);
        let cap = buf.capacity();
        buf.append(&vec![7; cap]).unwrap();
        assert!(buf.capacity() >= 2 * cap);
    }

    #[test]
    fn large_append_reserves_required() {
        let mut buf = CodePointBuf::new();
        buf.push(0).unwrap();
        buf.append(&[9; 100]).unwrap();
        assert!(buf.capacity() >= 101);
    }

    #[test]
    fn insert_at_shifts_tail() {
        let mut buf = CodePointBuf::new();
        buf.append(&[10, 20, 30]).unwrap();
        buf.insert_at(1, 15).unwrap();
        buf.insert_at(0, 5).unwrap();
        buf.insert_at(5, 35).unwrap();
        assert_eq!(buf.as_slice(), &[5, 10, 15, 20, 30, 35]);
    }

    #[test]
    fn insert_past_end_is_rejected() {
        let mut buf = CodePointBuf::new();
        buf.push(1).unwrap();
        assert!(matches!(
            buf.insert_at(3, 2),
            Err(BootstringError::InvalidInput(_))
        ));
        assert_eq!(buf.as_slice(), &[1]);
    }

    #[test]
    fn impossible_reservation_is_out_of_memory() {
        let mut buf = CodePointBuf::new();
        assert!(matches!(
            buf.reserve(usize::MAX / 2),
            Err(BootstringError::OutOfMemory { .. })
        ));
        buf.push(1).unwrap();
        assert!(matches!(
            buf.reserve(usize::MAX),
            Err(BootstringError::OutOfMemory { .. })
        ));
    }
}

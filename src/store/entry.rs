//! Store Entry Module
//!
//! Defines the values a keyspace slot can hold.

use std::collections::VecDeque;

// == Entry ==
/// A single keyspace value: either a byte string or a list of byte strings.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    /// Plain string value written by SET or INCR
    Bytes(Vec<u8>),
    /// List value appended to by RPUSH
    List(VecDeque<Vec<u8>>),
}

impl Entry {
    // == Range ==
    /// Returns list elements in `start..=stop` using Redis index rules.
    ///
    /// Negative indices are offsets from the tail (`-1` is the last element).
    /// Out-of-range bounds are clamped; an empty result is returned when the
    /// normalised start lies past the normalised stop.
    pub fn range(items: &VecDeque<Vec<u8>>, start: isize, stop: isize) -> Vec<Vec<u8>> {
        let len = items.len() as isize;
        let start = if start < 0 { (len + start).max(0) } else { start };
        let stop = if stop < 0 { len + stop } else { stop.min(len - 1) };

        if len == 0 || start > stop || start >= len {
            return Vec::new();
        }

        items
            .iter()
            .skip(start as usize)
            .take((stop - start + 1) as usize)
            .cloned()
            .collect()
    }
}

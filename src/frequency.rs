use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::container::WORD_LEN;

/// Occurrence count of every byte value seen in an input.
///
/// Backed by an ordered map so that iteration (and therefore the serialized
/// layout and the tree built from it) is the same on every run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyTable {
    counts: BTreeMap<u8, u64>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut counts: BTreeMap<u8, u64> = BTreeMap::new();
        for &b in bytes {
            *counts.entry(b).or_default() += 1;
        }

        Self { counts }
    }

    /// Sets the count for `symbol`, returning the previous one if any.
    pub fn insert(&mut self, symbol: u8, count: u64) -> Option<u64> {
        self.counts.insert(symbol, count)
    }

    pub fn get(&self, symbol: u8) -> Option<u64> {
        self.counts.get(&symbol).copied()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, saturating rather than wrapping on hostile tables.
    pub fn total(&self) -> u64 {
        self.counts
            .values()
            .fold(0u64, |acc, &c| acc.saturating_add(c))
    }

    /// `(symbol, count)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts.iter().map(|(&s, &c)| (s, c))
    }

    /// Bytes taken by this table inside a container: the entry count
    /// followed by one `(symbol, count)` pair per entry.
    pub fn serialized_len(&self) -> usize {
        WORD_LEN + self.len() * (1 + WORD_LEN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_every_byte() {
        let t = FrequencyTable::from_bytes(b"abracadabra");
        assert_eq!(t.get(b'a'), Some(5));
        assert_eq!(t.get(b'b'), Some(2));
        assert_eq!(t.get(b'r'), Some(2));
        assert_eq!(t.get(b'c'), Some(1));
        assert_eq!(t.get(b'd'), Some(1));
        assert_eq!(t.get(b'z'), None);
        assert_eq!(t.len(), 5);
        assert_eq!(t.total(), 11);
    }

    #[test]
    fn empty_input_gives_empty_table() {
        let t = FrequencyTable::from_bytes(&[]);
        assert!(t.is_empty());
        assert_eq!(t.total(), 0);
        assert_eq!(t.serialized_len(), WORD_LEN);
    }

    #[test]
    fn iterates_in_symbol_order() {
        let t = FrequencyTable::from_bytes(&[9, 3, 255, 0, 3]);
        let symbols: Vec<u8> = t.iter().map(|(s, _)| s).collect();
        assert_eq!(symbols, vec![0, 3, 9, 255]);
    }

    #[test]
    fn serialized_len_counts_entries() {
        let t = FrequencyTable::from_bytes(b"abc");
        assert_eq!(t.serialized_len(), 8 + 3 * 9);
    }

    #[test]
    fn serde_preserves_table() {
        let t = FrequencyTable::from_bytes(b"hello, world");
        let packed = rmp_serde::to_vec(&t).unwrap();
        let back: FrequencyTable = rmp_serde::from_slice(&packed).unwrap();
        assert_eq!(back, t);
    }
}

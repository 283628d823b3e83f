//! Persisted layout of a compressed buffer.
//!
//! ```text
//! [4 bytes]  MAGIC
//! [8 bytes]  original length, u64 little-endian
//! [8 bytes]  number of table entries N, u64 little-endian
//!  N times:
//!    [1 byte]  symbol
//!    [8 bytes] count, u64 little-endian
//! [rest]     packed payload, MSB first
//! ```
//!
//! Every length and count read from a container is checked against the bytes
//! actually left before it is used.

use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;

pub const MAGIC: [u8; 4] = [0xde, 0xc0, 0xef, 0xbe];

/// Width of every integer field.
pub const WORD_LEN: usize = 8;

pub const HEADER_LEN: usize = MAGIC.len() + WORD_LEN;

const ENTRY_LEN: usize = 1 + WORD_LEN;

fn put_word(out: &mut Vec<u8>, value: u64) {
    out.extend_from_slice(&value.to_le_bytes());
}

fn read_word(buf: &[u8], offset: usize) -> Option<u64> {
    let bytes = buf.get(offset..offset.checked_add(WORD_LEN)?)?;
    let mut word = [0u8; WORD_LEN];
    word.copy_from_slice(bytes);
    Some(u64::from_le_bytes(word))
}

pub fn write_header(out: &mut Vec<u8>, original_len: u64) {
    out.extend_from_slice(&MAGIC);
    put_word(out, original_len);
}

pub fn save_frequency_table(out: &mut Vec<u8>, table: &FrequencyTable) {
    put_word(out, table.len() as u64);
    for (symbol, count) in table.iter() {
        out.push(symbol);
        put_word(out, count);
    }
}

/// Reads a table starting at `offset`, returning it along with the offset of
/// the first byte after it.
pub fn load_frequency_table(buf: &[u8], offset: usize) -> Result<(FrequencyTable, usize)> {
    let entries = read_word(buf, offset)
        .ok_or(Error::TruncatedOrMalformedTable("missing entry count"))?;
    let mut pos = offset + WORD_LEN;

    let available = (buf.len() - pos) / ENTRY_LEN;
    if entries > available as u64 {
        return Err(Error::TruncatedOrMalformedTable(
            "entry count exceeds the remaining bytes",
        ));
    }
    if entries > 256 {
        return Err(Error::TruncatedOrMalformedTable("more than 256 entries"));
    }

    let mut table = FrequencyTable::new();
    for _ in 0..entries {
        let symbol = buf[pos];
        let count = read_word(buf, pos + 1)
            .ok_or(Error::TruncatedOrMalformedTable("truncated entry"))?;
        pos += ENTRY_LEN;

        if count == 0 {
            return Err(Error::TruncatedOrMalformedTable("zero count"));
        }
        if table.insert(symbol, count).is_some() {
            return Err(Error::TruncatedOrMalformedTable("duplicate symbol"));
        }
    }

    Ok((table, pos))
}

/// A parsed container, borrowing its payload from the input buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container<'a> {
    pub original_len: u64,
    pub table: FrequencyTable,
    pub payload: &'a [u8],
}

impl<'a> Container<'a> {
    pub fn parse(buf: &'a [u8]) -> Result<Self> {
        if buf.get(..MAGIC.len()) != Some(&MAGIC[..]) {
            return Err(Error::InvalidMagic);
        }

        let original_len = read_word(buf, MAGIC.len())
            .ok_or(Error::TruncatedOrMalformedTable("truncated header"))?;
        let (table, payload_start) = load_frequency_table(buf, HEADER_LEN)?;

        // counts are nonzero, so overflow here means the table is garbage
        let total = table
            .iter()
            .try_fold(0u64, |acc, (_, c)| acc.checked_add(c))
            .ok_or(Error::TruncatedOrMalformedTable("counts overflow"))?;
        if total != original_len {
            return Err(Error::TruncatedOrMalformedTable(
                "counts do not add up to the original length",
            ));
        }

        let payload = &buf[payload_start..];
        if payload.is_empty() {
            return Err(Error::EmptyPayload);
        }

        Ok(Self {
            original_len,
            table,
            payload,
        })
    }

    pub fn write(original_len: u64, table: &FrequencyTable, payload: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(HEADER_LEN + table.serialized_len() + payload.len());
        write_header(&mut out, original_len);
        save_frequency_table(&mut out, table);
        out.extend_from_slice(payload);
        out
    }
}

use log::debug;
use serde::{Deserialize, Serialize};

use crate::bits::{BitReader, BitWriter};
use crate::container::{Container, HEADER_LEN};
use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;
use crate::tree::HuffmanTree;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderOptions {
    /// Refuse inputs smaller than their own serialized frequency table.
    /// Such inputs almost always grow, but some short ones still shrink.
    pub reject_if_overhead_exceeds_payload: bool,
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self {
            reject_if_overhead_exceeds_payload: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Encoder {
    options: EncoderOptions,
}

impl Encoder {
    pub fn new(options: EncoderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &EncoderOptions {
        &self.options
    }

    pub fn encode(&self, input: &[u8]) -> Result<Vec<u8>> {
        if input.is_empty() {
            return Err(Error::EmptyInput);
        }

        let table = FrequencyTable::from_bytes(input);
        let table_len = table.serialized_len();
        if self.options.reject_if_overhead_exceeds_payload && table_len > input.len() {
            return Err(Error::TableTooLargeForPayload {
                table: table_len,
                input: input.len(),
            });
        }

        let tree = HuffmanTree::build(&table)?;
        let book = tree.code_book();

        let mut writer = BitWriter::new();
        for &b in input {
            // every input byte is in the table, hence in the book
            if let Some(code) = book.get(b) {
                writer.write_bits(code);
            }
        }
        let bit_len = writer.bit_len();
        let payload = writer.finish();

        let out = Container::write(input.len() as u64, &table, &payload);
        debug!(
            "encoded {} bytes ({} symbols) into {} bits, {} bytes total",
            input.len(),
            table.len(),
            bit_len,
            out.len()
        );

        Ok(out)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Decoder;

impl Decoder {
    pub fn new() -> Self {
        Self
    }

    pub fn decode(&self, input: &[u8]) -> Result<Vec<u8>> {
        if input.is_empty() {
            return Err(Error::EmptyInput);
        }

        let container = Container::parse(input)?;
        let tree = HuffmanTree::build(&container.table)?;

        let expected = usize::try_from(container.original_len)
            .map_err(|_| Error::TruncatedOrMalformedTable("original length too large"))?;

        // every symbol needs at least one bit
        let max_symbols = container.payload.len().saturating_mul(8);
        if expected > max_symbols {
            return Err(Error::TruncatedPayload {
                decoded: 0,
                expected,
            });
        }

        let mut reader = BitReader::new(container.payload);
        let mut out = Vec::with_capacity(expected);
        while out.len() < expected {
            match tree.read_symbol(&mut reader) {
                Some(symbol) => out.push(symbol),
                None => {
                    return Err(Error::TruncatedPayload {
                        decoded: out.len(),
                        expected,
                    })
                }
            }
        }

        debug!(
            "decoded {} bytes from {} payload bytes ({} header and table bytes)",
            out.len(),
            container.payload.len(),
            HEADER_LEN + container.table.serialized_len()
        );

        Ok(out)
    }
}

/// Compresses `input` with the default options.
pub fn encode(input: &[u8]) -> Result<Vec<u8>> {
    Encoder::default().encode(input)
}

pub fn decode(input: &[u8]) -> Result<Vec<u8>> {
    Decoder::new().decode(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_text_round_trips() {
        let s = String::from(
            "This is a really long message, I sure do hope it encodes and decodes properly.",
        );
        let packed = Encoder::new(EncoderOptions {
            reject_if_overhead_exceeds_payload: false,
        })
        .encode(s.as_bytes())
        .unwrap();
        let dec = String::from_utf8(decode(&packed).unwrap()).unwrap();

        assert_eq!(dec, s);
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(encode(&[]), Err(Error::EmptyInput)));
        assert!(matches!(decode(&[]), Err(Error::EmptyInput)));
    }

    #[test]
    fn overhead_heuristic() {
        // two distinct symbols need a 26 byte table
        let input = b"abababababababababab";
        assert!(matches!(
            encode(input),
            Err(Error::TableTooLargeForPayload { table: 26, input: 20 })
        ));

        let relaxed = Encoder::new(EncoderOptions {
            reject_if_overhead_exceeds_payload: false,
        });
        let packed = relaxed.encode(input).unwrap();
        assert_eq!(decode(&packed).unwrap(), input);
    }

    #[test]
    fn lone_symbol_uses_one_bit_each() {
        let input = vec![0x41u8; 5000];
        let packed = encode(&input).unwrap();
        let container = Container::parse(&packed).unwrap();
        assert_eq!(container.payload.len(), 5000 / 8);
        assert!(container.payload.iter().all(|&b| b == 0));
        assert_eq!(decode(&packed).unwrap(), input);
    }

    #[test]
    fn options_survive_serde() {
        let opts: EncoderOptions =
            rmp_serde::from_slice(&rmp_serde::to_vec_named(&EncoderOptions::default()).unwrap())
                .unwrap();
        assert!(opts.reject_if_overhead_exceeds_payload);
    }
}

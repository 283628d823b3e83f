//! Self-contained Huffman compression of byte buffers.
//!
//! The compressed form carries the symbol frequency table next to the packed
//! bits, so [`decode`] rebuilds exactly the tree [`encode`] used.
//!
//! ```
//! let input = b"abcabcabcabcabcabcabcabcabcabcabcabcabcabcabcabc".repeat(4);
//! let packed = huffpack::encode(&input)?;
//! assert!(packed.len() < input.len());
//! assert_eq!(huffpack::decode(&packed)?, input);
//! # Ok::<(), huffpack::Error>(())
//! ```

pub mod bits;
pub mod codec;
pub mod container;
pub mod error;
pub mod file;
pub mod frequency;
pub mod tree;

pub use codec::{decode, encode, Decoder, Encoder, EncoderOptions};
pub use container::{Container, MAGIC};
pub use error::{Error, Result};
pub use file::{decode_file, encode_file, HuffmanFile};
pub use frequency::FrequencyTable;
pub use tree::{CodeBook, HuffmanTree, Node};

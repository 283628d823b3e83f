//! File-backed wrappers around [`Encoder`] and [`Decoder`].

use log::info;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use crate::codec::{Decoder, Encoder, EncoderOptions};
use crate::error::{Error, Result};

fn read_file(path: &Path) -> Result<Vec<u8>> {
    let mut f = File::open(path).map_err(|source| Error::FileOpenFailure {
        path: path.to_path_buf(),
        source,
    })?;
    let mut data = Vec::new();
    f.read_to_end(&mut data)?;
    Ok(data)
}

fn write_file(path: &Path, data: &[u8]) -> Result<()> {
    let mut f = File::create(path).map_err(|source| Error::FileOpenFailure {
        path: path.to_path_buf(),
        source,
    })?;
    f.write_all(data)?;
    Ok(())
}

/// Holds the bytes last read from disk and the result of the last
/// encode or decode, until [`HuffmanFile::save`] writes the latter out.
///
/// On failure the output buffer is left empty.
#[derive(Debug, Default)]
pub struct HuffmanFile {
    encoder: Encoder,
    in_buffer: Vec<u8>,
    out_buffer: Vec<u8>,
}

impl HuffmanFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: EncoderOptions) -> Self {
        Self {
            encoder: Encoder::new(options),
            ..Self::default()
        }
    }

    pub fn in_buffer(&self) -> &[u8] {
        &self.in_buffer
    }

    pub fn out_buffer(&self) -> &[u8] {
        &self.out_buffer
    }

    pub fn encode_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.load(path.as_ref())?;
        self.out_buffer = self.encoder.encode(&self.in_buffer)?;
        Ok(())
    }

    pub fn decode_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.load(path.as_ref())?;
        self.out_buffer = Decoder::new().decode(&self.in_buffer)?;
        Ok(())
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        write_file(path, &self.out_buffer)?;
        info!("wrote {} bytes to {}", self.out_buffer.len(), path.display());
        Ok(())
    }

    fn load(&mut self, path: &Path) -> Result<()> {
        self.out_buffer.clear();
        self.in_buffer = read_file(path)?;
        Ok(())
    }
}

/// Compresses `src` into `dst`. Nothing is written if encoding fails.
pub fn encode_file(src: impl AsRef<Path>, dst: impl AsRef<Path>) -> Result<()> {
    let mut hf = HuffmanFile::new();
    hf.encode_file(src)?;
    hf.save(dst)
}

/// Decompresses `src` into `dst`. Nothing is written if decoding fails.
pub fn decode_file(src: impl AsRef<Path>, dst: impl AsRef<Path>) -> Result<()> {
    let mut hf = HuffmanFile::new();
    hf.decode_file(src)?;
    hf.save(dst)
}

/// Size of the file at `path`, for reporting ratios.
pub fn file_len(path: impl AsRef<Path>) -> Result<u64> {
    let path = path.as_ref();
    let meta = fs::metadata(path).map_err(|source| Error::FileOpenFailure {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(meta.len())
}

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use huffpack::container::HEADER_LEN;
use huffpack::file::file_len;
use huffpack::{EncoderOptions, FrequencyTable, HuffmanFile, HuffmanTree};

#[derive(Parser, Debug)]
#[command(about = "Huffman-compress and decompress files", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compress a file.
    Encode {
        input: PathBuf,
        output: PathBuf,

        /// Compress even when the frequency table is larger than the input.
        #[arg(long)]
        allow_expansion: bool,
    },
    /// Decompress a file produced by `encode`.
    Decode { input: PathBuf, output: PathBuf },
    /// Print the frequency table and code lengths of a file.
    Stats { input: PathBuf },
}

fn stats(input: &Path) -> Result<()> {
    let data = fs::read(input).with_context(|| format!("reading {}", input.display()))?;
    let table = FrequencyTable::from_bytes(&data);
    let tree = HuffmanTree::build(&table)?;

    let mut bits = 0u64;
    println!("symbol  count  code length");
    for (symbol, count) in table.iter() {
        let len = tree.code_len(symbol).unwrap_or(0);
        bits += count * len as u64;
        println!("0x{symbol:02x}  {count:>8}  {len}");
    }

    let payload = bits.div_ceil(8);
    let total = payload + HEADER_LEN as u64 + table.serialized_len() as u64;
    println!(
        "{} bytes -> {} payload bytes, {} total ({:.1}%)",
        data.len(),
        payload,
        total,
        100.0 * total as f64 / data.len() as f64
    );
    Ok(())
}

pub fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    match args.command {
        Command::Encode {
            input,
            output,
            allow_expansion,
        } => {
            let mut hf = HuffmanFile::with_options(EncoderOptions {
                reject_if_overhead_exceeds_payload: !allow_expansion,
            });
            hf.encode_file(&input)
                .with_context(|| format!("encoding {}", input.display()))?;
            hf.save(&output)?;
            info!(
                "{} -> {} bytes",
                file_len(&input)?,
                hf.out_buffer().len()
            );
        }
        Command::Decode { input, output } => {
            let mut hf = HuffmanFile::new();
            hf.decode_file(&input)
                .with_context(|| format!("decoding {}", input.display()))?;
            hf.save(&output)?;
        }
        Command::Stats { input } => stats(&input)?,
    }

    Ok(())
}

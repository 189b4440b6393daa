//! huff-tree: per-file adaptive Huffman compression.
//!
//! A compressed stream is laid out as:
//! - a 32-bit magic number
//! - the Huffman tree in bit-packed preorder (see [`header`])
//! - the prefix code of every input byte, then the code of the
//!   end-of-stream symbol, zero-padded to a byte boundary
//!
//! The input is scanned twice during compression, once to count and once
//! to encode, so it must be rewindable.

pub mod bitio;
pub mod codes;
pub mod config;
pub mod error;
pub mod frequency;
pub mod header;
pub mod symbol;
pub mod tree;

use crate::bitio::{BitSink, BitSource, BitStreamReader, BitStreamWriter};
use crate::codes::CodeTable;
use crate::config::CompressionConfig;
use crate::error::{CompressError, Result};
use crate::frequency::FrequencyTable;
use crate::symbol::{Symbol, BITS_PER_INT, BITS_PER_WORD};
use crate::tree::HuffNode;
use std::io::Cursor;

/// Figures from one compression run.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CompressionStats {
    pub original_size: u64,
    pub header_bits: u64,
    pub body_bits: u64,
    /// Output size in bytes, magic and padding included.
    pub compressed_size: u64,
    pub distinct_symbols: usize,
    pub entropy_bits: f64,
}

impl CompressionStats {
    pub fn ratio(&self) -> f64 {
        if self.original_size == 0 {
            1.0
        } else {
            self.compressed_size as f64 / self.original_size as f64
        }
    }
}

/// Figures from one decompression run.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DecompressionStats {
    pub header_bits: u64,
    pub body_bits: u64,
    pub output_size: u64,
}

/// The codec engine
pub struct Compressor {
    config: CompressionConfig,
}

impl Compressor {
    /// Create a new compressor with the given configuration
    pub fn new(config: CompressionConfig) -> Self {
        Self { config }
    }

    /// Create a compressor with default configuration
    pub fn default() -> Self {
        Self::new(CompressionConfig::default())
    }

    pub fn config(&self) -> &CompressionConfig {
        &self.config
    }

    /// Compress `input` into `output` and close `output`.
    pub fn compress<R, W>(&self, input: &mut R, mut output: W) -> Result<CompressionStats>
    where
        R: BitSource,
        W: BitSink,
    {
        let freq = FrequencyTable::count(input, self.config.max_input_size)?;
        input.reset()?;

        let root = HuffNode::build(&freq);
        let codes = CodeTable::from_tree(&root);

        output.write_bits(BITS_PER_INT, self.config.magic)?;
        let header_bits = header::write_tree(&root, &mut output)?;

        input.reset()?;
        let (original_size, body_bits) = encode_body(input, &codes, &mut output)?;
        output.close()?;

        let payload_bits = BITS_PER_INT as u64 + header_bits + body_bits;
        let stats = CompressionStats {
            original_size,
            header_bits,
            body_bits,
            compressed_size: (payload_bits + 7) / 8,
            distinct_symbols: freq.distinct(),
            entropy_bits: freq.entropy(),
        };
        tracing::info!(
            original = stats.original_size,
            compressed = stats.compressed_size,
            header_bits,
            body_bits,
            "compressed"
        );
        Ok(stats)
    }

    /// Decompress `input` into `output` and close `output`.
    ///
    /// Bytes are handed to `output` as they are decoded. If the input ends
    /// before the end-of-stream code, `MissingTerminator` is returned after
    /// those bytes were written, so a sink backed by a file is left holding a
    /// partial result. On error nothing more is written and `output` is
    /// dropped unclosed; use [`Compressor::decompress_bytes`] to get all or
    /// nothing.
    pub fn decompress<R, W>(&self, input: &mut R, mut output: W) -> Result<DecompressionStats>
    where
        R: BitSource,
        W: BitSink,
    {
        let found = input
            .read_bits(BITS_PER_INT)?
            .ok_or(CompressError::BadMagic {
                expected: self.config.magic,
                found: 0,
            })?;
        if found != self.config.magic {
            return Err(CompressError::BadMagic {
                expected: self.config.magic,
                found,
            });
        }

        let (root, header_bits) = header::read_tree(input)?;
        let (output_size, body_bits) = decode_body(input, &root, &mut output)?;
        output.close()?;

        tracing::info!(output = output_size, header_bits, body_bits, "decompressed");
        Ok(DecompressionStats {
            header_bits,
            body_bits,
            output_size,
        })
    }

    /// Compress an in-memory buffer.
    pub fn compress_bytes(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut input = BitStreamReader::new(Cursor::new(data));
        let mut out = Vec::new();
        self.compress(&mut input, BitStreamWriter::new(&mut out))?;
        Ok(out)
    }

    /// Decompress an in-memory buffer. No partial output is returned on error.
    pub fn decompress_bytes(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut input = BitStreamReader::new(Cursor::new(data));
        let mut out = Vec::new();
        self.decompress(&mut input, BitStreamWriter::new(&mut out))?;
        Ok(out)
    }
}

/// Write the code of every byte in `input`, then the end-of-stream code.
/// Returns bytes read and bits written.
fn encode_body<R, W>(input: &mut R, codes: &CodeTable, out: &mut W) -> Result<(u64, u64)>
where
    R: BitSource,
    W: BitSink,
{
    let mut bytes = 0u64;
    let mut bits = 0u64;
    while let Some(value) = input.read_bits(BITS_PER_WORD)? {
        let symbol = Symbol::try_from(value)?;
        // The input changed between the counting and encoding passes.
        let code = codes
            .get(symbol)
            .ok_or(CompressError::InvalidSymbol(value))?;
        code.write_to(out)?;
        bytes += 1;
        bits += code.len() as u64;
    }
    let eof = codes
        .get(Symbol::PSEUDO_EOF)
        .ok_or(CompressError::InvalidSymbol(Symbol::PSEUDO_EOF.value()))?;
    eof.write_to(out)?;
    bits += eof.len() as u64;
    Ok((bytes, bits))
}

/// Walk the tree one bit at a time until the end-of-stream leaf. Returns
/// bytes written and bits consumed.
fn decode_body<R, W>(input: &mut R, root: &HuffNode, out: &mut W) -> Result<(u64, u64)>
where
    R: BitSource,
    W: BitSink,
{
    let mut bytes = 0u64;
    let mut bits = 0u64;
    let mut current = root;
    loop {
        let bit = input.read_bit()?.ok_or(CompressError::MissingTerminator)?;
        bits += 1;
        current = match current {
            HuffNode::Internal { left, right, .. } => {
                if bit {
                    &**right
                } else {
                    &**left
                }
            }
            // A leaf root has the one-bit code 0; each bit is one visit.
            leaf @ HuffNode::Leaf { .. } => leaf,
        };

        if let HuffNode::Leaf { symbol, .. } = current {
            match symbol.as_byte() {
                None => return Ok((bytes, bits)),
                Some(byte) => {
                    out.write_bits(BITS_PER_WORD, byte as u32)?;
                    bytes += 1;
                    current = root;
                }
            }
        }
    }
}

//! Integration tests for huff-tree

use huff_tree::bitio::{BitSink, BitStreamReader, BitStreamWriter};
use huff_tree::codes::CodeTable;
use huff_tree::error::CompressError;
use huff_tree::frequency::FrequencyTable;
use huff_tree::header;
use huff_tree::symbol::{Symbol, HUFF_TREE};
use huff_tree::tree::HuffNode;
use huff_tree::*;
use rand::{Rng, SeedableRng};
use std::io::{Cursor, Seek, SeekFrom, Write};

#[test]
fn test_full_lifecycle() {
    let compressor = Compressor::default();
    let data = b"the quick brown fox jumps over the lazy dog".repeat(50);
    let compressed = compressor.compress_bytes(&data).unwrap();
    assert!(compressed.len() < data.len());
    let decompressed = compressor.decompress_bytes(&compressed).unwrap();
    assert_eq!(decompressed, data);
}

#[test]
fn test_random_roundtrips() {
    let compressor = Compressor::default();
    let mut rng = rand::rngs::StdRng::seed_from_u64(0x5eed);
    for len in [0usize, 1, 2, 7, 64, 1000, 20_000] {
        let data: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
        let compressed = compressor.compress_bytes(&data).unwrap();
        assert_eq!(
            compressor.decompress_bytes(&compressed).unwrap(),
            data,
            "roundtrip failed for length {}",
            len
        );
    }
}

#[test]
fn test_skewed_random_roundtrip() {
    let compressor = Compressor::default();
    let mut rng = rand::rngs::StdRng::seed_from_u64(7);
    let data: Vec<u8> = (0..5000)
        .map(|_| {
            let r: f64 = rng.gen();
            (r * r * r * 256.0) as u8
        })
        .collect();
    let compressed = compressor.compress_bytes(&data).unwrap();
    assert_eq!(compressor.decompress_bytes(&compressed).unwrap(), data);
}

#[test]
fn test_binary_data() {
    let compressor = Compressor::default();
    let data: Vec<u8> = (0..=255).cycle().take(2000).collect();
    let compressed = compressor.compress_bytes(&data).unwrap();
    assert_eq!(compressor.decompress_bytes(&compressed).unwrap(), data);
}

#[test]
fn test_single_repeated_byte() {
    let compressor = Compressor::default();
    for data in [vec![b'x'], vec![0xABu8; 100_000]] {
        let compressed = compressor.compress_bytes(&data).unwrap();
        assert_eq!(compressor.decompress_bytes(&compressed).unwrap(), data);
    }
}

#[test]
fn test_concrete_scenario() {
    let compressor = Compressor::default();
    let compressed = compressor.compress_bytes(&[65, 65, 65, 66]).unwrap();
    assert_eq!(&compressed[..4], &HUFF_TREE.to_be_bytes());
    assert_eq!(
        compressor.decompress_bytes(&compressed).unwrap(),
        vec![65, 65, 65, 66]
    );
}

#[test]
fn test_empty_input() {
    let compressor = Compressor::default();
    let compressed = compressor.compress_bytes(&[]).unwrap();

    let mut src = BitStreamReader::new(Cursor::new(&compressed[4..]));
    let (tree, bits) = header::read_tree(&mut src).unwrap();
    assert_eq!(tree, HuffNode::leaf(Symbol::PSEUDO_EOF, 0));
    assert_eq!(bits, 10);
    // magic + 10 header bits + 1 code bit
    assert_eq!(compressed.len(), 6);

    assert!(compressor.decompress_bytes(&compressed).unwrap().is_empty());
}

#[test]
fn test_header_roundtrip() {
    let data = b"header round trip with a reasonably varied alphabet: 0123456789!";
    let tree = HuffNode::build(&FrequencyTable::from_bytes(data));

    let mut buf = Vec::new();
    let mut sink = BitStreamWriter::new(&mut buf);
    header::write_tree(&tree, &mut sink).unwrap();
    sink.close().unwrap();

    let (rebuilt, _) = header::read_tree(&mut BitStreamReader::new(Cursor::new(buf))).unwrap();
    assert_eq!(CodeTable::from_tree(&rebuilt), CodeTable::from_tree(&tree));
}

#[test]
fn test_format_rejection_writes_nothing() {
    let compressor = Compressor::default();
    let mut input = BitStreamReader::new(Cursor::new(b"PK\x03\x04 definitely a zip".to_vec()));
    let mut out = Vec::new();
    let err = compressor
        .decompress(&mut input, BitStreamWriter::new(&mut out))
        .unwrap_err();
    assert!(matches!(err, CompressError::BadMagic { found: 0x504b0304, .. }));
    assert!(out.is_empty());
}

#[test]
fn test_short_input_rejected() {
    let err = Compressor::default().decompress_bytes(&[0xfa, 0xce]).unwrap_err();
    assert!(matches!(err, CompressError::BadMagic { .. }));
}

#[test]
fn test_truncated_body_rejected() {
    let compressor = Compressor::default();
    let data = b"a body long enough that the terminator sits well past the cut".repeat(20);
    let compressed = compressor.compress_bytes(&data).unwrap();
    let truncated = &compressed[..compressed.len() - 10];
    let err = compressor.decompress_bytes(truncated).unwrap_err();
    assert!(matches!(err, CompressError::MissingTerminator));
}

#[test]
fn test_truncated_stream_leaves_partial_output() {
    let compressor = Compressor::default();
    let data = b"streamed output arrives before the terminator is checked".repeat(10);
    let compressed = compressor.compress_bytes(&data).unwrap();

    let mut input = BitStreamReader::new(Cursor::new(&compressed[..compressed.len() - 5]));
    let mut out = Vec::new();
    let err = compressor
        .decompress(&mut input, BitStreamWriter::new(&mut out))
        .unwrap_err();
    assert!(matches!(err, CompressError::MissingTerminator));
    assert!(!out.is_empty());
    assert!(data.starts_with(&out));

    assert!(compressor
        .decompress_bytes(&compressed[..compressed.len() - 5])
        .is_err());
}

#[test]
fn test_body_without_terminator_rejected() {
    // Hand-built stream: magic, header, literal codes, no end-of-stream code.
    let data = b"aaab";
    let tree = HuffNode::build(&FrequencyTable::from_bytes(data));
    let codes = CodeTable::from_tree(&tree);

    let mut buf = Vec::new();
    let mut sink = BitStreamWriter::new(&mut buf);
    sink.write_bits(32, HUFF_TREE).unwrap();
    header::write_tree(&tree, &mut sink).unwrap();
    for &b in data {
        codes.get(Symbol::from_byte(b)).unwrap().write_to(&mut sink).unwrap();
    }
    sink.close().unwrap();

    let err = Compressor::default().decompress_bytes(&buf).unwrap_err();
    assert!(matches!(err, CompressError::MissingTerminator));
}

#[test]
fn test_truncated_header_rejected() {
    let compressor = Compressor::default();
    let compressed = compressor.compress_bytes(b"abcdefghijklmnop").unwrap();
    let err = compressor.decompress_bytes(&compressed[..6]).unwrap_err();
    assert!(matches!(err, CompressError::TruncatedHeader));
}

#[test]
fn test_file_backed_streams() {
    let data = b"file backed compression needs a seekable source".repeat(30);

    let mut source = tempfile::tempfile().unwrap();
    source.write_all(&data).unwrap();
    source.seek(SeekFrom::Start(0)).unwrap();

    let mut packed = tempfile::tempfile().unwrap();
    let stats = Compressor::default()
        .compress(&mut BitStreamReader::new(&mut source), BitStreamWriter::new(&mut packed))
        .unwrap();
    assert_eq!(stats.original_size, data.len() as u64);
    assert_eq!(packed.metadata().unwrap().len(), stats.compressed_size);

    packed.seek(SeekFrom::Start(0)).unwrap();
    let mut restored = Vec::new();
    let dstats = Compressor::default()
        .decompress(&mut BitStreamReader::new(&mut packed), BitStreamWriter::new(&mut restored))
        .unwrap();
    assert_eq!(dstats.output_size, data.len() as u64);
    assert_eq!(restored, data);
}

#[test]
fn test_compression_config() {
    use huff_tree::config::CompressionConfig;
    let config = CompressionConfig::from_json(r#"{ "max_input_size": 1024 }"#).unwrap();
    let compressor = Compressor::new(config);
    assert!(compressor.compress_bytes(&[1u8; 1024]).is_ok());
    assert!(matches!(
        compressor.compress_bytes(&[1u8; 1025]),
        Err(CompressError::InputTooLarge { limit: 1024 })
    ));
}

use std::fs;

use huffpack::{decode_file, encode_file, EncoderOptions, Error, HuffmanFile};

#[test]
fn file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("input.txt");
    let packed = dir.path().join("input.huff");
    let out = dir.path().join("output.txt");

    let data = b"It was the best of times, it was the worst of times. ".repeat(40);
    fs::write(&src, &data).unwrap();

    encode_file(&src, &packed).unwrap();
    assert!(fs::metadata(&packed).unwrap().len() < data.len() as u64);

    decode_file(&packed, &out).unwrap();
    assert_eq!(fs::read(&out).unwrap(), data);
}

#[test]
fn buffers_are_exposed() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("tiny");
    fs::write(&src, b"tiny").unwrap();

    let mut hf = HuffmanFile::with_options(EncoderOptions {
        reject_if_overhead_exceeds_payload: false,
    });
    hf.encode_file(&src).unwrap();
    assert_eq!(hf.in_buffer(), b"tiny");
    assert_eq!(huffpack::decode(hf.out_buffer()).unwrap(), b"tiny");
}

#[test]
fn missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");
    let dst = dir.path().join("dst");

    assert!(matches!(
        encode_file(&missing, &dst),
        Err(Error::FileOpenFailure { .. })
    ));
    assert!(!dst.exists());
}

#[test]
fn failed_decode_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("plain.txt");
    let dst = dir.path().join("out");
    fs::write(&src, b"definitely not compressed").unwrap();

    assert!(matches!(decode_file(&src, &dst), Err(Error::InvalidMagic)));
    assert!(!dst.exists());

    let mut hf = HuffmanFile::new();
    assert!(hf.decode_file(&src).is_err());
    assert!(hf.out_buffer().is_empty());
}

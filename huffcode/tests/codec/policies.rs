//! Configuration-driven codec behavior

use crate::common::init_logging;
use huffcode::{Bit, CodecConfig, Error, HuffmanCodec, UnknownSymbolPolicy};

#[test]
fn test_unknown_symbols_fail_by_default() {
    let mut codec = HuffmanCodec::<char>::new();
    codec.compress_str("abc").unwrap();

    let err = codec.encode(&['a', 'x', 'b']).unwrap_err();
    assert!(matches!(err, Error::Encoding(_)));
    assert!(err.to_string().contains("position 1"));
}

#[test]
fn test_unknown_symbols_can_be_skipped() {
    init_logging();

    let config = CodecConfig::new().with_unknown_symbols(UnknownSymbolPolicy::Skip);
    let mut codec = HuffmanCodec::<char>::with_config(config);
    codec.compress_str("abc").unwrap();

    let bits = codec.encode(&['a', 'x', 'b', 'y']).expect("Skip policy should not fail");
    assert_eq!(codec.decompress_to_string(&bits).unwrap(), "ab");
}

#[test]
fn test_single_symbol_bit_is_configurable() {
    let config = CodecConfig::new().with_single_symbol_bit(Bit::One);
    let mut codec = HuffmanCodec::<char>::with_config(config);

    let bits = codec.compress_str("qqq").unwrap();
    assert_eq!(bits.to_string(), "111");
    assert_eq!(codec.decompress_to_string(&bits).unwrap(), "qqq");

    assert!(codec.decompress(&"110".parse().unwrap()).is_err());
}

#[cfg(feature = "serde")]
#[test]
fn test_codec_from_config_file() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("huffcode.toml");
    std::fs::write(&path, "unknown_symbols = \"skip\"\nsingle_symbol_bit = 1\n").unwrap();

    let config = CodecConfig::load_from_file(&path).expect("Load failed");
    let mut codec = HuffmanCodec::<char>::with_config(config);

    let bits = codec.compress_str("mm").unwrap();
    assert_eq!(bits.to_string(), "11");
    assert!(codec.encode(&['m', '?']).is_ok());
}

#[cfg(feature = "serde")]
#[test]
fn test_missing_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = CodecConfig::load_from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

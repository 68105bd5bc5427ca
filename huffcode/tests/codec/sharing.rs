//! Decoding in a separate codec from a serialized tree

use huffcode::{Bit, BitSequence, CodecConfig, Element, HuffmanCodec, HuffmanTree};
use pretty_assertions::assert_eq;

#[test]
fn test_decode_with_shipped_tree() {
    let text = "a tree shipped next to its bits decodes anywhere";

    let mut producer = HuffmanCodec::<char>::new();
    let bits = producer.compress_str(text).unwrap();
    let tree_bytes = producer.tree().unwrap().to_bytes().unwrap();
    let packed = bits.as_bytes().to_vec();
    let bit_len = bits.len();
    drop(producer);

    let tree = HuffmanTree::<char>::from_bytes(&tree_bytes).expect("Tree decoding failed");
    let consumer = HuffmanCodec::from_tree(tree, CodecConfig::default());
    let bits = BitSequence::from_packed(&packed, bit_len).unwrap();

    assert_eq!(consumer.decompress_to_string(&bits).unwrap(), text);
}

#[test]
fn test_shipped_tree_reproduces_codes() {
    let input: Vec<u16> = (0..500).map(|i| (i * i % 37) as u16).collect();

    let mut producer = HuffmanCodec::new();
    let bits = producer.compress(&input).unwrap();

    let bytes = producer.tree().unwrap().to_bytes().unwrap();
    let consumer = HuffmanCodec::from_tree(
        HuffmanTree::<u16>::from_bytes(&bytes).unwrap(),
        CodecConfig::default(),
    );

    for element in producer.frequency_table().iter() {
        let theirs = consumer.frequency_table().lookup(element.symbol()).unwrap();
        assert_eq!(theirs.code(), element.code());
        assert_eq!(theirs.frequency(), element.frequency());
    }
    assert_eq!(consumer.encode(&input).unwrap(), bits);
    assert_eq!(consumer.decompress(&bits).unwrap(), input);
}

#[test]
fn test_single_symbol_tree_ships() {
    let mut producer = HuffmanCodec::<u8>::new();
    let bits = producer.compress(b"xxxxxxxx").unwrap();

    let bytes = producer.tree().unwrap().to_bytes().unwrap();
    let consumer = HuffmanCodec::from_tree(
        HuffmanTree::<u8>::from_bytes(&bytes).unwrap(),
        CodecConfig::default(),
    );

    assert_eq!(consumer.decompress(&bits).unwrap(), b"xxxxxxxx".to_vec());
}

#[test]
fn test_empty_tree_ships() {
    let mut producer = HuffmanCodec::<u32>::new();
    let bits = producer.compress(&[]).unwrap();

    let bytes = producer.tree().unwrap().to_bytes().unwrap();
    let consumer = HuffmanCodec::from_tree(
        HuffmanTree::<u32>::from_bytes(&bytes).unwrap(),
        CodecConfig::default(),
    );

    assert!(consumer.decompress(&bits).unwrap().is_empty());
}

#[test]
fn test_single_symbol_digit_ships_with_tree() {
    let config = CodecConfig::new().with_single_symbol_bit(Bit::One);
    let mut producer = HuffmanCodec::<u8>::with_config(config);
    let bits = producer.compress(b"qqq").unwrap();
    assert_eq!(bits.to_string(), "111");

    let bytes = producer.tree().unwrap().to_bytes().unwrap();
    let consumer = HuffmanCodec::from_tree(
        HuffmanTree::<u8>::from_bytes(&bytes).unwrap(),
        CodecConfig::default(),
    );

    assert_eq!(consumer.decompress(&bits).unwrap(), b"qqq".to_vec());
    assert_eq!(consumer.encode(b"qq").unwrap(), "11".parse::<BitSequence>().unwrap());
}

#[test]
fn test_single_symbol_tree_handed_over_directly() {
    let config = CodecConfig::new().with_single_symbol_bit(Bit::One);
    let mut producer = HuffmanCodec::<char>::with_config(config);
    let bits = producer.compress_str("zzzz").unwrap();

    let tree = producer.tree().cloned().unwrap();
    let consumer = HuffmanCodec::from_tree(tree, CodecConfig::default());
    assert_eq!(consumer.decompress_to_string(&bits).unwrap(), "zzzz");
}

#[test]
fn test_merged_trees_reject_overflowing_weights() {
    let heavy = HuffmanTree::leaf(Element::new('a', u64::MAX));
    let light = HuffmanTree::leaf(Element::new('b', 1));

    let err = HuffmanTree::merge(heavy, light).unwrap_err();
    assert!(err.is_format());
}

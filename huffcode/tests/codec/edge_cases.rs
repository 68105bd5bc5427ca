//! Malformed input and state handling

use huffcode::{BitSequence, Decoder, Error, HuffmanCodec, HuffmanTree};

fn trained(text: &str) -> HuffmanCodec<char> {
    let mut codec = HuffmanCodec::new();
    codec.compress_str(text).expect("Compression failed");
    codec
}

fn encode_text(codec: &HuffmanCodec<char>, text: &str) -> BitSequence {
    let symbols: Vec<char> = text.chars().collect();
    codec.encode(&symbols).expect("Encoding failed")
}

/// Bit offsets at which each symbol's code ends
fn code_boundaries(codec: &HuffmanCodec<char>, text: &str) -> Vec<usize> {
    let table = codec.frequency_table();
    text.chars()
        .scan(0, |offset, c| {
            *offset += table.lookup(&c).map_or(0, |e| e.code().len());
            Some(*offset)
        })
        .collect()
}

#[test]
fn test_truncated_stream_is_rejected() {
    let codec = trained("abracadabra");
    let bits = encode_text(&codec, "abracadabra");
    let boundaries = code_boundaries(&codec, "abracadabra");

    // Every cut that lands inside a code must fail
    for cut in 1..bits.len() {
        let truncated: BitSequence = bits.iter().take(cut).collect();
        let result = codec.decompress(&truncated);

        if boundaries.contains(&cut) {
            assert!(result.is_ok(), "cut at {} lands on a code boundary", cut);
        } else {
            let err = result.unwrap_err();
            assert!(err.is_format(), "cut at {} should be a format error", cut);
        }
    }
}

#[test]
fn test_partial_output_is_discarded() {
    // c:2 a:1 b:1 -> 'c' gets one bit, 'a' and 'b' two
    let codec = trained("abcc");
    let code_a = codec.frequency_table().lookup(&'a').unwrap().code().clone();
    assert_eq!(code_a.len(), 2);

    let mut bits = encode_text(&codec, "cca");
    bits.push(code_a.get(0).unwrap());

    assert!(matches!(codec.decompress(&bits), Err(Error::Format(_))));
}

#[test]
fn test_single_symbol_rejects_foreign_bit() {
    let codec = trained("zzzzzz");
    let bits: BitSequence = "000100".parse().unwrap();

    let err = codec.decompress(&bits).unwrap_err();
    assert!(err.is_format());
    assert!(err.to_string().contains("position 3"));
}

#[test]
fn test_empty_alphabet_rejects_bits() {
    let mut codec: HuffmanCodec<u8> = HuffmanCodec::new();
    codec.compress(&[]).unwrap();

    let err = codec.decompress(&"1".parse().unwrap()).unwrap_err();
    assert!(matches!(err, Error::State(_)));
}

#[test]
fn test_decoder_against_empty_tree() {
    let tree: HuffmanTree<char> = HuffmanTree::empty();
    let decoder = Decoder::new(&tree);

    assert_eq!(decoder.decode(&BitSequence::new()).unwrap(), Vec::<char>::new());
    assert!(decoder.decode(&"0".parse().unwrap()).is_err());
}

#[test]
fn test_unpacked_digit_values() {
    let codec = trained("abracadabra");
    let bits = encode_text(&codec, "abracadabra");

    let digits: Vec<u8> = bits.iter().map(u8::from).collect();
    let rebuilt = BitSequence::try_from(digits.as_slice()).unwrap();
    assert_eq!(codec.decompress_to_string(&rebuilt).unwrap(), "abracadabra");

    let mut bad = digits;
    bad[0] = 3;
    assert!(BitSequence::try_from(bad.as_slice()).unwrap_err().is_format());
}

#[test]
fn test_packed_bytes_round_trip() {
    let codec = trained("packed storage keeps the logical length");
    let bits = encode_text(&codec, "packed storage keeps the logical length");

    let restored = BitSequence::from_packed(bits.as_bytes(), bits.len()).unwrap();
    assert_eq!(restored, bits);

    // Claiming one bit too many leaves a dangling path or an extra symbol,
    // never the original text
    if bits.len() % 8 != 0 {
        let longer = BitSequence::from_packed(bits.as_bytes(), bits.len() + 1).unwrap();
        let decoded = codec.decompress_to_string(&longer);
        assert!(decoded.map_or(true, |text| text != "packed storage keeps the logical length"));
    }
}

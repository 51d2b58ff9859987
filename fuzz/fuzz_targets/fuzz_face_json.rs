#![no_main]

use libfuzzer_sys::fuzz_target;
use voxface_core::{decode_face_sequence, encode_face_sequence};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(sequence) = decode_face_sequence(text) else {
        return;
    };
    // Empty sequences decode but are refused on save.
    if let Ok(encoded) = encode_face_sequence(&sequence) {
        let decoded = decode_face_sequence(&encoded).expect("encoded sequence must decode");
        assert_eq!(decoded.frames.len(), sequence.frames.len());
    }
});

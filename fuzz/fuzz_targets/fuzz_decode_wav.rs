#![no_main]

use libfuzzer_sys::fuzz_target;
use voxface_core::wav::{decode_wav, encode_wav_with_format, extract_pcm_data};

fuzz_target!(|data: &[u8]| {
    let extracted = extract_pcm_data(data).map(<[u8]>::to_vec);
    if let Ok(decoded) = decode_wav(data) {
        assert_eq!(extracted.as_deref(), Some(decoded.pcm.as_slice()));
        // Anything we accept must re-encode to a container we accept again.
        let bytes = encode_wav_with_format(&decoded.pcm, &decoded.format)
            .expect("decoded WAV must re-encode");
        let again = decode_wav(&bytes).expect("re-encoded WAV must decode");
        assert_eq!(again, decoded);
    }
});

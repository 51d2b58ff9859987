//! Integration tests for the public encoder API.

use std::io::Cursor;

use voxface_core::wav::{compute_pcm_hash, HEADER_LEN};
use voxface_core::{
    decode_face_sequence, decode_wav, encode_face_sequence, encode_wav, AnimationFrame,
    AnimationSequence, RecordingError,
};

/// Deterministic pseudo-speech: a decaying sine per channel.
fn synth_pcm(frames: usize, channels: u16, sample_rate: u32) -> Vec<u8> {
    let mut pcm = Vec::with_capacity(frames * channels as usize * 2);
    for n in 0..frames {
        let t = n as f64 / sample_rate as f64;
        for ch in 0..channels {
            let freq = 220.0 * (ch as f64 + 1.0);
            let value = (t * freq * std::f64::consts::TAU).sin() * (-t * 3.0).exp();
            let sample = (value * 32767.0).round() as i16;
            pcm.extend_from_slice(&sample.to_le_bytes());
        }
    }
    pcm
}

#[test]
fn test_wav_round_trip_preserves_payload_and_format() {
    for (frames, sample_rate, channels) in [(1, 8000, 1), (160, 16000, 1), (4410, 44100, 2)] {
        let pcm = synth_pcm(frames, channels, sample_rate);
        let wav = encode_wav(&pcm, sample_rate, channels).unwrap();
        assert_eq!(wav.len(), HEADER_LEN + pcm.len());

        let decoded = decode_wav(&wav).unwrap();
        assert_eq!(decoded.pcm, pcm);
        assert_eq!(decoded.format.sample_rate(), sample_rate);
        assert_eq!(decoded.format.channels(), channels);
    }
}

#[test]
fn test_wav_readable_by_hound() {
    let pcm = synth_pcm(1600, 2, 16000);
    let wav = encode_wav(&pcm, 16000, 2).unwrap();

    let reader = hound::WavReader::new(Cursor::new(wav.clone())).unwrap();
    assert_eq!(reader.duration(), 1600);
    assert_eq!(reader.spec().channels, 2);
    assert_eq!(
        compute_pcm_hash(&wav).unwrap(),
        blake3::hash(&pcm).to_hex().to_string()
    );
}

#[test]
fn test_empty_inputs_fail_the_same_way() {
    let audio = encode_wav(&[], 16000, 1).unwrap_err();
    let face = encode_face_sequence(&AnimationSequence::new(1.0, 30.0)).unwrap_err();
    assert_eq!(audio.code(), face.code());
    assert!(matches!(audio, RecordingError::EmptyInput { .. }));
}

#[test]
fn test_face_document_round_trip() {
    let mut sequence = AnimationSequence::new(0.5, 60.0);
    for i in 0..30 {
        let mut frame = AnimationFrame::new(i);
        for (k, name) in ["JawOpen", "MouthFunnel", "MouthPucker", "TongueOut"]
            .iter()
            .enumerate()
        {
            frame.set_blend_shape(*name, ((i as usize + k) % 8) as f32 / 8.0);
        }
        sequence.push_frame(frame);
    }

    let document = encode_face_sequence(&sequence).unwrap();
    assert_eq!(decode_face_sequence(&document).unwrap(), sequence);
    assert_eq!(encode_face_sequence(&sequence).unwrap(), document);
}

//! Deterministic WAV encoder.
//!
//! Wraps raw 16-bit little-endian PCM in the canonical 44-byte RIFF header.
//! The payload is copied through unmodified and the header carries no
//! timestamps, so identical input always produces identical bytes.

mod format;
mod reader;
mod writer;


pub use format::{WavFormat, BITS_PER_SAMPLE, HEADER_LEN};
pub use reader::{compute_pcm_hash, decode_wav, extract_pcm_data, pcm_hash, DecodedWav};
pub use writer::{encode_wav, encode_wav_with_format, validate_pcm, write_wav};

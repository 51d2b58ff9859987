//! voxface core
//!
//! Encoders for recorded character speech:
//! - [`wav`] - canonical 16-bit PCM WAV container
//! - [`face`] - JSON blendshape-frame document
//!
//! Both encoders are pure functions of their input. Committing the encoded
//! bytes to disk or to an asset registry lives in `voxface-store`.
//!
//! # Example
//!
//! ```
//! use voxface_core::{encode_face_sequence, encode_wav, AnimationFrame, AnimationSequence};
//!
//! let wav = encode_wav(&[0x01, 0x00, 0x02, 0x00], 16000, 1).unwrap();
//! assert_eq!(&wav[0..4], b"RIFF");
//!
//! let sequence = AnimationSequence::new(1.0, 30.0)
//!     .with_frame(AnimationFrame::new(0).with_blend_shape("JawOpen", 0.5));
//! let document = encode_face_sequence(&sequence).unwrap();
//! assert!(document.contains("\"JawOpen\": 0.5"));
//! ```

pub mod error;
pub mod face;
pub mod model;
pub mod wav;

pub use error::{RecordingError, RecordingResult};
pub use face::{
    decode_face_asset, decode_face_sequence, encode_face_asset, encode_face_sequence,
    encode_face_sequence_with_layout, FaceLayout,
};
pub use model::{AnimationFrame, AnimationSequence, FaceAnimationAsset};
pub use wav::{decode_wav, encode_wav, DecodedWav, WavFormat};

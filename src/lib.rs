//! Multitone test signal generator: tone presets, synthesis and PCM WAVE output.

pub mod error;
pub mod synth;
pub mod tones;
pub mod wav;

pub use error::{Result, ToneError};
pub use synth::{Modulation, Waveform};
pub use tones::{Preset, ToneSpec};
pub use wav::{BitDepth, EncodeReport};

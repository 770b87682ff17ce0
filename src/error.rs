use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ToneError>;

/// Errors raised while synthesizing or writing a test signal
#[derive(Debug, Error)]
pub enum ToneError {
    #[error("cannot write {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("tone #{index}: invalid frequency {frequency} Hz (must be finite and > 0)")]
    InvalidToneFrequency { index: usize, frequency: f64 },

    #[error("tone #{index}: invalid gain {gain_db} dB")]
    InvalidToneGain { index: usize, gain_db: f64 },

    #[error("invalid sample rate: {0} Hz")]
    InvalidSampleRate(u32),

    #[error("signal of {duration}s at {sample_rate} Hz is too long")]
    SignalTooLong { sample_rate: u32, duration: u32 },

    #[error("unsupported bit depth: {0} (expected 16 or 32)")]
    UnsupportedBitDepth(u16),

    #[error("{samples} samples at {bit_depth} bit do not fit in a RIFF file")]
    DataTooLarge { samples: usize, bit_depth: u16 },
}

impl ToneError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ToneError::Io { path: path.into(), source }
    }
}

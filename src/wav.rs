use crate::error::{Result, ToneError};
use crate::synth::Waveform;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Размер канонического заголовка PCM WAVE (RIFF + fmt + data)
pub const HEADER_LEN: u64 = 44;
pub const CHANNELS: u16 = 2;

const FMT_CHUNK_LEN: u32 = 16;
const FORMAT_PCM: u16 = 1;

/// Supported PCM sample widths
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum BitDepth {
    Pcm16,
    Pcm32,
}

impl BitDepth {
    pub fn bits(self) -> u16 {
        match self {
            BitDepth::Pcm16 => 16,
            BitDepth::Pcm32 => 32,
        }
    }

    pub fn bytes(self) -> u16 {
        self.bits() / 8
    }

    fn range(self) -> (i64, i64) {
        match self {
            BitDepth::Pcm16 => (i16::MIN as i64, i16::MAX as i64),
            BitDepth::Pcm32 => (i32::MIN as i64, i32::MAX as i64),
        }
    }
}

impl TryFrom<u16> for BitDepth {
    type Error = ToneError;

    fn try_from(bits: u16) -> Result<Self> {
        match bits {
            16 => Ok(BitDepth::Pcm16),
            32 => Ok(BitDepth::Pcm32),
            _ => Err(ToneError::UnsupportedBitDepth(bits)),
        }
    }
}

/// Описание формата: все поля заголовка выводятся из этих трех значений
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavHeader {
    pub sample_rate: u32,
    pub bit_depth: BitDepth,
    pub frames: u32,
}

impl WavHeader {
    pub fn new(sample_rate: u32, bit_depth: BitDepth, frames: usize) -> Result<Self> {
        let too_large = || ToneError::DataTooLarge {
            samples: frames,
            bit_depth: bit_depth.bits(),
        };
        // byte rate must fit its 32-bit field as well
        if sample_rate.checked_mul((CHANNELS * bit_depth.bytes()) as u32).is_none() {
            return Err(ToneError::InvalidSampleRate(sample_rate));
        }
        let frames = u32::try_from(frames).map_err(|_| too_large())?;
        let data_len = frames as u64 * (CHANNELS * bit_depth.bytes()) as u64;
        if HEADER_LEN - 8 + data_len > u32::MAX as u64 {
            return Err(too_large());
        }

        Ok(Self {
            sample_rate,
            bit_depth,
            frames,
        })
    }

    pub fn block_align(&self) -> u16 {
        CHANNELS * self.bit_depth.bytes()
    }

    pub fn byte_rate(&self) -> u32 {
        self.sample_rate * self.block_align() as u32
    }

    pub fn data_len(&self) -> u32 {
        self.frames * self.block_align() as u32
    }

    /// RIFF size: everything after the size field itself
    pub fn riff_len(&self) -> u32 {
        (HEADER_LEN - 8) as u32 + self.data_len()
    }

    pub fn file_len(&self) -> u64 {
        HEADER_LEN + self.data_len() as u64
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(b"RIFF")?;
        writer.write_all(&self.riff_len().to_le_bytes())?;
        writer.write_all(b"WAVE")?;

        writer.write_all(b"fmt ")?;
        writer.write_all(&FMT_CHUNK_LEN.to_le_bytes())?;
        writer.write_all(&FORMAT_PCM.to_le_bytes())?;
        writer.write_all(&CHANNELS.to_le_bytes())?;
        writer.write_all(&self.sample_rate.to_le_bytes())?;
        writer.write_all(&self.byte_rate().to_le_bytes())?;
        writer.write_all(&self.block_align().to_le_bytes())?;
        writer.write_all(&self.bit_depth.bits().to_le_bytes())?;

        writer.write_all(b"data")?;
        writer.write_all(&self.data_len().to_le_bytes())?;
        Ok(())
    }
}

/// Результат записи файла
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EncodeReport {
    /// Peak absolute value of the float signal, before quantization
    pub peak: f64,
    pub clipped_samples: u64,
    pub bytes_written: u64,
}

impl EncodeReport {
    pub fn clipped(&self) -> bool {
        self.clipped_samples > 0
    }

    /// 20·log10(peak); -inf for silence
    pub fn peak_db(&self) -> f64 {
        20.0 * self.peak.log10()
    }
}

/// x + 0.5 for x >= 0, x - 0.5 otherwise, then truncation toward zero.
/// Saturates at the i64 range.
pub fn round_half_away(x: f64) -> i64 {
    let shifted = if x >= 0.0 { x + 0.5 } else { x - 0.5 };
    shifted as i64
}

/// Scales `v` to the integer range of `bit_depth` and clamps it.
/// Returns the sample and whether it clipped.
pub fn quantize(v: f64, bit_depth: BitDepth) -> (i32, bool) {
    let (min, max) = bit_depth.range();
    let q = round_half_away(v * max as f64);

    if q > max {
        (max as i32, true)
    } else if q < min {
        (min as i32, true)
    } else {
        (q as i32, false)
    }
}

/// Writes header and stereo frames for `wave` into `writer`.
///
/// Every sample is written to both channels. The writer is not flushed.
pub fn encode<W: Write>(wave: &Waveform, bit_depth: BitDepth, writer: &mut W) -> std::io::Result<EncodeReport> {
    let header = WavHeader::new(wave.sample_rate, bit_depth, wave.len()).map_err(std::io::Error::other)?;
    encode_with_header(wave, &header, writer)
}

fn encode_with_header<W: Write>(wave: &Waveform, header: &WavHeader, writer: &mut W) -> std::io::Result<EncodeReport> {
    log::debug!(
        "header: {} Hz, {} bit, {} frames, data {} bytes",
        header.sample_rate,
        header.bit_depth.bits(),
        header.frames,
        header.data_len()
    );
    header.write_to(writer)?;

    let mut clipped_samples = 0u64;
    for &v in &wave.samples {
        let (value, clipped) = quantize(v, header.bit_depth);
        if clipped {
            clipped_samples += 1;
        }
        match header.bit_depth {
            BitDepth::Pcm16 => {
                let bytes = (value as i16).to_le_bytes();
                writer.write_all(&bytes)?;
                writer.write_all(&bytes)?;
            }
            BitDepth::Pcm32 => {
                let bytes = value.to_le_bytes();
                writer.write_all(&bytes)?;
                writer.write_all(&bytes)?;
            }
        }
    }

    Ok(EncodeReport {
        peak: wave.peak(),
        clipped_samples,
        bytes_written: header.file_len(),
    })
}

/// Writes `wave` to `path` as a stereo PCM WAVE file.
///
/// The size check happens before the file is created. A failure after that
/// leaves a truncated file behind.
pub fn write(wave: &Waveform, path: &Path, bit_depth: BitDepth) -> Result<EncodeReport> {
    let header = WavHeader::new(wave.sample_rate, bit_depth, wave.len())?;

    let file = File::create(path).map_err(|e| ToneError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    let report = encode_with_header(wave, &header, &mut writer).map_err(|e| ToneError::io(path, e))?;
    writer.flush().map_err(|e| ToneError::io(path, e))?;

    if report.clipped() {
        log::warn!("{}: {} samples clipped", path.display(), report.clipped_samples);
    }
    log::info!(
        "{}: {:.3}s, {} bytes written",
        path.display(),
        wave.duration_secs(),
        report.bytes_written
    );
    Ok(report)
}

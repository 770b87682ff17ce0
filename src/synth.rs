use crate::error::{Result, ToneError};
use crate::tones::ToneSpec;
use std::f64::consts::PI;

/// Post-processing applied after the tones are mixed
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum Modulation {
    #[default]
    None,
    /// Сигнал сдвигается в [0, 1] и умножается на несущую fs/2 (+1, -1, +1, ...),
    /// так что огибающая повторяет исходную форму
    Amplitude,
}

/// Моно-сигнал, готовый к записи
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    pub sample_rate: u32,
    pub samples: Vec<f64>,
}

impl Waveform {
    /// Тишина заданной длительности
    pub fn silence(sample_rate: u32, duration: u32) -> Result<Self> {
        if sample_rate == 0 {
            return Err(ToneError::InvalidSampleRate(sample_rate));
        }
        let len = (sample_rate as usize)
            .checked_mul(duration as usize)
            .ok_or(ToneError::SignalTooLong { sample_rate, duration })?;

        Ok(Self {
            sample_rate,
            samples: vec![0.0; len],
        })
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Максимальное абсолютное значение (0.0 для пустого буфера)
    pub fn peak(&self) -> f64 {
        self.samples.iter().fold(0.0, |peak, v| peak.max(v.abs()))
    }

    fn add_tone(&mut self, tone: &ToneSpec) {
        let scale = tone.scale();
        let period = self.sample_rate as f64 / tone.frequency_hz;

        for (i, sample) in self.samples.iter_mut().enumerate() {
            let rad = i as f64 * 2.0 * PI / period;
            *sample += rad.sin() * scale;
        }
    }
}

/// Rejects tones that would turn the phase computation into NaN/inf
pub fn validate_tones(tones: &[ToneSpec]) -> Result<()> {
    for (index, tone) in tones.iter().enumerate() {
        if !tone.frequency_hz.is_finite() || tone.frequency_hz <= 0.0 {
            return Err(ToneError::InvalidToneFrequency {
                index,
                frequency: tone.frequency_hz,
            });
        }
        if !tone.gain_db.is_finite() || !tone.scale().is_finite() {
            return Err(ToneError::InvalidToneGain {
                index,
                gain_db: tone.gain_db,
            });
        }
    }
    Ok(())
}

pub fn synthesize(sample_rate: u32, duration: u32, tones: &[ToneSpec]) -> Result<Waveform> {
    synthesize_with_progress(sample_rate, duration, tones, |_, _| {})
}

/// Mixes `tones` into a buffer of `sample_rate * duration` samples.
///
/// Tones are summed without normalization, so the result may exceed 1.0;
/// the encoder clips and reports that. `progress_callback(done, total)` is
/// called after each tone.
pub fn synthesize_with_progress<F>(
    sample_rate: u32,
    duration: u32,
    tones: &[ToneSpec],
    mut progress_callback: F,
) -> Result<Waveform>
where
    F: FnMut(usize, usize),
{
    validate_tones(tones)?;
    let mut wave = Waveform::silence(sample_rate, duration)?;

    for (i, tone) in tones.iter().enumerate() {
        log::debug!(
            "mixing tone {}/{}: {:.2} Hz @ {:.1} dB",
            i + 1,
            tones.len(),
            tone.frequency_hz,
            tone.gain_db
        );
        wave.add_tone(tone);
        progress_callback(i + 1, tones.len());
    }

    Ok(wave)
}

/// v -> 0.5 + v/2, знак чередуется по индексу отсчета (четные +, нечетные -)
pub fn apply_amplitude_modulation(wave: &mut Waveform) {
    for (i, sample) in wave.samples.iter_mut().enumerate() {
        let v = 0.5 + *sample / 2.0;
        *sample = if i & 1 == 1 { -v } else { v };
    }
}

/// Synthesizes the tones and applies `modulation` to the mix
pub fn render<F>(
    sample_rate: u32,
    duration: u32,
    tones: &[ToneSpec],
    modulation: Modulation,
    progress_callback: F,
) -> Result<Waveform>
where
    F: FnMut(usize, usize),
{
    let mut wave = synthesize_with_progress(sample_rate, duration, tones, progress_callback)?;
    if modulation == Modulation::Amplitude {
        apply_amplitude_modulation(&mut wave);
    }
    Ok(wave)
}

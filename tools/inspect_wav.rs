// multitone/tools/inspect_wav.rs

use clap::Parser;
use hound::{SampleFormat, WavReader, WavSpec};
use rustfft::{FftPlanner, num_complex::Complex};
use std::error::Error;
use std::path::{Path, PathBuf};

/// Проверяет сгенерированный WAV: уровень, клиппинг, спектральные пики
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Имя файла с сигналом
    file_name: PathBuf,

    /// Number of spectral peaks to report
    #[arg(short = 'n', long = "peaks", default_value_t = 5)]
    peaks: usize,

    /// Размерность FFT (по умолчанию - 16384)
    #[arg(short = 'f', long = "fft-size", default_value_t = 16384)]
    fft_size: usize,
}

/// Декодированный файл: каналы нормированы к [-1.0, 1.0]
struct Decoded {
    spec: WavSpec,
    channels: Vec<Vec<f64>>,
    full_scale_samples: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct SpectralPeak {
    frequency_hz: f64,
    level_db: f64,
}

fn read_wav(path: &Path) -> Result<Decoded, Box<dyn Error>> {
    let mut reader = WavReader::open(path)?;
    let spec = reader.spec();
    let n_channels = spec.channels as usize;
    if n_channels == 0 {
        return Err("file declares zero channels".into());
    }

    let mut full_scale_samples = 0u64;
    let interleaved: Vec<f64> = match spec.sample_format {
        SampleFormat::Int => {
            let max = ((1i64 << (spec.bits_per_sample - 1)) - 1) as i32;
            let min = -max - 1;
            reader
                .samples::<i32>()
                .map(|s| {
                    s.map(|v| {
                        if v == max || v == min {
                            full_scale_samples += 1;
                        }
                        v as f64 / max as f64
                    })
                })
                .collect::<Result<_, _>>()?
        }
        SampleFormat::Float => reader
            .samples::<f32>()
            .map(|s| s.map(|v| v as f64))
            .collect::<Result<_, _>>()?,
    };

    let mut channels = vec![Vec::with_capacity(interleaved.len() / n_channels); n_channels];
    for frame in interleaved.chunks_exact(n_channels) {
        for (ch, &v) in frame.iter().enumerate() {
            channels[ch].push(v);
        }
    }

    Ok(Decoded {
        spec,
        channels,
        full_scale_samples,
    })
}

fn peak_db(samples: &[f64]) -> f64 {
    let peak = samples.iter().fold(0.0f64, |p, v| p.max(v.abs()));
    20.0 * peak.log10()
}

fn channels_identical(channels: &[Vec<f64>]) -> bool {
    channels.windows(2).all(|w| w[0] == w[1])
}

/// Window function Hann
fn hann_window(size: usize) -> Vec<f64> {
    (0..size)
        .map(|i| 0.5 * (1.0 - (2.0 * std::f64::consts::PI * i as f64 / (size - 1) as f64).cos()))
        .collect()
}

/// Самые сильные локальные максимумы спектра первых `fft_size` отсчетов.
/// Уровень нормирован на сумму окна, так что синус с амплитудой 1.0 дает ~0 dB.
fn spectral_peaks(signal: &[f64], sample_rate: u32, fft_size: usize, count: usize) -> Vec<SpectralPeak> {
    if fft_size < 4 || signal.is_empty() {
        return Vec::new();
    }

    let window_size = signal.len().min(fft_size);
    if window_size < 2 {
        return Vec::new();
    }
    let window = hann_window(window_size);
    let window_sum: f64 = window.iter().sum();

    let mut buffer = vec![Complex::new(0.0, 0.0); fft_size];
    for (j, (&v, &w)) in signal.iter().zip(&window).enumerate() {
        buffer[j].re = v * w;
    }

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(fft_size);
    fft.process(&mut buffer);

    let num_bins = fft_size / 2 + 1;
    let amplitudes: Vec<f64> = buffer[..num_bins]
        .iter()
        .map(|c| 2.0 * c.norm() / window_sum)
        .collect();

    let mut peaks: Vec<SpectralPeak> = (1..num_bins - 1)
        .filter(|&k| amplitudes[k] > amplitudes[k - 1] && amplitudes[k] >= amplitudes[k + 1])
        .map(|k| SpectralPeak {
            frequency_hz: k as f64 * sample_rate as f64 / fft_size as f64,
            level_db: 20.0 * amplitudes[k].max(1.0e-12).log10(),
        })
        .collect();

    peaks.sort_by(|a, b| b.level_db.total_cmp(&a.level_db));
    peaks.truncate(count);
    peaks
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let decoded = read_wav(&args.file_name)?;
    let spec = decoded.spec;
    let frames = decoded.channels[0].len();

    println!("Файл: {}", args.file_name.display());
    println!(
        "  {} Hz, {} ch, {} bit {:?}, {} frames ({:.3}s)",
        spec.sample_rate,
        spec.channels,
        spec.bits_per_sample,
        spec.sample_format,
        frames,
        frames as f64 / spec.sample_rate as f64
    );
    println!("  Peak Level = {:.1} dB", peak_db(&decoded.channels[0]));
    println!("  Full scale samples: {}", decoded.full_scale_samples);
    println!("  Channels identical: {}", channels_identical(&decoded.channels));

    println!("  Spectral peaks (FFT size = {}):", args.fft_size);
    for peak in spectral_peaks(&decoded.channels[0], spec.sample_rate, args.fft_size, args.peaks) {
        println!("    {:>10.1} Hz  {:>7.1} dB", peak.frequency_hz, peak.level_db);
    }

    Ok(())
}

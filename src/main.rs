// multitone/src/main.rs

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use multitone::error::Result;
use multitone::synth::{self, Modulation};
use multitone::tones::{self, Preset};
use multitone::wav::{self, BitDepth, EncodeReport};

const DEFAULT_SAMPLE_RATE: u32 = 48000;
const DEFAULT_DURATION_S: u32 = 60;

/// Генерирует многотональные тестовые сигналы в WAV файлы
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Sampling frequency in Hz
    #[arg(default_value_t = DEFAULT_SAMPLE_RATE)]
    sample_rate: u32,

    /// Длительность каждого файла в секундах
    #[arg(default_value_t = DEFAULT_DURATION_S)]
    duration: u32,

    /// Directory for the generated files
    #[arg(short = 'o', long = "output-dir", default_value = ".")]
    output_dir: PathBuf,

    /// Generate only the named preset (repeatable, default - all)
    #[arg(short = 'p', long = "preset")]
    presets: Vec<String>,

    /// Разрядность для всех файлов (16 или 32, по умолчанию - из пресета)
    #[arg(short = 'b', long = "bit-depth")]
    bit_depth: Option<u16>,

    /// Print the preset catalog and exit
    #[arg(short = 'l', long = "list", default_value_t = false)]
    list: bool,
}

fn select_presets(names: &[String]) -> std::result::Result<Vec<Preset>, String> {
    if names.is_empty() {
        return Ok(tones::presets());
    }
    names
        .iter()
        .map(|name| tones::find_preset(name).ok_or_else(|| format!("Unknown preset: '{}'", name)))
        .collect()
}

fn preset_summary(preset: &Preset) -> String {
    let modulation = match preset.modulation {
        Modulation::None => "",
        Modulation::Amplitude => ", AM",
    };
    format!(
        "{:<14} {:<26} {:>3} tones, {} bit{}",
        preset.name,
        preset.file_name,
        preset.tones.len(),
        preset.bit_depth.bits(),
        modulation
    )
}

fn status_line(path: &Path, result: &Result<EncodeReport>) -> String {
    match result {
        Ok(report) if report.clipped() => format!(
            "FileSaved: {}, Peak Level = {:.1} dB, CLIPPED!!",
            path.display(),
            report.peak_db()
        ),
        Ok(report) => format!("FileSaved: {}, Peak Level = {:.1} dB", path.display(), report.peak_db()),
        Err(_) => format!("FileSave FAILED: {}", path.display()),
    }
}

/// Синтез и запись одного пресета
fn generate<F>(
    preset: &Preset,
    sample_rate: u32,
    duration: u32,
    bit_depth: BitDepth,
    path: &Path,
    progress_callback: F,
) -> Result<EncodeReport>
where
    F: FnMut(usize, usize),
{
    // размер файла проверяется до выделения буфера
    let frames = (sample_rate as usize).saturating_mul(duration as usize);
    wav::WavHeader::new(sample_rate, bit_depth, frames)?;

    let wave = synth::render(sample_rate, duration, &preset.tones, preset.modulation, progress_callback)?;
    wav::write(&wave, path, bit_depth)
}

fn progress_bar(preset: &Preset) -> ProgressBar {
    let pb = ProgressBar::new(preset.tones.len() as u64);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} tones {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    pb.set_message(preset.name);
    pb
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.list {
        for preset in tones::presets() {
            println!("{}", preset_summary(&preset));
        }
        return ExitCode::SUCCESS;
    }

    let bit_depth_override = match args.bit_depth.map(BitDepth::try_from).transpose() {
        Ok(bit_depth) => bit_depth,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let presets = match select_presets(&args.presets) {
        Ok(presets) => presets,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = std::fs::create_dir_all(&args.output_dir) {
        log::error!("Cannot create output directory {}: {}", args.output_dir.display(), e);
        return ExitCode::FAILURE;
    }

    println!("Параметры выполнения:");
    println!("  Частота дискретизации: {} Hz", args.sample_rate);
    println!("  Длительность: {} s", args.duration);
    println!("  Каталог: {}", args.output_dir.display());
    println!("--------------------------------------------------");

    let start = Instant::now();
    let mut failed = 0usize;

    for preset in &presets {
        let path = args.output_dir.join(preset.file_name);
        let bit_depth = bit_depth_override.unwrap_or(preset.bit_depth);

        let pb = progress_bar(preset);
        let result = generate(preset, args.sample_rate, args.duration, bit_depth, &path, |done, total| {
            pb.set_length(total as u64);
            pb.set_position(done as u64);
        });
        pb.finish_and_clear();

        println!("{}", status_line(&path, &result));
        if let Err(e) = result {
            log::error!("{}: {}", preset.name, e);
            failed += 1;
        }
    }

    println!("--------------------------------------------------");
    println!(
        "Готово: {} из {} файлов за {:.2?}",
        presets.len() - failed,
        presets.len(),
        start.elapsed()
    );

    if failed > 0 { ExitCode::FAILURE } else { ExitCode::SUCCESS }
}

#[allow(unused_imports)]
use super::*;
use multitone::ToneError;

#[test]
fn test_args_defaults() {
    let args = Args::parse_from(["multitone"]);
    assert_eq!(args.sample_rate, 48000);
    assert_eq!(args.duration, 60);
    assert_eq!(args.output_dir, PathBuf::from("."));
    assert!(args.presets.is_empty());
    assert_eq!(args.bit_depth, None);
    assert!(!args.list);
}

#[test]
fn test_args_positional_and_options() {
    let args = Args::parse_from([
        "multitone", "96000", "10", "-o", "out", "-p", "smpte", "--preset", "silent", "-b", "16",
    ]);
    assert_eq!(args.sample_rate, 96000);
    assert_eq!(args.duration, 10);
    assert_eq!(args.output_dir, PathBuf::from("out"));
    assert_eq!(args.presets, vec!["smpte".to_string(), "silent".to_string()]);
    assert_eq!(args.bit_depth, Some(16));
}

#[test]
fn test_args_reject_non_numeric_rate() {
    assert!(Args::try_parse_from(["multitone", "fast"]).is_err());
}

#[test]
fn test_select_presets_all() {
    let presets = select_presets(&[]).unwrap();
    assert_eq!(presets.len(), tones::presets().len());
}

#[test]
fn test_select_presets_named() {
    let names = vec!["sine-100-am".to_string(), "smpte".to_string()];
    let presets = select_presets(&names).unwrap();
    assert_eq!(presets.len(), 2);
    assert_eq!(presets[0].file_name, "99_Sine_100Hz_AM.wav");
    assert_eq!(presets[1].file_name, "3_SMPTE_60Hz_7kHz.wav");
}

#[test]
fn test_select_presets_unknown() {
    let names = vec!["smpte".to_string(), "white-noise".to_string()];
    let err = select_presets(&names).unwrap_err();
    assert!(err.contains("white-noise"));
}

#[test]
fn test_status_line_ok() {
    let report = EncodeReport { peak: 1.0, clipped_samples: 0, bytes_written: 44 };
    let line = status_line(Path::new("1_Sine_1kHz.wav"), &Ok(report));
    assert_eq!(line, "FileSaved: 1_Sine_1kHz.wav, Peak Level = 0.0 dB");
}

#[test]
fn test_status_line_clipped() {
    let report = EncodeReport { peak: 2.0, clipped_samples: 5, bytes_written: 44 };
    let line = status_line(Path::new("x.wav"), &Ok(report));
    assert_eq!(line, "FileSaved: x.wav, Peak Level = 6.0 dB, CLIPPED!!");
}

#[test]
fn test_status_line_silence() {
    let report = EncodeReport { peak: 0.0, clipped_samples: 0, bytes_written: 44 };
    let line = status_line(Path::new("2_Silent.wav"), &Ok(report));
    assert_eq!(line, "FileSaved: 2_Silent.wav, Peak Level = -inf dB");
}

#[test]
fn test_status_line_failed() {
    let err = ToneError::UnsupportedBitDepth(24);
    let line = status_line(Path::new("/nope/x.wav"), &Err(err));
    assert_eq!(line, "FileSave FAILED: /nope/x.wav");
}

#[test]
fn test_preset_summary() {
    let am = tones::find_preset("sine-100-am").unwrap();
    let line = preset_summary(&am);
    assert!(line.starts_with("sine-100-am"));
    assert!(line.contains("99_Sine_100Hz_AM.wav"));
    assert!(line.ends_with("1 tones, 16 bit, AM"));

    let piano = tones::find_preset("piano-88").unwrap();
    assert!(preset_summary(&piano).ends_with("88 tones, 32 bit"));
}

#[test]
fn test_generate_am_preset() {
    let dir = tempfile::tempdir().unwrap();
    let preset = tones::find_preset("sine-100-am").unwrap();
    let path = dir.path().join(preset.file_name);

    let mut progress = Vec::new();
    let report = generate(&preset, 8000, 2, preset.bit_depth, &path, |done, total| {
        progress.push((done, total))
    })
    .unwrap();

    assert_eq!(progress, vec![(1, 1)]);
    assert!(!report.clipped());
    // 0.5 + sin/2 достигает 1.0 на пике синуса
    assert!(report.peak_db().abs() < 0.01);
    assert_eq!(std::fs::metadata(&path).unwrap().len(), 44 + 8000 * 2 * 2 * 2);
}

#[test]
fn test_generate_continues_after_failure() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing");
    let presets = select_presets(&["silent".to_string(), "smpte".to_string()]).unwrap();

    let mut lines = Vec::new();
    for (i, preset) in presets.iter().enumerate() {
        // первый файл пишется в несуществующий каталог
        let base = if i == 0 { missing.clone() } else { dir.path().to_path_buf() };
        let path = base.join(preset.file_name);
        let result = generate(preset, 8000, 1, preset.bit_depth, &path, |_, _| {});
        lines.push(status_line(&path, &result));
    }

    assert!(lines[0].starts_with("FileSave FAILED: "));
    assert!(lines[1].starts_with("FileSaved: "));
    assert!(dir.path().join("3_SMPTE_60Hz_7kHz.wav").exists());
}

#[test]
fn test_generate_rejects_oversized_file_before_synthesis() {
    let dir = tempfile::tempdir().unwrap();
    let preset = tones::find_preset("multitone-32").unwrap();
    let path = dir.path().join(preset.file_name);

    let mut progress_calls = 0;
    // 48000 * 30000 кадров * 8 байт больше 4 ГБ
    let result = generate(&preset, 48000, 30000, BitDepth::Pcm32, &path, |_, _| progress_calls += 1);

    assert!(matches!(result, Err(ToneError::DataTooLarge { bit_depth: 32, .. })));
    assert_eq!(progress_calls, 0);
    assert!(!path.exists());
}

#[test]
fn test_generate_rejects_byte_rate_overflow() {
    let dir = tempfile::tempdir().unwrap();
    let preset = tones::find_preset("silent").unwrap();
    let path = dir.path().join(preset.file_name);

    let result = generate(&preset, 1_000_000_000, 0, preset.bit_depth, &path, |_, _| {});
    assert!(matches!(result, Err(ToneError::InvalidSampleRate(1_000_000_000))));
    assert!(!path.exists());
}

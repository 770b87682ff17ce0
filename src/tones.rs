use crate::synth::Modulation;
use crate::wav::BitDepth;

/// Один тон: уровень в dB относительно полной шкалы и частота в Гц
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneSpec {
    pub gain_db: f64,
    pub frequency_hz: f64,
}

impl ToneSpec {
    pub const fn new(gain_db: f64, frequency_hz: f64) -> Self {
        Self { gain_db, frequency_hz }
    }

    /// Linear amplitude for the dB gain (0 dB -> 1.0)
    pub fn scale(&self) -> f64 {
        10f64.powf(self.gain_db / 20.0)
    }
}

/// SMPTE IMD stimulus: 60 Hz and 7 kHz, 4:1 amplitude ratio
const SMPTE_60_7000: [ToneSpec; 2] = [
    ToneSpec::new(-6.0, 60.0),
    ToneSpec::new(-30.0, 7000.0),
];

const MULTITONE_20_UNEVEN: [ToneSpec; 20] = [
    ToneSpec::new(-20.0, 30.0),
    ToneSpec::new(-20.0, 40.0),
    ToneSpec::new(-20.0, 50.0),
    ToneSpec::new(-20.0, 70.0),
    ToneSpec::new(-20.0, 100.0),
    ToneSpec::new(-20.0, 150.0),
    ToneSpec::new(-20.0, 200.0),
    ToneSpec::new(-20.0, 300.0),
    ToneSpec::new(-20.0, 400.0),
    ToneSpec::new(-20.0, 500.0),
    ToneSpec::new(-20.0, 700.0),
    ToneSpec::new(-14.0, 1000.0),
    ToneSpec::new(-20.0, 1500.0),
    ToneSpec::new(-20.0, 2000.0),
    ToneSpec::new(-20.0, 3000.0),
    ToneSpec::new(-20.0, 4000.0),
    ToneSpec::new(-20.0, 5000.0),
    ToneSpec::new(-20.0, 7000.0),
    ToneSpec::new(-20.0, 10000.0),
    ToneSpec::new(-20.0, 15000.0),
];

const PIANO_KEYS: u32 = 88;
const PIANO_A0_HZ: f64 = 27.5;

pub fn single(frequency_hz: f64) -> Vec<ToneSpec> {
    vec![ToneSpec::new(0.0, frequency_hz)]
}

pub fn smpte_60_7000() -> Vec<ToneSpec> {
    SMPTE_60_7000.to_vec()
}

pub fn multitone_20_uneven() -> Vec<ToneSpec> {
    MULTITONE_20_UNEVEN.to_vec()
}

/// 32 тона с шагом в треть октавы вокруг 1 кГц (≈16 Гц ... ≈20 кГц),
/// опорный 1 кГц на 6 dB громче остальных
pub fn multitone_32() -> Vec<ToneSpec> {
    (-18..=13)
        .map(|i: i32| {
            let gain_db = if i == 0 { -20.0 } else { -26.0 };
            ToneSpec::new(gain_db, 2f64.powf(i as f64 / 3.0) * 1000.0)
        })
        .collect()
}

/// Все 88 клавиш фортепиано, A0 = 27.5 Гц, равномерная темперация
pub fn piano_88() -> Vec<ToneSpec> {
    (0..PIANO_KEYS)
        .map(|i| ToneSpec::new(-36.0, 2f64.powf(i as f64 / 12.0) * PIANO_A0_HZ))
        .collect()
}

/// Named test signal: what to synthesize and where to write it
#[derive(Debug, Clone)]
pub struct Preset {
    pub name: &'static str,
    pub file_name: &'static str,
    pub tones: Vec<ToneSpec>,
    pub modulation: Modulation,
    pub bit_depth: BitDepth,
}

impl Preset {
    fn plain(name: &'static str, file_name: &'static str, tones: Vec<ToneSpec>) -> Self {
        Self {
            name,
            file_name,
            tones,
            modulation: Modulation::None,
            bit_depth: BitDepth::Pcm32,
        }
    }
}

/// Каталог пресетов в порядке генерации
pub fn presets() -> Vec<Preset> {
    vec![
        Preset::plain("sine-1k", "1_Sine_1kHz.wav", single(1000.0)),
        Preset::plain("silent", "2_Silent.wav", Vec::new()),
        Preset::plain("smpte", "3_SMPTE_60Hz_7kHz.wav", smpte_60_7000()),
        Preset::plain("multitone-32", "4_MultiTone_32.wav", multitone_32()),
        Preset::plain("multitone-20", "5_MultiTone_20uneven.wav", multitone_20_uneven()),
        Preset::plain("piano-88", "6_Piano_88.wav", piano_88()),
        Preset {
            name: "sine-100-am",
            file_name: "99_Sine_100Hz_AM.wav",
            tones: single(100.0),
            modulation: Modulation::Amplitude,
            bit_depth: BitDepth::Pcm16,
        },
    ]
}

pub fn find_preset(name: &str) -> Option<Preset> {
    presets().into_iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

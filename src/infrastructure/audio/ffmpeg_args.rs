//! Argument lists for the transcoder. Kept free of process handling so the
//! exact command lines can be checked without spawning anything.

use std::path::Path;

use crate::application::ports::MixInput;
use crate::domain::BinauralTones;

const SAMPLE_RATE: u32 = 44_100;

pub fn duration_query_args(input: &Path) -> Vec<String> {
    vec![
        "-v".into(),
        "error".into(),
        "-show_entries".into(),
        "format=duration".into(),
        "-of".into(),
        "default=noprint_wrappers=1:nokey=1".into(),
        path_arg(input),
    ]
}

/// Parses the single duration line `ffprobe` prints.
pub fn parse_duration_output(stdout: &str) -> Option<f64> {
    stdout
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .and_then(|line| line.parse::<f64>().ok())
        .filter(|secs| secs.is_finite() && *secs >= 0.0)
}

pub fn truncate_args(input: &Path, seconds: f64, output: &Path) -> Vec<String> {
    let mut args = preamble();
    args.extend(["-i".into(), path_arg(input)]);
    args.extend(["-t".into(), number(seconds), "-vn".into(), path_arg(output)]);
    args
}

/// Replays the single input `repetitions` times through the demuxer, so the
/// input is opened once however many copies are needed.
pub fn loop_concat_args(input: &Path, repetitions: u32, seconds: f64, output: &Path) -> Vec<String> {
    let extra_loops = repetitions.max(1) - 1;
    let mut args = preamble();
    args.extend([
        "-stream_loop".into(),
        extra_loops.to_string(),
        "-i".into(),
        path_arg(input),
        "-t".into(),
        number(seconds),
        "-vn".into(),
        path_arg(output),
    ]);
    args
}

pub fn tempo_filter(stages: &[f64]) -> String {
    if stages.is_empty() {
        return "atempo=1".to_string();
    }
    stages
        .iter()
        .map(|ratio| format!("atempo={}", number(*ratio)))
        .collect::<Vec<_>>()
        .join(",")
}

pub fn tempo_args(input: &Path, stages: &[f64], output: &Path) -> Vec<String> {
    let mut args = preamble();
    args.extend([
        "-i".into(),
        path_arg(input),
        "-filter:a".into(),
        tempo_filter(stages),
        "-vn".into(),
        path_arg(output),
    ]);
    args
}

pub fn dual_tone_args(tones: BinauralTones, seconds: f64, gain: f64, output: &Path) -> Vec<String> {
    let mut args = preamble();
    args.extend(lavfi_sine(tones.left_hz, seconds));
    args.extend(lavfi_sine(tones.right_hz, seconds));
    args.extend([
        "-filter_complex".into(),
        format!("[0:a][1:a]amerge=inputs=2,volume={}[out]", number(gain)),
        "-map".into(),
        "[out]".into(),
        path_arg(output),
    ]);
    args
}

pub fn modulated_tone_args(
    carrier_hz: f64,
    beat_hz: f64,
    seconds: f64,
    gain: f64,
    output: &Path,
) -> Vec<String> {
    let mut args = preamble();
    args.extend(lavfi_sine(carrier_hz, seconds));
    args.extend([
        "-filter:a".into(),
        format!(
            "tremolo=f={}:d=0.5,volume={}",
            number(beat_hz),
            number(gain)
        ),
        path_arg(output),
    ]);
    args
}

pub fn silence_args(seconds: f64, output: &Path) -> Vec<String> {
    let mut args = preamble();
    args.extend([
        "-f".into(),
        "lavfi".into(),
        "-i".into(),
        format!("anullsrc=r={SAMPLE_RATE}:cl=stereo"),
        "-t".into(),
        number(seconds),
        path_arg(output),
    ]);
    args
}

/// Scales every input by its gain and sums them without amix's
/// normalization. A single input is passed through its volume filter only.
pub fn mix_filter(inputs: &[MixInput]) -> String {
    if inputs.len() == 1 {
        return format!("[0:a]volume={}[out]", number(inputs[0].gain));
    }

    let mut parts: Vec<String> = inputs
        .iter()
        .enumerate()
        .map(|(i, input)| format!("[{i}:a]volume={}[a{i}]", number(input.gain)))
        .collect();
    let labels: String = (0..inputs.len()).map(|i| format!("[a{i}]")).collect();
    parts.push(format!(
        "{labels}amix=inputs={}:duration=longest:normalize=0[out]",
        inputs.len()
    ));
    parts.join(";")
}

pub fn mix_args(inputs: &[MixInput], bitrate_kbps: u32, output: &Path) -> Vec<String> {
    let mut args = preamble();
    for input in inputs {
        args.extend(["-i".into(), path_arg(&input.path)]);
    }
    args.extend([
        "-filter_complex".into(),
        mix_filter(inputs),
        "-map".into(),
        "[out]".into(),
        "-c:a".into(),
        "libmp3lame".into(),
        "-b:a".into(),
        format!("{bitrate_kbps}k"),
        path_arg(output),
    ]);
    args
}

fn preamble() -> Vec<String> {
    vec![
        "-y".into(),
        "-hide_banner".into(),
        "-loglevel".into(),
        "error".into(),
    ]
}

fn lavfi_sine(frequency_hz: f64, seconds: f64) -> [String; 4] {
    [
        "-f".into(),
        "lavfi".into(),
        "-i".into(),
        format!(
            "sine=frequency={}:duration={}",
            number(frequency_hz),
            number(seconds)
        ),
    ]
}

fn number(value: f64) -> String {
    format!("{value}")
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

use std::path::{Path, PathBuf};

use sub_music::application::ports::MixInput;
use sub_music::domain::BinauralPreset;
use sub_music::infrastructure::audio::ffmpeg_args::{
    dual_tone_args, loop_concat_args, mix_args, mix_filter, modulated_tone_args,
    parse_duration_output, duration_query_args, silence_args, tempo_args, tempo_filter, truncate_args,
};

fn input(path: &str, gain: f64) -> MixInput {
    MixInput {
        path: PathBuf::from(path),
        gain,
    }
}

#[test]
fn given_duration_stdout_when_parsing_then_reads_first_duration_line() {
    assert_eq!(parse_duration_output("12.345000\n"), Some(12.345));
    assert_eq!(parse_duration_output("\n  7\n"), Some(7.0));
}

#[test]
fn given_unusable_duration_stdout_when_parsing_then_returns_none() {
    assert_eq!(parse_duration_output(""), None);
    assert_eq!(parse_duration_output("N/A"), None);
    assert_eq!(parse_duration_output("-3"), None);
}

#[test]
fn given_input_when_building_duration_query_args_then_asks_for_bare_duration() {
    let args = duration_query_args(Path::new("voice.mp3"));

    assert_eq!(
        args,
        vec![
            "-v",
            "error",
            "-show_entries",
            "format=duration",
            "-of",
            "default=noprint_wrappers=1:nokey=1",
            "voice.mp3",
        ]
    );
}

#[test]
fn given_target_when_building_truncate_args_then_limits_duration() {
    let args = truncate_args(Path::new("in.mp3"), 30.0, Path::new("out.wav"));

    assert_eq!(
        args,
        vec![
            "-y",
            "-hide_banner",
            "-loglevel",
            "error",
            "-i",
            "in.mp3",
            "-t",
            "30",
            "-vn",
            "out.wav",
        ]
    );
}

#[test]
fn given_repetitions_when_building_loop_args_then_opens_input_once_and_replays_it() {
    let args = loop_concat_args(Path::new("in.mp3"), 3, 25.5, Path::new("out.wav"));

    assert_eq!(args.iter().filter(|arg| *arg == "in.mp3").count(), 1);
    assert!(!args.iter().any(|arg| arg == "-filter_complex"));
    let stream_loop = args.iter().position(|arg| arg == "-stream_loop").unwrap();
    assert_eq!(args[stream_loop + 1], "2");
    assert!(stream_loop < args.iter().position(|arg| arg == "-i").unwrap());
    let t = args.iter().position(|arg| arg == "-t").unwrap();
    assert_eq!(args[t + 1], "25.5");
    assert_eq!(args.last().map(String::as_str), Some("out.wav"));
}

#[test]
fn given_thousands_of_repetitions_when_building_loop_args_then_input_count_stays_one() {
    let args = loop_concat_args(Path::new("drip.mp3"), 6000, 600.0, Path::new("out.wav"));

    assert_eq!(args.iter().filter(|arg| *arg == "-i").count(), 1);
    let stream_loop = args.iter().position(|arg| arg == "-stream_loop").unwrap();
    assert_eq!(args[stream_loop + 1], "5999");
}

#[test]
fn given_stages_when_building_tempo_filter_then_chains_atempo_filters() {
    assert_eq!(tempo_filter(&[2.0, 2.0, 1.5]), "atempo=2,atempo=2,atempo=1.5");
    assert_eq!(tempo_filter(&[]), "atempo=1");
}

#[test]
fn given_stages_when_building_tempo_args_then_uses_audio_filter() {
    let args = tempo_args(Path::new("v.mp3"), &[0.5, 0.8], Path::new("t.wav"));

    let filter = args.iter().position(|arg| arg == "-filter:a").unwrap();
    assert_eq!(args[filter + 1], "atempo=0.5,atempo=0.8");
}

#[test]
fn given_preset_tones_when_building_dual_tone_args_then_merges_two_sines() {
    let args = dual_tone_args(BinauralPreset::Alpha.tones(), 30.0, 0.3, Path::new("b.wav"));

    assert!(args.contains(&"sine=frequency=435:duration=30".to_string()));
    assert!(args.contains(&"sine=frequency=445:duration=30".to_string()));
    assert!(args.contains(&"[0:a][1:a]amerge=inputs=2,volume=0.3[out]".to_string()));
}

#[test]
fn given_carrier_and_beat_when_building_modulated_args_then_applies_tremolo() {
    let args = modulated_tone_args(440.0, 10.0, 30.0, 0.3, Path::new("b.wav"));

    assert!(args.contains(&"sine=frequency=440:duration=30".to_string()));
    assert!(args.contains(&"tremolo=f=10:d=0.5,volume=0.3".to_string()));
}

#[test]
fn given_seconds_when_building_silence_args_then_uses_null_source() {
    let args = silence_args(12.5, Path::new("s.wav"));

    assert!(args.contains(&"anullsrc=r=44100:cl=stereo".to_string()));
    let t = args.iter().position(|arg| arg == "-t").unwrap();
    assert_eq!(args[t + 1], "12.5");
}

#[test]
fn given_single_input_when_building_mix_filter_then_only_scales_volume() {
    assert_eq!(mix_filter(&[input("a.wav", 0.7)]), "[0:a]volume=0.7[out]");
}

#[test]
fn given_several_inputs_when_building_mix_filter_then_sums_without_normalizing() {
    let filter = mix_filter(&[input("a.wav", 0.05), input("b.wav", 0.1), input("c.wav", 0.5)]);

    assert_eq!(
        filter,
        "[0:a]volume=0.05[a0];[1:a]volume=0.1[a1];[2:a]volume=0.5[a2];\
         [a0][a1][a2]amix=inputs=3:duration=longest:normalize=0[out]"
    );
}

#[test]
fn given_bitrate_when_building_mix_args_then_encodes_mp3() {
    let args = mix_args(&[input("a.wav", 1.0), input("b.wav", 0.5)], 320, Path::new("out.mp3"));

    let codec = args.iter().position(|arg| arg == "-c:a").unwrap();
    assert_eq!(args[codec + 1], "libmp3lame");
    assert_eq!(args[codec + 2], "-b:a");
    assert_eq!(args[codec + 3], "320k");
    assert_eq!(args.last().map(String::as_str), Some("out.mp3"));
}

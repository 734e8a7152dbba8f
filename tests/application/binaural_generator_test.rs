use std::sync::Arc;

use sub_music::application::services::{BinauralError, BinauralGenerator, BinauralMethod};
use sub_music::domain::BinauralPreset;

use crate::helpers::{RecordingToolkit, ToolCall, ToolOp};

#[tokio::test]
async fn given_working_toolkit_when_rendering_then_uses_stereo_tones() {
    let dir = tempfile::tempdir().unwrap();
    let toolkit = Arc::new(RecordingToolkit::new());
    let generator = BinauralGenerator::new(toolkit.clone());
    let output = dir.path().join("binaural_theta.wav");

    let render = generator
        .render(BinauralPreset::Theta, 45.0, &output)
        .await
        .unwrap();

    assert_eq!(render.method, BinauralMethod::Stereo);
    assert_eq!(render.path, output);
    match &toolkit.calls()[..] {
        [ToolCall::DualTone {
            tones,
            seconds,
            gain,
            ..
        }] => {
            assert_eq!(tones.left_hz, 437.0);
            assert_eq!(tones.right_hz, 443.0);
            assert_eq!(*seconds, 45.0);
            assert_eq!(*gain, 0.3);
        }
        calls => panic!("unexpected calls: {calls:?}"),
    }
}

#[tokio::test]
async fn given_stereo_failure_when_rendering_then_falls_back_to_modulated_tone() {
    let dir = tempfile::tempdir().unwrap();
    let toolkit = Arc::new(RecordingToolkit::new().failing(ToolOp::DualTone));
    let generator = BinauralGenerator::new(toolkit.clone());

    let render = generator
        .render(BinauralPreset::Alpha, 30.0, &dir.path().join("b.wav"))
        .await
        .unwrap();

    assert_eq!(render.method, BinauralMethod::Modulated);
    assert!(toolkit.calls().iter().any(|call| matches!(
        call,
        ToolCall::ModulatedTone { carrier_hz, beat_hz, .. } if *carrier_hz == 440.0 && *beat_hz == 10.0
    )));
}

#[tokio::test]
async fn given_tone_failures_when_rendering_then_falls_back_to_silence_of_same_length() {
    let dir = tempfile::tempdir().unwrap();
    let toolkit = Arc::new(
        RecordingToolkit::new()
            .failing(ToolOp::DualTone)
            .failing(ToolOp::ModulatedTone),
    );
    let generator = BinauralGenerator::new(toolkit.clone());

    let render = generator
        .render(BinauralPreset::Delta, 12.5, &dir.path().join("b.wav"))
        .await
        .unwrap();

    assert_eq!(render.method, BinauralMethod::Silent);
    assert!(
        toolkit
            .calls()
            .iter()
            .any(|call| matches!(call, ToolCall::Silence { seconds, .. } if *seconds == 12.5))
    );
}

#[tokio::test]
async fn given_every_method_failing_when_rendering_then_returns_exhausted() {
    let dir = tempfile::tempdir().unwrap();
    let toolkit = Arc::new(
        RecordingToolkit::new()
            .failing(ToolOp::DualTone)
            .failing(ToolOp::ModulatedTone)
            .failing(ToolOp::Silence),
    );
    let generator = BinauralGenerator::new(toolkit.clone());

    let result = generator
        .render(BinauralPreset::Beta, 30.0, &dir.path().join("b.wav"))
        .await;

    assert!(matches!(result, Err(BinauralError::Exhausted(_))));
    assert_eq!(toolkit.calls().len(), 3);
}

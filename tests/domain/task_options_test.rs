use sub_music::domain::{
    BinauralPreset, DEFAULT_AMBIENT, DEFAULT_DURATION_SECS, TaskOptions, TaskOptionsError,
    VolumeMix, VolumeMixError,
};

#[test]
fn given_new_options_when_created_then_carry_defaults() {
    let options = TaskOptions::new("focus");

    assert_eq!(options.duration_secs, DEFAULT_DURATION_SECS);
    assert_eq!(options.binaural, BinauralPreset::Alpha);
    assert_eq!(options.ambient, vec![DEFAULT_AMBIENT.to_string()]);
    assert_eq!(options.tempo, 1.0);
    assert_eq!(options.volumes, VolumeMix::default());
    assert!(options.validate().is_ok());
}

#[test]
fn given_blank_input_when_validating_then_returns_empty_input() {
    let options = TaskOptions::new("   ");

    assert_eq!(options.validate(), Err(TaskOptionsError::EmptyInput));
}

#[test]
fn given_duration_out_of_range_when_validating_then_returns_error() {
    let mut options = TaskOptions::new("focus");
    options.duration_secs = 0;
    assert_eq!(
        options.validate(),
        Err(TaskOptionsError::DurationOutOfRange(0))
    );

    options.duration_secs = 601;
    assert_eq!(
        options.validate(),
        Err(TaskOptionsError::DurationOutOfRange(601))
    );
}

#[test]
fn given_tempo_out_of_range_when_validating_then_returns_error() {
    let mut options = TaskOptions::new("focus");
    options.tempo = 0.1;

    assert_eq!(options.validate(), Err(TaskOptionsError::TempoOutOfRange(0.1)));
}

#[test]
fn given_volume_above_one_when_validating_then_returns_volume_error() {
    let mut options = TaskOptions::new("focus");
    options.volumes.voice = 1.5;

    assert_eq!(
        options.validate(),
        Err(TaskOptionsError::Volume(VolumeMixError::OutOfRange {
            name: "voice",
            gain: 1.5,
        }))
    );
}

#[test]
fn given_output_name_with_path_characters_when_validating_then_is_rejected() {
    let mut options = TaskOptions::new("focus");
    options.output_name = Some("../escape".to_string());

    assert_eq!(
        options.validate(),
        Err(TaskOptionsError::InvalidOutputName("../escape".to_string()))
    );
}

#[test]
fn given_plain_output_name_when_validating_then_is_accepted() {
    let mut options = TaskOptions::new("focus");
    options.output_name = Some("morning_focus-01".to_string());

    assert!(options.validate().is_ok());
}

#[test]
fn given_blank_ambient_id_when_validating_then_returns_error() {
    let mut options = TaskOptions::new("focus");
    options.ambient = vec!["rain".to_string(), " ".to_string()];

    assert_eq!(options.validate(), Err(TaskOptionsError::BlankAmbientId));
}

#[test]
fn given_none_and_duplicates_when_listing_ambient_ids_then_are_removed() {
    let mut options = TaskOptions::new("focus");
    options.ambient = vec![
        "Rain".to_string(),
        "none".to_string(),
        "rain".to_string(),
        "pink".to_string(),
    ];

    assert_eq!(options.ambient_ids(), vec!["rain", "pink"]);
}

#[test]
fn given_only_none_when_listing_ambient_ids_then_is_empty() {
    let mut options = TaskOptions::new("focus");
    options.ambient = vec!["none".to_string()];

    assert!(options.ambient_ids().is_empty());
}

use sub_music::domain::{NormalizationError, NormalizationPlan};

#[test]
fn given_shorter_source_when_planning_then_loops_enough_copies() {
    let plan = NormalizationPlan::new(3.0, 5.0).unwrap();

    assert_eq!(
        plan,
        NormalizationPlan::Loop {
            repetitions: 2,
            target_secs: 5.0,
        }
    );
}

#[test]
fn given_exact_multiple_when_planning_then_does_not_add_extra_copy() {
    let plan = NormalizationPlan::new(10.0, 30.0).unwrap();

    assert_eq!(
        plan,
        NormalizationPlan::Loop {
            repetitions: 3,
            target_secs: 30.0,
        }
    );
}

#[test]
fn given_longer_source_when_planning_then_truncates() {
    let plan = NormalizationPlan::new(120.0, 30.0).unwrap();

    assert_eq!(plan, NormalizationPlan::Truncate { target_secs: 30.0 });
}

#[test]
fn given_equal_lengths_when_planning_then_truncates_to_target() {
    let plan = NormalizationPlan::new(30.0, 30.0).unwrap();

    assert_eq!(plan, NormalizationPlan::Truncate { target_secs: 30.0 });
    assert_eq!(plan.target_secs(), 30.0);
}

#[test]
fn given_zero_length_source_when_planning_then_returns_invalid_source() {
    assert_eq!(
        NormalizationPlan::new(0.0, 30.0),
        Err(NormalizationError::InvalidSource(0.0))
    );
}

#[test]
fn given_non_positive_target_when_planning_then_returns_invalid_target() {
    assert_eq!(
        NormalizationPlan::new(10.0, -1.0),
        Err(NormalizationError::InvalidTarget(-1.0))
    );
}

use sub_music::infrastructure::observability::sanitize_prompt;

#[test]
fn given_empty_prompt_when_sanitizing_then_returns_empty_marker() {
    assert_eq!(sanitize_prompt("   "), "[EMPTY]");
}

#[test]
fn given_short_prompt_when_sanitizing_then_returns_trimmed_prompt() {
    assert_eq!(sanitize_prompt("  improve focus  "), "improve focus");
}

#[test]
fn given_long_prompt_when_sanitizing_then_truncates_with_total_count() {
    let prompt = "a".repeat(150);

    let sanitized = sanitize_prompt(&prompt);

    assert_eq!(sanitized, format!("{}... (150 chars total)", "a".repeat(100)));
}

#[test]
fn given_long_multibyte_prompt_when_sanitizing_then_truncates_on_char_boundary() {
    let prompt = "專注".repeat(80);

    let sanitized = sanitize_prompt(&prompt);

    assert!(sanitized.ends_with("... (160 chars total)"));
    assert!(sanitized.starts_with("專注"));
}

#[test]
fn given_credentials_when_sanitizing_then_values_are_redacted() {
    let sanitized = sanitize_prompt("use Bearer abc123 and api_key=secret&x=1");

    assert_eq!(sanitized, "use Bearer [REDACTED] and api_key=[REDACTED]&x=1");
}

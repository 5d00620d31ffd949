// Configuration layering tests: defaults, file overlay, CLI overrides.

use std::fs;
use std::path::PathBuf;

use paybot::config::SessionConfig;

fn temp_config(name: &str, content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("paybot_config_test_{}.json", name));
    fs::write(&path, content).expect("write temp config");
    path
}

fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let config = SessionConfig::load_from(&PathBuf::from("does/not/exist.json"));

    assert_eq!(config.username, "unk");
    assert_eq!(config.password, "unk");
    assert_eq!(config.anarchy, "an210");
    assert_eq!(config.host, "funtime.su");
    assert_eq!(config.port, 25565);
    assert_eq!(config.version, "1.19.4");
    assert_eq!(config.retry_interval_ms, None);
    assert_eq!(config.max_pay_attempts, None);
}

#[test]
fn malformed_file_is_silently_ignored() {
    let path = temp_config("malformed", "{not json at all");

    let config = SessionConfig::load_from(&path);

    assert_eq!(config.username, "unk");
    assert_eq!(config.host, "funtime.su");
    let _ = fs::remove_file(path);
}

#[test]
fn file_without_bot_section_keeps_defaults() {
    let path = temp_config("unrelated", r#"{"coins_per_unit": 1000000}"#);

    let config = SessionConfig::load_from(&path);

    assert_eq!(config.username, "unk");
    assert_eq!(config.port, 25565);
    let _ = fs::remove_file(path);
}

#[test]
fn file_overrides_apply_over_defaults() {
    let path = temp_config(
        "overrides",
        r#"{
            "minecraft_bot": {
                "bot_username": "Bot",
                "password": "secret",
                "anarchy": "an145",
                "server": "play.example.com",
                "port": 25570
            }
        }"#,
    );

    let config = SessionConfig::load_from(&path);

    assert_eq!(config.username, "Bot");
    assert_eq!(config.password, "secret");
    assert_eq!(config.anarchy, "an145");
    assert_eq!(config.host, "play.example.com");
    assert_eq!(config.port, 25570);
    // Untouched by the file.
    assert_eq!(config.version, "1.19.4");
    let _ = fs::remove_file(path);
}

#[test]
fn empty_file_values_are_ignored() {
    let path = temp_config(
        "empty_values",
        r#"{"minecraft_bot": {"bot_username": "", "server": ""}}"#,
    );

    let config = SessionConfig::load_from(&path);

    assert_eq!(config.username, "unk");
    assert_eq!(config.host, "funtime.su");
    let _ = fs::remove_file(path);
}

#[test]
fn legacy_transfer_form_is_recognized_by_the_group_tag() {
    let mut config = SessionConfig::default();

    // player and amount already stripped: username password host port anarchy
    config.apply_transfer_overrides(&args(&[
        "Bot",
        "secret",
        "play.example.com",
        "25570",
        "an145",
    ]));

    assert_eq!(config.username, "Bot");
    assert_eq!(config.password, "secret");
    assert_eq!(config.host, "play.example.com");
    assert_eq!(config.port, 25570);
    assert_eq!(config.anarchy, "an145");
    assert_eq!(config.retry_interval_ms, None);
}

#[test]
fn legacy_form_keeps_the_port_on_parse_failure() {
    let mut config = SessionConfig::default();

    config.apply_transfer_overrides(&args(&["Bot", "secret", "host", "notaport", "an145"]));

    assert_eq!(config.port, 25565);
    assert_eq!(config.anarchy, "an145");
}

#[test]
fn positional_transfer_form_applies_in_order() {
    let mut config = SessionConfig::default();

    // [anarchy] [retrySeconds] [maxAttempts] [username] [password] [host] [port]
    config.apply_transfer_overrides(&args(&[
        "an145",
        "5",
        "3",
        "Bot",
        "secret",
        "play.example.com",
        "25570",
    ]));

    assert_eq!(config.anarchy, "an145");
    assert_eq!(config.retry_interval_ms, Some(5000));
    assert_eq!(config.max_pay_attempts, Some(3));
    assert_eq!(config.username, "Bot");
    assert_eq!(config.password, "secret");
    assert_eq!(config.host, "play.example.com");
    assert_eq!(config.port, 25570);
}

#[test]
fn five_trailing_args_without_group_tag_parse_positionally() {
    let mut config = SessionConfig::default();

    // Fifth value is not a group tag, so this is the positional shape.
    config.apply_transfer_overrides(&args(&["an145", "5", "3", "Bot", "secret"]));

    assert_eq!(config.anarchy, "an145");
    assert_eq!(config.username, "Bot");
    assert_eq!(config.password, "secret");
    assert_eq!(config.host, "funtime.su");
}

#[test]
fn partial_positional_overrides_leave_the_rest_alone() {
    let mut config = SessionConfig::default();

    config.apply_transfer_overrides(&args(&["an145"]));

    assert_eq!(config.anarchy, "an145");
    assert_eq!(config.username, "unk");
    assert_eq!(config.retry_interval_ms, None);
}

#[test]
fn non_positive_retry_values_are_dropped() {
    let mut config = SessionConfig::default();

    config.apply_transfer_overrides(&args(&["an145", "0", "-2"]));

    assert_eq!(config.retry_interval_ms, None);
    assert_eq!(config.max_pay_attempts, None);
}

#[test]
fn test_overrides_apply_tag_and_retry_fields() {
    let mut config = SessionConfig::default();

    config.apply_test_overrides(&args(&["an99", "7", "2"]));

    assert_eq!(config.anarchy, "an99");
    assert_eq!(config.retry_interval_ms, Some(7000));
    assert_eq!(config.max_pay_attempts, Some(2));
    assert_eq!(config.username, "unk");
}

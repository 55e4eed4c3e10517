use std::io::Write;

use tempfile::NamedTempFile;

use super::*;

#[test]
fn defaults_point_at_local_backend() {
    let settings = Settings::from_raw(RawSettings::default()).expect("valid settings");

    assert_eq!(settings.api.base_url.as_str(), DEFAULT_API_BASE_URL);
    assert_eq!(settings.logging.level, LevelFilter::INFO);
    assert!(matches!(settings.logging.format, LogFormat::Compact));
}

#[test]
fn cli_overrides_take_highest_precedence() {
    let mut raw = RawSettings::default();
    raw.api.base_url = Some("http://file.example/api/".to_string());
    raw.logging.level = Some("info".to_string());

    let overrides = GlobalOverrides {
        api_base_url: Some("https://cli.example/api/".to_string()),
        log_level: Some("debug".to_string()),
        ..Default::default()
    };

    raw.apply_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.api.base_url.host_str(), Some("cli.example"));
    assert_eq!(settings.logging.level, LevelFilter::DEBUG);
}

#[test]
fn base_url_gains_trailing_slash() {
    let mut raw = RawSettings::default();
    raw.api.base_url = Some("http://example.com/api".to_string());

    let settings = Settings::from_raw(raw).expect("valid settings");
    assert_eq!(settings.api.base_url.as_str(), "http://example.com/api/");
}

#[test]
fn blank_base_url_falls_back_to_default() {
    let mut raw = RawSettings::default();
    raw.api.base_url = Some("   ".to_string());

    let settings = Settings::from_raw(raw).expect("valid settings");
    assert_eq!(settings.api.base_url.as_str(), DEFAULT_API_BASE_URL);
}

#[test]
fn non_http_base_url_is_rejected() {
    let mut raw = RawSettings::default();
    raw.api.base_url = Some("ftp://example.com/api/".to_string());

    let err = Settings::from_raw(raw).expect_err("ftp is not supported");
    assert!(matches!(err, LoadError::Invalid { key: "api.base_url", .. }));
}

#[test]
fn invalid_log_level_is_rejected() {
    let mut raw = RawSettings::default();
    raw.logging.level = Some("loud".to_string());

    let err = Settings::from_raw(raw).expect_err("unknown level");
    assert!(matches!(err, LoadError::Invalid { key: "logging.level", .. }));
}

#[test]
fn cli_json_logging_enforces_format() {
    let mut raw = RawSettings::default();
    let overrides = GlobalOverrides {
        log_json: Some(true),
        ..Default::default()
    };

    raw.apply_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert!(matches!(settings.logging.format, LogFormat::Json));
}

#[test]
fn config_file_is_layered_under_cli() {
    let mut file: NamedTempFile = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("tmp file");
    file.write_all(
        b"[api]\nbase_url = \"http://from-file.example/api/\"\n\n[logging]\nlevel = \"warn\"\n",
    )
    .expect("write config");

    let args = CliArgs::parse_from([
        "postboard",
        "--config-file",
        file.path().to_str().expect("utf-8 path"),
        "--log-level",
        "trace",
        "list",
    ]);
    let settings = load(&args).expect("settings");

    assert_eq!(settings.api.base_url.host_str(), Some("from-file.example"));
    assert_eq!(settings.logging.level, LevelFilter::TRACE);
}

#[test]
fn default_command_is_absent() {
    let args = CliArgs::parse_from(["postboard"]);
    assert!(args.command.is_none());
}

#[test]
fn parse_delete_arguments() {
    let args = CliArgs::parse_from(["postboard", "delete", "--id", "5", "--yes"]);

    match args.command.expect("delete command") {
        Command::Delete(delete) => {
            assert_eq!(delete.id, 5);
            assert!(delete.yes);
        }
        _ => panic!("wrong command parsed"),
    }
}

#[test]
fn global_flags_follow_subcommand() {
    let args = CliArgs::parse_from([
        "postboard",
        "update",
        "--id",
        "1",
        "--title",
        "B",
        "--content",
        "x",
        "--api-base-url",
        "http://override.example/api/",
    ]);

    assert_eq!(
        args.overrides.api_base_url.as_deref(),
        Some("http://override.example/api/")
    );
    match args.command.expect("update command") {
        Command::Update(update) => {
            assert_eq!(update.id, 1);
            assert_eq!(update.title, "B");
        }
        _ => panic!("wrong command parsed"),
    }
}

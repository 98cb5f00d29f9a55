//! Coverage for config parsing, env overrides and path resolution.

use std::collections::HashMap;

use discord_formatter::config::{
    config_dir, config_path_with, load_config_file, validate_backend_url, BackendConfig, Config,
    RejectedOverride, CONFIG_PATH_ENV, DEFAULT_BACKEND_URL,
};
use discord_formatter::envelope::EnvelopeFormat;
use discord_formatter::options::{FormattingStyle, MessageLength, Tone};

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_match_initial_controls() {
    let config = Config::default();
    assert_eq!(config.backend.url, DEFAULT_BACKEND_URL);
    assert_eq!(config.backend.timeout_secs, None);
    assert_eq!(config.backend.envelope, EnvelopeFormat::Gemini);
    assert!(config.defaults.use_emojis);
    assert!(!config.defaults.add_hashtags);
    assert_eq!(config.defaults.formatting_style, FormattingStyle::Expressive);
    assert_eq!(config.defaults.tone, Tone::Casual);
    assert_eq!(config.defaults.message_length, MessageLength::Default);
    assert_eq!(config.logging.level, "warn");
}

#[test]
fn empty_toml_is_valid() {
    let config = Config::from_toml("").expect("empty config should parse");
    assert_eq!(config, Config::default());
}

#[test]
fn parse_full_config() {
    let toml_str = r#"
[backend]
url = "http://localhost:8080/ask-gemini"
timeout_secs = 15
envelope = { pointer = "/choices/0/message/content" }

[defaults]
use_emojis = false
add_hashtags = true
formatting_style = "minimal"
tone = "formal"
message_length = "concise"

[logging]
level = "debug"
dir = "/tmp/discord-formatter-logs"
"#;
    let config = Config::from_toml(toml_str).expect("full config should parse");
    assert_eq!(config.backend.url, "http://localhost:8080/ask-gemini");
    assert_eq!(config.backend.timeout_secs, Some(15));
    assert_eq!(
        config.backend.envelope,
        EnvelopeFormat::Pointer("/choices/0/message/content".to_owned())
    );
    assert!(!config.defaults.use_emojis);
    assert!(config.defaults.add_hashtags);
    assert_eq!(config.defaults.formatting_style, FormattingStyle::Minimal);
    assert_eq!(config.defaults.tone, Tone::Formal);
    assert_eq!(config.defaults.message_length, MessageLength::Concise);
    assert_eq!(config.logging.level, "debug");
    assert!(config.logging.dir.is_some());
}

#[test]
fn partial_defaults_section_keeps_other_values() {
    let config = Config::from_toml("[defaults]\ntone = \"enthusiastic\"\n").expect("should parse");
    assert_eq!(config.defaults.tone, Tone::Enthusiastic);
    assert!(config.defaults.use_emojis);
    assert_eq!(config.backend.url, DEFAULT_BACKEND_URL);
}

#[test]
fn unknown_enum_value_is_rejected() {
    let parsed = Config::from_toml("[defaults]\ntone = \"sarcastic\"\n");
    assert!(parsed.is_err());
}

#[test]
fn env_overrides_file_values() {
    let mut config = Config::from_toml("[backend]\nurl = \"https://file.example/ask\"\n")
        .expect("should parse");
    let rejected = config.apply_overrides(env_from(&[
        ("DISCORD_FORMATTER_BACKEND_URL", "https://env.example/ask"),
        ("DISCORD_FORMATTER_TIMEOUT_SECS", "7"),
        ("DISCORD_FORMATTER_LOG_LEVEL", "trace"),
    ]));
    assert!(rejected.is_empty());
    assert_eq!(config.backend.url, "https://env.example/ask");
    assert_eq!(config.backend.timeout_secs, Some(7));
    assert_eq!(config.logging.level, "trace");
}

#[test]
fn invalid_timeout_override_is_ignored() {
    let mut config = Config::default();
    let rejected =
        config.apply_overrides(env_from(&[("DISCORD_FORMATTER_TIMEOUT_SECS", "soon")]));
    assert_eq!(config.backend.timeout_secs, None);
    assert_eq!(
        rejected,
        vec![RejectedOverride {
            var: "DISCORD_FORMATTER_TIMEOUT_SECS",
            value: "soon".to_owned(),
        }]
    );
}

#[test]
fn backend_url_must_be_http() {
    assert!(validate_backend_url("https://example.com/ask-gemini").is_ok());
    assert!(validate_backend_url("http://127.0.0.1:9/x").is_ok());
    assert!(validate_backend_url("ftp://example.com/").is_err());
    assert!(validate_backend_url("not a url").is_err());

    let mut config = Config::default();
    config.backend = BackendConfig::with_url("file:///etc/passwd");
    assert!(config.validate().is_err());
}

#[test]
fn missing_file_yields_defaults() {
    let tmp = tempfile::tempdir().expect("should create temp dir");
    let config = load_config_file(&tmp.path().join("absent.toml")).expect("should default");
    assert_eq!(config, Config::default());
}

#[test]
fn malformed_file_is_an_error() {
    let tmp = tempfile::tempdir().expect("should create temp dir");
    let path = tmp.path().join("config.toml");
    std::fs::write(&path, "[backend\nurl = ").expect("should write");
    let err = load_config_file(&path).expect_err("should fail");
    assert!(err.to_string().contains("failed to parse config"));
}

#[test]
fn load_reads_explicit_path() {
    let tmp = tempfile::tempdir().expect("should create temp dir");
    let path = tmp.path().join("config.toml");
    std::fs::write(&path, "[defaults]\nadd_hashtags = true\n").expect("should write");
    let (config, _rejected) = Config::load(Some(&path)).expect("should load");
    assert!(config.defaults.add_hashtags);
}

#[test]
fn config_round_trips_through_toml() {
    let mut config = Config::default();
    config.backend.envelope = EnvelopeFormat::Pointer("/text".to_owned());
    config.backend.timeout_secs = Some(3);
    let rendered = config.to_toml().expect("should render");
    let parsed = Config::from_toml(&rendered).expect("should parse rendered config");
    assert_eq!(parsed, config);
}

#[test]
fn config_path_prefers_env() {
    let path = config_path_with(env_from(&[(CONFIG_PATH_ENV, "/srv/fmt.toml")]))
        .expect("should resolve");
    assert_eq!(path, std::path::PathBuf::from("/srv/fmt.toml"));
}

#[test]
fn config_dir_resolves() {
    let dir = match config_dir() {
        Ok(dir) => dir,
        Err(err) => panic!("config dir should resolve: {err}"),
    };
    assert!(dir.ends_with(".discord-formatter"));
}

use clap::Parser;
use wordnest_types::Provider;

use crate::{Args, load_config};

fn args(extra: &[&str]) -> Args {
    let mut argv = vec!["wordnest"];
    argv.extend_from_slice(extra);
    Args::try_parse_from(argv).unwrap()
}

#[test]
fn test_provider_flag_overrides_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "translator": { "default_provider": "deepl" } }"#).unwrap();
    let path = path.display().to_string();

    let config = load_config(&args(&["--config", path.as_str()])).unwrap();
    assert_eq!(config.translator.default_provider, Provider::DeepL);

    let config = load_config(&args(&["--config", path.as_str(), "--provider", "Gemini"])).unwrap();
    assert_eq!(config.translator.default_provider, Provider::Gemini);
}

#[test]
fn test_unknown_provider_is_rejected() {
    assert!(Args::try_parse_from(["wordnest", "--provider", "google"]).is_err());
}

#[test]
fn test_dictionary_flag_sets_startup_package() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{}").unwrap();
    let path = path.display().to_string();

    let config = load_config(&args(&["--config", path.as_str(), "-d", "/tmp/en.json"])).unwrap();
    assert_eq!(config.dictionary.path.as_deref(), Some("/tmp/en.json"));
}

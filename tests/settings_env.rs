// tests/settings_env.rs
use calm_companion::config::{Settings, ENV_CONFIG_PATH, ENV_SUMMARY_WINDOW, ENV_TIPS_PATH};
use std::path::PathBuf;
use std::{env, fs};

fn clear_env() {
    for k in [
        ENV_CONFIG_PATH,
        ENV_TIPS_PATH,
        ENV_SUMMARY_WINDOW,
        "CALM_MAX_TURNS",
        "CALM_TIPS_PER_TURN",
        "CALM_ANALYTICS_MAX_RECORDS",
    ] {
        env::remove_var(k);
    }
}

#[serial_test::serial]
#[test]
fn defaults_when_nothing_configured() {
    // Isolate CWD so the repo's config/ is not picked up
    let old = env::current_dir().unwrap();
    let tmp = tempfile::tempdir().unwrap();
    env::set_current_dir(tmp.path()).unwrap();
    clear_env();

    let cfg = Settings::load().unwrap();
    assert_eq!(cfg, Settings::default());

    env::set_current_dir(&old).unwrap();
}

#[serial_test::serial]
#[test]
fn file_then_env_overrides() {
    clear_env();
    let tmp = tempfile::tempdir().unwrap();
    let p = tmp.path().join("calm.toml");
    fs::write(&p, "summary_window = 9\nmax_turns_kept = 50\n").unwrap();
    env::set_var(ENV_CONFIG_PATH, p.display().to_string());

    let cfg = Settings::load().unwrap();
    assert_eq!(cfg.summary_window, 9);
    assert_eq!(cfg.max_turns_kept, 50);

    env::set_var(ENV_SUMMARY_WINDOW, "3");
    env::set_var(ENV_TIPS_PATH, "/srv/tips.md");
    env::set_var("CALM_TIPS_PER_TURN", "not-a-number");
    let cfg = Settings::load().unwrap();
    assert_eq!(cfg.summary_window, 3);
    assert_eq!(cfg.tips_path, PathBuf::from("/srv/tips.md"));
    assert_eq!(cfg.tips_per_turn, 2);

    clear_env();
}

#[serial_test::serial]
#[test]
fn explicit_missing_path_is_an_error() {
    clear_env();
    env::set_var(ENV_CONFIG_PATH, "/definitely/not/here.toml");
    assert!(Settings::load().is_err());
    clear_env();
}

#[serial_test::serial]
#[test]
fn malformed_file_is_an_error() {
    clear_env();
    let tmp = tempfile::tempdir().unwrap();
    let p = tmp.path().join("calm.toml");
    fs::write(&p, "summary_window = \"five\"").unwrap();
    env::set_var(ENV_CONFIG_PATH, p.display().to_string());
    let err = Settings::load().unwrap_err();
    assert!(format!("{err:#}").contains("parsing"));
    clear_env();
}

//! Tests for configuration loading.

use aging_sched::config::{Config, DEFAULT_CONFIG_FILE, DEFAULT_INPUT_PATH};
use serial_test::serial;
use std::path::{Path, PathBuf};
use std::{env, fs};
use tempfile::tempdir;

const ENV_KEYS: [&str; 3] = ["PROCESS_INPUT", "PROCESS_OUTPUT", "MAX_WAIT_TIME"];

fn clear_env() {
    for key in ENV_KEYS {
        unsafe { env::remove_var(key) };
    }
}

fn set_env(key: &str, value: &str) {
    unsafe { env::set_var(key, value) };
}

/// Runs `f` with `dir` as the working directory, restoring the old one after.
fn in_dir<T>(dir: &Path, f: impl FnOnce() -> T) -> T {
    let previous = env::current_dir().unwrap();
    env::set_current_dir(dir).unwrap();
    let out = f();
    env::set_current_dir(previous).unwrap();
    out
}

fn sample_config_toml() -> &'static str {
    r#"
input_path = "/tmp/processes.txt"
output_path = "/tmp/trace.txt"
max_wait_time = 12

[synthetic]
ticks = 200
p_arrival = 0.25
p_short = 0.5
short_ticks = 2
long_ticks = 8
min_priority = 0
max_priority = 9
seed = 7
"#
}

#[test]
fn test_parse_full_config() {
    let cfg = Config::parse(sample_config_toml()).unwrap();
    assert_eq!(cfg.input_path, PathBuf::from("/tmp/processes.txt"));
    assert_eq!(cfg.output_path, Some(PathBuf::from("/tmp/trace.txt")));
    assert_eq!(cfg.max_wait_time, 12);
    assert_eq!(cfg.sim_config().max_wait_time, 12);

    let synthetic = cfg.synthetic.unwrap();
    assert_eq!(synthetic.ticks, 200);
    assert_eq!(synthetic.long_ticks, 8);
    assert_eq!(synthetic.seed, 7);
}

#[test]
fn test_defaults_for_empty_config() {
    let cfg = Config::parse("").unwrap();
    assert_eq!(cfg.input_path, PathBuf::from(DEFAULT_INPUT_PATH));
    assert_eq!(cfg.output_path, None);
    assert_eq!(cfg.max_wait_time, 30);
    assert!(cfg.synthetic.is_none());
    assert_eq!(cfg, Config::default());
}

#[test]
fn test_zero_max_wait_rejected() {
    assert!(Config::parse("max_wait_time = 0").is_err());
}

#[test]
fn test_unknown_key_rejected() {
    assert!(Config::parse("max_wait = 3").is_err());
}

#[test]
fn test_synthetic_probability_out_of_range() {
    let raw = sample_config_toml().replace("p_arrival = 0.25", "p_arrival = 1.5");
    let err = Config::parse(&raw).unwrap_err();
    assert!(format!("{err:#}").contains("p_arrival"));
}

#[test]
fn test_synthetic_priority_range_inverted() {
    let raw = sample_config_toml().replace("min_priority = 0", "min_priority = 10");
    assert!(Config::parse(&raw).is_err());
}

#[test]
#[serial]
fn test_load_from_file() {
    clear_env();
    let dir = tempdir().unwrap();
    let path = dir.path().join("aging-sched.toml");
    fs::write(&path, "input_path = \"jobs.txt\"\nmax_wait_time = 5\n").unwrap();

    let cfg = Config::load(Some(path)).unwrap();
    assert_eq!(cfg.max_wait_time, 5);
    assert!(cfg.synthetic.is_none());
}

#[test]
#[serial]
fn test_load_missing_file_fails() {
    let dir = tempdir().unwrap();
    assert!(Config::load(Some(dir.path().join("nope.toml"))).is_err());
}

#[test]
#[serial]
fn test_env_overrides_file_values() {
    clear_env();
    let dir = tempdir().unwrap();
    let path = dir.path().join("aging-sched.toml");
    fs::write(&path, "input_path = \"jobs.txt\"\nmax_wait_time = 5\n").unwrap();

    set_env("PROCESS_INPUT", "/data/other_jobs");
    set_env("PROCESS_OUTPUT", "/data/trace.txt");
    set_env("MAX_WAIT_TIME", "9");
    let cfg = Config::load(Some(path));
    clear_env();

    let cfg = cfg.unwrap();
    assert_eq!(cfg.input_path, PathBuf::from("/data/other_jobs"));
    assert_eq!(cfg.output_path, Some(PathBuf::from("/data/trace.txt")));
    assert_eq!(cfg.max_wait_time, 9);
}

#[test]
#[serial]
fn test_unparseable_max_wait_env_is_ignored() {
    clear_env();
    let dir = tempdir().unwrap();
    let path = dir.path().join("aging-sched.toml");
    fs::write(&path, "max_wait_time = 5\n").unwrap();

    set_env("MAX_WAIT_TIME", "soon");
    let cfg = Config::load(Some(path));
    clear_env();

    assert_eq!(cfg.unwrap().max_wait_time, 5);
}

#[test]
#[serial]
fn test_zero_max_wait_env_rejected() {
    clear_env();
    let dir = tempdir().unwrap();
    let path = dir.path().join("aging-sched.toml");
    fs::write(&path, "max_wait_time = 5\n").unwrap();

    set_env("MAX_WAIT_TIME", "0");
    let result = Config::load(Some(path));
    clear_env();

    let err = result.unwrap_err();
    assert!(err.to_string().contains("max_wait_time"));
}

#[test]
#[serial]
fn test_load_falls_back_to_working_directory_file() {
    clear_env();
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join(DEFAULT_CONFIG_FILE),
        "input_path = \"local_jobs\"\nmax_wait_time = 4\n",
    )
    .unwrap();

    let cfg = in_dir(dir.path(), || Config::load(None)).unwrap();
    assert_eq!(cfg.input_path, PathBuf::from("local_jobs"));
    assert_eq!(cfg.max_wait_time, 4);
}

#[test]
#[serial]
fn test_load_without_any_file_uses_defaults() {
    clear_env();
    let dir = tempdir().unwrap();

    let cfg = in_dir(dir.path(), || Config::load(None)).unwrap();
    assert_eq!(cfg, Config::default());
    assert_eq!(cfg.input_path, PathBuf::from(DEFAULT_INPUT_PATH));
}

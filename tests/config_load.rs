#![forbid(unsafe_code)]

use amunchain_ledger::core::config::{load_config, ConfigError};
use std::fs;

#[test]
fn config_loads_from_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("ledger.toml");
    fs::write(
        &path,
        "[node]\nname = \"ledger-3\"\n\n[block]\nversion = 2\n\n[broadcast]\nchannel_capacity = 16\n\n[log]\nlevel = \"debug\"\njson = true\n",
    )
    .expect("write");

    let cfg = load_config(&path).expect("load");
    assert_eq!(cfg.node.name, "ledger-3");
    assert_eq!(cfg.block.version, 2);
    assert_eq!(cfg.broadcast.channel_capacity, 16);
    assert_eq!(cfg.broadcast.max_frame_bytes, 4 * 1024 * 1024);
    assert!(cfg.log.json);
    assert_eq!(cfg.assembler().version, 2);
}

#[test]
fn missing_file_is_read_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let res = load_config(dir.path().join("absent.toml"));
    assert!(matches!(res, Err(ConfigError::Read(_))));
}

#[test]
fn malformed_toml_is_parse_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("ledger.toml");
    fs::write(&path, "[block\nversion = ").expect("write");
    assert!(matches!(load_config(&path), Err(ConfigError::Parse(_))));
}

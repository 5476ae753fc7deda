//! 配置加载测试（环境变量是进程级状态，需串行执行）

use serial_test::serial;
use spas::config::Settings;
use std::env;

const VARS: &[&str] = &[
    "SPAS_SERVER__PORT",
    "SPAS_DATA__CSV_PATH",
    "SPAS_TRENDS__SEED",
    "SPAS_LOGGING__FORMAT",
];

fn clear_vars() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_environment_overrides() {
    clear_vars();
    env::set_var("SPAS_SERVER__PORT", "8088");
    env::set_var("SPAS_DATA__CSV_PATH", "/tmp/regions.csv");
    env::set_var("SPAS_TRENDS__SEED", "7");
    env::set_var("SPAS_LOGGING__FORMAT", "json");

    let settings = Settings::load();
    clear_vars();

    let settings = assert_ok!(settings);
    assert_eq!(settings.server.port, 8088);
    assert_eq!(settings.data.csv_path, "/tmp/regions.csv");
    assert_eq!(settings.trends.seed, Some(7));
    assert!(settings.logging.is_json());
}

#[test]
#[serial]
fn test_defaults_apply_without_overrides() {
    clear_vars();

    let settings = assert_ok!(Settings::load());
    assert_eq!(settings.server.port, 5000);
    assert_eq!(settings.data.read_timeout_ms, 2000);
    assert_eq!(settings.server_addr(), "0.0.0.0:5000");
}

#[test]
#[serial]
fn test_invalid_port_is_config_error() {
    clear_vars();
    env::set_var("SPAS_SERVER__PORT", "not-a-port");

    let result = Settings::load();
    clear_vars();

    assert!(result.is_err());
}

use super::load::{default_config_path, default_log_dir, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|e| e.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_riff_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("RIFF_CONFIG_PATH", "/tmp/riff-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/riff-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    assert_eq!(
        default_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("riff")
            .join("config.toml")
    );
}

#[test]
fn default_paths_fall_back_to_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::remove("XDG_STATE_HOME");
    let _g3 = EnvGuard::set("HOME", "/tmp/home-dir");

    let home = std::path::PathBuf::from("/tmp/home-dir");
    assert_eq!(
        default_config_path().unwrap(),
        home.join(".config").join("riff").join("config.toml")
    );
    assert_eq!(
        default_log_dir().unwrap(),
        home.join(".local/state").join("riff")
    );
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[playback]
poll_interval_ms = 250

[audio]
quit_fade_out_ms = 0

[library]
extensions = ["mp3"]
include_hidden = true
follow_links = false

[ui]
header_text = "hello"
show_percentage = true

[log]
level = "riff=debug"
directory = "/tmp/riff-logs"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("RIFF_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("RIFF__PLAYBACK__POLL_INTERVAL_MS");

    let s = Settings::load().unwrap();
    assert_eq!(s.playback.poll_interval(), Duration::from_millis(250));
    assert_eq!(s.audio.quit_fade_out_ms, 0);
    assert_eq!(s.library.extensions, vec!["mp3".to_string()]);
    assert!(s.library.include_hidden);
    assert!(!s.library.follow_links);
    assert_eq!(s.ui.header_text, "hello");
    assert!(s.ui.show_percentage);
    assert_eq!(s.log.level, "riff=debug");
    assert_eq!(
        s.log.directory,
        Some(std::path::PathBuf::from("/tmp/riff-logs"))
    );
    assert!(s.validate().is_ok());
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[playback]
poll_interval_ms = 250
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("RIFF_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("RIFF__PLAYBACK__POLL_INTERVAL_MS", "500");

    let s = Settings::load().unwrap();
    assert_eq!(s.playback.poll_interval_ms, 500);
}

#[test]
fn missing_sections_fall_back_to_defaults() {
    let s: Settings = toml::from_str("[ui]\nshow_percentage = true\n").unwrap();
    assert!(s.ui.show_percentage);
    assert_eq!(s.ui.header_text, UiSettings::default().header_text);
    assert_eq!(s.playback.poll_interval_ms, 100);
    assert_eq!(s.audio.quit_fade_out_ms, 300);
    assert!(!s.library.include_hidden);
    assert_eq!(s.log.level, "info");
    assert!(s.validate().is_ok());
}

#[test]
fn validate_rejects_out_of_range_poll_interval() {
    let mut s = Settings::default();
    s.playback.poll_interval_ms = 0;
    assert!(s.validate().is_err());

    s.playback.poll_interval_ms = 5_000;
    assert!(s.validate().is_err());

    s.playback.poll_interval_ms = 1000;
    assert!(s.validate().is_ok());
}

#[test]
fn validate_rejects_empty_extension_list() {
    let mut s = Settings::default();
    s.library.extensions = vec!["  ".into()];
    assert!(s.validate().is_err());
}

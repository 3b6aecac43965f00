use std::path::{Path, PathBuf};

/// Resolve the icon directory handed to the runtime.
///
/// Fallback chain:
/// 1. `ASTER_ICONS_DIR` env var (runtime override)
/// 2. `configured` (the `[runtime] icons` config key)
/// 3. `CARGO_MANIFEST_DIR/../aster-shell/assets/icons` (compile-time, for running from a checkout)
/// 4. `./assets/icons` relative to CWD
pub fn icons_dir(configured: Option<&Path>) -> PathBuf {
    if let Ok(dir) = std::env::var("ASTER_ICONS_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(dir) = configured {
        return expand_home(dir);
    }

    let compile_time = PathBuf::from(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../aster-shell/assets/icons"
    ));
    if compile_time.exists() {
        return compile_time;
    }

    PathBuf::from("assets").join("icons")
}

/// Resolve the command channel socket path.
///
/// Fallback chain: `ASTER_SOCKET`, then `configured`, then
/// `$XDG_RUNTIME_DIR/aster.sock`, then `/tmp/aster.sock`.
pub fn socket_path(configured: Option<&Path>) -> PathBuf {
    if let Ok(path) = std::env::var("ASTER_SOCKET") {
        return PathBuf::from(path);
    }

    if let Some(path) = configured {
        return expand_home(path);
    }

    dirs::runtime_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("aster.sock")
}

/// User config file (`~/.config/aster/config.toml`).
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("aster").join("config.toml"))
}

/// Expand a leading `~/` to the home directory. Other paths pass through.
pub fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}

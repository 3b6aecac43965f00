use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::paths;
use crate::style::FragmentSet;

const DEFAULT_CONFIG: &str = include_str!("../config.toml");

#[derive(Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    style: StyleConfig,
    #[serde(default)]
    compiler: CompilerConfig,
    #[serde(default)]
    runtime: RuntimeConfig,
}

#[derive(Deserialize, Default)]
struct StyleConfig {
    colors: Option<PathBuf>,
    scratch: Option<PathBuf>,
    target: Option<PathBuf>,
    font_family: Option<String>,
    font_size: Option<String>,
}

#[derive(Deserialize, Default)]
struct CompilerConfig {
    program: Option<String>,
    args: Option<Vec<String>>,
    timeout_secs: Option<u64>,
}

#[derive(Deserialize, Default)]
struct RuntimeConfig {
    icons: Option<PathBuf>,
    socket: Option<PathBuf>,
}

/// Font re-established by the universal reset rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSettings {
    pub family: String,
    pub size: String,
}

impl Default for FontSettings {
    fn default() -> Self {
        Self {
            family: "Rubik".to_string(),
            size: "13px".to_string(),
        }
    }
}

/// Where the stylesheet comes from and where its build artifacts go.
#[derive(Debug, Clone)]
pub struct StyleSettings {
    /// User color definitions, imported by the assembled source.
    pub colors: PathBuf,
    /// Intermediate source written on every start.
    pub scratch: PathBuf,
    /// Compiled stylesheet handed to the runtime.
    pub target: PathBuf,
    pub font: FontSettings,
}

/// External style compiler invocation.
#[derive(Debug, Clone)]
pub struct CompilerSettings {
    pub program: String,
    /// Arguments placed before the source and target paths.
    pub args: Vec<String>,
    /// `None` waits for the compiler indefinitely.
    pub timeout: Option<Duration>,
}

/// Everything the bootstrap needs, resolved up front.
#[derive(Debug, Clone)]
pub struct ShellConfig {
    pub style: StyleSettings,
    pub compiler: CompilerSettings,
    pub fragments: FragmentSet,
    pub icons_dir: PathBuf,
    pub socket_path: PathBuf,
}

pub struct Config {
    style: StyleConfig,
    compiler: CompilerConfig,
    runtime: RuntimeConfig,
}

impl Config {
    /// Embedded defaults merged with `~/.config/aster/config.toml`, if present.
    pub fn load() -> Self {
        Self::load_from(paths::user_config_path().as_deref())
    }

    /// Embedded defaults merged with the user file at `path`.
    ///
    /// A missing file is not an error. An unreadable or malformed one is
    /// logged and ignored.
    pub fn load_from(path: Option<&Path>) -> Self {
        let mut config = Self::embedded();

        if let Some(path) = path {
            if path.exists() {
                match std::fs::read_to_string(path) {
                    Ok(contents) => match toml::from_str::<ConfigFile>(&contents) {
                        Ok(user) => config.merge(user),
                        Err(e) => {
                            log::warn!(target: "config", "ignoring malformed config {}: {}", path.display(), e)
                        }
                    },
                    Err(e) => {
                        log::warn!(target: "config", "could not read config {}: {}", path.display(), e)
                    }
                }
            }
        }

        config
    }

    /// Embedded defaults merged with an in-memory TOML document.
    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        let user: ConfigFile = toml::from_str(contents)?;
        let mut config = Self::embedded();
        config.merge(user);
        Ok(config)
    }

    fn embedded() -> Self {
        let base: ConfigFile = toml::from_str(DEFAULT_CONFIG).unwrap_or_else(|e| {
            log::error!(target: "config", "embedded config.toml is invalid: {}", e);
            ConfigFile::default()
        });
        Config {
            style: base.style,
            compiler: base.compiler,
            runtime: base.runtime,
        }
    }

    fn merge(&mut self, user: ConfigFile) {
        merge_style(&mut self.style, user.style);
        merge_compiler(&mut self.compiler, user.compiler);
        merge_runtime(&mut self.runtime, user.runtime);
    }

    pub fn style(&self) -> StyleSettings {
        let font = FontSettings::default();
        StyleSettings {
            colors: paths::expand_home(
                self.style
                    .colors
                    .as_deref()
                    .unwrap_or_else(|| Path::new("~/.config/ags_res/colors.scss")),
            ),
            scratch: paths::expand_home(
                self.style
                    .scratch
                    .as_deref()
                    .unwrap_or_else(|| Path::new("/tmp/style.scss")),
            ),
            target: paths::expand_home(
                self.style
                    .target
                    .as_deref()
                    .unwrap_or_else(|| Path::new("/tmp/style.css")),
            ),
            font: FontSettings {
                family: self.style.font_family.clone().unwrap_or(font.family),
                size: self.style.font_size.clone().unwrap_or(font.size),
            },
        }
    }

    pub fn compiler(&self) -> CompilerSettings {
        CompilerSettings {
            program: self
                .compiler
                .program
                .clone()
                .unwrap_or_else(|| "sass".to_string()),
            args: self.compiler.args.clone().unwrap_or_default(),
            timeout: self
                .compiler
                .timeout_secs
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
        }
    }

    pub fn icons_dir(&self) -> PathBuf {
        paths::icons_dir(self.runtime.icons.as_deref())
    }

    pub fn socket_path(&self) -> PathBuf {
        paths::socket_path(self.runtime.socket.as_deref())
    }

    /// Resolve into the explicit configuration the bootstrap consumes,
    /// using the fragments built into this crate.
    pub fn shell_config(&self) -> ShellConfig {
        ShellConfig {
            style: self.style(),
            compiler: self.compiler(),
            fragments: FragmentSet::builtin(),
            icons_dir: self.icons_dir(),
            socket_path: self.socket_path(),
        }
    }
}

fn merge_style(base: &mut StyleConfig, user: StyleConfig) {
    if user.colors.is_some() {
        base.colors = user.colors;
    }
    if user.scratch.is_some() {
        base.scratch = user.scratch;
    }
    if user.target.is_some() {
        base.target = user.target;
    }
    if user.font_family.is_some() {
        base.font_family = user.font_family;
    }
    if user.font_size.is_some() {
        base.font_size = user.font_size;
    }
}

fn merge_compiler(base: &mut CompilerConfig, user: CompilerConfig) {
    if user.program.is_some() {
        base.program = user.program;
    }
    if user.args.is_some() {
        base.args = user.args;
    }
    if user.timeout_secs.is_some() {
        base.timeout_secs = user.timeout_secs;
    }
}

fn merge_runtime(base: &mut RuntimeConfig, user: RuntimeConfig) {
    if user.icons.is_some() {
        base.icons = user.icons;
    }
    if user.socket.is_some() {
        base.socket = user.socket;
    }
}

//! Optional config file supplying connection settings and run defaults.
//!
//! The file is a flat list of `key = value` lines; strings are double-quoted,
//! `#` starts a comment.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result, anyhow, bail};

const APP_DIR: &str = "nexus-backup";
const CONFIG_FILE: &str = "config.toml";

const KEYS: [&str; 9] = [
    "url",
    "user",
    "password",
    "api_version",
    "output_dir",
    "connect_timeout_secs",
    "read_timeout_secs",
    "fail_fast",
    "verbosity",
];

/// Values read from the config file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileConfig {
    /// Nexus base URL.
    pub url: Option<String>,
    /// Nexus user name.
    pub user: Option<String>,
    /// Nexus password.
    pub password: Option<String>,
    /// REST API version segment.
    pub api_version: Option<String>,
    /// Backup root directory.
    pub output_dir: Option<PathBuf>,
    /// HTTP connect timeout in seconds.
    pub connect_timeout_secs: Option<u64>,
    /// HTTP read timeout in seconds.
    pub read_timeout_secs: Option<u64>,
    /// Stop at the first failed artifact.
    pub fail_fast: Option<bool>,
    /// Log verbosity when no CLI flag is given.
    pub verbosity: Option<VerbositySetting>,
}

impl FileConfig {
    /// Applies the same bounds the CLI enforces on its flags.
    pub fn validate(&self) -> Result<()> {
        validate_timeout_secs("connect_timeout_secs", self.connect_timeout_secs)?;
        validate_timeout_secs("read_timeout_secs", self.read_timeout_secs)?;
        if let Some(api_version) = &self.api_version
            && api_version.trim().is_empty()
        {
            bail!("`api_version` must not be empty");
        }
        Ok(())
    }
}

fn validate_timeout_secs(field: &str, value: Option<u64>) -> Result<()> {
    match value {
        Some(secs) if !(1..=3600).contains(&secs) => {
            bail!("`{field}` must be between 1 and 3600 seconds, got {secs}")
        }
        _ => Ok(()),
    }
}

/// `verbosity` values accepted in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbositySetting {
    Default,
    Verbose,
    Quiet,
    Debug,
}

impl FromStr for VerbositySetting {
    type Err = anyhow::Error;

    fn from_str(label: &str) -> Result<Self> {
        match label {
            "default" => Ok(Self::Default),
            "verbose" => Ok(Self::Verbose),
            "quiet" => Ok(Self::Quiet),
            "debug" => Ok(Self::Debug),
            other => bail!("unknown verbosity '{other}' (use default, verbose, quiet or debug)"),
        }
    }
}

impl VerbositySetting {
    /// Log level this setting selects.
    #[must_use]
    pub fn log_level(self) -> &'static str {
        match self {
            Self::Default => "info",
            Self::Verbose | Self::Debug => "debug",
            Self::Quiet => "error",
        }
    }
}

/// Result of looking for the config file.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Where the file was looked for.
    pub path: Option<PathBuf>,
    /// Parsed contents, when the file exists.
    pub config: Option<FileConfig>,
}

/// Location of the config file, if a config directory can be determined.
///
/// `$XDG_CONFIG_HOME/nexus-backup/config.toml`, falling back to
/// `$HOME/.config/nexus-backup/config.toml`. Empty variables count as unset.
#[must_use]
pub fn resolve_default_config_path() -> Option<PathBuf> {
    let non_empty = |name: &str| env::var_os(name).filter(|value| !value.is_empty());
    let config_dir = non_empty("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| non_empty("HOME").map(|home| PathBuf::from(home).join(".config")))?;
    Some(config_dir.join(APP_DIR).join(CONFIG_FILE))
}

/// Reads the config file at the default location, if it exists.
pub fn load_default_file_config() -> Result<LoadedConfig> {
    let path = resolve_default_config_path();
    let config = path
        .as_deref()
        .filter(|candidate| candidate.is_file())
        .map(read_config_file)
        .transpose()?;
    Ok(LoadedConfig { path, config })
}

fn read_config_file(path: &Path) -> Result<FileConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    parse_config(&contents)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))
}

/// A right-hand side value, typed by its syntax.
#[derive(Debug, PartialEq, Eq)]
enum ConfigValue<'a> {
    Text(&'a str),
    Integer(u64),
    Flag(bool),
}

impl<'a> ConfigValue<'a> {
    fn lex(raw: &'a str) -> Result<Self> {
        if let Some(inner) = raw.strip_prefix('"') {
            return inner
                .strip_suffix('"')
                .map(Self::Text)
                .ok_or_else(|| anyhow!("unterminated string"));
        }
        match raw {
            "true" => Ok(Self::Flag(true)),
            "false" => Ok(Self::Flag(false)),
            _ if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) => raw
                .parse()
                .map(Self::Integer)
                .map_err(|_| anyhow!("integer out of range")),
            _ => bail!("expected a quoted string, an unsigned integer, or true/false"),
        }
    }

    fn text(self) -> Result<String> {
        match self {
            Self::Text(text) => Ok(text.to_string()),
            _ => bail!("expected a double-quoted string"),
        }
    }

    fn integer(self) -> Result<u64> {
        match self {
            Self::Integer(value) => Ok(value),
            _ => bail!("expected an unsigned integer"),
        }
    }

    fn flag(self) -> Result<bool> {
        match self {
            Self::Flag(value) => Ok(value),
            _ => bail!("expected true or false"),
        }
    }
}

fn parse_config(contents: &str) -> Result<FileConfig> {
    let mut cfg = FileConfig::default();
    for (number, raw_line) in (1..).zip(contents.lines()) {
        let line = without_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }
        let (key, raw_value) = line
            .split_once('=')
            .map(|(key, value)| (key.trim(), value.trim()))
            .ok_or_else(|| anyhow!("line {number}: expected `key = value`"))?;

        if !KEYS.contains(&key) {
            bail!("Unknown configuration key: '{key}' on line {number}");
        }
        assign(&mut cfg, key, raw_value)
            .with_context(|| format!("Invalid `{key}` value on line {number}"))?;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn assign(cfg: &mut FileConfig, key: &str, raw_value: &str) -> Result<()> {
    let value = ConfigValue::lex(raw_value)?;
    match key {
        "url" => cfg.url = Some(value.text()?),
        "user" => cfg.user = Some(value.text()?),
        "password" => cfg.password = Some(value.text()?),
        "api_version" => cfg.api_version = Some(value.text()?),
        "output_dir" => cfg.output_dir = Some(PathBuf::from(value.text()?)),
        "connect_timeout_secs" => cfg.connect_timeout_secs = Some(value.integer()?),
        "read_timeout_secs" => cfg.read_timeout_secs = Some(value.integer()?),
        "fail_fast" => cfg.fail_fast = Some(value.flag()?),
        "verbosity" => cfg.verbosity = Some(value.text()?.parse()?),
        other => bail!("unsupported key '{other}'"),
    }
    Ok(())
}

/// Cuts a trailing `# comment`, ignoring `#` inside double quotes.
fn without_comment(line: &str) -> &str {
    let mut quoted = false;
    line.char_indices()
        .find(|&(_, ch)| {
            if ch == '"' {
                quoted = !quoted;
            }
            ch == '#' && !quoted
        })
        .map_or(line, |(index, _)| &line[..index])
}

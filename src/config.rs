use dirs::{config_dir, data_dir};
use log::debug;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::dictionary::{InvalidTokenPolicy, LoadOptions, MAX_WORD_LENGTH};
use crate::error::ConfigError;

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "default_dictionary")]
    pub dictionary: PathBuf,
    #[serde(default = "default_max_word_length")]
    pub max_word_length: usize,
    #[serde(default)]
    pub invalid_tokens: InvalidTokenPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dictionary: default_dictionary(),
            max_word_length: default_max_word_length(),
            invalid_tokens: InvalidTokenPolicy::default(),
        }
    }
}

impl Config {
    /// Reads the config at `path`, or the default location when `path` is
    /// `None`. A missing file at the default location yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => match default_config_path() {
                Some(p) => (p, false),
                None => return Ok(Config::default()),
            },
        };

        let path = expand_tilde(&path).unwrap_or(path);
        if !required && !path.exists() {
            debug!("no config at {:?}, using defaults", path);
            return Ok(Config::default());
        }

        let text = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        Config::from_json(&text).map_err(|source| ConfigError::Parse { path, source })
    }

    pub fn from_json(text: &str) -> Result<Config, serde_json::Error> {
        let mut config: Config = serde_json::from_str(text)?;
        if let Some(expanded) = expand_tilde(&config.dictionary) {
            config.dictionary = expanded;
        }
        Ok(config)
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            max_word_length: self.max_word_length,
            invalid_tokens: self.invalid_tokens,
        }
    }
}

fn default_max_word_length() -> usize {
    MAX_WORD_LENGTH
}

fn default_dictionary() -> PathBuf {
    match data_dir() {
        Some(dir) => dir.join("speller").join("large"),
        None => PathBuf::from("dictionaries/large"),
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("speller").join("config.json"))
}

pub fn expand_tilde<P: AsRef<Path>>(path_user_input: P) -> Option<PathBuf> {
    let p = path_user_input.as_ref();
    if !p.starts_with("~") {
        return Some(p.to_path_buf());
    }
    if p == Path::new("~") {
        return dirs::home_dir();
    }
    let rest = p.strip_prefix("~").ok()?;
    dirs::home_dir().map(|h| h.join(rest))
}

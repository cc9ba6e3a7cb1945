use std::{path::Path, str::FromStr};

use tracing::{debug, warn};

use crate::{
    domain::{
        Flag,
        constants::{DEFAULT_ENV_FILE, ENV_FILE_PATH},
        var::{EnvSource, EnvVar},
    },
    error::{ModelError, ModelResult},
};

/// Layered set of configuration variables.
///
/// Entries are kept in insertion order; lookups scan from the end so that later
/// layers override earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Env(Vec<EnvVar>);

impl Env {
    /// Create an empty environment.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Snapshot the process environment.
    ///
    /// Variables whose name or value is not valid UTF-8 are skipped.
    pub fn from_process() -> Self {
        let vars = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .map(|(k, v)| EnvVar::new(k, v, EnvSource::Process))
            .collect();
        Self(vars)
    }

    /// Read a dotenv file.
    pub fn from_dotenv(path: &Path) -> ModelResult<Self> {
        let env_file_err = |reason: String| ModelError::EnvFile {
            path: path.display().to_string(),
            reason,
        };

        let iter = dotenvy::from_path_iter(path).map_err(|e| env_file_err(e.to_string()))?;
        let mut out = Env::new();
        for item in iter {
            let (key, value) = item.map_err(|e| env_file_err(e.to_string()))?;
            out.0.push(EnvVar::new(key, value, EnvSource::File));
        }
        Ok(out)
    }

    /// Build the effective configuration: a dotenv file layered under the
    /// process environment.
    ///
    /// The file is `explicit` if given, otherwise the process `ENV_FILE_PATH`,
    /// otherwise [`DEFAULT_ENV_FILE`]. Only the default may be absent.
    pub fn load(explicit: Option<&Path>) -> ModelResult<Self> {
        let process = Env::from_process();
        Self::layered(process, explicit)
    }

    /// Same as [`Env::load`] with a caller-provided process layer.
    pub fn layered(process: Env, explicit: Option<&Path>) -> ModelResult<Self> {
        let (path, required) = match explicit {
            Some(p) => (p.to_path_buf(), true),
            None => match process.optional(ENV_FILE_PATH) {
                Some(p) => (p.into(), true),
                None => (DEFAULT_ENV_FILE.into(), false),
            },
        };

        if !required && !path.exists() {
            debug!(path = %path.display(), "no env file, using process environment only");
            return Ok(process);
        }

        let file = Env::from_dotenv(&path)?;
        debug!(path = %path.display(), vars = file.len(), "env file loaded");
        Ok(file.merged(&process))
    }

    /// Effective entry for a key.
    pub fn entry(&self, key: &str) -> Option<&EnvVar> {
        self.0.iter().rev().find(|v| v.key() == key)
    }

    /// Effective value for a key, returning the last matching entry.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entry(key).map(|v| v.value())
    }

    /// Effective value, treating an empty string as unset.
    pub fn optional(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    /// Effective non-empty value or [`ModelError::MissingVar`].
    pub fn require(&self, key: &str) -> ModelResult<&str> {
        self.optional(key)
            .ok_or_else(|| ModelError::MissingVar(key.to_string()))
    }

    /// Parse a numeric (or otherwise `FromStr`) value, falling back to `default`
    /// when the key is unset or empty.
    pub fn parse_or<T: FromStr>(&self, key: &str, default: T, expected: &'static str) -> ModelResult<T> {
        match self.optional(key) {
            None => Ok(default),
            Some(raw) => parse_value(key, raw, expected),
        }
    }

    /// Parse a required value.
    pub fn parse_required<T: FromStr>(&self, key: &str, expected: &'static str) -> ModelResult<T> {
        parse_value(key, self.require(key)?, expected)
    }

    /// Coerce a boolean variable, with `default` used when the key is unset.
    ///
    /// Unrecognized spellings still coerce to disabled; they are logged so a
    /// typo such as `ASSIGN_PUBLIC_IP=ture` does not pass unnoticed.
    pub fn flag(&self, key: &str, default: &str) -> Flag {
        let raw = self.get(key).unwrap_or(default);
        if !Flag::is_recognized(raw) {
            warn!(key, value = raw, "unrecognized boolean value, treating as false");
        }
        Flag::coerce(raw)
    }

    /// Append an inline entry.
    ///
    /// Later entries override earlier ones when queried via [`Env::get`].
    pub fn push<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.0.push(EnvVar::new(key, value, EnvSource::Inline));
    }

    /// Merge two environments, where entries from `other` override `self`.
    pub fn merged(&self, other: &Env) -> Env {
        let mut out = self.0.clone();
        out.extend(other.0.iter().cloned());
        Env(out)
    }
}

impl<K, V> FromIterator<(K, V)> for Env
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut env = Env::new();
        for (k, v) in iter {
            env.push(k, v);
        }
        env
    }
}

fn parse_value<T: FromStr>(key: &str, raw: &str, expected: &'static str) -> ModelResult<T> {
    raw.trim().parse().map_err(|_| ModelError::InvalidNumber {
        key: key.to_string(),
        value: raw.to_string(),
        expected,
    })
}

use std::fmt;

/// Where a variable was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvSource {
    /// The process environment.
    Process,
    /// A dotenv file.
    File,
    /// Set programmatically (tests, embedding).
    Inline,
}

impl fmt::Display for EnvSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EnvSource::Process => "process",
            EnvSource::File => "file",
            EnvSource::Inline => "inline",
        })
    }
}

/// Single configuration variable together with its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvVar {
    key: String,
    value: String,
    source: EnvSource,
}

impl EnvVar {
    pub fn new<K, V>(key: K, value: V, source: EnvSource) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            key: key.into(),
            value: value.into(),
            source,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn source(&self) -> EnvSource {
        self.source
    }
}

impl From<(&str, &str)> for EnvVar {
    fn from((key, value): (&str, &str)) -> Self {
        Self::new(key, value, EnvSource::Inline)
    }
}

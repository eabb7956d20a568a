use std::{fmt, fs, path::Path, time::Duration};

/// Placement bucket for a toast. Only used to group toasts for display.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    TopLeft,
    TopCenter,
    #[default]
    TopRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl Position {
    pub const ALL: [Position; 6] = [
        Position::TopLeft,
        Position::TopCenter,
        Position::TopRight,
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Position::TopLeft => "top-left",
            Position::TopCenter => "top-center",
            Position::TopRight => "top-right",
            Position::BottomLeft => "bottom-left",
            Position::BottomCenter => "bottom-center",
            Position::BottomRight => "bottom-right",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct ToasterConfig {
    /// The maximum number of toasts that can be displayed at once. Extra toasts wait in a queue.
    #[serde(default = "default_max_visible")]
    pub max_visible: usize,
    /// Time in milliseconds a toast stays visible when the request does not specify one.
    #[serde(default = "default_duration_ms")]
    pub default_duration_ms: u64,
    /// Placement used when the request does not specify one.
    #[serde(default)]
    pub default_position: Position,
    /// Extra time in milliseconds added to every expiry timer, leaving room for an exit animation.
    #[serde(default)]
    pub expiry_grace_ms: u64,
}

impl Default for ToasterConfig {
    fn default() -> Self {
        Self {
            max_visible: default_max_visible(),
            default_duration_ms: default_duration_ms(),
            default_position: Position::default(),
            expiry_grace_ms: 0,
        }
    }
}

impl ToasterConfig {
    /// Reject configurations the lifecycle controller cannot honor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_visible == 0 {
            return Err(ConfigError::InvalidMaxVisible(self.max_visible));
        }
        Ok(())
    }

    pub fn default_duration(&self) -> Duration {
        Duration::from_millis(self.default_duration_ms)
    }

    pub fn expiry_grace(&self) -> Duration {
        Duration::from_millis(self.expiry_grace_ms)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }
}

/// Load and validate a configuration file. Missing keys fall back to their defaults.
pub fn load_from_path(path: &Path) -> Result<ToasterConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
    ToasterConfig::from_toml_str(&content)
}

pub fn save_to_path(config: &ToasterConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ConfigError::Io(e.to_string()))?;
    }
    let content = config.to_toml_string()?;
    fs::write(path, content).map_err(|e| ConfigError::Io(e.to_string()))
}

/// Errors raised while building or loading a configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `max_visible` must be a positive integer
    InvalidMaxVisible(usize),
    /// IO error reading or writing the file
    Io(String),
    /// The file is not valid TOML for this configuration
    Parse(String),
    /// The configuration could not be serialized
    Serialize(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidMaxVisible(n) => {
                write!(f, "max_visible must be a positive integer, got {}", n)
            }
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Config parse error: {}", e),
            ConfigError::Serialize(e) => write!(f, "Config serialize error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

// Default value helpers for serde
const fn default_max_visible() -> usize {
    5
}

const fn default_duration_ms() -> u64 {
    3000
}

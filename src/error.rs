use toaster_config::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The configuration was rejected
    Config(ConfigError),
    /// `Toaster::new` was called outside of a tokio runtime
    NoRuntime,
    /// The lifecycle loop is no longer running
    Closed,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Invalid configuration: {}", e),
            Error::NoRuntime => write!(f, "No tokio runtime available to drive the toaster"),
            Error::Closed => write!(f, "Toaster lifecycle loop has stopped"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

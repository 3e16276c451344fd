use std::fmt;

/// Reasons a configuration is rejected at episode start
#[derive(Debug)]
pub enum ConfigError {
    NonPositive { field: &'static str, value: f32 },
    NotFinite { field: &'static str, value: f32 },
    NegativeFuel { value: f32 },
    NegativeBurnRate { field: &'static str, value: f32 },
    ViewportTooNarrow { width: u32, min: u32 },
    ViewportTooShort { height: u32, min: u32 },
    ViewportTooLarge { field: &'static str, value: u32, max: u32 },
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositive { field, value } => {
                write!(f, "{field} must be positive (got {value})")
            }
            Self::NotFinite { field, value } => write!(f, "{field} must be finite (got {value})"),
            Self::NegativeFuel { value } => write!(f, "initial fuel must not be negative (got {value})"),
            Self::NegativeBurnRate { field, value } => {
                write!(f, "{field} must not be negative (got {value})")
            }
            Self::ViewportTooNarrow { width, min } => {
                write!(f, "viewport width {width} is too narrow (minimum {min})")
            }
            Self::ViewportTooShort { height, min } => {
                write!(f, "viewport height {height} is too short (minimum {min})")
            }
            Self::ViewportTooLarge { field, value, max } => {
                write!(f, "{field} {value} is too large (maximum {max})")
            }
            Self::Io(e) => write!(f, "failed to read config: {e}"),
            Self::Parse(e) => write!(f, "failed to parse config: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

use std::fmt::{self, Display};
use std::io;

/// Errors raised while reading a run document or writing run outputs.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub enum MrpError {
    IoError(io::Error),
    JsonError(serde_json::Error),
    TomlError(toml::de::Error),
    CSVError(csv::Error),
    /// The run document is present but unusable.
    InputError(String),
    LoggingError(String),
}

impl From<io::Error> for MrpError {
    fn from(error: io::Error) -> Self {
        MrpError::IoError(error)
    }
}

impl From<serde_json::Error> for MrpError {
    fn from(error: serde_json::Error) -> Self {
        MrpError::JsonError(error)
    }
}

impl From<toml::de::Error> for MrpError {
    fn from(error: toml::de::Error) -> Self {
        MrpError::TomlError(error)
    }
}

impl From<csv::Error> for MrpError {
    fn from(error: csv::Error) -> Self {
        MrpError::CSVError(error)
    }
}

impl std::error::Error for MrpError {}

impl Display for MrpError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MrpError::IoError(e) => write!(f, "i/o error: {e}"),
            MrpError::JsonError(e) => write!(f, "invalid JSON: {e}"),
            MrpError::TomlError(e) => write!(f, "invalid TOML: {e}"),
            MrpError::CSVError(e) => write!(f, "csv error: {e}"),
            MrpError::InputError(msg) => write!(f, "bad run document: {msg}"),
            MrpError::LoggingError(msg) => write!(f, "failed to configure logging: {msg}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_io_error() {
        let err: MrpError = io::Error::new(io::ErrorKind::NotFound, "missing").into();
        assert!(matches!(err, MrpError::IoError(_)));
        assert_eq!(err.to_string(), "i/o error: missing");
    }

    #[test]
    fn test_from_json_error() {
        let err: MrpError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, MrpError::JsonError(_)));
        assert!(err.to_string().starts_with("invalid JSON"));
    }

    #[test]
    fn test_input_error_display() {
        let err = MrpError::InputError("no input on stdin".to_string());
        assert_eq!(err.to_string(), "bad run document: no input on stdin");
    }
}

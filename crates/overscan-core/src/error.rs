//! Error handling for the overscan post-processor
//!
//! Only two conditions stop a run: the input program cannot be read, or the
//! rewritten program cannot be written. Everything the parser does not
//! understand is skipped silently and never reaches this module.
//!
//! Configuration files have their own error kind because they are loaded
//! before a run starts.
//!
//! All error types use `thiserror` for ergonomic error handling.

use std::path::PathBuf;
use thiserror::Error;

/// Run failure type
///
/// Fatal to the run. No retry is attempted and no partial output is produced.
#[derive(Error, Debug)]
pub enum JobError {
    /// The input program could not be opened or read
    #[error("Cannot open input: {}", path.display())]
    InputUnreadable {
        /// The input path that failed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The output program could not be created or written
    #[error("Cannot open output: {}", path.display())]
    OutputUnwritable {
        /// The output path that failed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl JobError {
    /// Path of the file that caused the failure
    pub fn path(&self) -> &PathBuf {
        match self {
            JobError::InputUnreadable { path, .. } | JobError::OutputUnwritable { path, .. } => {
                path
            }
        }
    }
}

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file extension is not a supported configuration format
    #[error("Config file must be .json or .toml: {}", path.display())]
    UnsupportedFormat {
        /// The offending path.
        path: PathBuf,
    },

    /// The configuration could not be parsed
    #[error("Invalid {format} config: {reason}")]
    Parse {
        /// Format name ("JSON" or "TOML").
        format: &'static str,
        /// The parser message.
        reason: String,
    },

    /// The configuration could not be serialized
    #[error("Failed to serialize config: {reason}")]
    Serialize {
        /// The serializer message.
        reason: String,
    },

    /// A setting holds a value the processor cannot use
    #[error("Invalid value for '{setting}': {reason}")]
    InvalidValue {
        /// The setting name.
        setting: String,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Main error type
///
/// A unified error type that can represent any error from all layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Run failure
    #[error(transparent)]
    Job(#[from] JobError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a run failure
    pub fn is_job_error(&self) -> bool {
        matches!(self, Error::Job(_))
    }

    /// Check if this is a configuration error
    pub fn is_config_error(&self) -> bool {
        matches!(self, Error::Config(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_job_error_display() {
        let err = JobError::InputUnreadable {
            path: PathBuf::from("part.gcode"),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(err.to_string(), "Cannot open input: part.gcode");
        assert_eq!(err.path(), &PathBuf::from("part.gcode"));

        let err = JobError::OutputUnwritable {
            path: PathBuf::from("out/part_overscan.gcode"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(
            err.to_string(),
            "Cannot open output: out/part_overscan.gcode"
        );
    }

    #[test]
    fn test_job_error_keeps_source() {
        use std::error::Error as _;

        let err = JobError::InputUnreadable {
            path: PathBuf::from("a.nc"),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(err.source().map(|s| s.to_string()), Some("missing".into()));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidValue {
            setting: "overscan_distance".to_string(),
            reason: "must be finite".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for 'overscan_distance': must be finite"
        );

        let err = ConfigError::Parse {
            format: "TOML",
            reason: "expected `=`".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid TOML config: expected `=`");
    }

    #[test]
    fn test_error_conversion() {
        let job = JobError::OutputUnwritable {
            path: PathBuf::from("x"),
            source: io::Error::new(io::ErrorKind::Other, "boom"),
        };
        let err: Error = job.into();
        assert!(err.is_job_error());
        assert!(!err.is_config_error());

        let err: Error = ConfigError::Serialize {
            reason: "nope".to_string(),
        }
        .into();
        assert!(err.is_config_error());

        let err: Error = io::Error::new(io::ErrorKind::Other, "disk").into();
        assert!(matches!(err, Error::Io(_)));

        assert_eq!(Error::other("plain").to_string(), "plain");
    }
}

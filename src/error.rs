//! Error types for the host side of the workbench.
//!
//! The diff engine, colorizer, wrapper and workbench state machine are total
//! and never fail. Everything that touches the outside world (terminal,
//! configuration files, the log file, the input thread) reports through
//! [`Error`].

use std::path::PathBuf;

/// Errors raised while starting or driving the terminal workbench.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Terminal or file I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration file could not be parsed as TOML.
    #[error("failed to parse config file {}: {source}", path.display())]
    ConfigParse {
        /// The offending file.
        path: PathBuf,
        /// The underlying TOML error.
        #[source]
        source: toml::de::Error,
    },

    /// A configuration value parsed but failed validation.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A color string was not of the form `#rrggbb`.
    #[error("invalid color {0:?}: expected \"#rrggbb\"")]
    InvalidColor(String),

    /// The input thread hung up before the workbench quit.
    #[error("input channel disconnected")]
    InputDisconnected,

    /// A global logger was already installed.
    #[error("failed to install logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}

/// Result alias used throughout the host layer.
pub type Result<T> = std::result::Result<T, Error>;

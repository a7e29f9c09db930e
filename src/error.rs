//! Errors raised by the I/O glue around a compilation
//!
//! A compilation itself never fails: lexical, syntax and semantic problems
//! are diagnostic tokens. These errors cover reading inputs, writing
//! reports, loading configuration and driving the terminal viewer.

use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum PasfrontError {
    /// Reading a source or word list, or writing a report.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid configuration in {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Terminal setup or drawing failed in the viewer.
    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
}

impl PasfrontError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        PasfrontError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type PasfrontResult<T> = Result<T, PasfrontError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_names_the_path() {
        let err = PasfrontError::io(
            "prog.pas",
            io::Error::new(io::ErrorKind::NotFound, "no such file"),
        );
        assert_eq!(err.to_string(), "prog.pas: no such file");
    }
}

//! Crate-wide error type for the harness layers (configuration loading, sinks
//! and the command line).

use crate::analysis::AnalysisError;
use crate::lfsr::ConfigError;
use std::error;
use std::fmt;
use std::io;

#[derive(Debug)]
pub enum Error {
    Config(ConfigError),
    Analysis(AnalysisError),
    Io(io::Error),
    Json(serde_json::Error),
    Cbor(serde_cbor::error::Error),
    /// A sink was handed a step index that did not follow the previous one.
    OutOfOrder { last: u64, got: u64 },
    /// A line of a hex dump could not be parsed.
    Format { line: usize },
    /// The receiving end of a stream went away.
    Disconnected,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::Config(ref err) => write!(f, "{}", err),
            Error::Analysis(ref err) => write!(f, "{}", err),
            Error::Io(ref err) => write!(f, "I/O error: {}", err),
            Error::Json(ref err) => write!(f, "JSON error: {}", err),
            Error::Cbor(ref err) => write!(f, "CBOR error: {}", err),
            Error::OutOfOrder { last, got } => write!(
                f,
                "Sink error: step {} does not follow step {}",
                got, last
            ),
            Error::Format { line } => {
                write!(f, "Format error: malformed line {}", line)
            }
            Error::Disconnected => write!(f, "Sink error: stream disconnected"),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Error::Config(ref err) => Some(err),
            Error::Analysis(ref err) => Some(err),
            Error::Io(ref err) => Some(err),
            Error::Json(ref err) => Some(err),
            Error::Cbor(ref err) => Some(err),
            _ => None,
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Error::Config(err)
    }
}

impl From<AnalysisError> for Error {
    fn from(err: AnalysisError) -> Self {
        Error::Analysis(err)
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

impl From<serde_cbor::error::Error> for Error {
    fn from(err: serde_cbor::error::Error) -> Self {
        Error::Cbor(err)
    }
}

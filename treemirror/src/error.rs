use std::{error, fmt, io};

use camino::FromPathBufError;

/// The error type of a mirror run.
/// Every variant is fatal: the run stops at the first error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Transport failure or non-success HTTP status
    Network(String),
    /// Malformed listing response or remote tree
    Decode(String),
    /// Local filesystem failure
    Io(String),
    /// Missing or invalid environment/configuration value
    Config(String),
}

impl Error {
    /// Process exit status for this kind of error
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Network(..) => 2,
            Self::Decode(..) => 3,
            Self::Io(..) => 4,
            Self::Config(..) => 5,
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(..))
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(..))
    }

    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(..))
    }

    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(..))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "Network error: {msg}"),
            Self::Decode(msg) => write!(f, "Decode error: {msg}"),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
            Self::Config(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl error::Error for Error {}

impl From<io::Error> for Error {
    fn from(value: io::Error) -> Self {
        Self::Io(value.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode(value.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            Self::Decode(value.to_string())
        } else {
            Self::Network(value.to_string())
        }
    }
}

impl From<FromPathBufError> for Error {
    fn from(value: FromPathBufError) -> Self {
        Self::Config(format!(
            "Non UTF-8 path: {}",
            value.as_path().as_os_str().to_string_lossy()
        ))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[macro_export]
macro_rules! network_bail {
    ($($t:tt)*) => {
        return ::core::result::Result::Err($crate::Error::Network(format!($($t)*)));
    };
}

#[macro_export]
macro_rules! decode_bail {
    ($($t:tt)*) => {
        return ::core::result::Result::Err($crate::Error::Decode(format!($($t)*)));
    };
}

#[macro_export]
macro_rules! io_bail {
    ($($t:tt)*) => {
        return ::core::result::Result::Err($crate::Error::Io(format!($($t)*)));
    };
}

#[macro_export]
macro_rules! config_bail {
    ($($t:tt)*) => {
        return ::core::result::Result::Err($crate::Error::Config(format!($($t)*)));
    };
}

#[macro_export]
macro_rules! network_error {
    ($($t:tt)*) => {
        $crate::Error::Network(format!($($t)*))
    };
}

#[macro_export]
macro_rules! decode_error {
    ($($t:tt)*) => {
        $crate::Error::Decode(format!($($t)*))
    };
}

#[macro_export]
macro_rules! io_error {
    ($($t:tt)*) => {
        $crate::Error::Io(format!($($t)*))
    };
}

#[macro_export]
macro_rules! config_error {
    ($($t:tt)*) => {
        $crate::Error::Config(format!($($t)*))
    };
}

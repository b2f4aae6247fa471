//! Error type shared by the library and the command-line front end.

use std::path::PathBuf;

use thiserror::Error;

use crate::session::Screen;

#[derive(Debug, Error)]
pub enum Error {
    /// Caller supplied a value outside the accepted range (bad month, unknown date format, ...).
    #[error("{0}")]
    InvalidArgument(String),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A fixture document did not match its schema.
    #[error("malformed fixture {name}: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("sign in required for {0}")]
    SignInRequired(Screen),

    #[error("no {kind} with id {id:?}")]
    UnknownRecord { kind: &'static str, id: String },
}

pub type Result<T> = std::result::Result<T, Error>;

// Error types shared by the service backends and the resolver.
// Every error is terminal for an invocation: the binary prints it once
// with an `ERROR:` prefix and exits with status 1. Underlying causes are
// exposed through `source()` rather than repeated in the message.

use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("unknown paste service: {0} (known: {})", crate::service::names().join(", "))]
    UnknownService(String),

    #[error("{context}")]
    Io {
        context: String,
        source: std::io::Error,
    },

    #[error("request failed")]
    Transport(#[from] reqwest::Error),

    #[error("{service} put failed ({status})")]
    PutFailed {
        service: &'static str,
        status: StatusCode,
    },

    #[error("{service} get failed ({status})")]
    GetFailed {
        service: &'static str,
        status: StatusCode,
    },

    /// The provider answered 200 but refused the paste.
    #[error("{service} rejected the paste: {message}")]
    Rejected {
        service: &'static str,
        message: String,
    },

    #[error("could not decode {service} response")]
    Decode {
        service: &'static str,
        source: serde_json::Error,
    },
}

impl Error {
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Error::Io {
            context: context.into(),
            source,
        }
    }
}

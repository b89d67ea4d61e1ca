use thiserror::Error;

use crate::config::ConfigError;
use crate::export::ImportError;
use crate::store::StoreError;
use crate::sync::RemoteError;

/// Whether retrying this operation may succeed.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Transience {
    /// Retry will never help without changing inputs/state.
    Permanent,
    /// Retry may help (transient contention/outage).
    Retryable,
    /// Unknown if retry will help.
    Unknown,
}

impl Transience {
    pub fn is_retryable(self) -> bool {
        matches!(self, Transience::Retryable)
    }
}

/// Crate-level convenience error: a thin wrapper over the per-component
/// errors.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl Error {
    pub fn transience(&self) -> Transience {
        match self {
            Error::Store(StoreError::Corrupt { .. }) => Transience::Permanent,
            Error::Store(_) => Transience::Unknown,
            Error::Remote(e) => e.transience(),
            Error::Import(_) => Transience::Permanent,
            Error::Config(_) => Transience::Permanent,
        }
    }
}

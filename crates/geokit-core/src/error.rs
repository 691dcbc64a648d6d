//! # Error Types
//!
//! Errors raised by `RestrictedMap` and `DefaultsBinder`. Both variants
//! carry the offending key so callers can report or correct it.

use thiserror::Error;

/// Rejection of an operation on a `RestrictedMap`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NamespaceError<K> {
    /// The key is not registered with the map. Raised by `update`,
    /// `remove`, and `get`.
    #[error("invalid key: \"{0}\"")]
    UnknownKey(K),

    /// The key is already registered. Raised by `register`.
    #[error("key \"{0}\" already registered")]
    DuplicateKey(K),
}

impl<K> NamespaceError<K> {
    /// The key named by this error.
    pub fn key(&self) -> &K {
        match self {
            Self::UnknownKey(key) | Self::DuplicateKey(key) => key,
        }
    }

    /// Convert the carried key, e.g. from `&str` to `String`.
    pub fn map_key<T>(self, f: impl FnOnce(K) -> T) -> NamespaceError<T> {
        match self {
            Self::UnknownKey(key) => NamespaceError::UnknownKey(f(key)),
            Self::DuplicateKey(key) => NamespaceError::DuplicateKey(f(key)),
        }
    }
}

//! # geokit-core — Restricted Defaults Containers
//!
//! This crate is the leaf of the geokit workspace. It defines the
//! key-restricted map used everywhere a fixed set of named parameters has
//! to be carried around with default values: KML element parameters,
//! command-line defaults, and any caller-defined option set.
//!
//! ## Key Design Principles
//!
//! 1. **Fixed key set.** A `RestrictedMap` only accepts updates for keys it
//!    already knows. New keys must be added explicitly with `register()`.
//!    Typos in parameter names surface as `NamespaceError::UnknownKey`
//!    instead of silently creating a new entry.
//!
//! 2. **One container, no parallel bookkeeping.** The valid-key set and the
//!    value mapping are the same insertion-ordered map, so they cannot drift
//!    apart. Enumeration order is registration order.
//!
//! 3. **All-or-nothing batches.** `update()` and `register()` validate the
//!    whole batch before writing anything. A rejected batch leaves the map
//!    exactly as it was.
//!
//! 4. **Explicit binding instead of decoration.** `DefaultsBinder` holds a
//!    defaults map and a function, merges caller overrides into the
//!    defaults, and invokes the function with the merged snapshot.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `geokit-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod binder;
pub mod error;
pub mod restricted;

pub use binder::DefaultsBinder;
pub use error::NamespaceError;
pub use restricted::{Entries, Keys, RestrictedMap, Values};

/// Re-exported so callers can name snapshot types without a direct
/// `indexmap` dependency.
pub use indexmap::IndexMap;

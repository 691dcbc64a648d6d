//! # DefaultsBinder — Validated Keyword Defaults
//!
//! Binds a function to a `RestrictedMap` of default parameters. Callers
//! pass only the parameters they want to change; the binder checks them
//! against the registered keys, merges them into the defaults, and calls
//! the function with the complete parameter set.
//!
//! ```
//! use geokit_core::{DefaultsBinder, IndexMap, NamespaceError, RestrictedMap};
//!
//! let defaults = RestrictedMap::from([("a", 1), ("b", 2), ("c", 3)]);
//! let mut echo = DefaultsBinder::new(defaults, |params: IndexMap<&'static str, i32>| params);
//!
//! let merged = echo.invoke([("a", 5)]).unwrap();
//! assert_eq!(merged.get("a"), Some(&5));
//! assert_eq!(merged.get("b"), Some(&2));
//!
//! assert_eq!(echo.invoke([("z", 0)]), Err(NamespaceError::UnknownKey("z")));
//! ```

use std::fmt;
use std::hash::Hash;

use indexmap::IndexMap;

use crate::error::NamespaceError;
use crate::restricted::RestrictedMap;

/// A function paired with the defaults its parameters are drawn from.
pub struct DefaultsBinder<K, V, F> {
    defaults: RestrictedMap<K, V>,
    func: F,
}

impl<K, V, F> DefaultsBinder<K, V, F>
where
    K: Hash + Eq + Clone + fmt::Debug,
    V: Clone,
{
    /// Bind `func` to `defaults`.
    pub fn new(defaults: RestrictedMap<K, V>, func: F) -> Self {
        Self { defaults, func }
    }

    /// Apply `overrides` to the bound defaults and call the function with
    /// the merged parameter set.
    ///
    /// Overrides are written into the bound defaults and stay in effect for
    /// later calls. Use [`invoke_once`](Self::invoke_once) to leave the
    /// defaults untouched.
    ///
    /// # Errors
    ///
    /// `NamespaceError::UnknownKey` if an override names a key that is not
    /// among the defaults. The function is not called and the defaults are
    /// unchanged.
    pub fn invoke<I, R>(&mut self, overrides: I) -> Result<R, NamespaceError<K>>
    where
        I: IntoIterator<Item = (K, V)>,
        F: FnMut(IndexMap<K, V>) -> R,
    {
        self.defaults.update(overrides)?;
        Ok((self.func)(self.defaults.to_mapping()))
    }

    /// Like [`invoke`](Self::invoke), but the overrides only apply to this
    /// call.
    ///
    /// # Errors
    ///
    /// `NamespaceError::UnknownKey` for an unrecognised override.
    pub fn invoke_once<I, R>(&mut self, overrides: I) -> Result<R, NamespaceError<K>>
    where
        I: IntoIterator<Item = (K, V)>,
        F: FnMut(IndexMap<K, V>) -> R,
    {
        let mut scratch = self.defaults.clone();
        scratch.update(overrides)?;
        Ok((self.func)(scratch.into_mapping()))
    }

    /// The bound defaults.
    pub fn defaults(&self) -> &RestrictedMap<K, V> {
        &self.defaults
    }

    /// Mutable access to the bound defaults, e.g. to `register` a new
    /// parameter.
    pub fn defaults_mut(&mut self) -> &mut RestrictedMap<K, V> {
        &mut self.defaults
    }

    /// Split the binder back into its defaults and function.
    pub fn into_parts(self) -> (RestrictedMap<K, V>, F) {
        (self.defaults, self.func)
    }
}

impl<K: fmt::Debug, V: fmt::Debug, F> fmt::Debug for DefaultsBinder<K, V, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultsBinder")
            .field("defaults", &self.defaults)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Params = IndexMap<&'static str, i32>;

    fn echo_binder() -> DefaultsBinder<&'static str, i32, fn(Params) -> Params> {
        let echo: fn(Params) -> Params = |params| params;
        DefaultsBinder::new(RestrictedMap::from([("a", 1), ("b", 2), ("c", 3)]), echo)
    }

    #[test]
    fn test_invoke_without_overrides_returns_defaults() {
        let mut echo = echo_binder();
        let params = echo.invoke(std::iter::empty()).unwrap();
        assert_eq!(
            params.into_iter().collect::<Vec<_>>(),
            vec![("a", 1), ("b", 2), ("c", 3)]
        );
    }

    #[test]
    fn test_invoke_merges_overrides() {
        let mut echo = echo_binder();
        let params = echo.invoke([("a", 5)]).unwrap();
        assert_eq!(params.get("a"), Some(&5));
        assert_eq!(params.get("b"), Some(&2));
        assert_eq!(params.get("c"), Some(&3));
    }

    #[test]
    fn test_invoke_overrides_persist() {
        let mut echo = echo_binder();
        echo.invoke([("b", 20)]).unwrap();
        let params = echo.invoke(std::iter::empty()).unwrap();
        assert_eq!(params.get("b"), Some(&20));
        assert_eq!(echo.defaults().get(&"b"), Ok(&20));
    }

    #[test]
    fn test_invoke_once_does_not_persist() {
        let mut echo = echo_binder();
        let params = echo.invoke_once([("b", 20)]).unwrap();
        assert_eq!(params.get("b"), Some(&20));
        assert_eq!(echo.defaults().get(&"b"), Ok(&2));
    }

    #[test]
    fn test_unknown_override_skips_call() {
        let mut calls = 0;
        let mut binder = DefaultsBinder::new(RestrictedMap::from([("x", 0)]), |_params: Params| {
            calls += 1;
        });
        assert_eq!(binder.invoke([("z", 0)]), Err(NamespaceError::UnknownKey("z")));
        assert_eq!(binder.invoke_once([("z", 0)]), Err(NamespaceError::UnknownKey("z")));
        binder.invoke([("x", 1)]).unwrap();
        drop(binder);
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_registered_parameter_becomes_overridable() {
        let mut binder = DefaultsBinder::new(RestrictedMap::from([("x", 1)]), |params: Params| {
            params.values().sum::<i32>()
        });
        assert!(binder.invoke([("y", 2)]).is_err());
        binder.defaults_mut().register([("y", 0)]).unwrap();
        assert_eq!(binder.invoke([("y", 2)]), Ok(3));
    }

    #[test]
    fn test_into_parts() {
        let echo = echo_binder();
        let (defaults, func) = echo.into_parts();
        assert_eq!(defaults.len(), 3);
        assert_eq!(func(defaults.to_mapping()).len(), 3);
    }
}

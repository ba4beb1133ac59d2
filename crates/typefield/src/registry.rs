//! Name-keyed converter lookup handed to host matchers.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;

use crate::converter::Converter;
use crate::errors::BuildError;

/// Immutable lookup from type name to converter.
///
/// Registries are built once and read many times. To add converters, build a
/// new registry with [`Registry::extend`].
///
/// # Examples
/// ```
/// use typefield::{Registry, make_choice};
/// let registry = Registry::new([
///     make_choice("Color", ["red", "blue"])?,
///     make_choice("Size", ["S", "M", "L"])?,
/// ])?;
/// assert_eq!(registry.names().collect::<Vec<_>>(), ["Color", "Size"]);
/// assert!(registry.get("Color").is_some());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Registry<T> {
    converters: BTreeMap<String, Converter<T>>,
}

impl<T> Registry<T> {
    /// Register every converter under its name.
    ///
    /// # Errors
    /// [`BuildError::DuplicateName`] when two converters share a name.
    pub fn new<I>(converters: I) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = Converter<T>>,
    {
        Self::empty().extend(converters)
    }

    fn empty() -> Self {
        Self {
            converters: BTreeMap::new(),
        }
    }

    /// Converter registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Converter<T>> {
        self.converters.get(name)
    }

    /// Whether `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.converters.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.converters.keys().map(String::as_str)
    }

    /// Registered converters in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Converter<T>> {
        self.converters.values()
    }

    /// Number of registered converters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.converters.len()
    }

    /// Whether no converter is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }

    /// Return a registry holding these converters plus `more`.
    ///
    /// # Errors
    /// [`BuildError::DuplicateName`] when a name is already taken.
    pub fn extend<I>(mut self, more: I) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = Converter<T>>,
    {
        for converter in more {
            match self.converters.entry(converter.name().to_owned()) {
                Entry::Occupied(slot) => {
                    return Err(BuildError::DuplicateName(slot.key().clone()));
                }
                Entry::Vacant(slot) => {
                    log::debug!("registered converter `{}`", slot.key());
                    slot.insert(converter);
                }
            }
        }
        Ok(self)
    }
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> Clone for Registry<T> {
    fn clone(&self) -> Self {
        Self {
            converters: self.converters.clone(),
        }
    }
}

impl<T> fmt::Debug for Registry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.converters.values()).finish()
    }
}

impl<'a, T> IntoIterator for &'a Registry<T> {
    type Item = &'a Converter<T>;
    type IntoIter = std::collections::btree_map::Values<'a, String, Converter<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.converters.values()
    }
}

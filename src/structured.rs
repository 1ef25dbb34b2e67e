//! Keyed selector composition.

use rustc_hash::FxHashMap;

use crate::error::ConfigError;
use crate::selector::{InputFn, Selector, SelectorCreator};

/// A selector producing a keyed mapping of derived values.
///
/// Thin wrapper around an ordinary [`Selector`] whose combiner zips the
/// mapping's keys with the extracted values.
pub struct StructuredSelector<S, R> {
    inner: Selector<S, R, FxHashMap<String, R>>,
}

impl<S, R> StructuredSelector<S, R>
where
    S: Clone + PartialEq + Send + Sync + 'static,
    R: Clone + PartialEq + Send + Sync + 'static,
{
    /// Computes every keyed value for `state`.
    pub fn call(&self, state: &S) -> FxHashMap<String, R> {
        self.inner.call(state)
    }

    /// How many times the zipping combiner has run.
    pub fn recomputations(&self) -> usize {
        self.inner.recomputations()
    }

    /// Resets the recomputation counter to zero.
    pub fn reset_recomputations(&self) {
        self.inner.reset_recomputations()
    }

    /// Drops both cache layers of the underlying selector.
    pub fn clear_cache(&self) {
        self.inner.clear_cache()
    }
}

/// Composes a keyed mapping of input functions into one selector returning
/// a `key -> value` map.
///
/// Selectors can serve as mapping values via
/// [`Selector::into_input`](crate::Selector::into_input). Fails with
/// [`ConfigError::EmptyMapping`] for an empty mapping and
/// [`ConfigError::DuplicateKey`] when a key repeats.
pub fn create_structured_selector<S, R, K>(
    mapping: Vec<(K, InputFn<S, R>)>,
) -> Result<StructuredSelector<S, R>, ConfigError>
where
    S: Clone + PartialEq + Send + Sync + 'static,
    R: Clone + PartialEq + Send + Sync + 'static,
    K: Into<String>,
{
    create_structured_selector_with(&SelectorCreator::bounded(1)?, mapping)
}

/// Like [`create_structured_selector`], but builds the underlying selector
/// through `creator`.
pub fn create_structured_selector_with<S, R, K>(
    creator: &SelectorCreator<R, FxHashMap<String, R>>,
    mapping: Vec<(K, InputFn<S, R>)>,
) -> Result<StructuredSelector<S, R>, ConfigError>
where
    S: Clone + PartialEq + Send + Sync + 'static,
    R: Clone + PartialEq + Send + Sync + 'static,
    K: Into<String>,
{
    if mapping.is_empty() {
        return Err(ConfigError::EmptyMapping);
    }

    let mut keys = Vec::with_capacity(mapping.len());
    let mut inputs = Vec::with_capacity(mapping.len());
    for (key, input) in mapping {
        let key = key.into();
        if keys.contains(&key) {
            return Err(ConfigError::DuplicateKey(key));
        }
        keys.push(key);
        inputs.push(input);
    }

    let combiner = move |values: &[R]| -> FxHashMap<String, R> {
        keys.iter().cloned().zip(values.iter().cloned()).collect()
    };

    Ok(StructuredSelector { inner: creator.create(inputs, combiner)? })
}

//! Selector composition over memoized combiners.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use crate::cache::RingCache;
use crate::error::ConfigError;
use crate::memo::{Memo, Memoized, default_equality};

/// An input function: extracts one combiner argument from the state.
pub type InputFn<S, V> = Box<dyn Fn(&S) -> V + Send + Sync>;

/// A combiner: folds the extracted value list into the derived result.
pub type CombinerFn<V, R> = Box<dyn Fn(&[V]) -> R + Send + Sync>;

/// Builds the memoized core wrapping a selector's combiner.
pub type MemoFactory<V, R> =
    Box<dyn Fn(CombinerFn<V, R>) -> Box<dyn Memo<V, R> + Send + Sync> + Send + Sync>;

/// Creates a selector whose combiner is memoized over its single most
/// recent value list.
///
/// ```
/// use selecta::{InputFn, create_selector};
///
/// #[derive(Clone, PartialEq)]
/// struct State {
///     a: i64,
///     b: i64,
/// }
///
/// let inputs: Vec<InputFn<State, i64>> = vec![
///     Box::new(|state: &State| state.a),
///     Box::new(|state: &State| state.b),
/// ];
/// let sum = create_selector(inputs, |values: &[i64]| values.iter().sum::<i64>()).unwrap();
///
/// let state = State { a: 2, b: 3 };
/// assert_eq!(sum.call(&state), 5);
/// assert_eq!(sum.call(&state), 5);
/// assert_eq!(sum.recomputations(), 1);
/// ```
pub fn create_selector<S, V, R>(
    inputs: Vec<InputFn<S, V>>,
    combiner: impl Fn(&[V]) -> R + Send + Sync + 'static,
) -> Result<Selector<S, V, R>, ConfigError>
where
    S: Clone + PartialEq + Send + Sync + 'static,
    V: Clone + PartialEq + Send + Sync + 'static,
    R: Clone + Send + Sync + 'static,
{
    create_selector_with_cache_size(1, inputs, combiner)
}

/// Creates a selector whose combiner retains its `cache_size` most recent
/// distinct value lists.
pub fn create_selector_with_cache_size<S, V, R>(
    cache_size: usize,
    inputs: Vec<InputFn<S, V>>,
    combiner: impl Fn(&[V]) -> R + Send + Sync + 'static,
) -> Result<Selector<S, V, R>, ConfigError>
where
    S: Clone + PartialEq + Send + Sync + 'static,
    V: Clone + PartialEq + Send + Sync + 'static,
    R: Clone + Send + Sync + 'static,
{
    SelectorCreator::bounded(cache_size)?.create(inputs, combiner)
}

/// A reusable recipe for building selectors around a particular memoization
/// strategy.
pub struct SelectorCreator<V, R> {
    factory: MemoFactory<V, R>,
}

impl<V, R> SelectorCreator<V, R>
where
    V: Clone + Send + Sync + 'static,
    R: Clone + Send + Sync + 'static,
{
    /// Uses `factory` to build the memoized core of every created selector.
    pub fn new(factory: MemoFactory<V, R>) -> Self {
        Self { factory }
    }

    /// The standard strategy: a bounded cache of `cache_size` value lists,
    /// compared per position with `==`.
    pub fn bounded(cache_size: usize) -> Result<Self, ConfigError>
    where
        V: PartialEq,
    {
        if cache_size < 1 {
            return Err(ConfigError::CacheSize(cache_size));
        }
        Ok(Self::new(Box::new(move |combiner| {
            let equal: fn(&V, &V) -> bool = default_equality;
            Box::new(Memoized::with_validated(combiner, equal, cache_size))
        })))
    }

    /// Builds a selector from input functions and a combiner.
    ///
    /// Fails with [`ConfigError::NoInputs`] when `inputs` is empty: a
    /// selector with no inputs could never feed its combiner.
    pub fn create<S>(
        &self,
        inputs: Vec<InputFn<S, V>>,
        combiner: impl Fn(&[V]) -> R + Send + Sync + 'static,
    ) -> Result<Selector<S, V, R>, ConfigError>
    where
        S: Clone + PartialEq + Send + Sync + 'static,
    {
        if inputs.is_empty() {
            return Err(ConfigError::NoInputs);
        }
        let recomputations = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&recomputations);
        let counted: CombinerFn<V, R> = Box::new(move |values| {
            counter.fetch_add(1, Ordering::Relaxed);
            combiner(values)
        });
        Ok(Selector {
            inputs,
            combine: (self.factory)(counted),
            outer: Mutex::new(RingCache::new(1)),
            recomputations,
        })
    }
}

/// A derived-value selector.
///
/// Applies its input functions to the state and feeds the resulting value
/// list through a memoized combiner. The whole pipeline sits behind a
/// second, size-1 cache keyed on the raw state, so an immediately repeated
/// call with an equal state skips the input functions entirely.
pub struct Selector<S, V, R> {
    inputs: Vec<InputFn<S, V>>,
    combine: Box<dyn Memo<V, R> + Send + Sync>,
    outer: Mutex<RingCache<S, R>>,
    recomputations: Arc<AtomicUsize>,
}

impl<S, V, R> Selector<S, V, R>
where
    S: Clone + PartialEq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
    R: Clone + Send + Sync + 'static,
{
    /// Computes the derived value for `state`.
    pub fn call(&self, state: &S) -> R {
        let eq = default_equality::<S>;
        let mut outer = self.outer.lock();
        if let Some(result) = outer.lookup(std::slice::from_ref(state), &eq) {
            return result.clone();
        }
        let values: Vec<V> = self.inputs.iter().map(|input| input(state)).collect();
        let result = self.combine.call(&values);
        outer.insert(vec![state.clone()], result.clone());
        result
    }

    /// How many times the combiner has actually run.
    pub fn recomputations(&self) -> usize {
        self.recomputations.load(Ordering::Relaxed)
    }

    /// Resets the recomputation counter to zero without touching the caches.
    pub fn reset_recomputations(&self) {
        self.recomputations.store(0, Ordering::Relaxed);
    }

    /// Drops both cache layers, leaving the recomputation counter alone.
    /// The next call recomputes.
    pub fn clear_cache(&self) {
        self.outer.lock().clear();
        self.combine.clear_cache();
    }

    /// Adapts this selector into an input function for another selector.
    pub fn into_input(self) -> InputFn<S, R> {
        Box::new(move |state| self.call(state))
    }
}
